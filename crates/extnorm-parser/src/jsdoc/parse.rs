//! Doc-comment text to `JsDocInfo`.

use super::{JsDocInfo, JsDocParam, JsDocTag, TypeExpr};

/// Parse the text between `/**` and `*/`.
pub fn parse_jsdoc(text: &str) -> JsDocInfo {
    let cleaned = clean_lines(text);
    let mut info = JsDocInfo::default();

    let mut segments = split_tags(&cleaned).into_iter();
    if let Some(description) = segments.next() {
        info.description = description.trim().to_string();
    }
    for segment in segments {
        apply_tag(&mut info, segment);
    }
    info
}

/// Parse a type expression as written inside `{...}`.
pub fn parse_type_expr(text: &str) -> TypeExpr {
    let text = text.trim();
    if let Some(rest) = text.strip_prefix('!') {
        return TypeExpr::NonNull(Box::new(parse_type_expr(rest)));
    }
    if let Some(rest) = text.strip_prefix('?') {
        if !rest.is_empty() {
            return TypeExpr::Nullable(Box::new(parse_type_expr(rest)));
        }
    }
    if let Some(rest) = text.strip_suffix('=') {
        return TypeExpr::Optional(Box::new(parse_type_expr(rest)));
    }
    if !text.is_empty()
        && text
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '$' | '.'))
    {
        return TypeExpr::Named(text.to_string());
    }
    TypeExpr::Raw(text.to_string())
}

/// Strip the leading `*` gutter from each line.
fn clean_lines(text: &str) -> String {
    text.lines()
        .map(|line| {
            let line = line.trim_start();
            line.strip_prefix('*').unwrap_or(line).trim()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Split into the leading description followed by one segment per tag.
///
/// A tag starts at `@` outside braces, at the start of the text or after whitespace.
fn split_tags(text: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut depth = 0u32;
    let mut start = 0;
    let mut prev_is_space = true;
    for (i, ch) in text.char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            '@' if depth == 0 && prev_is_space => {
                segments.push(&text[start..i]);
                start = i;
            }
            _ => {}
        }
        prev_is_space = ch.is_whitespace();
    }
    segments.push(&text[start..]);
    segments
}

/// Split a leading `{...}` from `body`.
fn take_braced(body: &str) -> (Option<&str>, &str) {
    let body = body.trim_start();
    if !body.starts_with('{') {
        return (None, body);
    }
    let mut depth = 0u32;
    for (i, ch) in body.char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return (Some(&body[1..i]), body[i + 1..].trim_start());
                }
            }
            _ => {}
        }
    }
    (Some(&body[1..]), "")
}

fn split_word(text: &str) -> (&str, &str) {
    let text = text.trim_start();
    match text.find(char::is_whitespace) {
        Some(i) => (&text[..i], text[i..].trim()),
        None => (text, ""),
    }
}

fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn apply_tag(info: &mut JsDocInfo, segment: &str) {
    let segment = segment.trim().trim_start_matches('@');
    let (name, body) = split_word(segment);
    match name {
        "constructor" => info.constructor = true,
        "param" => {
            let (ty, rest) = take_braced(body);
            let (param_name, description) = split_word(rest);
            info.params.push(JsDocParam {
                name: param_name.to_string(),
                type_expr: ty.map(parse_type_expr),
                description: collapse(description),
            });
        }
        "extends" | "base" => {
            let (ty, rest) = take_braced(body);
            info.base_type = match ty {
                Some(ty) => Some(parse_type_expr(ty)),
                None => {
                    let (word, _) = split_word(rest);
                    (!word.is_empty()).then(|| parse_type_expr(word))
                }
            };
        }
        "suppress" => {
            let (ty, _) = take_braced(body);
            if let Some(list) = ty {
                info.suppressions.extend(
                    list.split([',', '|'])
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string),
                );
            }
        }
        "type" => {
            let (ty, rest) = take_braced(body);
            info.type_expr = Some(match ty {
                Some(ty) => parse_type_expr(ty),
                None => parse_type_expr(rest),
            });
        }
        "return" | "returns" => match take_braced(body) {
            (Some(ty), rest) => {
                info.return_type = Some(parse_type_expr(ty));
                info.return_description = collapse(rest);
            }
            (None, rest) => info.other_tags.push(JsDocTag {
                name: name.to_string(),
                body: collapse(rest),
            }),
        },
        _ => info.other_tags.push(JsDocTag {
            name: name.to_string(),
            body: collapse(body),
        }),
    }
}
