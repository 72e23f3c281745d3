use super::printer::Printer;
use extnorm_parser::JsDocInfo;
use std::fmt::Write as _;

impl Printer<'_> {
    pub(super) fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }

    /// Write `s` as a double-quoted string literal.
    pub(super) fn write_quoted(&mut self, s: &str) {
        self.output.push('"');
        for c in s.chars() {
            match c {
                '"' => self.output.push_str("\\\""),
                '\\' => self.output.push_str("\\\\"),
                '\n' => self.output.push_str("\\n"),
                '\r' => self.output.push_str("\\r"),
                '\t' => self.output.push_str("\\t"),
                '\0' => self.output.push_str("\\0"),
                '\u{2028}' => self.output.push_str("\\u2028"),
                '\u{2029}' => self.output.push_str("\\u2029"),
                c if (c as u32) < 0x20 || c == '\x7F' => {
                    let _ = write!(self.output, "\\u{:04X}", c as u32);
                }
                _ => self.output.push(c),
            }
        }
        self.output.push('"');
    }

    pub(super) fn write_line(&mut self) {
        self.output.push('\n');
    }

    pub(super) fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.output.push_str(self.indent_str);
        }
    }

    pub(super) const fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    pub(super) const fn decrease_indent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    /// Doc comment on its own line(s) at the current indentation,
    /// followed by the indentation for the next line.
    pub(super) fn emit_leading_jsdoc(&mut self, info: &JsDocInfo) {
        let lines = info.lines();
        match lines.as_slice() {
            [] => return,
            [line] => {
                self.write("/** ");
                self.write(line);
                self.write(" */");
            }
            _ => {
                self.write("/**");
                for line in &lines {
                    self.write_line();
                    self.write_indent();
                    if line.is_empty() {
                        self.write(" *");
                    } else {
                        self.write(" * ");
                        self.write(line);
                    }
                }
                self.write_line();
                self.write_indent();
                self.write(" */");
            }
        }
        self.write_line();
        self.write_indent();
    }

    /// Doc comment inside an expression: `/** a b */ `.
    pub(super) fn emit_inline_jsdoc(&mut self, info: &JsDocInfo) {
        let lines = info.lines();
        if lines.is_empty() {
            return;
        }
        self.write("/** ");
        self.write(&lines.join(" "));
        self.write(" */ ");
    }
}
