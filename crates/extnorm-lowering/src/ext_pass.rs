//! The Ext class-definition pass.
//!
//! # Phases
//!
//! 1. **Collect**: one post-order traversal with shared access to the arena.
//!    Every node is matched against the Ext shapes; matches that pass
//!    verification are queued, failures are reported and dropped.
//! 2. **Rewrite**: the queues are drained in a fixed order:
//!    - `extend` keys annotate their define call's doc with `@extends`,
//!    - named defines become a constructor plus a prototype assignment,
//!    - anonymous defines become a free-called IIFE returning a constructor,
//!    - create calls get their class name string replaced by a reference.
//!
//! Rewrites move existing subtrees instead of copying them, so a queued node
//! nested inside another queued node's config is still reachable from its
//! own parent when its turn comes.

use extnorm_common::{LanguageMode, StyleWarning};
use extnorm_emitter::Printer;
use extnorm_parser::syntax::{NodeTraversal, PostOrderCallback};
use extnorm_parser::{JsDocInfo, NodeArena, NodeIndex};
use rustc_hash::FxHashMap;
use tracing::{debug, trace, warn};

use crate::host::PassHost;
use crate::matcher::{ExtCall, is_extend_key, match_ext_call};
use crate::rewriter;
use crate::verifier::{
    CreateUsage, DefineContext, VerifyError, verify_anonymous_define, verify_create, verify_define,
    verify_extend,
};

/// Framework root identifier used when none is configured.
pub const DEFAULT_EXT_BASE: &str = "Ext";

/// `@suppress {extCreate}` silences the non-standard create warning.
pub const CREATE_SUPPRESSION: &str = "extCreate";

/// Shown in the create warning when no class name is passed.
const MISSING_ARGUMENT_TEXT: &str = "undefined";

/// Prefix of the temporaries holding anonymous class constructors.
pub const ANONYMOUS_CLASS_PREFIX: &str = "$extnorm$anon$";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtPassOptions {
    /// The framework root identifier, e.g. `Ext`.
    pub ext_base: String,
    /// Reject named defines outside top-level statements.
    pub require_file_scope: bool,
}

impl Default for ExtPassOptions {
    fn default() -> Self {
        ExtPassOptions {
            ext_base: DEFAULT_EXT_BASE.to_string(),
            require_file_scope: false,
        }
    }
}

/// Verified matches in traversal post-order.
#[derive(Debug, Default)]
struct Worklists {
    /// `extend` property assignments.
    extends: Vec<NodeIndex>,
    defines: Vec<NodeIndex>,
    anonymous_defines: Vec<NodeIndex>,
    creates: Vec<NodeIndex>,
}

impl Worklists {
    fn is_empty(&self) -> bool {
        self.extends.is_empty()
            && self.defines.is_empty()
            && self.anonymous_defines.is_empty()
            && self.creates.is_empty()
    }
}

pub struct ExtPass<'h, H: PassHost + ?Sized> {
    host: &'h mut H,
    ext_base: String,
    require_file_scope: bool,
    /// Suffix of the next anonymous class temporary.
    next_anonymous_id: u32,
}

impl<'h, H: PassHost + ?Sized> ExtPass<'h, H> {
    pub fn new(host: &'h mut H, options: ExtPassOptions) -> Self {
        ExtPass {
            host,
            ext_base: options.ext_base,
            require_file_scope: options.require_file_scope,
            next_anonymous_id: 0,
        }
    }

    pub fn ext_base(&self) -> &str {
        &self.ext_base
    }

    /// Rewrite every Ext class definition under `root` in place.
    ///
    /// `externs` is accepted for symmetry with other passes; declarations
    /// in it are never rewritten.
    pub fn process(&mut self, externs: Option<&NodeArena>, arena: &mut NodeArena, root: NodeIndex) {
        debug!(
            file = arena.file_name(),
            externs = externs.map(NodeArena::file_name),
            ext_base = %self.ext_base,
            "ext pass: start"
        );

        let work = self.collect(arena, root);
        debug!(
            extends = work.extends.len(),
            defines = work.defines.len(),
            anonymous_defines = work.anonymous_defines.len(),
            creates = work.creates.len(),
            "ext pass: collected"
        );
        if work.is_empty() {
            return;
        }

        // Define docs as written, before `@extends` is merged in.
        let mut original_docs: FxHashMap<NodeIndex, Option<JsDocInfo>> = FxHashMap::default();

        for key in work.extends {
            if rewriter::annotate_extends(arena, key, &mut original_docs) {
                trace!(key = key.0, "annotated extends");
                self.host.report_code_change();
            }
        }

        for call in work.defines {
            let original = original_docs
                .remove(&call)
                .unwrap_or_else(|| arena.jsdoc(call).cloned());
            if rewriter::replace_define(arena, call, original) {
                trace!(call = call.0, "rewrote named define");
                self.host.report_code_change();
            }
        }

        for call in work.anonymous_defines {
            let original = original_docs
                .remove(&call)
                .unwrap_or_else(|| arena.jsdoc(call).cloned());
            let temp_name = self.next_anonymous_name();
            if rewriter::replace_anonymous_define(arena, call, &temp_name, original) {
                trace!(call = call.0, temp = %temp_name, "rewrote anonymous define");
                self.host.report_code_change();
            }
        }

        for call in work.creates {
            if rewriter::replace_create(arena, call) {
                trace!(call = call.0, "rewrote create");
                self.host.report_code_change();
            }
        }
    }

    fn collect(&mut self, arena: &NodeArena, root: NodeIndex) -> Worklists {
        let mut collector = Collector {
            ext_base: &self.ext_base,
            context: DefineContext {
                language_mode: self.host.language_mode(),
                require_file_scope: self.require_file_scope,
            },
            host: &mut *self.host,
            work: Worklists::default(),
        };
        NodeTraversal::traverse(arena, root, &mut collector);
        collector.work
    }

    fn next_anonymous_name(&mut self) -> String {
        let name = format!("{ANONYMOUS_CLASS_PREFIX}{}", self.next_anonymous_id);
        self.next_anonymous_id += 1;
        name
    }
}

struct Collector<'p, H: PassHost + ?Sized> {
    ext_base: &'p str,
    context: DefineContext,
    host: &'p mut H,
    work: Worklists,
}

impl<H: PassHost + ?Sized> Collector<'_, H> {
    fn report(&mut self, t: &NodeTraversal<'_>, error: &VerifyError) {
        debug!(file = t.source_name(), %error, "ext pass: dropped match");
        self.host.report(error.to_diagnostic(t, self.ext_base));
    }

    fn language_mode(&self) -> LanguageMode {
        self.context.language_mode
    }

    fn collect_create(&mut self, t: &NodeTraversal<'_>, call: NodeIndex, parent: NodeIndex) {
        let arena = t.arena();
        match verify_create(arena, call, self.language_mode()) {
            CreateUsage::Literal => self.work.creates.push(call),
            CreateUsage::Dynamic => trace!(call = call.0, "create with computed name left alone"),
            CreateUsage::NonStandard => {
                let suppressed = [call, parent, arena.parent(parent)]
                    .into_iter()
                    .filter_map(|n| arena.jsdoc(n))
                    .any(|info| info.is_suppressed(CREATE_SUPPRESSION));
                if suppressed {
                    trace!(call = call.0, "non-standard create suppressed");
                    return;
                }
                let argument = arena.child(call, 1);
                let argument_text = if argument.is_some() {
                    Printer::print_node(arena, argument)
                } else {
                    MISSING_ARGUMENT_TEXT.to_string()
                };
                let message = format!("Usage of {}.create is not standard: {argument_text}", self.ext_base);
                warn!(file = t.source_name(), "{message}");
                let at = if argument.is_some() { argument } else { call };
                self.host.warn_style(StyleWarning {
                    file: t.source_name().to_string(),
                    start: arena.get(at).map_or(0, |n| n.pos),
                    message,
                });
            }
        }
    }
}

impl<H: PassHost + ?Sized> PostOrderCallback for Collector<'_, H> {
    fn visit(&mut self, t: &NodeTraversal<'_>, n: NodeIndex, parent: NodeIndex) {
        let arena = t.arena();
        if is_extend_key(arena, n) {
            if verify_extend(arena, n, self.ext_base, self.context).is_some() {
                self.work.extends.push(n);
            }
            return;
        }

        let Some(shape) = match_ext_call(arena, n, self.ext_base) else {
            return;
        };
        match shape {
            ExtCall::NamedDefine => match verify_define(arena, n, self.context) {
                Ok(()) => self.work.defines.push(n),
                Err(error) => self.report(t, &error),
            },
            ExtCall::AnonymousDefine => match verify_anonymous_define(arena, n) {
                Ok(()) => self.work.anonymous_defines.push(n),
                Err(error) => self.report(t, &error),
            },
            ExtCall::Create => self.collect_create(t, n, parent),
        }
    }
}
