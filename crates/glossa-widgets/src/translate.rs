#![forbid(unsafe_code)]

//! In-place translation of a display tree.
//!
//! [`Translator::apply`] walks the tree (see [`crate::walk`]) and, for every
//! node, replaces each marker found in its content slot or its items with the
//! resolved text. Slots that are not markers, or that resolve to themselves,
//! are left untouched.
//!
//! A node whose content misbehaves (a [`Translatable`] returning an error or
//! panicking, or a node already borrowed elsewhere) is logged and skipped.
//! Slots translated before the failure keep their new text; the rest of the
//! tree is still processed.

use std::panic::{AssertUnwindSafe, catch_unwind};

use glossa_i18n::KeyResolver;

use crate::error::ContentError;
use crate::node::{Content, DisplayNode, Item, NodeRef, Translatable};
use crate::walk;

/// What one [`Translator::apply_with_report`] call did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// Entries produced by the walk (shared nodes count once per path).
    pub nodes_visited: usize,
    /// Content slots and items whose text was replaced.
    pub slots_translated: usize,
    /// Nodes skipped because of a content failure.
    pub nodes_failed: usize,
}

/// Applies a resolver's translations to display trees.
#[derive(Debug, Clone, Copy)]
pub struct Translator<'r> {
    resolver: &'r KeyResolver,
}

impl<'r> Translator<'r> {
    #[must_use]
    pub fn new(resolver: &'r KeyResolver) -> Self {
        Self { resolver }
    }

    #[must_use]
    pub fn resolver(&self) -> &'r KeyResolver {
        self.resolver
    }

    /// Translate every marker reachable from `root`, in place.
    pub fn apply(&self, root: &NodeRef) {
        self.apply_with_report(root);
    }

    /// [`apply`](Self::apply), returning counts.
    pub fn apply_with_report(&self, root: &NodeRef) -> ApplyReport {
        let span = tracing::debug_span!(
            "glossa.apply",
            language = %self.resolver.language(),
            nodes_visited = tracing::field::Empty,
            slots_translated = tracing::field::Empty,
        );
        let _guard = span.enter();

        let mut report = ApplyReport::default();
        for node in walk::enumerate(root) {
            report.nodes_visited += 1;
            match self.translate_node(&node) {
                Ok(count) => report.slots_translated += count,
                Err(err) => {
                    report.nodes_failed += 1;
                    tracing::warn!(
                        target: "glossa.translate",
                        node = %walk::describe(&node),
                        error = %err,
                        "skipping node after content failure"
                    );
                }
            }
        }

        span.record("nodes_visited", report.nodes_visited);
        span.record("slots_translated", report.slots_translated);
        tracing::debug!(
            target: "glossa.translate",
            nodes_visited = report.nodes_visited,
            slots_translated = report.slots_translated,
            nodes_failed = report.nodes_failed,
            "tree translated"
        );
        report
    }

    fn translate_node(&self, node: &NodeRef) -> Result<usize, ContentError> {
        let outcome = catch_unwind(AssertUnwindSafe(|| -> Result<usize, ContentError> {
            let mut current = node
                .try_borrow_mut()
                .map_err(|_| ContentError::new("node is borrowed elsewhere"))?;
            self.translate_slots(&mut current)
        }));
        match outcome {
            Ok(result) => result,
            Err(payload) => Err(ContentError::new(format!(
                "content panicked: {}",
                panic_message(payload.as_ref())
            ))),
        }
    }

    fn translate_slots(&self, node: &mut DisplayNode) -> Result<usize, ContentError> {
        let mut translated = 0;

        if let Some(content) = node.content_mut() {
            let changed = match content {
                Content::Text(text) => self.translate_text(text),
                Content::Translatable(value) => self.translate_capability(&mut **value)?,
            };
            translated += usize::from(changed);
        }

        if let Some(items) = node.items_mut() {
            for item in items.iter_mut() {
                let changed = match item {
                    Item::Text(text) => self.translate_text(text),
                    Item::Translatable(value) => self.translate_capability(&mut **value)?,
                    Item::Node(_) | Item::Other(_) => false,
                };
                translated += usize::from(changed);
            }
        }

        Ok(translated)
    }

    fn translate_text(&self, text: &mut String) -> bool {
        match self.resolver.try_translate(text) {
            Some(output) => {
                *text = output;
                true
            }
            None => false,
        }
    }

    fn translate_capability(&self, value: &mut dyn Translatable) -> Result<bool, ContentError> {
        let current = value.translatable_text()?;
        match self.resolver.try_translate(&current) {
            Some(output) => {
                value.set_translatable_text(output)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        *s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "<non-string panic payload>"
    }
}
