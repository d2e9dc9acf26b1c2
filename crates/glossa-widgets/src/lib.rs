#![forbid(unsafe_code)]

//! Display trees and their in-place translation for Glossa.
//!
//! # Role in Glossa
//! `glossa-widgets` owns the consumer-facing node model ([`DisplayNode`])
//! and the two operations that run over it: flattening a tree into the
//! nodes to visit ([`walk::enumerate`]) and replacing `{$key$}` markers in
//! place ([`Translator`]).
//!
//! # How it fits in the system
//! Resolution comes from `glossa-i18n`; this crate never loads catalogs.
//! The `glossa` facade wires both together with settings and logging.

pub mod error;
pub mod node;
pub mod selection;
pub mod translate;
pub mod walk;

pub use error::ContentError;
pub use node::{Caption, Content, DisplayNode, Item, NodeRef, Translatable};
pub use selection::Choices;
pub use translate::{ApplyReport, Translator};
pub use walk::enumerate;
