#![forbid(unsafe_code)]

//! Display-node model.
//!
//! A [`DisplayNode`] carries up to three independent capabilities:
//!
//! - a single **content** slot ([`Content`]): literal text or a
//!   [`Translatable`] object;
//! - an **items** collection ([`Item`]): per-index text, translatable
//!   objects, nested nodes, or opaque values that are ignored;
//! - a **children** list: nested nodes of a panel-like container.
//!
//! Any combination is allowed; a titled list has both content and items.
//! Nodes are shared through [`NodeRef`] so the same node may sit in two
//! containers at once.
//!
//! # Example
//!
//! ```
//! use glossa_widgets::node::{DisplayNode, Item};
//!
//! let menu = DisplayNode::list(["{$menu.open$}", "{$menu.quit$}"])
//!     .named("menu")
//!     .into_ref();
//! let root = DisplayNode::panel([DisplayNode::label("{$title$}").into_ref(), menu])
//!     .into_ref();
//!
//! assert_eq!(root.borrow().children().map(|c| c.len()), Some(2));
//! ```

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::error::ContentError;

/// Shared handle to a node.
pub type NodeRef = Rc<RefCell<DisplayNode>>;

/// Content with a single mutable text property.
///
/// Implementations may fail either way; the translator logs the failure and
/// moves on to the next node.
pub trait Translatable: fmt::Debug {
    /// Current text.
    fn translatable_text(&self) -> Result<String, ContentError>;

    /// Replace the text.
    fn set_translatable_text(&mut self, text: String) -> Result<(), ContentError>;
}

/// Plain [`Translatable`] holding a string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Caption {
    text: String,
}

impl Caption {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Translatable for Caption {
    fn translatable_text(&self) -> Result<String, ContentError> {
        Ok(self.text.clone())
    }

    fn set_translatable_text(&mut self, text: String) -> Result<(), ContentError> {
        self.text = text;
        Ok(())
    }
}

/// The single content slot of a node.
#[derive(Debug)]
pub enum Content {
    Text(String),
    Translatable(Box<dyn Translatable>),
}

impl Content {
    /// Wrap a translatable object.
    #[must_use]
    pub fn translatable(value: impl Translatable + 'static) -> Self {
        Self::Translatable(Box::new(value))
    }

    /// The literal text, if this is a text slot.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Translatable(_) => None,
        }
    }

    /// Text of either kind. Translatable failures surface as `Err`.
    pub fn read_text(&self) -> Result<String, ContentError> {
        match self {
            Self::Text(text) => Ok(text.clone()),
            Self::Translatable(value) => value.translatable_text(),
        }
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// One entry of an items collection.
#[derive(Debug)]
pub enum Item {
    Text(String),
    Translatable(Box<dyn Translatable>),
    /// A child-typed element; visited by the walker, never translated as text.
    Node(NodeRef),
    /// Anything else. Ignored by translation.
    Other(Box<dyn Any>),
}

impl Item {
    #[must_use]
    pub fn translatable(value: impl Translatable + 'static) -> Self {
        Self::Translatable(Box::new(value))
    }

    #[must_use]
    pub fn other(value: impl Any) -> Self {
        Self::Other(Box::new(value))
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_node(&self) -> Option<&NodeRef> {
        match self {
            Self::Node(node) => Some(node),
            _ => None,
        }
    }

    /// Downcast an opaque item.
    #[must_use]
    pub fn downcast_other<T: Any>(&self) -> Option<&T> {
        match self {
            Self::Other(value) => value.downcast_ref(),
            _ => None,
        }
    }
}

impl From<&str> for Item {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for Item {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<NodeRef> for Item {
    fn from(node: NodeRef) -> Self {
        Self::Node(node)
    }
}

impl From<Caption> for Item {
    fn from(caption: Caption) -> Self {
        Self::translatable(caption)
    }
}

/// A node of the consumer's display tree.
#[derive(Default)]
pub struct DisplayNode {
    name: Option<String>,
    content: Option<Content>,
    items: Option<Vec<Item>>,
    children: Option<Vec<NodeRef>>,
}

impl DisplayNode {
    /// A node with no capabilities.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A leaf holding literal text.
    #[must_use]
    pub fn label(text: impl Into<String>) -> Self {
        Self::new().with_text(text)
    }

    /// An items-bearing node.
    #[must_use]
    pub fn list<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Item>,
    {
        Self::new().with_items(items)
    }

    /// A panel-like container.
    #[must_use]
    pub fn panel(children: impl IntoIterator<Item = NodeRef>) -> Self {
        Self::new().with_children(children)
    }

    /// Name used in diagnostics.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_content(mut self, content: Content) -> Self {
        self.content = Some(content);
        self
    }

    #[must_use]
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_content(Content::Text(text.into()))
    }

    #[must_use]
    pub fn with_translatable(self, value: impl Translatable + 'static) -> Self {
        self.with_content(Content::translatable(value))
    }

    /// Give the node an items collection (replacing any previous one).
    #[must_use]
    pub fn with_items<I>(mut self, items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Item>,
    {
        self.items = Some(items.into_iter().map(Into::into).collect());
        self
    }

    /// Append one item, creating the collection if needed.
    #[must_use]
    pub fn item(mut self, item: impl Into<Item>) -> Self {
        self.push_item(item);
        self
    }

    /// Give the node a children list (replacing any previous one).
    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = NodeRef>) -> Self {
        self.children = Some(children.into_iter().collect());
        self
    }

    /// Append one child, creating the list if needed.
    #[must_use]
    pub fn child(mut self, child: NodeRef) -> Self {
        self.push_child(child);
        self
    }

    /// Wrap in a shared handle.
    #[must_use]
    pub fn into_ref(self) -> NodeRef {
        Rc::new(RefCell::new(self))
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn content(&self) -> Option<&Content> {
        self.content.as_ref()
    }

    pub fn content_mut(&mut self) -> Option<&mut Content> {
        self.content.as_mut()
    }

    /// Literal text of the content slot.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.content.as_ref().and_then(Content::as_text)
    }

    pub fn set_content(&mut self, content: Option<Content>) {
        self.content = content;
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.content = Some(Content::Text(text.into()));
    }

    #[must_use]
    pub fn items(&self) -> Option<&[Item]> {
        self.items.as_deref()
    }

    pub fn items_mut(&mut self) -> Option<&mut Vec<Item>> {
        self.items.as_mut()
    }

    /// The items collection, created empty if the node had none.
    pub fn items_or_insert(&mut self) -> &mut Vec<Item> {
        self.items.get_or_insert_with(Vec::new)
    }

    pub fn push_item(&mut self, item: impl Into<Item>) {
        self.items_or_insert().push(item.into());
    }

    #[must_use]
    pub fn children(&self) -> Option<&[NodeRef]> {
        self.children.as_deref()
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<NodeRef>> {
        self.children.as_mut()
    }

    pub fn push_child(&mut self, child: NodeRef) {
        self.children.get_or_insert_with(Vec::new).push(child);
    }
}

// Shallow: children may be shared or cyclic.
impl fmt::Debug for DisplayNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisplayNode")
            .field("name", &self.name)
            .field("content", &self.content)
            .field("items", &self.items.as_ref().map(Vec::len))
            .field("children", &self.children.as_ref().map(Vec::len))
            .finish()
    }
}
