#![forbid(unsafe_code)]

//! Filling selection lists (combo boxes, pickers) from values.
//!
//! ```
//! use glossa_widgets::node::DisplayNode;
//! use glossa_widgets::selection::Choices;
//!
//! #[derive(Debug, Clone, Copy, PartialEq)]
//! enum Quality { Low, Medium, High }
//!
//! impl Choices for Quality {
//!     fn choices() -> Vec<Self> {
//!         vec![Self::Low, Self::Medium, Self::High]
//!     }
//! }
//!
//! impl From<Quality> for glossa_widgets::node::Item {
//!     fn from(q: Quality) -> Self {
//!         let key = match q {
//!             Quality::Low => "{$quality.low$}",
//!             Quality::Medium => "{$quality.medium$}",
//!             Quality::High => "{$quality.high$}",
//!         };
//!         key.into()
//!     }
//! }
//!
//! let mut picker = DisplayNode::new();
//! picker.fill_choices_excluding(&[Quality::Medium]);
//! let texts: Vec<_> = picker.items().unwrap().iter().filter_map(|i| i.as_text()).collect();
//! assert_eq!(texts, ["{$quality.low$}", "{$quality.high$}"]);
//! ```

use crate::node::{DisplayNode, Item};

/// A closed set of values a picker can offer, in display order.
pub trait Choices: Sized {
    fn choices() -> Vec<Self>;
}

impl DisplayNode {
    /// Replace the items collection with `values`.
    pub fn fill_items<I>(&mut self, values: I)
    where
        I: IntoIterator,
        I::Item: Into<Item>,
    {
        let items = self.items_or_insert();
        items.clear();
        items.extend(values.into_iter().map(Into::into));
    }

    /// Replace the items collection with `values`, skipping any equal to an
    /// exclusion.
    pub fn fill_items_excluding<I, T>(&mut self, values: I, exclusions: &[T])
    where
        I: IntoIterator<Item = T>,
        T: PartialEq + Into<Item>,
    {
        self.fill_items(
            values
                .into_iter()
                .filter(|value| !exclusions.contains(value)),
        );
    }

    /// Replace the items collection with every choice of `T`.
    pub fn fill_choices<T>(&mut self)
    where
        T: Choices + Into<Item>,
    {
        self.fill_items(T::choices());
    }

    /// Replace the items collection with every choice of `T` not excluded.
    pub fn fill_choices_excluding<T>(&mut self, exclusions: &[T])
    where
        T: Choices + PartialEq + Into<Item>,
    {
        self.fill_items_excluding(T::choices(), exclusions);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Side {
        Left,
        Center,
        Right,
    }

    impl Choices for Side {
        fn choices() -> Vec<Self> {
            vec![Self::Left, Self::Center, Self::Right]
        }
    }

    impl From<Side> for Item {
        fn from(side: Side) -> Self {
            Item::other(side)
        }
    }

    fn sides(node: &DisplayNode) -> Vec<Side> {
        node.items()
            .expect("items")
            .iter()
            .filter_map(|item| item.downcast_other::<Side>().copied())
            .collect()
    }

    #[test]
    fn fill_replaces_previous_items() {
        let mut node = DisplayNode::list(["old"]);
        node.fill_items(["{$a$}", "{$b$}"]);
        let texts: Vec<_> = node
            .items()
            .expect("items")
            .iter()
            .filter_map(Item::as_text)
            .collect();
        assert_eq!(texts, vec!["{$a$}", "{$b$}"]);
    }

    #[test]
    fn fill_creates_collection_on_bare_node() {
        let mut node = DisplayNode::label("keep");
        node.fill_items(Vec::<String>::new());
        assert_eq!(node.items().map(<[Item]>::len), Some(0));
        assert_eq!(node.text(), Some("keep"));
    }

    #[test]
    fn exclusions_are_skipped() {
        let mut node = DisplayNode::new();
        node.fill_items_excluding(vec!["x", "y", "z"], &["y"]);
        assert_eq!(node.items().map(<[Item]>::len), Some(2));
    }

    #[test]
    fn choices_in_declared_order() {
        let mut node = DisplayNode::new();
        node.fill_choices::<Side>();
        assert_eq!(sides(&node), vec![Side::Left, Side::Center, Side::Right]);
        node.fill_choices_excluding(&[Side::Left, Side::Right]);
        assert_eq!(sides(&node), vec![Side::Center]);
    }
}
