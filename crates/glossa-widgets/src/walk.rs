#![forbid(unsafe_code)]

//! Flatten a display tree into the list of nodes to translate.
//!
//! Order is post-order: a node's item nodes first, then its children, then
//! the node itself. A node reachable along two containment paths is listed
//! twice; translating it again is harmless because the first pass already
//! replaced its markers.
//!
//! An edge that leads back to a node on the current descent path would
//! recurse forever. The walker logs it and does not follow it, so cyclic
//! trees still terminate.

use std::cell::RefCell;
use std::rc::Rc;

use ahash::AHashSet;

use crate::node::{DisplayNode, Item, NodeRef};

type NodeId = *const RefCell<DisplayNode>;

/// Every node reachable from `root`, including `root`, descendants first.
#[must_use]
pub fn enumerate(root: &NodeRef) -> Vec<NodeRef> {
    let mut out = Vec::new();
    let mut path = AHashSet::new();
    visit(root, &mut path, &mut out);
    out
}

fn visit(node: &NodeRef, path: &mut AHashSet<NodeId>, out: &mut Vec<NodeRef>) {
    let id = Rc::as_ptr(node);
    if !path.insert(id) {
        tracing::warn!(
            target: "glossa.walk",
            node = %describe(node),
            depth = path.len(),
            "cycle detected; not descending into ancestor again"
        );
        return;
    }

    match node.try_borrow() {
        Ok(current) => {
            if let Some(items) = current.items() {
                for child in items.iter().filter_map(Item::as_node) {
                    visit(child, path, out);
                }
            }
            if let Some(children) = current.children() {
                for child in children {
                    visit(child, path, out);
                }
            }
            drop(current);
            out.push(Rc::clone(node));
        }
        Err(_) => tracing::warn!(
            target: "glossa.walk",
            depth = path.len(),
            "node is mutably borrowed elsewhere; skipping it and its descendants"
        ),
    }

    path.remove(&id);
}

/// Name of a node for log lines.
pub(crate) fn describe(node: &NodeRef) -> String {
    match node.try_borrow() {
        Ok(n) => n.name().unwrap_or("<unnamed>").to_owned(),
        Err(_) => "<borrowed>".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;

    use super::*;

    fn names(nodes: &[NodeRef]) -> Vec<String> {
        nodes.iter().map(describe).collect()
    }

    fn leaf(name: &str) -> NodeRef {
        DisplayNode::label(name).named(name).into_ref()
    }

    #[test]
    fn single_node_includes_root() {
        let root = leaf("root");
        assert_eq!(names(&enumerate(&root)), vec!["root"]);
    }

    #[test]
    fn items_then_children_then_self() {
        let root = DisplayNode::new()
            .named("root")
            .with_items([Item::from("text"), Item::Node(leaf("i1")), Item::Node(leaf("i2"))])
            .with_children([leaf("c1"), leaf("c2")])
            .into_ref();
        assert_eq!(names(&enumerate(&root)), vec!["i1", "i2", "c1", "c2", "root"]);
    }

    #[test]
    fn post_order_through_nesting() {
        let inner = DisplayNode::panel([leaf("a"), leaf("b")]).named("inner").into_ref();
        let root = DisplayNode::panel([inner, leaf("c")]).named("root").into_ref();
        assert_eq!(names(&enumerate(&root)), vec!["a", "b", "inner", "c", "root"]);
    }

    #[test]
    fn shared_node_is_listed_once_per_path() {
        let shared = leaf("shared");
        let root = DisplayNode::panel([Rc::clone(&shared)])
            .named("root")
            .item(Rc::clone(&shared))
            .into_ref();
        assert_eq!(names(&enumerate(&root)), vec!["shared", "shared", "root"]);
    }

    #[test]
    #[traced_test]
    fn cycles_terminate() {
        let a = DisplayNode::new().named("a").into_ref();
        let b = DisplayNode::panel([Rc::clone(&a)]).named("b").into_ref();
        a.borrow_mut().push_child(Rc::clone(&b));

        assert_eq!(names(&enumerate(&a)), vec!["b", "a"]);
        assert!(logs_contain("cycle detected"));

        a.borrow_mut().children_mut().expect("children").clear();
    }

    #[test]
    fn self_loop_terminates() {
        let a = DisplayNode::new().named("a").into_ref();
        a.borrow_mut().push_item(Rc::clone(&a));
        assert_eq!(names(&enumerate(&a)), vec!["a"]);
        a.borrow_mut().items_mut().expect("items").clear();
    }

    #[test]
    #[traced_test]
    fn mutably_borrowed_node_is_skipped() {
        let busy = leaf("busy");
        let root = DisplayNode::panel([Rc::clone(&busy), leaf("free")])
            .named("root")
            .into_ref();
        let _guard = busy.borrow_mut();
        assert_eq!(names(&enumerate(&root)), vec!["free", "root"]);
        assert!(logs_contain("mutably borrowed"));
    }
}
