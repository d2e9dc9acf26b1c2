#![no_main]

use std::rc::Rc;

use arbitrary::Arbitrary;
use glossa_i18n::{Catalog, CatalogId, KeyResolver, MemoryLoader};
use glossa_widgets::{DisplayNode, Item, NodeRef, Translator};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Op {
    Label(String),
    List(Vec<String>),
    /// Nest the node at `child` under the node at `parent` as a child.
    Child { parent: u8, child: u8 },
    /// Nest the node at `child` under the node at `parent` as an item.
    ItemNode { parent: u8, child: u8 },
}

#[derive(Debug, Arbitrary)]
struct Input {
    entries: Vec<(String, String)>,
    ops: Vec<Op>,
}

fn pick(nodes: &[NodeRef], index: u8) -> NodeRef {
    Rc::clone(&nodes[usize::from(index) % nodes.len()])
}

fuzz_target!(|input: Input| {
    // Shared nodes are visited once per path, so edge count bounds the work.
    if input.ops.len() > 24 || input.entries.len() > 64 {
        return;
    }

    let loader = MemoryLoader::new()
        .with_catalog(Catalog::from_entries(CatalogId::new("app", "en"), input.entries));
    let resolver = KeyResolver::new(loader, "app", "en", "en");

    let mut nodes: Vec<NodeRef> = vec![DisplayNode::new().named("root").into_ref()];
    for op in input.ops {
        match op {
            Op::Label(text) => nodes.push(DisplayNode::label(text).into_ref()),
            Op::List(items) => nodes.push(DisplayNode::list(items).into_ref()),
            // Edges may form cycles; the walker must still terminate.
            Op::Child { parent, child } => {
                let (p, c) = (pick(&nodes, parent), pick(&nodes, child));
                p.borrow_mut().push_child(c);
            }
            Op::ItemNode { parent, child } => {
                let (p, c) = (pick(&nodes, parent), pick(&nodes, child));
                p.borrow_mut().push_item(Item::Node(c));
            }
        }
    }

    let translator = Translator::new(&resolver);
    let first = translator.apply_with_report(&nodes[0]);
    assert_eq!(first.nodes_failed, 0);

    // Break cycles so the Rc graph is freed.
    for node in &nodes {
        let mut node = node.borrow_mut();
        if let Some(children) = node.children_mut() {
            children.clear();
        }
        if let Some(items) = node.items_mut() {
            items.retain(|item| item.as_node().is_none());
        }
    }
});
