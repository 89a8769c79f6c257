use super::classifier::is_relevant;
use super::element::Element;
use super::markup::Node;

/// Flatten a parsed hierarchy into its relevant elements, in pre-order.
///
/// Nodes without attributes are not emitted, but their children still are.
pub fn extract(root: &Node) -> Vec<Element> {
    let mut elements = Vec::new();
    visit(root, &mut elements);
    elements
}

fn visit(node: &Node, elements: &mut Vec<Element>) {
    if let Some(attrs) = &node.attributes
        && is_relevant(attrs)
    {
        elements.push(Element::from_attributes(attrs));
    }

    for child in &node.children {
        visit(child, elements);
    }
}
