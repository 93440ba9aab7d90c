//! Turns panel markup fragments into Yew virtual nodes.

use panel::templates::{Element, Node};
use yew::virtual_dom::{AttrValue, VNode, VTag, VText};
use yew::Html;

pub fn to_html(node: &Node) -> Html {
    match node {
        Node::Text(text) => VNode::from(VText::new(text.clone())),
        Node::Element(element) => VNode::from(to_vtag(element)),
    }
}

fn to_vtag(element: &Element) -> VTag {
    let mut tag = VTag::new(element.tag);
    for (name, value) in &element.attrs {
        match *name {
            // Form state lives in the control; only the initial value is set.
            "value" => tag.set_value(Some(AttrValue::from(value.clone()))),
            _ => tag.add_attribute(*name, value.clone()),
        }
    }
    if element.tag == "textarea" {
        tag.set_value(Some(AttrValue::from(Node::Element(element.clone()).text_content())));
    } else {
        for child in &element.children {
            tag.add_child(to_html(child));
        }
    }
    tag
}
