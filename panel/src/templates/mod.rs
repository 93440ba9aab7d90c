//! Field templates: one renderer per [`FieldKind`], each a pure function of
//! the descriptor, the value to show and the record being edited.

mod node;

pub use node::{Element, Node, escape_html};

use crate::fields::{FieldDescriptor, FieldKind};
use crate::form::{Record, record_text};

/// Renders one form field.
///
/// `value` pre-fills the control. `current` is the record being edited, if
/// any: it turns on the "Current value" hints and, for file fields, the
/// preview of the stored asset.
pub fn render(field: &FieldDescriptor, value: Option<&str>, current: Option<&Record>) -> Node {
    let control = match field.kind {
        FieldKind::Text | FieldKind::Url => text_input(field, value),
        FieldKind::Number => number_input(field, value),
        FieldKind::Textarea => textarea(field, value),
        FieldKind::File => file_input(field),
    };

    let preview = match field.kind {
        FieldKind::File => current.and_then(|record| stored_asset(field, record)),
        _ => None,
    };
    let hint = match (field.kind, current) {
        (FieldKind::File, _) | (_, None) => None,
        (_, Some(record)) => Some(current_value_hint(field, record)),
    };

    Element::new("div")
        .class("form-group")
        .attr("data-field", field.name)
        .child(label(field))
        .maybe_child(preview)
        .child(control)
        .maybe_child(
            field
                .help
                .map(|help| Element::new("p").class("form-help").text(help)),
        )
        .maybe_child(hint)
        .into()
}

fn label(field: &FieldDescriptor) -> Element {
    let label = Element::new("label")
        .class("form-label")
        .attr("for", field.name)
        .text(field.label);
    if field.required {
        label.child(
            Element::new("span")
                .class("required-marker")
                .attr("aria-hidden", "true")
                .text(" *"),
        )
    } else {
        label
    }
}

fn text_input(field: &FieldDescriptor, value: Option<&str>) -> Element {
    Element::new("input")
        .attr("type", field.kind.input_type())
        .attr("id", field.name)
        .attr("name", field.name)
        .attr("value", value.unwrap_or_default())
        .class("form-input")
        .attr("placeholder", field.placeholder.unwrap_or_default())
        .maybe_attr("maxlength", field.max_length.map(|max| max.to_string()))
        .flag("required", field.required)
}

fn number_input(field: &FieldDescriptor, value: Option<&str>) -> Element {
    text_input(field, value)
        .maybe_attr("min", field.min.map(|min| min.to_string()))
        .maybe_attr("max", field.max.map(|max| max.to_string()))
        .maybe_attr("step", field.step.map(|step| step.to_string()))
}

fn textarea(field: &FieldDescriptor, value: Option<&str>) -> Element {
    Element::new("textarea")
        .attr("id", field.name)
        .attr("name", field.name)
        .class("form-textarea")
        .attr("placeholder", field.placeholder.unwrap_or_default())
        .attr("rows", field.rows.unwrap_or(4).to_string())
        .maybe_attr("maxlength", field.max_length.map(|max| max.to_string()))
        .flag("required", field.required)
        .text(value.unwrap_or_default())
}

fn file_input(field: &FieldDescriptor) -> Element {
    Element::new("input")
        .attr("type", "file")
        .attr("id", field.name)
        .attr("name", field.name)
        .maybe_attr("accept", field.accept)
        .class("filepond")
        .flag("required", field.required)
}

fn stored_asset(field: &FieldDescriptor, record: &Record) -> Option<Element> {
    let url = record_text(record, field.preview_key).filter(|url| !url.trim().is_empty())?;
    let name = record_text(record, "name").unwrap_or_default();
    Some(
        Element::new("div")
            .class("current-asset")
            .child(Element::new("p").class("current-asset-title").text("Current Image:"))
            .child(
                Element::new("img")
                    .attr("src", url.clone())
                    .attr("alt", format!("Current {}", field.label.to_lowercase()))
                    .class("current-asset-image"),
            )
            .child(Element::new("p").text(format!("Name: {}", name)))
            .child(Element::new("p").text(format!("URL: {}", url))),
    )
}

fn current_value_hint(field: &FieldDescriptor, record: &Record) -> Element {
    let current = record_text(record, field.name)
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| "Not set".to_string());
    Element::new("p")
        .class("current-value")
        .text(format!("Current value: {}", current))
}
