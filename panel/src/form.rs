//! Submitted form state, client-side validation and payload composition.

use std::collections::BTreeMap;
use std::fmt;

use base64::{Engine as _, engine::general_purpose};
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map, Number, Value};

use crate::fields::{FieldDescriptor, FieldKind};

lazy_static! {
    static ref HTTP_URL: Regex = Regex::new(r"^https?://.+").unwrap();
}

pub fn is_http_url(value: &str) -> bool {
    HTTP_URL.is_match(value)
}

/// An entity as returned by the API, kept schemaless so one dialog serves
/// every entity type.
pub type Record = Map<String, Value>;

/// Display form of a record value: strings as-is, numbers and booleans
/// printed, null and missing keys as `None`.
pub fn record_text(record: &Record, key: &str) -> Option<String> {
    match record.get(key)? {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

/// The record's numeric `id`, accepting ids serialized as strings.
pub fn record_id(record: &Record) -> Option<i64> {
    match record.get("id")? {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.parse().ok(),
        _ => None,
    }
}

/// A file picked in an upload slot, held in memory until submission.
#[derive(Clone, PartialEq, Eq)]
pub struct StagedFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl StagedFile {
    /// Inline `data:` URL for previewing the file before upload.
    pub fn data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type,
            general_purpose::STANDARD.encode(&self.bytes)
        )
    }
}

impl fmt::Debug for StagedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StagedFile")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    File(StagedFile),
}

/// Values collected from the form, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormValues {
    values: BTreeMap<String, FieldValue>,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_text(name, value);
        self
    }

    pub fn set_text(&mut self, name: &str, value: impl Into<String>) {
        self.values
            .insert(name.to_string(), FieldValue::Text(value.into()));
    }

    pub fn set_file(&mut self, name: &str, file: StagedFile) {
        self.values.insert(name.to_string(), FieldValue::File(file));
    }

    /// Text value of a field, empty when missing or when the field holds a file.
    pub fn text(&self, name: &str) -> &str {
        match self.values.get(name) {
            Some(FieldValue::Text(text)) => text,
            _ => "",
        }
    }

    /// Text value of a field, `None` when it was never set.
    pub fn get_text(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(FieldValue::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// Copies every text value of `other` over this one; files are ignored.
    pub fn merge_texts(&mut self, other: &FormValues) {
        for (name, value) in &other.values {
            if let FieldValue::Text(text) = value {
                self.set_text(name, text.clone());
            }
        }
    }

    pub fn file(&self, name: &str) -> Option<&StagedFile> {
        match self.values.get(name) {
            Some(FieldValue::File(file)) => Some(file),
            _ => None,
        }
    }

    pub fn has_file(&self, name: &str) -> bool {
        self.file(name).is_some()
    }

    pub fn has_any_file(&self) -> bool {
        self.values
            .values()
            .any(|value| matches!(value, FieldValue::File(_)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn for_field(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message.as_str())
    }

    fn push(&mut self, field: &str, message: String) {
        self.0.push(FieldError {
            field: field.to_string(),
            message,
        });
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|error| format!("{}: {}", error.field, error.message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

/// Checks every field, collecting at most one message per field.
pub fn validate(fields: &[FieldDescriptor], values: &FormValues) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    for field in fields {
        if let Some(message) = check_field(field, values) {
            errors.push(field.name, message);
        }
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_field(field: &FieldDescriptor, values: &FormValues) -> Option<String> {
    let raw = values.text(field.name);
    let value = raw.trim();

    if field.kind == FieldKind::File {
        if field.required && !values.has_file(field.name) {
            return Some(format!("{} is required", field.label));
        }
    } else if value.is_empty() {
        if field.required {
            return Some(format!("{} is required", field.label));
        }
    } else if let Some(message) = check_shape(field, value) {
        return Some(message);
    }

    match field.validate {
        Some(validator) => validator(raw, values).err(),
        None => None,
    }
}

fn check_shape(field: &FieldDescriptor, value: &str) -> Option<String> {
    if let Some(max) = field.max_length {
        if value.chars().count() > max {
            return Some(format!(
                "{} cannot be longer than {} characters",
                field.label, max
            ));
        }
    }
    match field.kind {
        FieldKind::Number => {
            let number = match value.parse::<f64>() {
                Ok(number) if number.is_finite() => number,
                _ => return Some(format!("{} must be a number", field.label)),
            };
            if let Some(min) = field.min.filter(|min| number < *min) {
                return Some(format!("{} must be at least {}", field.label, min));
            }
            if let Some(max) = field.max.filter(|max| number > *max) {
                return Some(format!("{} cannot be more than {}", field.label, max));
            }
            match field.step.filter(|step| *step > 0.0) {
                Some(step) if !on_step(number, field.min.unwrap_or(0.0), step) => Some(if step == 1.0 {
                    format!("{} must be a whole number", field.label)
                } else {
                    format!("{} must be a multiple of {}", field.label, step)
                }),
                _ => None,
            }
        }
        FieldKind::Url if !is_http_url(value) => Some(
            "Please enter a valid URL starting with http:// or https://".to_string(),
        ),
        _ => None,
    }
}

fn on_step(number: f64, base: f64, step: f64) -> bool {
    let steps = (number - base) / step;
    (steps - steps.round()).abs() < 1e-9
}

#[derive(Debug, Clone, PartialEq)]
pub enum PartValue {
    Text(String),
    File(StagedFile),
}

/// Body sent for a create or update.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Map<String, Value>),
    /// Used as soon as one file is staged.
    Multipart(Vec<(String, PartValue)>),
}

impl Payload {
    /// Adds or replaces a plain value, used to carry the id on upserts.
    pub fn insert(&mut self, name: &str, value: Value) {
        match self {
            Payload::Json(map) => {
                map.insert(name.to_string(), value);
            }
            Payload::Multipart(parts) => {
                parts.retain(|(key, _)| key != name);
                let text = match value {
                    Value::String(text) => text,
                    other => other.to_string(),
                };
                parts.push((name.to_string(), PartValue::Text(text)));
            }
        }
    }
}

/// Composes the request body from validated values, in field order.
///
/// Numbers become JSON numbers; empty optional fields are left out so the
/// server keeps its own defaults.
pub fn build_payload(fields: &[FieldDescriptor], values: &FormValues) -> Payload {
    if values.has_any_file() {
        let mut parts = Vec::new();
        for field in fields {
            match (field.kind, values.file(field.name)) {
                (FieldKind::File, Some(file)) => {
                    parts.push((field.name.to_string(), PartValue::File(file.clone())));
                }
                (FieldKind::File, None) => {}
                _ => {
                    let value = values.text(field.name).trim();
                    if !value.is_empty() {
                        parts.push((field.name.to_string(), PartValue::Text(value.to_string())));
                    }
                }
            }
        }
        return Payload::Multipart(parts);
    }

    let mut map = Map::new();
    for field in fields.iter().filter(|field| field.kind != FieldKind::File) {
        let value = values.text(field.name).trim();
        if value.is_empty() {
            continue;
        }
        let json = match field.kind {
            FieldKind::Number => number_value(value),
            _ => Value::String(value.to_string()),
        };
        map.insert(field.name.to_string(), json);
    }
    Payload::Json(map)
}

fn number_value(value: &str) -> Value {
    if let Ok(integer) = value.parse::<i64>() {
        return Value::Number(integer.into());
    }
    value
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or_else(|| Value::String(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::EntityKind;
    use rstest::rstest;
    use serde_json::json;

    fn logo_file() -> StagedFile {
        StagedFile {
            file_name: "logo.png".to_string(),
            mime_type: "image/png".to_string(),
            bytes: vec![0x89, 0x50, 0x4e, 0x47],
        }
    }

    #[rstest]
    fn benefit_display_order_out_of_range_is_rejected() {
        let values = FormValues::new()
            .with_text("title", "Fast")
            .with_text("description", "Quick answers")
            .with_text("displayOrder", "5");

        let errors = validate(EntityKind::Benefit.fields(), &values).unwrap_err();

        assert_eq!(errors.0.len(), 1);
        assert_eq!(
            errors.for_field("displayOrder"),
            Some("Display Order cannot be more than 4")
        );
    }

    #[rstest]
    fn required_blank_field_is_reported() {
        let values = FormValues::new()
            .with_text("title", "   ")
            .with_text("description", "Quick answers")
            .with_text("displayOrder", "2");

        let errors = validate(EntityKind::Benefit.fields(), &values).unwrap_err();

        assert_eq!(errors.for_field("title"), Some("Title is required"));
    }

    #[rstest]
    #[case("abc", "Rating must be a number")]
    #[case("0", "Rating must be at least 1")]
    #[case("6", "Rating cannot be more than 5")]
    #[case("NaN", "Rating must be a number")]
    #[case("inf", "Rating must be a number")]
    #[case("1e400", "Rating must be a number")]
    #[case("2.5", "Rating must be a whole number")]
    fn number_rules(#[case] rating: &str, #[case] message: &str) {
        let values = FormValues::new()
            .with_text("name", "Aziza")
            .with_text("comment", "Great course")
            .with_text("rating", rating);

        let errors = validate(EntityKind::Testimonial.fields(), &values).unwrap_err();

        assert_eq!(errors.for_field("rating"), Some(message));
    }

    #[rstest]
    #[case("NaN")]
    #[case("-inf")]
    #[case("1.5")]
    fn benefit_display_order_must_be_a_finite_whole_number(#[case] order: &str) {
        let values = FormValues::new()
            .with_text("title", "Fast")
            .with_text("description", "Quick answers")
            .with_text("displayOrder", order);

        let errors = validate(EntityKind::Benefit.fields(), &values).unwrap_err();

        assert!(errors.for_field("displayOrder").is_some());
    }

    #[rstest]
    fn whole_numbers_written_as_decimals_pass_step() {
        let values = FormValues::new()
            .with_text("name", "Aziza")
            .with_text("comment", "Great course")
            .with_text("rating", "4.0");

        assert!(validate(EntityKind::Testimonial.fields(), &values).is_ok());
    }

    #[rstest]
    fn merged_texts_override_and_skip_files() {
        let mut draft = FormValues::new().with_text("name", "Old").with_text("websiteUrl", "https://a.example");
        let mut typed = FormValues::new().with_text("name", "New");
        typed.set_file("imageFile", logo_file());

        draft.merge_texts(&typed);

        assert_eq!(draft.get_text("name"), Some("New"));
        assert_eq!(draft.get_text("websiteUrl"), Some("https://a.example"));
        assert!(!draft.has_file("imageFile"));
        assert_eq!(draft.get_text("displayOrder"), None);
    }

    #[rstest]
    fn faq_question_length_counts_characters() {
        let long = "ё".repeat(201);
        let values = FormValues::new()
            .with_text("question", long)
            .with_text("answer", "Yes");

        let errors = validate(EntityKind::Faq.fields(), &values).unwrap_err();
        assert_eq!(
            errors.for_field("question"),
            Some("Question cannot be longer than 200 characters")
        );

        let fits = FormValues::new()
            .with_text("question", "ё".repeat(200))
            .with_text("answer", "Yes");
        assert!(validate(EntityKind::Faq.fields(), &fits).is_ok());
    }

    #[rstest]
    fn support_logo_needs_file_or_image_url() {
        let base = FormValues::new()
            .with_text("name", "Acme")
            .with_text("websiteUrl", "https://acme.example");

        let errors = validate(EntityKind::SupportLogo.fields(), &base).unwrap_err();
        assert_eq!(
            errors.for_field("imageFile"),
            Some("Please provide either an image file or URL")
        );
        assert!(errors.for_field("imageUrl").is_some());

        let with_url = base.clone().with_text("imageUrl", "https://cdn.example/acme.png");
        assert!(validate(EntityKind::SupportLogo.fields(), &with_url).is_ok());

        let mut with_file = base;
        with_file.set_file("imageFile", logo_file());
        assert!(validate(EntityKind::SupportLogo.fields(), &with_file).is_ok());
    }

    #[rstest]
    fn url_fields_require_http_scheme() {
        let values = FormValues::new()
            .with_text("name", "Acme")
            .with_text("imageUrl", "https://cdn.example/acme.png")
            .with_text("websiteUrl", "ftp://acme.example");

        let errors = validate(EntityKind::SupportLogo.fields(), &values).unwrap_err();

        assert_eq!(
            errors.for_field("websiteUrl"),
            Some("Please enter a valid URL starting with http:// or https://")
        );
    }

    #[rstest]
    fn json_payload_types_numbers_and_skips_blanks() {
        let values = FormValues::new()
            .with_text("question", " What is it? ")
            .with_text("answer", "A payment app")
            .with_text("displayOrder", "");

        let payload = build_payload(EntityKind::Faq.fields(), &values);

        let Payload::Json(map) = payload else {
            panic!("expected json payload");
        };
        assert_eq!(
            Value::Object(map),
            json!({"question": "What is it?", "answer": "A payment app"})
        );

        let benefit = build_payload(
            EntityKind::Benefit.fields(),
            &FormValues::new()
                .with_text("title", "Fast")
                .with_text("description", "Quick")
                .with_text("displayOrder", "3"),
        );
        let Payload::Json(map) = benefit else {
            panic!("expected json payload");
        };
        assert_eq!(map["displayOrder"], json!(3));
    }

    #[rstest]
    fn staged_file_switches_to_multipart() {
        let mut values = FormValues::new()
            .with_text("name", "Acme")
            .with_text("websiteUrl", "https://acme.example")
            .with_text("displayOrder", "2");
        values.set_file("imageFile", logo_file());

        let mut payload = build_payload(EntityKind::SupportLogo.fields(), &values);
        payload.insert("id", json!(9));

        let Payload::Multipart(parts) = payload else {
            panic!("expected multipart payload");
        };
        let names: Vec<&str> = parts.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["name", "imageFile", "websiteUrl", "displayOrder", "id"]);
        assert_eq!(parts[1].1, PartValue::File(logo_file()));
        assert_eq!(parts[4].1, PartValue::Text("9".to_string()));
    }

    #[rstest]
    fn staged_file_previews_as_data_url() {
        assert_eq!(logo_file().data_url(), "data:image/png;base64,iVBORw==");
    }
}
