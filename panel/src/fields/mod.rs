//! Field registry: which entity types exist, where they are saved and which
//! form fields they have.
//!
//! Entity types form a closed set ([`EntityKind`]); each one owns a static
//! [`EntityTypeConfig`] defined in [`catalog`]. The only place a free-form
//! type name is accepted is [`fields_for`] / [`EntityKind::from_str`], which
//! fail fast on anything unregistered.

mod catalog;

use std::fmt;
use std::str::FromStr;

use crate::error::{PanelError, Result};
use crate::form::FormValues;
use crate::logger::logger;

/// Input widget a field renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Text,
    Textarea,
    Url,
    Number,
    File,
}

impl FieldKind {
    /// `type` attribute for `<input>` based kinds.
    pub fn input_type(self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Textarea => "textarea",
            FieldKind::Url => "url",
            FieldKind::Number => "number",
            FieldKind::File => "file",
        }
    }
}

/// Cross-field check run before submission. Receives the field's own value
/// and the whole form; `Err` carries the message shown next to the field.
pub type Validator = fn(&str, &FormValues) -> std::result::Result<(), String>;

/// Declarative description of one form input.
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub kind: FieldKind,
    pub label: &'static str,
    pub placeholder: Option<&'static str>,
    pub required: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Option<f64>,
    pub max_length: Option<usize>,
    pub help: Option<&'static str>,
    /// Textarea height.
    pub rows: Option<u32>,
    /// `accept` attribute of file inputs.
    pub accept: Option<&'static str>,
    /// Record key holding the currently stored asset URL, previewed by file
    /// fields in edit mode.
    pub preview_key: &'static str,
    /// Value used when creating, or when an edited record lacks the key.
    pub default_value: Option<&'static str>,
    pub validate: Option<Validator>,
}

impl FieldDescriptor {
    pub const fn new(name: &'static str, kind: FieldKind, label: &'static str) -> Self {
        Self {
            name,
            kind,
            label,
            placeholder: None,
            required: false,
            min: None,
            max: None,
            step: None,
            max_length: None,
            help: None,
            rows: None,
            accept: None,
            preview_key: "imageUrl",
            default_value: None,
            validate: None,
        }
    }

    pub const fn required(self) -> Self {
        Self {
            required: true,
            ..self
        }
    }

    pub const fn placeholder(self, placeholder: &'static str) -> Self {
        Self {
            placeholder: Some(placeholder),
            ..self
        }
    }

    pub const fn range(self, min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            ..self
        }
    }

    pub const fn min(self, min: f64) -> Self {
        Self {
            min: Some(min),
            ..self
        }
    }

    pub const fn step(self, step: f64) -> Self {
        Self {
            step: Some(step),
            ..self
        }
    }

    pub const fn max_length(self, max_length: usize) -> Self {
        Self {
            max_length: Some(max_length),
            ..self
        }
    }

    pub const fn help(self, help: &'static str) -> Self {
        Self {
            help: Some(help),
            ..self
        }
    }

    pub const fn rows(self, rows: u32) -> Self {
        Self {
            rows: Some(rows),
            ..self
        }
    }

    pub const fn accept(self, accept: &'static str) -> Self {
        Self {
            accept: Some(accept),
            ..self
        }
    }

    pub const fn preview_key(self, preview_key: &'static str) -> Self {
        Self {
            preview_key,
            ..self
        }
    }

    pub const fn default_value(self, value: &'static str) -> Self {
        Self {
            default_value: Some(value),
            ..self
        }
    }

    pub const fn validate(self, validator: Validator) -> Self {
        Self {
            validate: Some(validator),
            ..self
        }
    }
}

/// User-facing wording per CRUD action.
#[derive(Debug, Clone, Copy)]
pub struct ActionMessages {
    pub create: &'static str,
    pub update: &'static str,
    pub delete: &'static str,
}

/// How the listing of a type is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListRoute {
    /// `GET {endpoint}` answers with an array of entities.
    Collection,
    /// `GET {endpoint}/paginated` answers with one page of entities grouped
    /// by key and then by language. Only the first page is read.
    GroupedPage { size: u32 },
}

#[derive(Debug, Clone, Copy)]
pub struct EntityTypeConfig {
    pub type_name: &'static str,
    /// Plural label used for list headings.
    pub label: &'static str,
    /// Collection path; items live at `{endpoint}/{id}`.
    pub endpoint: &'static str,
    pub create_title: &'static str,
    pub edit_title: &'static str,
    pub fields: &'static [FieldDescriptor],
    pub success_messages: ActionMessages,
    pub error_messages: ActionMessages,
    /// Accepts `POST {endpoint}/reorder`.
    pub reorderable: bool,
    /// Updates are sent as `POST {endpoint}` with the id in the payload.
    pub upsert: bool,
    pub list_route: ListRoute,
    /// Serves `GET {endpoint}/{id}`. Types without it are edited from the
    /// listed record.
    pub fetchable: bool,
    /// Serves `DELETE {endpoint}/{id}`.
    pub deletable: bool,
}

impl EntityTypeConfig {
    pub fn item_path(&self, id: i64) -> String {
        format!("{}/{}", self.endpoint, id)
    }

    pub fn list_path(&self) -> String {
        match self.list_route {
            ListRoute::Collection => self.endpoint.to_string(),
            ListRoute::GroupedPage { size } => {
                format!("{}/paginated?page=0&size={}", self.endpoint, size)
            }
        }
    }

    pub fn reorder_path(&self) -> String {
        format!("{}/reorder", self.endpoint)
    }

    pub fn field(&self, name: &str) -> Option<&'static FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// The managed content types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Benefit,
    Testimonial,
    Faq,
    SupportLogo,
    Translation,
}

impl EntityKind {
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Benefit,
        EntityKind::Testimonial,
        EntityKind::Faq,
        EntityKind::SupportLogo,
        EntityKind::Translation,
    ];

    pub fn config(self) -> &'static EntityTypeConfig {
        match self {
            EntityKind::Benefit => &catalog::BENEFIT,
            EntityKind::Testimonial => &catalog::TESTIMONIAL,
            EntityKind::Faq => &catalog::FAQ,
            EntityKind::SupportLogo => &catalog::SUPPORT_LOGO,
            EntityKind::Translation => &catalog::TRANSLATION,
        }
    }

    pub fn type_name(self) -> &'static str {
        self.config().type_name
    }

    pub fn fields(self) -> &'static [FieldDescriptor] {
        self.config().fields
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

impl FromStr for EntityKind {
    type Err = PanelError;

    fn from_str(s: &str) -> Result<Self> {
        EntityKind::ALL
            .into_iter()
            .find(|kind| kind.type_name() == s)
            .ok_or_else(|| PanelError::UnknownEntityType(s.to_string()))
    }
}

/// Ordered field descriptors for a type name.
///
/// Unregistered names are a configuration mistake: they are logged and
/// reported as [`PanelError::UnknownEntityType`].
pub fn fields_for(type_name: &str) -> Result<&'static [FieldDescriptor]> {
    match type_name.parse::<EntityKind>() {
        Ok(kind) => Ok(kind.fields()),
        Err(err) => {
            logger().error("FieldConfig", "No field configuration registered", Some(&err));
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashSet;

    #[rstest]
    fn field_names_are_unique_per_type() {
        for kind in EntityKind::ALL {
            let mut seen = HashSet::new();
            for field in kind.fields() {
                assert!(
                    seen.insert(field.name),
                    "{} declares '{}' twice",
                    kind,
                    field.name
                );
            }
        }
    }

    #[rstest]
    #[case("benefit", EntityKind::Benefit)]
    #[case("testimonial", EntityKind::Testimonial)]
    #[case("faq", EntityKind::Faq)]
    #[case("support-logo", EntityKind::SupportLogo)]
    #[case("translation", EntityKind::Translation)]
    fn type_names_round_trip(#[case] name: &str, #[case] kind: EntityKind) {
        assert_eq!(name.parse::<EntityKind>().unwrap(), kind);
        assert_eq!(kind.to_string(), name);
    }

    #[rstest]
    fn unknown_type_fails_fast() {
        let err = fields_for("carousel").unwrap_err();
        assert_eq!(err, PanelError::UnknownEntityType("carousel".to_string()));
    }

    #[rstest]
    fn benefit_fields_keep_declaration_order() {
        let names: Vec<&str> = fields_for("benefit").unwrap().iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["title", "description", "displayOrder"]);

        let order = EntityKind::Benefit.config().field("displayOrder").unwrap();
        assert_eq!((order.min, order.max), (Some(1.0), Some(4.0)));
    }

    #[rstest]
    fn item_and_reorder_paths() {
        let config = EntityKind::Faq.config();
        assert_eq!(config.item_path(7), "/api/admin/faqs/7");
        assert_eq!(config.reorder_path(), "/api/admin/faqs/reorder");
    }

    #[rstest]
    #[case(EntityKind::Faq, "/api/admin/faqs")]
    #[case(EntityKind::Translation, "/api/admin/translations/paginated?page=0&size=100")]
    fn list_paths(#[case] kind: EntityKind, #[case] path: &str) {
        assert_eq!(kind.config().list_path(), path);
    }

    #[rstest]
    fn translations_are_neither_fetched_nor_deleted_by_id() {
        let config = EntityKind::Translation.config();
        assert!(!config.fetchable);
        assert!(!config.deletable);
        assert!(config.upsert);
        for kind in [EntityKind::Benefit, EntityKind::Testimonial, EntityKind::Faq, EntityKind::SupportLogo] {
            assert!(kind.config().fetchable && kind.config().deletable, "{}", kind);
        }
    }

    #[rstest]
    fn only_ordered_lists_are_reorderable() {
        let reorderable: Vec<EntityKind> = EntityKind::ALL
            .into_iter()
            .filter(|kind| kind.config().reorderable)
            .collect();
        assert_eq!(reorderable, vec![EntityKind::Benefit, EntityKind::Faq]);
    }
}
