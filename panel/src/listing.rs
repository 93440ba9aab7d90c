//! Display rows for the entity listings.
//!
//! Records are decoded through the typed models in `common`, so a listing
//! that no longer matches the API shape fails loudly instead of rendering
//! blanks.

use common::model::benefit::Benefit;
use common::model::faq::Faq;
use common::model::support_logo::SupportLogo;
use common::model::testimonial::Testimonial;
use common::model::translation::Translation;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{PanelError, Result};
use crate::fields::EntityKind;
use crate::form::Record;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    pub id: i64,
    pub title: String,
    pub subtitle: String,
    pub display_order: Option<i32>,
    pub active: bool,
    pub image_url: Option<String>,
}

/// Converts fetched records into rows, ordered by display order where the
/// type has one.
pub fn rows_for(kind: EntityKind, records: &[Record]) -> Result<Vec<ListRow>> {
    let mut rows = records
        .iter()
        .map(|record| row_for(kind, record))
        .collect::<Result<Vec<_>>>()?;
    rows.sort_by_key(|row| (row.display_order.is_none(), row.display_order));
    Ok(rows)
}

fn row_for(kind: EntityKind, record: &Record) -> Result<ListRow> {
    let row = match kind {
        EntityKind::Benefit => {
            let benefit: Benefit = decode(record)?;
            ListRow {
                id: require_id(kind, benefit.id)?,
                title: benefit.title,
                subtitle: benefit.description,
                display_order: Some(benefit.display_order),
                active: benefit.active,
                image_url: None,
            }
        }
        EntityKind::Testimonial => {
            let testimonial: Testimonial = decode(record)?;
            ListRow {
                id: require_id(kind, testimonial.id)?,
                subtitle: format!(
                    "{} {}",
                    "★".repeat(testimonial.rating.clamp(0, 5) as usize),
                    testimonial.comment
                ),
                title: testimonial.name,
                display_order: None,
                active: testimonial.active,
                image_url: testimonial.avatar_url.filter(|url| !url.is_empty()),
            }
        }
        EntityKind::Faq => {
            let faq: Faq = decode(record)?;
            ListRow {
                id: require_id(kind, faq.id)?,
                title: faq.question,
                subtitle: faq.answer,
                display_order: Some(faq.display_order),
                active: faq.active,
                image_url: None,
            }
        }
        EntityKind::SupportLogo => {
            let logo: SupportLogo = decode(record)?;
            ListRow {
                id: require_id(kind, logo.id)?,
                title: logo.name,
                subtitle: logo.website_url.unwrap_or_default(),
                display_order: logo.display_order,
                active: logo.active,
                image_url: logo.image_url.filter(|url| !url.is_empty()),
            }
        }
        EntityKind::Translation => {
            let translation: Translation = decode(record)?;
            ListRow {
                id: require_id(kind, translation.id)?,
                title: translation.key,
                subtitle: format!(
                    "[{}] {}",
                    translation.language_code, translation.translated_text
                ),
                display_order: None,
                active: true,
                image_url: None,
            }
        }
    };
    Ok(row)
}

fn decode<T: DeserializeOwned>(record: &Record) -> Result<T> {
    serde_json::from_value(Value::Object(record.clone()))
        .map_err(|e| PanelError::Decode(e.to_string()))
}

fn require_id(kind: EntityKind, id: Option<i64>) -> Result<i64> {
    id.ok_or_else(|| PanelError::Decode(format!("{} record without id", kind)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn records(value: Value) -> Vec<Record> {
        value
            .as_array()
            .unwrap()
            .iter()
            .map(|item| item.as_object().cloned().unwrap())
            .collect()
    }

    #[rstest]
    fn faq_rows_are_sorted_by_display_order() {
        let rows = rows_for(
            EntityKind::Faq,
            &records(json!([
                {"id": 1, "question": "B", "answer": "b", "displayOrder": 2},
                {"id": 2, "question": "A", "answer": "a", "displayOrder": 1, "active": false}
            ])),
        )
        .unwrap();

        assert_eq!(rows.iter().map(|r| r.id).collect::<Vec<_>>(), vec![2, 1]);
        assert!(!rows[0].active);
        assert!(rows[1].active);
    }

    #[rstest]
    fn testimonial_row_shows_rating_and_avatar() {
        let rows = rows_for(
            EntityKind::Testimonial,
            &records(json!([
                {"id": 4, "name": "Aziza", "comment": "Great", "rating": 3, "avatarUrl": "https://cdn/a.jpg", "isActive": false}
            ])),
        )
        .unwrap();

        assert_eq!(rows[0].subtitle, "★★★ Great");
        assert_eq!(rows[0].image_url.as_deref(), Some("https://cdn/a.jpg"));
        assert!(!rows[0].active);
    }

    #[rstest]
    fn logos_without_order_sink_to_the_bottom() {
        let rows = rows_for(
            EntityKind::SupportLogo,
            &records(json!([
                {"id": 1, "name": "Late", "imageUrl": ""},
                {"id": 2, "name": "First", "displayOrder": 0, "websiteUrl": "https://first.example"}
            ])),
        )
        .unwrap();

        assert_eq!(rows[0].title, "First");
        assert_eq!(rows[1].image_url, None);
    }

    #[rstest]
    fn record_without_id_is_a_decode_error() {
        let err = rows_for(
            EntityKind::Translation,
            &records(json!([{"key": "home.title", "languageCode": "en"}])),
        )
        .unwrap_err();

        assert_eq!(err, PanelError::Decode("translation record without id".to_string()));
    }

    #[rstest]
    fn mismatched_shape_is_a_decode_error() {
        let err = rows_for(EntityKind::Benefit, &records(json!([{"id": 1}]))).unwrap_err();

        assert!(matches!(err, PanelError::Decode(_)));
    }
}
