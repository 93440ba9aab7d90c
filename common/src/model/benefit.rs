use serde::{Deserialize, Serialize};

fn active_by_default() -> bool {
    true
}

/// A benefit card shown on the landing page.
///
/// At most four cards are displayed, so `display_order` is kept in `1..=4`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Benefit {
    #[serde(default)]
    pub id: Option<i64>,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default = "active_by_default")]
    pub active: bool,
}
