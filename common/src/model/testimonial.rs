use serde::{Deserialize, Serialize};

fn active_by_default() -> bool {
    true
}

/// A student testimonial with an optional avatar stored by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub comment: String,
    /// Star rating in `1..=5`.
    pub rating: i32,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default = "active_by_default", alias = "isActive")]
    pub active: bool,
}
