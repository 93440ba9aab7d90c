use serde::{Deserialize, Serialize};

fn active_by_default() -> bool {
    true
}

/// A frequently asked question with its answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Faq {
    #[serde(default)]
    pub id: Option<i64>,
    /// Limited to 200 characters by the API.
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default = "active_by_default")]
    pub active: bool,
}
