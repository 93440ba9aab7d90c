use serde::{Deserialize, Serialize};

/// One translated string for a message key in one language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Translation {
    #[serde(default)]
    pub id: Option<i64>,
    pub key: String,
    pub language_code: String,
    #[serde(default)]
    pub translated_text: String,
    #[serde(default)]
    pub last_updated: Option<String>,
}
