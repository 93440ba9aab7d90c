use serde::{Deserialize, Serialize};

/// One entry of the batch posted to `{endpoint}/reorder`.
///
/// The client computes these from the visible list after a drop. The server
/// answers with the entities it actually persisted, which may carry different
/// `display_order` values; those are the ones the list must show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderItem {
    pub id: i64,
    pub display_order: i32,
}
