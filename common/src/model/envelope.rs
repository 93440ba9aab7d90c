use serde::{Deserialize, Serialize};

/// The `{success, data, message}` wrapper returned by every admin endpoint.
///
/// `success: false` is an application-level failure no matter which HTTP
/// status carried it. Error replies may also name an `error_code` and list
/// individual validation `errors`; reorder replies add a `funny_message` the
/// panel shows instead of its stock confirmation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub errors: Option<Vec<String>>,
    #[serde(default)]
    pub funny_message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Best human readable reason for a failed envelope.
    ///
    /// Prefers `message`, then the joined `errors` list.
    pub fn failure_reason(&self) -> Option<String> {
        if let Some(message) = self.message.as_ref().filter(|m| !m.trim().is_empty()) {
            return Some(message.clone());
        }
        self.errors
            .as_ref()
            .filter(|errors| !errors.is_empty())
            .map(|errors| errors.join(", "))
    }
}

/// Minimal view of an entity echoed back by the reorder endpoint.
///
/// The endpoint returns full records; only the id and the persisted order
/// matter to the list being reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderedEntity {
    pub id: i64,
    pub display_order: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_failure_without_data() {
        let reply: ApiResponse<serde_json::Value> = serde_json::from_value(json!({
            "success": false,
            "message": "Title is required"
        }))
        .unwrap();

        assert!(!reply.success);
        assert!(reply.data.is_none());
        assert_eq!(reply.failure_reason().as_deref(), Some("Title is required"));
    }

    #[test]
    fn failure_reason_falls_back_to_error_list() {
        let reply: ApiResponse<()> = serde_json::from_value(json!({
            "success": false,
            "message": " ",
            "errorCode": "VALIDATION_ERROR",
            "errors": ["name is blank", "rating too high"]
        }))
        .unwrap();

        assert_eq!(reply.error_code.as_deref(), Some("VALIDATION_ERROR"));
        assert_eq!(
            reply.failure_reason().as_deref(),
            Some("name is blank, rating too high")
        );
    }

    #[test]
    fn reorder_reply_keeps_funny_message_and_orders() {
        let reply: ApiResponse<Vec<OrderedEntity>> = serde_json::from_value(json!({
            "success": true,
            "funnyMessage": "Shuffled like a deck of cards!",
            "data": [
                {"id": 2, "displayOrder": 5, "title": "Fast"},
                {"id": 3, "displayOrder": 10, "title": "Cheap"}
            ]
        }))
        .unwrap();

        assert_eq!(reply.funny_message.as_deref(), Some("Shuffled like a deck of cards!"));
        assert_eq!(
            reply.data.unwrap(),
            vec![
                OrderedEntity { id: 2, display_order: 5 },
                OrderedEntity { id: 3, display_order: 10 },
            ]
        );
    }
}
