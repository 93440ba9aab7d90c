//! Generic create/update/delete client for one entity type.
//!
//! A [`CrudOperations`] wraps the static [`EntityTypeConfig`] of its type and
//! a shared [`Transport`]. It keeps no other state, so clones are cheap and
//! interchangeable. Every call logs the attempt and its outcome; mutations
//! additionally notify the registered callbacks. Nothing is retried.

use std::fmt;
use std::rc::Rc;

use common::model::envelope::{ApiResponse, OrderedEntity};
use common::requests::ReorderItem;
use serde_json::{Value, json};

use crate::config::PanelConfig;
use crate::error::{PanelError, Result};
use crate::fields::{EntityKind, EntityTypeConfig, ListRoute};
use crate::form::{Payload, Record};
use crate::logger::logger;
use crate::transport::{ApiRequest, HttpReply, Method, RequestBody, Transport};

const COMPONENT: &str = "Crud";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrudAction {
    Create,
    Update,
    Delete,
}

impl CrudAction {
    pub fn verb(self) -> &'static str {
        match self {
            CrudAction::Create => "create",
            CrudAction::Update => "update",
            CrudAction::Delete => "delete",
        }
    }
}

pub type SuccessCallback = Rc<dyn Fn(CrudAction, &Value)>;
pub type ErrorCallback = Rc<dyn Fn(CrudAction, &PanelError)>;

/// Hooks run after a mutation settles. The success hook receives the
/// entity echoed by the server (`null` for deletes).
#[derive(Clone, Default)]
pub struct CrudCallbacks {
    pub on_success: Option<SuccessCallback>,
    pub on_error: Option<ErrorCallback>,
}

/// Persisted order confirmed by the reorder endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReorderReply {
    pub items: Vec<OrderedEntity>,
    /// The server's celebratory message, if it sent one.
    pub message: Option<String>,
}

#[derive(Clone)]
pub struct CrudOperations {
    kind: EntityKind,
    api: PanelConfig,
    transport: Rc<dyn Transport>,
    callbacks: CrudCallbacks,
}

impl fmt::Debug for CrudOperations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CrudOperations")
            .field("kind", &self.kind)
            .field("api_base", &self.api.api_base)
            .finish()
    }
}

impl CrudOperations {
    pub fn new(kind: EntityKind, transport: Rc<dyn Transport>, config: &PanelConfig) -> Self {
        Self {
            kind,
            api: config.clone(),
            transport,
            callbacks: CrudCallbacks::default(),
        }
    }

    pub fn with_callbacks(mut self, callbacks: CrudCallbacks) -> Self {
        self.callbacks = callbacks;
        self
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn config(&self) -> &'static EntityTypeConfig {
        self.kind.config()
    }

    pub async fn create(&self, payload: Payload) -> Result<Record> {
        let request = ApiRequest {
            method: Method::Post,
            url: self.api.url(self.config().endpoint),
            body: payload.into(),
        };
        self.mutate(CrudAction::Create, None, request).await
    }

    /// Updates one entity. Types saved by upsert post to the collection with
    /// the id inside the payload instead of using `PUT`.
    pub async fn update(&self, id: i64, mut payload: Payload) -> Result<Record> {
        let config = self.config();
        let request = if config.upsert {
            payload.insert("id", json!(id));
            ApiRequest {
                method: Method::Post,
                url: self.api.url(config.endpoint),
                body: payload.into(),
            }
        } else {
            ApiRequest {
                method: Method::Put,
                url: self.api.url(&config.item_path(id)),
                body: payload.into(),
            }
        };
        self.mutate(CrudAction::Update, Some(id), request).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let config = self.config();
        if !config.deletable {
            let err = PanelError::Unsupported {
                type_name: config.type_name,
                operation: "deleted",
            };
            logger().error(COMPONENT, format!("Refusing to delete {} {}", self.kind, id), Some(&err));
            return Err(err);
        }
        let request = ApiRequest {
            method: Method::Delete,
            url: self.api.url(&self.config().item_path(id)),
            body: RequestBody::Empty,
        };
        self.mutate(CrudAction::Delete, Some(id), request)
            .await
            .map(|_| ())
    }

    /// Loads one entity for editing.
    pub async fn fetch(&self, id: i64) -> Result<Record> {
        logger().debug(COMPONENT, format!("Fetching {} {}", self.kind, id), None);
        let config = self.config();
        if !config.fetchable {
            let err = PanelError::Unsupported {
                type_name: config.type_name,
                operation: "fetched by id",
            };
            logger().error(COMPONENT, format!("Failed to fetch {} {}", self.kind, id), Some(&err));
            return Err(err);
        }
        let request = ApiRequest {
            method: Method::Get,
            url: self.api.url(&self.config().item_path(id)),
            body: RequestBody::Empty,
        };
        let result = self
            .call(request)
            .await
            .and_then(|envelope| match envelope.data {
                Some(Value::Object(record)) => Ok(record),
                _ => Err(PanelError::Decode(format!("{} {} has no data", self.kind, id))),
            });
        if let Err(err) = &result {
            logger().error(COMPONENT, format!("Failed to fetch {} {}", self.kind, id), Some(err));
        }
        result
    }

    /// Loads the whole collection for the listing.
    pub async fn list(&self) -> Result<Vec<Record>> {
        logger().debug(COMPONENT, format!("Listing {}", self.config().label), None);
        let config = self.config();
        let request = ApiRequest {
            method: Method::Get,
            url: self.api.url(&config.list_path()),
            body: RequestBody::Empty,
        };
        let result: Result<Vec<Record>> = self
            .call(request)
            .await
            .and_then(|envelope| match config.list_route {
                ListRoute::Collection => collection_records(envelope.data),
                ListRoute::GroupedPage { .. } => grouped_records(envelope.data),
            });
        match &result {
            Ok(records) => logger().info(
                COMPONENT,
                format!("Loaded {} {}", records.len(), self.config().label),
                None,
            ),
            Err(err) => logger().error(
                COMPONENT,
                format!("Failed to load {}", self.config().label),
                Some(err),
            ),
        }
        result
    }

    /// Posts a new display order for the listed items.
    pub async fn reorder(&self, items: &[ReorderItem]) -> Result<ReorderReply> {
        let config = self.config();
        if !config.reorderable {
            return Err(PanelError::NotReorderable(config.type_name));
        }
        logger().info(COMPONENT, format!("Updating {} order", self.kind), None);
        let body = serde_json::to_value(items).map_err(|e| PanelError::Decode(e.to_string()))?;
        let request = ApiRequest {
            method: Method::Post,
            url: self.api.url(&config.reorder_path()),
            body: RequestBody::Json(body),
        };
        let result = self.call(request).await.and_then(|envelope| {
            let items = match envelope.data {
                Some(data) => serde_json::from_value::<Vec<OrderedEntity>>(data)
                    .map_err(|e| PanelError::Decode(e.to_string()))?,
                None => Vec::new(),
            };
            Ok(ReorderReply {
                items,
                message: envelope.funny_message,
            })
        });
        match &result {
            Ok(_) => logger().success(COMPONENT, format!("{} order updated", self.kind), None),
            Err(err) => logger().error(
                COMPONENT,
                format!("Failed to update {} order", self.kind),
                Some(err),
            ),
        }
        result
    }

    async fn mutate(
        &self,
        action: CrudAction,
        id: Option<i64>,
        request: ApiRequest,
    ) -> Result<Record> {
        logger().debug(
            COMPONENT,
            format!("Attempting to {} {}", action.verb(), self.kind),
            Some(json!({ "id": id })),
        );

        let result = self
            .call(request)
            .await
            .and_then(|envelope| match envelope.data {
                Some(Value::Object(record)) => Ok(record),
                None | Some(Value::Null) => Ok(Record::new()),
                Some(other) => Err(PanelError::Decode(format!(
                    "expected an entity, got {}",
                    other
                ))),
            });

        match &result {
            Ok(record) => {
                logger().success(
                    COMPONENT,
                    format!("{} {}d", self.kind, action.verb()),
                    Some(json!({ "id": id })),
                );
                if let Some(on_success) = &self.callbacks.on_success {
                    let echoed = if record.is_empty() {
                        Value::Null
                    } else {
                        Value::Object(record.clone())
                    };
                    on_success(action, &echoed);
                }
            }
            Err(err) => {
                logger().error(
                    COMPONENT,
                    format!("Failed to {} {}", action.verb(), self.kind),
                    Some(err),
                );
                if let Some(on_error) = &self.callbacks.on_error {
                    on_error(action, err);
                }
            }
        }
        result
    }

    async fn call(&self, request: ApiRequest) -> Result<ApiResponse<Value>> {
        let reply = self.transport.send(request).await?;
        interpret(reply)
    }
}

fn collection_records(data: Option<Value>) -> Result<Vec<Record>> {
    let items = match data {
        Some(Value::Array(items)) => items,
        None | Some(Value::Null) => Vec::new(),
        Some(_) => return Err(PanelError::Decode("expected a list".to_string())),
    };
    items
        .into_iter()
        .map(|item| match item {
            Value::Object(record) => Ok(record),
            _ => Err(PanelError::Decode("list item is not an object".to_string())),
        })
        .collect()
}

/// Flattens `{content: {key: {language: entity}}}` into entities ordered by
/// key, then language.
fn grouped_records(data: Option<Value>) -> Result<Vec<Record>> {
    let content = match data {
        Some(Value::Object(mut page)) => page.remove("content").unwrap_or(Value::Null),
        None | Some(Value::Null) => Value::Null,
        Some(_) => return Err(PanelError::Decode("expected a page".to_string())),
    };
    let groups = match content {
        Value::Object(groups) => groups,
        Value::Null => return Ok(Vec::new()),
        _ => return Err(PanelError::Decode("page content is not grouped".to_string())),
    };

    let mut records = Vec::new();
    for (key, group) in groups {
        let Value::Object(languages) = group else {
            return Err(PanelError::Decode(format!("group '{}' is not an object", key)));
        };
        let mut entries: Vec<(String, Value)> = languages.into_iter().collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        for (_, entity) in entries {
            match entity {
                Value::Object(record) => records.push((key.clone(), record)),
                _ => return Err(PanelError::Decode(format!("entry of '{}' is not an object", key))),
            }
        }
    }
    records.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(records.into_iter().map(|(_, record)| record).collect())
}

impl From<Payload> for RequestBody {
    fn from(payload: Payload) -> Self {
        match payload {
            Payload::Json(map) => RequestBody::Json(Value::Object(map)),
            Payload::Multipart(parts) => RequestBody::Multipart(parts),
        }
    }
}

/// Maps a raw reply onto the error taxonomy: non-2xx is [`PanelError::Http`],
/// `success: false` is [`PanelError::Application`] whatever the status.
fn interpret(reply: HttpReply) -> Result<ApiResponse<Value>> {
    let fallback = format!("HTTP error! status: {}", reply.status);

    if reply.body.trim().is_empty() {
        return if reply.is_success() {
            Ok(ApiResponse {
                success: true,
                message: None,
                data: None,
                error_code: None,
                errors: None,
                funny_message: None,
            })
        } else {
            Err(PanelError::Http {
                status: reply.status,
                message: fallback,
            })
        };
    }

    let envelope = match serde_json::from_str::<ApiResponse<Value>>(&reply.body) {
        Ok(envelope) => envelope,
        Err(_) if !reply.is_success() => {
            return Err(PanelError::Http {
                status: reply.status,
                message: fallback,
            });
        }
        Err(err) => return Err(PanelError::Decode(err.to_string())),
    };

    if !reply.is_success() {
        return Err(PanelError::Http {
            status: reply.status,
            message: envelope.failure_reason().unwrap_or(fallback),
        });
    }
    if !envelope.success {
        return Err(PanelError::Application(
            envelope
                .failure_reason()
                .unwrap_or_else(|| "Request failed".to_string()),
        ));
    }
    Ok(envelope)
}
