use std::fmt;

use crate::crud::CrudOperations;
use crate::error::{PanelError, Result};
use crate::fields::EntityKind;
use crate::form::{FormValues, Payload, Record, ValidationErrors};
use crate::templates::Node;

use super::widgets::FileWidget;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalPhase {
    Closed,
    /// Edit requested; waiting for the existing entity.
    FetchingExisting,
    Loaded,
    Submitting,
}

/// State of the one open dialog. Dropped wholesale on close.
pub struct ModalSession {
    pub(super) id: u64,
    pub(super) kind: EntityKind,
    pub(super) phase: ModalPhase,
    /// Id passed to `show`, kept so the title stays "Edit" while fetching.
    pub(super) requested_id: Option<i64>,
    /// `Some` exactly in edit mode.
    pub(super) current: Option<Record>,
    pub(super) widgets: Vec<Box<dyn FileWidget>>,
    pub(super) field_errors: ValidationErrors,
    /// What the user has typed so far; wins over `current` when rendering.
    pub(super) draft: FormValues,
}

impl ModalSession {
    pub(super) fn new(id: u64, kind: EntityKind, requested_id: Option<i64>) -> Self {
        Self {
            id,
            kind,
            phase: ModalPhase::FetchingExisting,
            requested_id,
            current: None,
            widgets: Vec::new(),
            field_errors: ValidationErrors::default(),
            draft: FormValues::new(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn phase(&self) -> ModalPhase {
        self.phase
    }

    pub fn current(&self) -> Option<&Record> {
        self.current.as_ref()
    }

    pub fn is_edit(&self) -> bool {
        self.requested_id.is_some() || self.current.is_some()
    }

    pub fn widgets(&self) -> &[Box<dyn FileWidget>] {
        &self.widgets
    }

    pub fn field_errors(&self) -> &ValidationErrors {
        &self.field_errors
    }

    pub fn draft(&self) -> &FormValues {
        &self.draft
    }
}

impl fmt::Debug for ModalSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModalSession")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("phase", &self.phase)
            .field("requested_id", &self.requested_id)
            .field("widgets", &self.widgets.len())
            .finish()
    }
}

/// Pending edit-mode load. Hand the result back through
/// [`super::ModalDispatcher::apply_fetch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub session: u64,
    pub kind: EntityKind,
    pub id: i64,
}

impl FetchTicket {
    pub async fn execute(&self, crud: &CrudOperations) -> Result<Record> {
        if crud.kind() != self.kind {
            return Err(PanelError::InvalidState("client bound to another entity type"));
        }
        crud.fetch(self.id).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitAction {
    Create,
    Update(i64),
}

/// Validated submission waiting to be sent.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitTicket {
    pub session: u64,
    pub kind: EntityKind,
    pub action: SubmitAction,
    pub payload: Payload,
}

impl SubmitTicket {
    pub async fn execute(&self, crud: &CrudOperations) -> Result<Record> {
        if crud.kind() != self.kind {
            return Err(PanelError::InvalidState("client bound to another entity type"));
        }
        match self.action {
            SubmitAction::Create => crud.create(self.payload.clone()).await,
            SubmitAction::Update(id) => crud.update(id, self.payload.clone()).await,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Persisted; the dialog is closed and the listing should be re-fetched.
    Saved { kind: EntityKind, record: Record },
    /// The dialog is back in `Loaded` and may be resubmitted.
    Failed(PanelError),
    /// The session that issued the ticket is gone; nothing was applied.
    Stale,
}

/// What the dialog currently shows.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalView {
    pub kind: EntityKind,
    pub title: &'static str,
    pub phase: ModalPhase,
    /// One fragment per field, in declaration order. Empty while fetching.
    pub fields: Vec<Node>,
    pub errors: ValidationErrors,
    /// Data URLs of staged uploads, by field name.
    pub previews: Vec<(&'static str, String)>,
}
