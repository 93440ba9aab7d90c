//! The create/edit dialog.
//!
//! [`ModalDispatcher`] owns at most one [`ModalSession`]. Transitions are
//! synchronous; the network work in between is described by tickets
//! ([`FetchTicket`], [`SubmitTicket`]) that the embedding UI executes and
//! hands back. Every ticket names the session that issued it, so a result
//! arriving after the dialog was closed or reopened is discarded.
//!
//! ```text
//! Closed --show(None)--> Loaded --submit--> Submitting --ok--> Closed
//!   |                      ^                    |
//!   +--show(Some)--> FetchingExisting           +--err--> Loaded
//!                          |--err--> Closed
//! ```

mod session;
mod widgets;

use std::rc::Rc;

pub use session::{
    FetchTicket, ModalPhase, ModalSession, ModalView, SubmitAction, SubmitOutcome, SubmitTicket,
};
pub use widgets::{FileWidget, FileWidgetFactory, UploadSlot, UploadSlotFactory};

use crate::crud::CrudOperations;
use crate::error::{PanelError, Result};
use crate::fields::{EntityKind, FieldKind};
use crate::form::{FormValues, Record, StagedFile, build_payload, record_id, record_text, validate};
use crate::logger::logger;
use crate::templates::{self, Element, Node};
use crate::toast::Toaster;

const COMPONENT: &str = "Modal";

pub struct ModalDispatcher {
    session: Option<ModalSession>,
    next_session: u64,
    toaster: Rc<dyn Toaster>,
    widgets: Rc<dyn FileWidgetFactory>,
}

impl ModalDispatcher {
    pub fn new(toaster: Rc<dyn Toaster>) -> Self {
        Self::with_widget_factory(toaster, Rc::new(UploadSlotFactory))
    }

    pub fn with_widget_factory(toaster: Rc<dyn Toaster>, widgets: Rc<dyn FileWidgetFactory>) -> Self {
        Self {
            session: None,
            next_session: 1,
            toaster,
            widgets,
        }
    }

    pub fn phase(&self) -> ModalPhase {
        self.session
            .as_ref()
            .map_or(ModalPhase::Closed, ModalSession::phase)
    }

    pub fn session(&self) -> Option<&ModalSession> {
        self.session.as_ref()
    }

    /// Opens the dialog for `kind`, closing any open one first.
    ///
    /// Without an id the dialog is immediately `Loaded` in create mode. With
    /// one it waits in `FetchingExisting` and the returned ticket must be
    /// executed and passed to [`Self::apply_fetch`].
    pub fn show(&mut self, kind: EntityKind, existing: Option<i64>) -> Option<FetchTicket> {
        let mut session = self.begin(kind, existing);
        let ticket = match existing {
            Some(entity) => Some(FetchTicket {
                session: session.id,
                kind,
                id: entity,
            }),
            None => {
                self.enter_loaded(&mut session);
                None
            }
        };
        self.session = Some(session);
        logger().group_end();
        ticket
    }

    /// Opens edit mode on a record the caller already holds. Used for types
    /// whose entities cannot be fetched one by one.
    pub fn show_record(&mut self, kind: EntityKind, record: Record) {
        let mut session = self.begin(kind, record_id(&record));
        session.current = Some(record);
        self.enter_loaded(&mut session);
        self.session = Some(session);
        logger().group_end();
    }

    /// [`Self::show`] for a type named at runtime.
    pub fn show_named(&mut self, type_name: &str, existing: Option<i64>) -> Result<Option<FetchTicket>> {
        let kind = type_name.parse::<EntityKind>().map_err(|err| {
            logger().error(COMPONENT, "Cannot open dialog", Some(&err));
            err
        })?;
        Ok(self.show(kind, existing))
    }

    /// Applies an edit-mode load. Returns `false` when the ticket is stale.
    pub fn apply_fetch(&mut self, ticket: FetchTicket, result: Result<Record>) -> bool {
        if !self.is_current(ticket.session, ModalPhase::FetchingExisting) {
            logger().debug(
                COMPONENT,
                format!("Discarding stale load of {} {}", ticket.kind, ticket.id),
                None,
            );
            return false;
        }

        match result {
            Ok(record) => {
                let widgets = self.widgets.clone();
                if let Some(session) = self.session.as_mut() {
                    session.current = Some(record);
                    attach_widgets(session, widgets.as_ref());
                    session.phase = ModalPhase::Loaded;
                }
                logger().debug(COMPONENT, format!("Loaded {} {}", ticket.kind, ticket.id), None);
            }
            Err(err) => {
                logger().error(
                    COMPONENT,
                    format!("Failed to load {} {}", ticket.kind, ticket.id),
                    Some(&err),
                );
                self.toaster.error(&format!(
                    "Failed to load {} data: {}",
                    ticket.kind,
                    err.user_message()
                ));
                self.close();
            }
        }
        true
    }

    /// Remembers a value typed into `field` so later renders keep it.
    pub fn record_input(&mut self, field: &str, value: impl Into<String>) {
        if let Some(session) = self.loaded_session() {
            session.draft.set_text(field, value);
        }
    }

    /// Remembers every text value of a form snapshot.
    pub fn keep_draft(&mut self, values: &FormValues) {
        if let Some(session) = self.loaded_session() {
            session.draft.merge_texts(values);
        }
    }

    /// Hands a picked file to the upload widget of `field`.
    pub fn stage_file(&mut self, field: &str, file: StagedFile) -> Result<()> {
        let session = self
            .session
            .as_mut()
            .filter(|session| session.phase == ModalPhase::Loaded)
            .ok_or(PanelError::InvalidState("no dialog is ready for uploads"))?;
        let widget = session
            .widgets
            .iter_mut()
            .find(|widget| widget.field_name() == field)
            .ok_or(PanelError::InvalidState("field has no upload widget"))?;
        logger().debug(
            COMPONENT,
            format!("Staged '{}' for {}", file.file_name, field),
            None,
        );
        widget.stage(file);
        Ok(())
    }

    /// Validates the form and, when it passes, moves to `Submitting`.
    ///
    /// Staged uploads are merged into `values`. Validation failures are kept
    /// on the session for display and nothing is sent.
    pub fn submit(&mut self, mut values: FormValues) -> Result<SubmitTicket> {
        let session = self
            .session
            .as_mut()
            .filter(|session| session.phase == ModalPhase::Loaded)
            .ok_or(PanelError::InvalidState("no dialog is ready for submission"))?;
        session.draft.merge_texts(&values);

        for widget in &session.widgets {
            if let Some(file) = widget.staged() {
                values.set_file(widget.field_name(), file.clone());
            }
        }

        let fields = session.kind.fields();
        if let Err(errors) = validate(fields, &values) {
            logger().warn(
                COMPONENT,
                format!("{} form has invalid fields", session.kind),
                Some(serde_json::Value::String(errors.to_string())),
            );
            session.field_errors = errors.clone();
            return Err(PanelError::Validation(errors));
        }
        session.field_errors = Default::default();

        let action = match session.current.as_ref().and_then(record_id) {
            Some(id) => SubmitAction::Update(id),
            None => SubmitAction::Create,
        };
        session.phase = ModalPhase::Submitting;
        logger().debug(COMPONENT, format!("Submitting {} ({:?})", session.kind, action), None);
        self.toaster.info("Saving...");

        Ok(SubmitTicket {
            session: session.id,
            kind: session.kind,
            action,
            payload: build_payload(fields, &values),
        })
    }

    /// Applies the result of a submission.
    pub fn apply_submit(&mut self, ticket: &SubmitTicket, result: Result<Record>) -> SubmitOutcome {
        if !self.is_current(ticket.session, ModalPhase::Submitting) {
            logger().debug(COMPONENT, format!("Discarding stale {} submission", ticket.kind), None);
            return SubmitOutcome::Stale;
        }

        let config = ticket.kind.config();
        match result {
            Ok(record) => {
                self.toaster.success(match ticket.action {
                    SubmitAction::Create => config.success_messages.create,
                    SubmitAction::Update(_) => config.success_messages.update,
                });
                self.close();
                SubmitOutcome::Saved {
                    kind: ticket.kind,
                    record,
                }
            }
            Err(err) => {
                let prefix = match ticket.action {
                    SubmitAction::Create => config.error_messages.create,
                    SubmitAction::Update(_) => config.error_messages.update,
                };
                self.toaster
                    .error(&format!("{}: {}", prefix, err.user_message()));
                if let Some(session) = self.session.as_mut() {
                    session.phase = ModalPhase::Loaded;
                }
                SubmitOutcome::Failed(err)
            }
        }
    }

    /// Releases upload widgets, then drops the session. Safe to call in any
    /// state and any number of times.
    pub fn close(&mut self) {
        let Some(mut session) = self.session.take() else {
            return;
        };
        for widget in session.widgets.iter_mut() {
            if !widget.is_destroyed() {
                widget.destroy();
            }
        }
        logger().debug(COMPONENT, format!("Closed {} dialog", session.kind), None);
    }

    /// Renders the open dialog, or `None` when closed.
    pub fn view(&self) -> Option<ModalView> {
        let session = self.session.as_ref()?;
        let config = session.kind.config();

        let fields = if session.phase == ModalPhase::FetchingExisting {
            Vec::new()
        } else {
            let current = session.current.as_ref();
            config
                .fields
                .iter()
                .map(|field| {
                    let value = match field.kind {
                        FieldKind::File => None,
                        _ => session
                            .draft
                            .get_text(field.name)
                            .map(str::to_string)
                            .or_else(|| current.and_then(|record| record_text(record, field.name)))
                            .or_else(|| field.default_value.map(str::to_string)),
                    };
                    let node = templates::render(field, value.as_deref(), current);
                    match (node, session.field_errors.for_field(field.name)) {
                        (Node::Element(group), Some(message)) => Node::from(
                            group.child(Element::new("p").class("field-error").text(message)),
                        ),
                        (node, _) => node,
                    }
                })
                .collect()
        };

        Some(ModalView {
            kind: session.kind,
            title: if session.is_edit() {
                config.edit_title
            } else {
                config.create_title
            },
            phase: session.phase,
            fields,
            errors: session.field_errors.clone(),
            previews: session
                .widgets
                .iter()
                .filter_map(|widget| widget.preview_url().map(|url| (widget.field_name(), url)))
                .collect(),
        })
    }

    /// Opens the dialog and, in edit mode, loads the entity through `crud`.
    pub async fn open_with(&mut self, crud: &CrudOperations, existing: Option<i64>) -> ModalPhase {
        if let Some(ticket) = self.show(crud.kind(), existing) {
            let result = ticket.execute(crud).await;
            self.apply_fetch(ticket, result);
        }
        self.phase()
    }

    /// Submits the form through `crud` and applies the outcome.
    pub async fn submit_with(&mut self, crud: &CrudOperations, values: FormValues) -> Result<SubmitOutcome> {
        let ticket = self.submit(values)?;
        let result = ticket.execute(crud).await;
        Ok(self.apply_submit(&ticket, result))
    }

    /// Closes any open dialog and starts a new session inside a log group
    /// the caller ends.
    fn begin(&mut self, kind: EntityKind, existing: Option<i64>) -> ModalSession {
        if self.session.is_some() {
            self.close();
        }

        let id = self.next_session;
        self.next_session += 1;
        logger().group(COMPONENT, &format!("Opening {} dialog", kind));
        logger().info(
            COMPONENT,
            match existing {
                Some(entity) => format!("Editing {} {}", kind, entity),
                None => format!("Creating {}", kind),
            },
            None,
        );
        ModalSession::new(id, kind, existing)
    }

    fn enter_loaded(&self, session: &mut ModalSession) {
        attach_widgets(session, self.widgets.as_ref());
        session.phase = ModalPhase::Loaded;
    }

    fn loaded_session(&mut self) -> Option<&mut ModalSession> {
        self.session
            .as_mut()
            .filter(|session| session.phase == ModalPhase::Loaded)
    }

    fn is_current(&self, session: u64, phase: ModalPhase) -> bool {
        self.session
            .as_ref()
            .is_some_and(|open| open.id == session && open.phase == phase)
    }
}

fn attach_widgets(session: &mut ModalSession, factory: &dyn FileWidgetFactory) {
    session.widgets = session
        .kind
        .fields()
        .iter()
        .filter(|field| field.kind == FieldKind::File)
        .map(|field| factory.create(field))
        .collect();
}
