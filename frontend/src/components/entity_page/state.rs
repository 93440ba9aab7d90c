//! Runtime state of one entity page.

use std::rc::Rc;

use panel::crud::{CrudAction, CrudCallbacks, CrudOperations};
use panel::form::{record_id, Record};
use panel::listing::ListRow;
use panel::modal::ModalDispatcher;
use panel::reorder::ReorderList;
use panel::EntityKind;
use serde_json::Value;
use yew::prelude::*;

use crate::helpers::DomToaster;
use crate::transport::GlooTransport;

use super::messages::Msg;
use super::props::EntityPageProps;

pub struct EntityPage {
    pub kind: EntityKind,
    pub crud: CrudOperations,
    pub toaster: Rc<DomToaster>,
    /// Owns the dialog session; nothing else touches it.
    pub modal: ModalDispatcher,
    /// Records as last listed; edit dialogs of unfetchable types open from these.
    pub records: Vec<Record>,
    /// Rows by id, as last listed.
    pub rows: Vec<ListRow>,
    /// Visual order of `rows`, including any drag in progress.
    pub order: ReorderList,
    pub loading: bool,
    /// A listing arrived while an order change was unsettled.
    pub listing_deferred: bool,
    pub form_ref: NodeRef,
}

impl EntityPage {
    pub fn new(ctx: &Context<Self>) -> Self {
        let EntityPageProps { kind, config } = ctx.props().clone();
        let toaster = Rc::new(DomToaster {
            duration_ms: config.toast_duration_ms,
        });

        // Every confirmed mutation refreshes the listing.
        let link = ctx.link().clone();
        let crud = CrudOperations::new(kind, Rc::new(GlooTransport), &config).with_callbacks(
            CrudCallbacks {
                on_success: Some(Rc::new(move |_: CrudAction, _: &Value| {
                    link.send_message(Msg::Refresh)
                })),
                on_error: None,
            },
        );

        Self {
            kind,
            crud,
            modal: ModalDispatcher::new(toaster.clone()),
            toaster,
            records: Vec::new(),
            rows: Vec::new(),
            order: ReorderList::new(kind, Vec::new()),
            loading: true,
            listing_deferred: false,
            form_ref: NodeRef::default(),
        }
    }

    pub fn row(&self, id: i64) -> Option<&ListRow> {
        self.rows.iter().find(|row| row.id == id)
    }

    pub fn record(&self, id: i64) -> Option<&Record> {
        self.records.iter().find(|record| record_id(record) == Some(id))
    }
}
