//! In-memory doubles for the browser-facing seams.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;
use serde_json::Value;

pub use futures::executor::block_on;

use crate::error::{PanelError, Result};
use crate::fields::FieldDescriptor;
use crate::form::StagedFile;
use crate::modal::{FileWidget, FileWidgetFactory, UploadSlot};
use crate::toast::{ToastKind, Toaster};
use crate::transport::{ApiRequest, HttpReply, Transport};

/// Replays scripted replies in order and records every request.
#[derive(Default)]
pub struct MockTransport {
    replies: RefCell<VecDeque<Result<HttpReply>>>,
    requests: RefCell<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(&self, status: u16, body: Value) {
        self.reply_raw(status, &body.to_string());
    }

    pub fn reply_raw(&self, status: u16, body: &str) {
        self.replies.borrow_mut().push_back(Ok(HttpReply {
            status,
            body: body.to_string(),
        }));
    }

    pub fn fail(&self, message: &str) {
        self.replies
            .borrow_mut()
            .push_back(Err(PanelError::Network(message.to_string())));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<HttpReply> {
        self.requests.borrow_mut().push(request);
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(PanelError::Network("no scripted reply".to_string())))
    }
}

#[derive(Default)]
pub struct RecordingToaster {
    shown: RefCell<Vec<(ToastKind, String)>>,
}

impl RecordingToaster {
    pub fn messages(&self) -> Vec<(ToastKind, String)> {
        self.shown.borrow().clone()
    }
}

impl Toaster for RecordingToaster {
    fn show(&self, kind: ToastKind, message: &str) {
        self.shown.borrow_mut().push((kind, message.to_string()));
    }
}

/// Upload slots that count how often they are created and destroyed.
#[derive(Default)]
pub struct CountingWidgetFactory {
    created: Cell<usize>,
    destroyed: Rc<Cell<usize>>,
}

impl CountingWidgetFactory {
    pub fn created(&self) -> usize {
        self.created.get()
    }

    pub fn destroyed(&self) -> usize {
        self.destroyed.get()
    }
}

impl FileWidgetFactory for CountingWidgetFactory {
    fn create(&self, field: &'static FieldDescriptor) -> Box<dyn FileWidget> {
        self.created.set(self.created.get() + 1);
        Box::new(CountingWidget {
            slot: UploadSlot::new(field.name),
            destroyed: self.destroyed.clone(),
        })
    }
}

struct CountingWidget {
    slot: UploadSlot,
    destroyed: Rc<Cell<usize>>,
}

impl FileWidget for CountingWidget {
    fn field_name(&self) -> &'static str {
        self.slot.field_name()
    }

    fn stage(&mut self, file: StagedFile) {
        self.slot.stage(file);
    }

    fn staged(&self) -> Option<&StagedFile> {
        self.slot.staged()
    }

    fn destroy(&mut self) {
        self.destroyed.set(self.destroyed.get() + 1);
        self.slot.destroy();
    }

    fn is_destroyed(&self) -> bool {
        self.slot.is_destroyed()
    }
}
