use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;
use futures::executor::block_on;
use panel::config::PanelConfig;
use panel::crud::{CrudAction, CrudCallbacks, CrudOperations};
use panel::form::FormValues;
use panel::listing::rows_for;
use panel::modal::{ModalDispatcher, ModalPhase, SubmitOutcome};
use panel::reorder::ReorderList;
use panel::toast::{ToastKind, Toaster};
use panel::transport::{ApiRequest, HttpReply, Method, Transport};
use panel::{EntityKind, PanelError};
use serde_json::{Value, json};

#[derive(Default)]
struct ScriptedApi {
    replies: RefCell<VecDeque<(u16, Value)>>,
    log: RefCell<Vec<(Method, String)>>,
}

impl ScriptedApi {
    fn then(&self, status: u16, body: Value) -> &Self {
        self.replies.borrow_mut().push_back((status, body));
        self
    }

    fn calls(&self) -> Vec<(Method, String)> {
        self.log.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Transport for ScriptedApi {
    async fn send(&self, request: ApiRequest) -> panel::Result<HttpReply> {
        self.log.borrow_mut().push((request.method, request.url));
        let (status, body) = self
            .replies
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| PanelError::Network("unexpected request".to_string()))?;
        Ok(HttpReply {
            status,
            body: body.to_string(),
        })
    }
}

#[derive(Default)]
struct Toasts(RefCell<Vec<(ToastKind, String)>>);

impl Toaster for Toasts {
    fn show(&self, kind: ToastKind, message: &str) {
        self.0.borrow_mut().push((kind, message.to_string()));
    }
}

fn setup(kind: EntityKind) -> (Rc<ScriptedApi>, Rc<Toasts>, CrudOperations, ModalDispatcher) {
    let api = Rc::new(ScriptedApi::default());
    let toasts = Rc::new(Toasts::default());
    let crud = CrudOperations::new(kind, api.clone(), &PanelConfig::default());
    let modal = ModalDispatcher::new(toasts.clone());
    (api, toasts, crud, modal)
}

#[test]
fn edit_submit_then_refresh_listing() {
    let (api, toasts, crud, mut modal) = setup(EntityKind::Faq);
    let refreshes = Rc::new(RefCell::new(0));
    let counter = refreshes.clone();
    let crud = crud.with_callbacks(CrudCallbacks {
        on_success: Some(Rc::new(move |_: CrudAction, _: &Value| *counter.borrow_mut() += 1)),
        on_error: None,
    });
    api.then(200, json!({"success": true, "data": {"id": 5, "question": "Old?", "answer": "Yes", "displayOrder": 1}}))
        .then(200, json!({"success": true, "data": {"id": 5, "question": "New?", "answer": "Yes", "displayOrder": 1}}))
        .then(200, json!({"success": true, "data": [
            {"id": 5, "question": "New?", "answer": "Yes", "displayOrder": 1},
            {"id": 6, "question": "Other", "answer": "No", "displayOrder": 2}
        ]}));

    assert_eq!(block_on(modal.open_with(&crud, Some(5))), ModalPhase::Loaded);
    let values = FormValues::new()
        .with_text("question", "New?")
        .with_text("answer", "Yes")
        .with_text("displayOrder", "1");
    let outcome = block_on(modal.submit_with(&crud, values)).unwrap();
    assert!(matches!(outcome, SubmitOutcome::Saved { .. }));
    assert_eq!(modal.phase(), ModalPhase::Closed);
    assert!(modal.session().is_none());

    let rows = rows_for(EntityKind::Faq, &block_on(crud.list()).unwrap()).unwrap();

    assert_eq!(rows[0].title, "New?");
    assert_eq!(*refreshes.borrow(), 1);
    assert_eq!(
        api.calls(),
        vec![
            (Method::Get, "/api/admin/faqs/5".to_string()),
            (Method::Put, "/api/admin/faqs/5".to_string()),
            (Method::Get, "/api/admin/faqs".to_string()),
        ]
    );
    assert_eq!(
        toasts.0.borrow().clone(),
        vec![
            (ToastKind::Info, "Saving...".to_string()),
            (ToastKind::Success, "FAQ updated successfully!".to_string()),
        ]
    );
}

#[test]
fn translation_is_edited_from_its_listed_row() {
    let (api, toasts, crud, mut modal) = setup(EntityKind::Translation);
    api.then(200, json!({"success": true, "data": {"content": {
            "nav.home": {"en": {"id": 3, "key": "nav.home", "languageCode": "en", "translatedText": "Home"}}
        }}}))
        .then(200, json!({"success": true, "data": {"id": 3, "key": "nav.home", "languageCode": "en", "translatedText": "Start"}}));

    let records = block_on(crud.list()).unwrap();
    let rows = rows_for(EntityKind::Translation, &records).unwrap();
    assert_eq!(rows[0].id, 3);

    modal.show_record(EntityKind::Translation, records[0].clone());
    let values = FormValues::new()
        .with_text("key", "nav.home")
        .with_text("languageCode", "en")
        .with_text("translatedText", "Start");
    let outcome = block_on(modal.submit_with(&crud, values)).unwrap();

    assert!(matches!(outcome, SubmitOutcome::Saved { .. }));
    assert_eq!(
        api.calls(),
        vec![
            (Method::Get, "/api/admin/translations/paginated?page=0&size=100".to_string()),
            (Method::Post, "/api/admin/translations".to_string()),
        ]
    );
    assert_eq!(
        toasts.0.borrow().last().cloned(),
        Some((ToastKind::Success, "Translation updated successfully".to_string()))
    );
}

#[test]
fn out_of_range_benefit_never_reaches_the_network() {
    let (api, toasts, crud, mut modal) = setup(EntityKind::Benefit);
    modal.show(EntityKind::Benefit, None);

    let values = FormValues::new()
        .with_text("title", "Fast")
        .with_text("description", "Quick answers")
        .with_text("displayOrder", "5");
    let err = block_on(modal.submit_with(&crud, values)).unwrap_err();

    let PanelError::Validation(errors) = err else {
        panic!("expected a validation error");
    };
    assert!(errors.for_field("displayOrder").is_some());
    assert_eq!(modal.phase(), ModalPhase::Loaded);
    assert!(api.calls().is_empty());
    assert!(toasts.0.borrow().is_empty());
}

#[test]
fn create_then_close_twice() {
    let (api, _toasts, crud, mut modal) = setup(EntityKind::Testimonial);
    api.then(201, json!({"success": true, "data": {"id": 1, "name": "Aziza", "comment": "Great", "rating": 5}}));
    modal.show(EntityKind::Testimonial, None);

    let values = FormValues::new()
        .with_text("name", "Aziza")
        .with_text("comment", "Great")
        .with_text("rating", "5");
    block_on(modal.submit_with(&crud, values)).unwrap();
    modal.close();
    modal.close();

    assert_eq!(api.calls(), vec![(Method::Post, "/api/admin/testimonials".to_string())]);
    assert_eq!(modal.phase(), ModalPhase::Closed);
}

#[test]
fn failed_reorder_keeps_listing_as_it_was() {
    let (api, toasts, crud, _modal) = setup(EntityKind::Benefit);
    api.then(200, json!({"success": true, "data": [
            {"id": 1, "title": "A", "description": "a", "displayOrder": 1},
            {"id": 2, "title": "B", "description": "b", "displayOrder": 2},
            {"id": 3, "title": "C", "description": "c", "displayOrder": 3}
        ]}))
        .then(400, json!({"success": false, "message": "Display order must be between 1 and 4"}));

    let rows = rows_for(EntityKind::Benefit, &block_on(crud.list()).unwrap()).unwrap();
    let mut list = ReorderList::from_rows(EntityKind::Benefit, &rows);
    list.begin_drag(1).unwrap();
    list.drop_at(2).unwrap();
    let kept = block_on(list.persist(&crud, toasts.as_ref())).unwrap();

    assert!(!kept);
    assert_eq!(list.ids(), vec![1, 2, 3]);
    assert_eq!(list.orders(), vec![1, 2, 3]);
    assert_eq!(
        toasts.0.borrow().last().cloned(),
        Some((
            ToastKind::Error,
            "Failed to update order: Display order must be between 1 and 4".to_string()
        ))
    );
}
