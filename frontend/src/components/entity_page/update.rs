//! Update function for the entity page.
//!
//! Elm-style: the panel types do the state transitions, this module only
//! starts the network work they describe and feeds the results back as
//! messages.

use panel::form::FormValues;
use panel::listing::rows_for;
use panel::logger::logger;
use panel::modal::SubmitOutcome;
use panel::toast::Toaster;
use panel::{FieldKind, PanelError};
use wasm_bindgen::JsCast;
use web_sys::{FormData, HtmlFormElement};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::helpers::{confirm, stage_browser_file};

use super::messages::Msg;
use super::state::EntityPage;

const COMPONENT: &str = "EntityPage";

pub fn update(page: &mut EntityPage, ctx: &Context<EntityPage>, msg: Msg) -> bool {
    match msg {
        Msg::Refresh => {
            page.loading = true;
            let crud = page.crud.clone();
            let link = ctx.link().clone();
            spawn_local(async move {
                link.send_message(Msg::Listed(crud.list().await));
            });
            true
        }
        Msg::Listed(result) => {
            page.loading = false;
            let listed = result.and_then(|records| {
                rows_for(page.kind, &records).map(|rows| (records, rows))
            });
            match listed {
                Ok((records, rows)) => {
                    if page.order.replace_rows(&rows).is_err() {
                        logger().debug(COMPONENT, "Listing deferred until the order is saved", None);
                        page.listing_deferred = true;
                        return true;
                    }
                    page.records = records;
                    page.rows = rows;
                }
                Err(err) => {
                    logger().error(COMPONENT, "Could not refresh listing", Some(&err));
                    page.toaster.error(&format!(
                        "Failed to load {}: {}",
                        page.kind.config().label.to_lowercase(),
                        err.user_message()
                    ));
                }
            }
            true
        }
        Msg::OpenCreate => {
            page.modal.show(page.kind, None);
            true
        }
        Msg::OpenEdit(id) => {
            if !page.kind.config().fetchable {
                match page.record(id).cloned() {
                    Some(record) => page.modal.show_record(page.kind, record),
                    None => logger().warn(COMPONENT, format!("No listed {} {}", page.kind, id), None),
                }
                return true;
            }
            if let Some(ticket) = page.modal.show(page.kind, Some(id)) {
                let crud = page.crud.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = ticket.execute(&crud).await;
                    link.send_message(Msg::Fetched(ticket, result));
                });
            }
            true
        }
        Msg::Fetched(ticket, result) => page.modal.apply_fetch(ticket, result),
        Msg::Input(field, value) => {
            // The control already shows it.
            page.modal.record_input(&field, value);
            false
        }
        Msg::FilePicked(field, file) => {
            let link = ctx.link().clone();
            spawn_local(async move {
                match stage_browser_file(file).await {
                    Ok(staged) => link.send_message(Msg::FileStaged(field, staged)),
                    Err(err) => logger().warn(
                        COMPONENT,
                        format!("Could not read file for {}: {}", field, err),
                        None,
                    ),
                }
            });
            false
        }
        Msg::FileStaged(field, staged) => {
            let typed = read_form(page);
            page.modal.keep_draft(&typed);
            match page.modal.stage_file(&field, staged) {
                Ok(()) => true,
                Err(err) => {
                    logger().warn(COMPONENT, err.to_string(), None);
                    false
                }
            }
        }
        Msg::Submit => {
            let values = read_form(page);
            match page.modal.submit(values) {
                Ok(ticket) => {
                    let crud = page.crud.clone();
                    let link = ctx.link().clone();
                    spawn_local(async move {
                        let result = ticket.execute(&crud).await;
                        link.send_message(Msg::Submitted(ticket, result));
                    });
                }
                // Shown inline by the view.
                Err(PanelError::Validation(_)) => {}
                Err(err) => logger().warn(COMPONENT, err.to_string(), None),
            }
            true
        }
        Msg::Submitted(ticket, result) => {
            !matches!(page.modal.apply_submit(&ticket, result), SubmitOutcome::Stale)
        }
        Msg::Close => {
            page.modal.close();
            true
        }
        Msg::Delete(id) => {
            if !page.kind.config().deletable {
                return false;
            }
            let type_name = page.kind.type_name().replace('-', " ");
            if !confirm(&format!("Are you sure you want to delete this {}?", type_name)) {
                return false;
            }
            let crud = page.crud.clone();
            let link = ctx.link().clone();
            spawn_local(async move {
                link.send_message(Msg::Deleted(crud.delete(id).await));
            });
            false
        }
        Msg::Deleted(result) => {
            let messages = page.kind.config();
            match result {
                Ok(()) => page.toaster.success(messages.success_messages.delete),
                Err(err) => page.toaster.error(&format!(
                    "{}: {}",
                    messages.error_messages.delete,
                    err.user_message()
                )),
            }
            false
        }
        Msg::DragStart(id) => match page.order.begin_drag(id) {
            Ok(()) => true,
            Err(err) => {
                logger().warn(COMPONENT, err.to_string(), None);
                false
            }
        },
        Msg::DragOver(index) => {
            if !page.order.is_dragging() {
                return false;
            }
            page.order.drop_at(index).is_ok()
        }
        Msg::Drop => match page.order.finish_drop() {
            Ok(batch) => {
                let crud = page.crud.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    link.send_message(Msg::Reordered(crud.reorder(&batch).await));
                });
                true
            }
            Err(_) => false,
        },
        Msg::DragEnd => {
            // Released outside any row.
            if page.order.is_dragging() {
                page.order.cancel_drag();
                flush_deferred_listing(page, ctx);
                return true;
            }
            false
        }
        Msg::Reordered(result) => {
            page.order.complete(result, page.toaster.as_ref());
            flush_deferred_listing(page, ctx);
            true
        }
    }
}

fn flush_deferred_listing(page: &mut EntityPage, ctx: &Context<EntityPage>) {
    if std::mem::take(&mut page.listing_deferred) {
        ctx.link().send_message(Msg::Refresh);
    }
}

/// Collects the text values of the open form. Files are staged separately.
fn read_form(page: &EntityPage) -> FormValues {
    let mut values = FormValues::new();
    let Some(form) = page.form_ref.cast::<HtmlFormElement>() else {
        return values;
    };
    let Ok(data) = FormData::new_with_form(&form) else {
        return values;
    };
    for field in page.kind.fields() {
        if field.kind == FieldKind::File {
            continue;
        }
        if let Some(value) = data.get(field.name).as_string() {
            values.set_text(field.name, value);
        }
    }
    values
}

/// Name and value of the text control an input event came from.
pub fn typed_value(event: &InputEvent) -> Option<(String, String)> {
    let target = event.target()?;
    if let Some(input) = target.dyn_ref::<web_sys::HtmlInputElement>() {
        return (input.type_() != "file").then(|| (input.name(), input.value()));
    }
    target
        .dyn_ref::<web_sys::HtmlTextAreaElement>()
        .map(|area| (area.name(), area.value()))
}

/// Extracts the first picked file from a change event on a file input.
pub fn picked_file(event: &Event) -> Option<(String, web_sys::File)> {
    let input = event
        .target()?
        .dyn_into::<web_sys::HtmlInputElement>()
        .ok()
        .filter(|input| input.type_() == "file")?;
    let file = input.files()?.get(0)?;
    Some((input.name(), file))
}
