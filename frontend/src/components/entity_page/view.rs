//! View rendering for the entity page: the listing with its drag handles and
//! the create/edit sheet.

use panel::modal::{ModalPhase, ModalView};
use yew::html::Scope;
use yew::prelude::*;

use crate::tops_sheet::modal_sheet::ModalSheet;

use super::markup::to_html;
use super::messages::Msg;
use super::state::EntityPage;
use super::update::{picked_file, typed_value};

pub fn view(page: &EntityPage, ctx: &Context<EntityPage>) -> Html {
    let link = ctx.link();
    let config = page.kind.config();
    let modal = page.modal.view();

    html! {
        <section class="entity-page" data-type={config.type_name}>
            <header class="entity-page-header">
                <h1>{ config.label }</h1>
                <button class="btn btn-primary" onclick={link.callback(|_| Msg::OpenCreate)}>
                    { config.create_title }
                </button>
            </header>
            { build_listing(page, link) }
            <ModalSheet
                open={modal.is_some()}
                title={modal.as_ref().map(|view| view.title.to_string()).unwrap_or_default()}
                on_close={link.callback(|_| Msg::Close)}
            >
                { modal.as_ref().map(|view| build_form(page, view, link)).unwrap_or_default() }
            </ModalSheet>
        </section>
    }
}

fn build_listing(page: &EntityPage, link: &Scope<EntityPage>) -> Html {
    if page.loading && page.rows.is_empty() {
        return html! { <p class="entity-list-empty">{"Loading…"}</p> };
    }
    if page.rows.is_empty() {
        return html! { <p class="entity-list-empty">{"Nothing here yet."}</p> };
    }

    let reorderable = page.kind.config().reorderable;
    let deletable = page.kind.config().deletable;
    html! {
        <ul
            class={classes!("entity-list", page.order.is_pending().then_some("saving"))}
            ondrop={link.callback(|e: DragEvent| {
                e.prevent_default();
                Msg::Drop
            })}
        >
            {
                for page.order.items().iter().enumerate().filter_map(|(index, item)| {
                    let row = page.row(item.id)?;
                    let id = item.id;
                    let draggable = reorderable && item.active;
                    Some(html! {
                        <li
                            key={id.to_string()}
                            class={classes!("entity-row", (!item.active).then_some("inactive"))}
                            data-id={id.to_string()}
                            data-display-order={item.display_order.to_string()}
                            draggable={draggable.to_string()}
                            ondragstart={link.callback(move |_: DragEvent| Msg::DragStart(id))}
                            ondragover={link.callback(move |e: DragEvent| {
                                e.prevent_default();
                                Msg::DragOver(index)
                            })}
                            ondragend={link.callback(|_: DragEvent| Msg::DragEnd)}
                        >
                            if reorderable {
                                <span class="order-badge">{ item.display_order }</span>
                            }
                            if let Some(url) = row.image_url.clone() {
                                <img class="entity-row-image" src={url} alt={row.title.clone()} />
                            }
                            <div class="entity-row-text">
                                <strong>{ row.title.clone() }</strong>
                                <p>{ row.subtitle.clone() }</p>
                            </div>
                            <div class="entity-row-actions">
                                <button class="btn" onclick={link.callback(move |_| Msg::OpenEdit(id))}>
                                    {"Edit"}
                                </button>
                                if deletable {
                                    <button class="btn btn-danger" onclick={link.callback(move |_| Msg::Delete(id))}>
                                        {"Delete"}
                                    </button>
                                }
                            </div>
                        </li>
                    })
                })
            }
        </ul>
    }
}

fn build_form(page: &EntityPage, modal: &ModalView, link: &Scope<EntityPage>) -> Html {
    if modal.phase == ModalPhase::FetchingExisting {
        return html! { <p class="modal-loading">{"Loading…"}</p> };
    }

    let session = page.modal.session().map(|session| session.id()).unwrap_or_default();
    let submitting = modal.phase == ModalPhase::Submitting;
    html! {
        <form
            key={session.to_string()}
            class="entity-form"
            ref={page.form_ref.clone()}
            novalidate={true}
            onsubmit={link.callback(|e: SubmitEvent| {
                e.prevent_default();
                Msg::Submit
            })}
            oninput={link.batch_callback(|e: InputEvent| {
                typed_value(&e).map(|(field, value)| Msg::Input(field, value))
            })}
            onchange={link.batch_callback(|e: Event| {
                picked_file(&e).map(|(field, file)| Msg::FilePicked(field, file))
            })}
        >
            { for modal.fields.iter().map(to_html) }
            {
                for modal.previews.iter().map(|(field, url)| html! {
                    <figure class="upload-preview" data-field={*field}>
                        <img src={url.clone()} alt="Selected file preview" />
                    </figure>
                })
            }
            <div class="form-actions">
                <button type="button" class="btn" onclick={link.callback(|_| Msg::Close)}>
                    {"Cancel"}
                </button>
                <button type="submit" class="btn btn-primary" disabled={submitting}>
                    { if submitting { "Saving…" } else { "Save" } }
                </button>
            </div>
        </form>
    }
}
