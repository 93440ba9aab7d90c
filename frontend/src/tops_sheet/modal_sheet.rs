use uuid::Uuid;
use yew::{classes, html, Callback, Component, Context, Html, MouseEvent, Properties};

/// Slide-down surface hosting the create/edit dialog.
pub struct ModalSheet {
    pub id: String,
}

#[derive(Properties, PartialEq)]
pub struct Props {
    #[prop_or_default]
    pub children: Html,
    pub open: bool,
    pub title: String,
    pub on_close: Callback<()>,
}

impl Component for ModalSheet {
    type Message = ();
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            id: format!("sheet-{}", Uuid::new_v4()),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let title_id = format!("{}-title", self.id);
        let on_close = props.on_close.clone();
        html! {
            <div
                class={classes!("top-sheet", props.open.then_some("show"))}
                id={self.id.clone()}
                role="dialog"
                aria-modal="true"
                aria-hidden={(!props.open).to_string()}
                aria-labelledby={title_id.clone()}
            >
                <div class="top-sheet-header">
                    <h2 id={title_id}>{ props.title.clone() }</h2>
                    <button
                        type="button"
                        class="top-sheet-close"
                        aria-label="Close"
                        onclick={move |_: MouseEvent| on_close.emit(())}
                    >
                        {"×"}
                    </button>
                </div>
                { props.children.clone() }
            </div>
        }
    }
}
