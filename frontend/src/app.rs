use crate::components::entity_page::EntityPage;
use panel::config::PanelConfig;
use panel::EntityKind;
use yew::{classes, html, Component, Context, Html, Properties};

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub config: PanelConfig,
}

pub enum Msg {
    SelectTab(EntityKind),
}

/// Admin shell: one tab per managed content type.
pub struct App {
    active: EntityKind,
}

impl Component for App {
    type Message = Msg;
    type Properties = AppProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            active: EntityKind::Benefit,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SelectTab(kind) if kind != self.active => {
                self.active = kind;
                true
            }
            Msg::SelectTab(_) => false,
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        html! {
            <div class="admin-panel">
                <nav class="tab-bar">
                    {
                        for EntityKind::ALL.into_iter().map(|kind| html! {
                            <button
                                class={classes!("tab-btn", (kind == self.active).then_some("active"))}
                                onclick={link.callback(move |_| Msg::SelectTab(kind))}
                            >
                                { kind.config().label }
                            </button>
                        })
                    }
                </nav>
                <EntityPage
                    key={self.active.type_name()}
                    kind={self.active}
                    config={ctx.props().config.clone()}
                />
            </div>
        }
    }
}
