//! Entity page: listing, create/edit sheet and drag-to-reorder for one
//! content type.
//!
//! The `Component` implementation delegates to `update::update` and
//! `view::view`; the listing is fetched once the page is first rendered and
//! again after every confirmed mutation.

use yew::prelude::*;

mod markup;
mod messages;
mod props;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::EntityPageProps;
pub use state::EntityPage;

impl Component for EntityPage {
    type Message = Msg;
    type Properties = EntityPageProps;

    fn create(ctx: &Context<Self>) -> Self {
        EntityPage::new(ctx)
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render {
            ctx.link().send_message(Msg::Refresh);
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.modal.close();
    }
}
