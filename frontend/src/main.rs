use std::sync::Arc;

use crate::app::{App, AppProps};
use crate::console::ConsoleSink;
use panel::logger::logger;

mod app;
mod components;
mod console;
mod helpers;
mod tops_sheet;
mod transport;

fn main() {
    logger().set_sink(Arc::new(ConsoleSink));
    let config = helpers::read_panel_config();
    logger().configure(config.logger.clone());
    logger().info("App", "Admin panel starting", None);

    yew::Renderer::<App>::with_props(AppProps { config }).render();
}
