//! Browser glue shared by the pages: toasts, confirmation prompts, file
//! reading and the startup configuration.

use gloo_file::futures::read_as_bytes;
use panel::config::PanelConfig;
use panel::form::StagedFile;
use panel::logger::logger;
use panel::toast::{ToastKind, Toaster};
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

/// Displays a temporary notification at the bottom of the screen.
///
/// The message is inserted as text, never as markup. The toast removes
/// itself after `duration_ms`.
pub fn show_toast(kind: ToastKind, message: &str, duration_ms: u32) {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };
    let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) else {
        return;
    };
    toast.set_text_content(Some(message));
    toast.set_class_name(match kind {
        ToastKind::Success => "toast toast-success",
        ToastKind::Error => "toast toast-error",
        ToastKind::Info => "toast toast-info",
    });

    let html_toast: HtmlElement = toast.unchecked_into();
    let style = html_toast.style();
    style.set_property("position", "fixed").ok();
    style.set_property("bottom", "20px").ok();
    style.set_property("left", "50%").ok();
    style.set_property("transform", "translateX(-50%)").ok();
    style
        .set_property(
            "background",
            match kind {
                ToastKind::Success => "rgba(46, 125, 50, 0.92)",
                ToastKind::Error => "rgba(198, 40, 40, 0.92)",
                ToastKind::Info => "rgba(0, 0, 0, 0.8)",
            },
        )
        .ok();
    style.set_property("color", "#fff").ok();
    style.set_property("padding", "10px 20px").ok();
    style.set_property("border-radius", "4px").ok();
    style.set_property("z-index", "10000").ok();
    style.set_property("font-family", "Arial, sans-serif").ok();

    if body.append_child(&html_toast).is_ok() {
        wasm_bindgen_futures::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(duration_ms).await;
            if let Some(parent) = html_toast.parent_node() {
                parent.remove_child(&html_toast).ok();
            }
        });
    }
}

/// [`Toaster`] drawing on the document body.
#[derive(Debug, Clone, Copy)]
pub struct DomToaster {
    pub duration_ms: u32,
}

impl Toaster for DomToaster {
    fn show(&self, kind: ToastKind, message: &str) {
        show_toast(kind, message, self.duration_ms);
    }
}

/// Native confirmation prompt; a missing window counts as "no".
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|window| window.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// Reads `<script id="panel-config" type="application/json">`, falling back
/// to the defaults when it is absent or malformed.
pub fn read_panel_config() -> PanelConfig {
    let raw = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id("panel-config"))
        .and_then(|element| element.text_content())
        .unwrap_or_default();

    PanelConfig::from_json(&raw).unwrap_or_else(|err| {
        logger().error("Config", "Ignoring malformed panel configuration", Some(&err));
        PanelConfig::default()
    })
}

/// Loads a picked file into memory for staging.
pub async fn stage_browser_file(file: web_sys::File) -> Result<StagedFile, String> {
    let file = gloo_file::File::from(file);
    let bytes = read_as_bytes(&file).await.map_err(|err| err.to_string())?;
    Ok(StagedFile {
        file_name: file.name(),
        mime_type: file.raw_mime_type(),
        bytes,
    })
}
