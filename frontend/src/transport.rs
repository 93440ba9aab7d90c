//! `fetch`-backed transport for the panel.

use async_trait::async_trait;
use gloo_file::Blob;
use gloo_net::http::{Request, RequestBuilder};
use panel::form::PartValue;
use panel::transport::{ApiRequest, HttpReply, Method, RequestBody, Transport};
use panel::PanelError;
use web_sys::FormData;

#[derive(Debug, Default, Clone, Copy)]
pub struct GlooTransport;

#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: ApiRequest) -> panel::Result<HttpReply> {
        let builder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
            Method::Put => Request::put(&request.url),
            Method::Delete => Request::delete(&request.url),
        };

        let sent = match request.body {
            RequestBody::Empty => builder.send().await,
            RequestBody::Json(value) => builder.json(&value).map_err(network)?.send().await,
            RequestBody::Multipart(parts) => multipart(builder, &parts)?.send().await,
        };
        let response = sent.map_err(network)?;

        let status = response.status();
        let body = response.text().await.map_err(network)?;
        Ok(HttpReply { status, body })
    }
}

/// Builds a `FormData` body; the browser sets the multipart boundary header.
fn multipart(builder: RequestBuilder, parts: &[(String, PartValue)]) -> panel::Result<Request> {
    let form = FormData::new().map_err(js_error)?;
    for (name, value) in parts {
        match value {
            PartValue::Text(text) => form.append_with_str(name, text).map_err(js_error)?,
            PartValue::File(file) => {
                let blob: web_sys::Blob =
                    Blob::new_with_options(file.bytes.as_slice(), Some(file.mime_type.as_str())).into();
                form.append_with_blob_and_filename(name, &blob, &file.file_name)
                    .map_err(js_error)?
            }
        }
    }
    builder.body(form).map_err(network)
}

fn network(err: gloo_net::Error) -> PanelError {
    PanelError::Network(err.to_string())
}

fn js_error(err: wasm_bindgen::JsValue) -> PanelError {
    PanelError::Network(format!("{:?}", err))
}
