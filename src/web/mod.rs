//! Browser bindings: DOM surface, fetch-backed game server, exported client.

mod client;
mod dom;
mod http;

use once_cell::sync::OnceCell;
use wasm_bindgen::{JsCast, JsValue};

use crate::config::LogLevel;
use crate::error::ClientError;

pub use client::WebBoardClient;
pub use dom::DomSurface;
pub use http::HttpGameServer;

static LOGGING: OnceCell<()> = OnceCell::new();

/// Routes `log` records to the browser console. Later calls are no-ops.
pub fn init_logging(level: LogLevel) {
    LOGGING.get_or_init(|| {
        console_error_panic_hook::set_once();
        console_log::init_with_level(level.into()).ok();
    });
}

/// Best-effort text for a thrown JS value.
pub(crate) fn describe(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    format!("{value:?}")
}

impl From<JsValue> for ClientError {
    fn from(value: JsValue) -> Self {
        ClientError::host(describe(&value))
    }
}

impl From<ClientError> for JsValue {
    fn from(err: ClientError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
