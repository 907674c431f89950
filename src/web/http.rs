use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, Headers, Request, RequestInit, Response, Window};

use crate::config::Endpoints;
use crate::error::{ClientError, ClientResult};
use crate::protocol::GameServer;
use crate::types::{DestinationsResponse, MoveOutcome, Square, StatusResponse};

use super::describe;

#[derive(Serialize)]
struct ModeRequest<'a> {
    mode: &'a str,
}

/// [`GameServer`] speaking to the engine over `fetch`.
///
/// Error statuses still carry JSON bodies, so every response body is decoded.
pub struct HttpGameServer {
    window: Window,
    endpoints: Endpoints,
}

impl HttpGameServer {
    pub fn new(endpoints: Endpoints) -> ClientResult<Self> {
        let window = web_sys::window().ok_or_else(|| ClientError::host("no global `window`"))?;
        Ok(Self { window, endpoints })
    }

    async fn post(&self, endpoint: &str, body: &JsValue, headers: Option<&Headers>) -> ClientResult<JsValue> {
        let transport = |err: JsValue| ClientError::transport(endpoint, describe(&err));

        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_body(body);
        if let Some(headers) = headers {
            opts.set_headers(headers);
        }
        let request = Request::new_with_str_and_init(endpoint, &opts).map_err(transport)?;

        let resp = JsFuture::from(self.window.fetch_with_request(&request))
            .await
            .map_err(transport)?;
        let resp: Response = resp
            .dyn_into()
            .map_err(|_| ClientError::decode(endpoint, "fetch did not yield a Response"))?;

        let body = resp
            .json()
            .map_err(|err| ClientError::decode(endpoint, describe(&err)))?;
        JsFuture::from(body)
            .await
            .map_err(|err| ClientError::decode(endpoint, describe(&err)))
    }

    async fn post_form<T: DeserializeOwned>(&self, endpoint: &str, fields: &[(&str, u8)]) -> ClientResult<T> {
        let form = FormData::new()?;
        for (name, value) in fields {
            form.append_with_str(name, &value.to_string())?;
        }
        let value = self.post(endpoint, &form.into(), None).await?;
        serde_wasm_bindgen::from_value(value).map_err(|err| ClientError::decode(endpoint, err))
    }
}

#[async_trait(?Send)]
impl GameServer for HttpGameServer {
    async fn query_moves(&self, source: Square) -> ClientResult<DestinationsResponse> {
        self.post_form(
            &self.endpoints.select,
            &[("start_row", source.row), ("start_col", source.col)],
        )
        .await
    }

    async fn submit_move(&self, source: Square, destination: Square) -> ClientResult<MoveOutcome> {
        self.post_form(
            &self.endpoints.submit,
            &[
                ("start_row", source.row),
                ("start_col", source.col),
                ("end_row", destination.row),
                ("end_col", destination.col),
            ],
        )
        .await
    }

    async fn reset_game(&self) -> ClientResult<StatusResponse> {
        let endpoint = &self.endpoints.reset;
        let value = self.post(endpoint, &JsValue::NULL, None).await?;
        serde_wasm_bindgen::from_value(value).map_err(|err| ClientError::decode(endpoint, err))
    }

    async fn update_mode(&self, mode: &str) -> ClientResult<()> {
        let endpoint = &self.endpoints.update_mode;
        let payload = serde_wasm_bindgen::to_value(&ModeRequest { mode })
            .map_err(|err| ClientError::decode(endpoint, err))?;
        let body = js_sys::JSON::stringify(&payload)?;

        let headers = Headers::new()?;
        headers.set("Content-Type", "application/json")?;

        self.post(endpoint, &body.into(), Some(&headers)).await?;
        Ok(())
    }
}
