use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, Event, HtmlSelectElement};

use crate::config::ClientConfig;
use crate::machine::{BoardSession, Interaction};
use crate::protocol::MoveProtocolClient;
use crate::types::Square;

use super::{DomSurface, HttpGameServer, describe, init_logging};

type ClickListener = Closure<dyn FnMut(Event)>;

/// Board client exported to the host page.
///
/// Methods never throw; failures go to the console (and to the notice element
/// when enabled).
#[wasm_bindgen]
pub struct WebBoardClient {
    interaction: Interaction<DomSurface, HttpGameServer>,
    listeners: Vec<(Element, ClickListener)>,
    mode_select: String,
}

#[wasm_bindgen]
impl WebBoardClient {
    /// `config` is a plain object; every field is optional.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<WebBoardClient, JsValue> {
        let config: ClientConfig = if config.is_undefined() || config.is_null() {
            ClientConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        init_logging(config.log_level);

        let surface = DomSurface::attach(config.board, config.elements.clone())?;
        let server = HttpGameServer::new(config.endpoints.clone())?;
        let mode_select = config.elements.mode_select.clone();
        log::info!("board client ready for a {}x{} board", config.board.rows, config.board.cols);

        Ok(WebBoardClient {
            interaction: Interaction::new(
                BoardSession::new(surface, config),
                MoveProtocolClient::new(server),
            ),
            listeners: Vec::new(),
            mode_select,
        })
    }

    /// Registers a click listener on every board cell.
    pub fn attach(&mut self) -> Result<(), JsValue> {
        self.detach();
        let cells = self.interaction.session().surface().squares();
        for (square, cell) in cells {
            let interaction = self.interaction.clone();
            let listener = ClickListener::new(move |_event: Event| {
                let interaction = interaction.clone();
                spawn_local(async move { interaction.click(square).await });
            });
            cell.add_event_listener_with_callback("click", listener.as_ref().unchecked_ref())?;
            self.listeners.push((cell, listener));
        }
        log::debug!("listening on {} board cells", self.listeners.len());
        Ok(())
    }

    /// Removes the listeners installed by [`attach`](Self::attach).
    pub fn detach(&mut self) {
        for (cell, listener) in self.listeners.drain(..) {
            if let Err(err) =
                cell.remove_event_listener_with_callback("click", listener.as_ref().unchecked_ref())
            {
                log::warn!("could not remove click listener: {}", describe(&err));
            }
        }
    }

    pub fn click_square(&self, row: u8, col: u8) {
        let interaction = self.interaction.clone();
        spawn_local(async move { interaction.click(Square::new(row, col)).await });
    }

    pub fn reset_game(&self) {
        let interaction = self.interaction.clone();
        spawn_local(async move { interaction.reset_game().await });
    }

    pub fn update_mode(&self, mode: String) {
        let interaction = self.interaction.clone();
        spawn_local(async move { interaction.update_mode(&mode).await });
    }

    /// Sends the value of the page's mode `<select>`.
    pub fn update_mode_from_select(&self) {
        let select = self
            .interaction
            .session()
            .surface()
            .document()
            .get_element_by_id(&self.mode_select)
            .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok());
        match select {
            Some(select) => self.update_mode(select.value()),
            None => log::warn!("no mode select #{}", self.mode_select),
        }
    }
}

impl Drop for WebBoardClient {
    fn drop(&mut self) {
        self.detach();
    }
}
