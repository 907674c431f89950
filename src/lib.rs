use wasm_bindgen::prelude::*;

pub mod config;
pub mod error;
pub mod feedback;
pub mod highlight;
pub mod machine;
pub mod protocol;
pub mod renderer;
pub mod surface;
pub mod types;
#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(test)]
mod testing;

pub use config::{BoardDimensions, ClientConfig, RenderMode};
pub use error::{ClientError, ClientResult};
pub use machine::{BoardSession, ClickAction, Interaction, Phase, SelectionTicket};
pub use protocol::{GameServer, MoveProtocolClient};
pub use surface::BoardSurface;
pub use types::{BoardSnapshot, GamePhase, MoveApplied, MoveOutcome, Piece, PieceColor, SoundCue, Square};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
