use crate::error::ClientResult;
use crate::types::{Square, SoundCue};

/// Everything the client paints on.
///
/// The browser implementation drives the DOM; tests use an in-memory grid.
/// Square addressing is always `(row, col)`; a surface decides how that maps
/// onto its own elements.
pub trait BoardSurface {
    /// Whether `square` resolves to a cell.
    fn has_square(&self, square: Square) -> bool;

    /// Replaces the cell's text. An empty string clears it.
    fn set_square_text(&mut self, square: Square, text: &str) -> ClientResult<()>;

    /// Adds `class` to the cell. Unresolved squares are a no-op.
    fn add_class(&mut self, square: Square, class: &str) -> ClientResult<()>;

    /// Removes `class` from the cell. Unresolved squares are a no-op.
    fn remove_class(&mut self, square: Square, class: &str) -> ClientResult<()>;

    fn set_status(&mut self, text: &str) -> ClientResult<()>;

    /// Replaces the whole move list with `entries`, in order.
    fn replace_move_log(&mut self, entries: &[String]) -> ClientResult<()>;

    /// Plays `cue` from its start.
    fn play_sound(&mut self, cue: SoundCue) -> ClientResult<()>;

    /// Shows `text` to the user for roughly `duration_ms`.
    fn show_notice(&mut self, text: &str, duration_ms: u32) -> ClientResult<()>;

    /// Reloads the page after an engine-side reset.
    fn reload(&mut self) -> ClientResult<()>;
}
