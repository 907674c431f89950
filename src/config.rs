use serde::Deserialize;

use crate::types::Square;

/// Size of the rendered grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BoardDimensions {
    pub rows: u8,
    pub cols: u8,
}

impl BoardDimensions {
    pub const fn new(rows: u8, cols: u8) -> Self {
        Self { rows, cols }
    }

    pub fn len(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, square: Square) -> bool {
        square.row < self.rows && square.col < self.cols
    }

    /// Row-major index of `square`, `None` when off the board.
    pub fn index_of(&self, square: Square) -> Option<usize> {
        self.contains(square)
            .then(|| square.row as usize * self.cols as usize + square.col as usize)
    }

    /// Inverse of [`index_of`](Self::index_of).
    pub fn square_at(&self, index: usize) -> Option<Square> {
        if self.cols == 0 || index >= self.len() {
            return None;
        }
        let cols = self.cols as usize;
        Some(Square::new((index / cols) as u8, (index % cols) as u8))
    }

    /// All squares in row-major order.
    pub fn squares(self) -> impl Iterator<Item = Square> {
        (0..self.len()).filter_map(move |idx| self.square_at(idx))
    }
}

impl Default for BoardDimensions {
    fn default() -> Self {
        Self::new(8, 5)
    }
}

/// How the board is repainted after a successful move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Repaint every square from the new snapshot.
    #[default]
    Full,
    /// Repaint only the source and destination squares.
    Patch,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub select: String,
    #[serde(rename = "move")]
    pub submit: String,
    pub reset: String,
    pub update_mode: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            select: "/select".into(),
            submit: "/move".into(),
            reset: "/reset".into(),
            update_mode: "/update_mode".into(),
        }
    }
}

/// Class names toggled on board cells.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Classes {
    pub selected: String,
    pub valid_move: String,
}

impl Default for Classes {
    fn default() -> Self {
        Self {
            selected: "selected".into(),
            valid_move: "valid-move".into(),
        }
    }
}

/// Selectors and ids the host page provides.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PageElements {
    /// Selector matching every board cell, in row-major order.
    pub squares: String,
    pub status: String,
    pub move_list: String,
    pub notice: String,
    pub mode_select: String,
}

impl Default for PageElements {
    fn default() -> Self {
        Self {
            squares: "#chess-board td".into(),
            status: "status".into(),
            move_list: "move-list".into(),
            notice: "notice".into(),
            mode_select: "game-mode".into(),
        }
    }
}

/// Transient user-visible error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Notices {
    pub enabled: bool,
    pub duration_ms: u32,
}

impl Default for Notices {
    fn default() -> Self {
        Self {
            enabled: false,
            duration_ms: 3000,
        }
    }
}

/// Client configuration. Every field falls back to the stock page layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub board: BoardDimensions,
    pub render_mode: RenderMode,
    pub endpoints: Endpoints,
    pub classes: Classes,
    pub elements: PageElements,
    pub notices: Notices,
    pub log_level: LogLevel,
}

/// Console log level, `info` unless the page asks otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_stock_page() {
        let config = ClientConfig::default();

        assert_eq!(config.board, BoardDimensions::new(8, 5));
        assert_eq!(config.render_mode, RenderMode::Full);
        assert_eq!(config.endpoints.submit, "/move");
        assert_eq!(config.classes.valid_move, "valid-move");
        assert!(!config.notices.enabled);
        assert_eq!(log::Level::from(config.log_level), log::Level::Info);
    }

    #[test]
    fn partial_config_keeps_remaining_defaults() {
        let config: ClientConfig = serde_json::from_str(
            r#"{"board": {"cols": 8}, "endpoints": {"move": "/api/move"}, "notices": {"enabled": true}}"#,
        )
        .unwrap();

        assert_eq!(config.board, BoardDimensions::new(8, 8));
        assert_eq!(config.endpoints.submit, "/api/move");
        assert_eq!(config.endpoints.select, "/select");
        assert!(config.notices.enabled);
        assert_eq!(config.notices.duration_ms, 3000);
    }

    #[test]
    fn index_mapping_uses_declared_width() {
        let dims = BoardDimensions::new(8, 5);

        assert_eq!(dims.index_of(Square::new(1, 0)), Some(5));
        assert_eq!(dims.index_of(Square::new(7, 4)), Some(39));
        assert_eq!(dims.index_of(Square::new(0, 5)), None);
        assert_eq!(dims.square_at(6), Some(Square::new(1, 1)));
        assert_eq!(dims.square_at(40), None);
        assert_eq!(dims.squares().count(), 40);
    }

    #[test]
    fn zero_width_board_has_no_squares() {
        let dims = BoardDimensions::new(3, 0);

        assert!(dims.is_empty());
        assert_eq!(dims.square_at(0), None);
        assert_eq!(dims.squares().count(), 0);
    }
}
