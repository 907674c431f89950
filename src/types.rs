use std::fmt;

use serde::Deserialize;

/// A board coordinate, zero based.
///
/// Decodes from the engine's `[row, col]` pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "(u8, u8)")]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }
}

impl From<(u8, u8)> for Square {
    fn from((row, col): (u8, u8)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceColor {
    White,
    Black,
}

impl PieceColor {
    /// CSS class carried by a square holding a piece of this color.
    pub fn class(self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::White => "White",
            Self::Black => "Black",
        }
    }
}

/// Piece descriptor as sent by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Piece {
    pub symbol: String,
    pub color: PieceColor,
}

/// Row-major board contents owned by the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct BoardSnapshot(pub Vec<Vec<Option<Piece>>>);

impl BoardSnapshot {
    /// Returns `None` for empty cells and for cells outside the snapshot.
    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.0
            .get(square.row as usize)
            .and_then(|row| row.get(square.col as usize))
            .and_then(Option::as_ref)
    }

    pub fn rows(&self) -> usize {
        self.0.len()
    }

    /// Width of the widest row.
    pub fn cols(&self) -> usize {
        self.0.iter().map(Vec::len).max().unwrap_or(0)
    }
}

/// Game phase reported after every move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    WhiteTurn,
    BlackTurn,
    GameOver,
}

impl GamePhase {
    pub fn token(self) -> &'static str {
        match self {
            Self::WhiteTurn => "white_turn",
            Self::BlackTurn => "black_turn",
            Self::GameOver => "game_over",
        }
    }
}

/// The fixed set of audio cues the host page provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum SoundCue {
    #[serde(rename = "move")]
    Move,
    #[serde(rename = "capture")]
    Capture,
    #[serde(rename = "gameover")]
    GameOver,
}

impl SoundCue {
    pub const ALL: [SoundCue; 3] = [SoundCue::Move, SoundCue::Capture, SoundCue::GameOver];

    pub fn name(self) -> &'static str {
        match self {
            Self::Move => "move",
            Self::Capture => "capture",
            Self::GameOver => "gameover",
        }
    }

    /// Id of the `<audio>` element playing this cue.
    pub fn element_id(self) -> String {
        format!("sound-{}", self.name())
    }
}

/// Capture indicator of a successful move.
///
/// Contract:
/// - A boolean flag, or
/// - the name of the cue the engine wants played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CaptureFlag {
    Flag(bool),
    Cue(SoundCue),
}

impl Default for CaptureFlag {
    fn default() -> Self {
        Self::Flag(false)
    }
}

/// Reply to a destination query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DestinationsResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub moves: Vec<Square>,
    #[serde(default)]
    pub message: Option<String>,
}

/// State returned by the engine after it applied a move.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MoveApplied {
    pub new_board: BoardSnapshot,
    #[serde(default)]
    pub is_capture: CaptureFlag,
    #[serde(default)]
    pub move_history: Vec<String>,
    pub game_state: GamePhase,
}

/// Reply to a move submission, discriminated by `status`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum MoveOutcome {
    Success(MoveApplied),
    #[serde(alias = "error")]
    Fail {
        #[serde(default)]
        message: String,
    },
}

/// Reply to a reset request. Only the status is inspected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub status: Option<String>,
}

impl StatusResponse {
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some("success")
    }
}
