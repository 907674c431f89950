//! In-memory surface and scripted game server for unit tests.

use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap, VecDeque};

use async_trait::async_trait;
use futures::channel::oneshot;

use crate::config::BoardDimensions;
use crate::error::{ClientError, ClientResult};
use crate::protocol::GameServer;
use crate::surface::BoardSurface;
use crate::types::{
    BoardSnapshot, CaptureFlag, DestinationsResponse, GamePhase, MoveApplied, MoveOutcome, Piece,
    PieceColor, SoundCue, Square, StatusResponse,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    pub classes: BTreeSet<String>,
}

#[derive(Debug, Default)]
pub struct MemorySurface {
    pub cells: HashMap<Square, Cell>,
    pub status: String,
    pub move_log: Vec<String>,
    pub sounds: Vec<SoundCue>,
    pub notices: Vec<String>,
    pub reloads: usize,
    /// Makes `play_sound` fail as if the page had no audio elements.
    pub missing_sounds: bool,
}

impl MemorySurface {
    pub fn new(dims: BoardDimensions) -> Self {
        Self {
            cells: dims.squares().map(|sq| (sq, Cell::default())).collect(),
            ..Self::default()
        }
    }

    pub fn text(&self, square: Square) -> &str {
        self.cells.get(&square).map(|c| c.text.as_str()).unwrap_or("")
    }

    pub fn has_class(&self, square: Square, class: &str) -> bool {
        self.cells
            .get(&square)
            .is_some_and(|c| c.classes.contains(class))
    }

    /// Squares carrying `class`, sorted row-major.
    pub fn squares_with(&self, class: &str) -> Vec<Square> {
        let mut out: Vec<Square> = self
            .cells
            .iter()
            .filter(|(_, c)| c.classes.contains(class))
            .map(|(sq, _)| *sq)
            .collect();
        out.sort_by_key(|sq| (sq.row, sq.col));
        out
    }
}

impl BoardSurface for MemorySurface {
    fn has_square(&self, square: Square) -> bool {
        self.cells.contains_key(&square)
    }

    fn set_square_text(&mut self, square: Square, text: &str) -> ClientResult<()> {
        if let Some(cell) = self.cells.get_mut(&square) {
            cell.text = text.to_string();
        }
        Ok(())
    }

    fn add_class(&mut self, square: Square, class: &str) -> ClientResult<()> {
        if let Some(cell) = self.cells.get_mut(&square) {
            cell.classes.insert(class.to_string());
        }
        Ok(())
    }

    fn remove_class(&mut self, square: Square, class: &str) -> ClientResult<()> {
        if let Some(cell) = self.cells.get_mut(&square) {
            cell.classes.remove(class);
        }
        Ok(())
    }

    fn set_status(&mut self, text: &str) -> ClientResult<()> {
        self.status = text.to_string();
        Ok(())
    }

    fn replace_move_log(&mut self, entries: &[String]) -> ClientResult<()> {
        self.move_log = entries.to_vec();
        Ok(())
    }

    fn play_sound(&mut self, cue: SoundCue) -> ClientResult<()> {
        if self.missing_sounds {
            return Err(ClientError::host(format!("missing element #{}", cue.element_id())));
        }
        self.sounds.push(cue);
        Ok(())
    }

    fn show_notice(&mut self, text: &str, _duration_ms: u32) -> ClientResult<()> {
        self.notices.push(text.to_string());
        Ok(())
    }

    fn reload(&mut self) -> ClientResult<()> {
        self.reloads += 1;
        Ok(())
    }
}

/// A scripted reply, either available at once or released later by the test.
pub enum Scripted<T> {
    Ready(ClientResult<T>),
    Gated(oneshot::Receiver<ClientResult<T>>),
}

impl<T> Scripted<T> {
    async fn resolve(self) -> ClientResult<T> {
        match self {
            Self::Ready(res) => res,
            Self::Gated(rx) => rx
                .await
                .unwrap_or_else(|_| Err(ClientError::transport("gate", "dropped"))),
        }
    }
}

/// Game server answering from per-operation queues and recording every call.
#[derive(Default)]
pub struct ScriptedServer {
    pub queries: RefCell<VecDeque<Scripted<DestinationsResponse>>>,
    pub submits: RefCell<VecDeque<Scripted<MoveOutcome>>>,
    pub resets: RefCell<VecDeque<ClientResult<StatusResponse>>>,
    pub query_log: RefCell<Vec<Square>>,
    pub submit_log: RefCell<Vec<(Square, Square)>>,
    pub mode_log: RefCell<Vec<String>>,
}

impl ScriptedServer {
    pub fn push_moves(&self, moves: &[(u8, u8)]) {
        self.queries.borrow_mut().push_back(Scripted::Ready(Ok(DestinationsResponse {
            moves: moves.iter().copied().map(Square::from).collect(),
            ..Default::default()
        })));
    }

    /// Queues a destination reply released through the returned sender.
    pub fn push_gated_moves(&self) -> oneshot::Sender<ClientResult<DestinationsResponse>> {
        let (tx, rx) = oneshot::channel();
        self.queries.borrow_mut().push_back(Scripted::Gated(rx));
        tx
    }

    pub fn push_query_error(&self, err: ClientError) {
        self.queries.borrow_mut().push_back(Scripted::Ready(Err(err)));
    }

    pub fn push_outcome(&self, outcome: MoveOutcome) {
        self.submits.borrow_mut().push_back(Scripted::Ready(Ok(outcome)));
    }

    pub fn push_submit_error(&self, err: ClientError) {
        self.submits.borrow_mut().push_back(Scripted::Ready(Err(err)));
    }

    pub fn push_reset(&self, res: ClientResult<StatusResponse>) {
        self.resets.borrow_mut().push_back(res);
    }
}

#[async_trait(?Send)]
impl GameServer for ScriptedServer {
    async fn query_moves(&self, source: Square) -> ClientResult<DestinationsResponse> {
        self.query_log.borrow_mut().push(source);
        let next = self.queries.borrow_mut().pop_front();
        match next {
            Some(scripted) => scripted.resolve().await,
            None => Ok(DestinationsResponse::default()),
        }
    }

    async fn submit_move(&self, source: Square, destination: Square) -> ClientResult<MoveOutcome> {
        self.submit_log.borrow_mut().push((source, destination));
        let next = self.submits.borrow_mut().pop_front();
        match next {
            Some(scripted) => scripted.resolve().await,
            None => Err(ClientError::transport("/move", "nothing scripted")),
        }
    }

    async fn reset_game(&self) -> ClientResult<StatusResponse> {
        let next = self.resets.borrow_mut().pop_front();
        next.unwrap_or_else(|| Err(ClientError::transport("/reset", "nothing scripted")))
    }

    async fn update_mode(&self, mode: &str) -> ClientResult<()> {
        self.mode_log.borrow_mut().push(mode.to_string());
        Ok(())
    }
}

pub fn piece(symbol: &str, color: PieceColor) -> Option<Piece> {
    Some(Piece {
        symbol: symbol.to_string(),
        color,
    })
}

/// Empty snapshot of the given size.
pub fn empty_board(dims: BoardDimensions) -> BoardSnapshot {
    BoardSnapshot(vec![vec![None; dims.cols as usize]; dims.rows as usize])
}

/// Snapshot with the given pieces placed on an otherwise empty board.
pub fn board_with(dims: BoardDimensions, pieces: &[((u8, u8), &str, PieceColor)]) -> BoardSnapshot {
    let mut board = empty_board(dims);
    for &((row, col), symbol, color) in pieces {
        board.0[row as usize][col as usize] = piece(symbol, color);
    }
    board
}

pub fn applied(board: BoardSnapshot, history: &[&str], phase: GamePhase) -> MoveApplied {
    MoveApplied {
        new_board: board,
        is_capture: CaptureFlag::Flag(false),
        move_history: history.iter().map(|m| m.to_string()).collect(),
        game_state: phase,
    }
}
