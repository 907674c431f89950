use std::cell::{Ref, RefCell};
use std::rc::Rc;

use crate::config::{ClientConfig, RenderMode};
use crate::error::{ClientError, ClientResult};
use crate::feedback;
use crate::highlight::Highlights;
use crate::protocol::{GameServer, MoveProtocolClient};
use crate::renderer;
use crate::surface::BoardSurface;
use crate::types::{MoveApplied, Square};

/// Tag identifying one selection. Destination replies carrying an older tag
/// are dropped.
pub type SelectionTicket = u64;

/// Input phase of the two-click move protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingSource,
    AwaitingDestination {
        source: Square,
        ticket: SelectionTicket,
    },
}

/// Remote call a click asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickAction {
    QueryMoves {
        source: Square,
        ticket: SelectionTicket,
    },
    SubmitMove {
        source: Square,
        destination: Square,
    },
}

/// Selection state and everything painted from it.
///
/// All methods are synchronous; [`Interaction`] performs the network calls in
/// between.
pub struct BoardSession<S> {
    surface: S,
    config: ClientConfig,
    highlights: Highlights,
    phase: Phase,
    last_ticket: SelectionTicket,
}

impl<S: BoardSurface> BoardSession<S> {
    pub fn new(surface: S, config: ClientConfig) -> Self {
        Self {
            highlights: Highlights::new(config.classes.clone()),
            surface,
            config,
            phase: Phase::AwaitingSource,
            last_ticket: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn highlights(&self) -> &Highlights {
        &self.highlights
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Advances the phase for a click on `square`.
    pub fn click(&mut self, square: Square) -> ClickAction {
        match self.phase {
            Phase::AwaitingSource => {
                self.last_ticket += 1;
                let ticket = self.last_ticket;
                self.phase = Phase::AwaitingDestination {
                    source: square,
                    ticket,
                };
                if let Err(err) = self.highlights.select(&mut self.surface, square) {
                    self.report("selecting square", &err);
                }
                ClickAction::QueryMoves {
                    source: square,
                    ticket,
                }
            }
            Phase::AwaitingDestination { source, .. } => ClickAction::SubmitMove {
                source,
                destination: square,
            },
        }
    }

    /// Whether `ticket` belongs to the selection still awaiting a destination.
    pub fn is_current(&self, ticket: SelectionTicket) -> bool {
        matches!(self.phase, Phase::AwaitingDestination { ticket: current, .. } if current == ticket)
    }

    /// Highlights the destinations returned for selection `ticket`.
    ///
    /// A failed query leaves the selection in place with nothing highlighted.
    pub fn apply_destinations(&mut self, ticket: SelectionTicket, result: ClientResult<Vec<Square>>) {
        if !self.is_current(ticket) {
            log::debug!("dropping destinations for stale selection #{ticket}");
            return;
        }

        let marked = result.and_then(|moves| {
            self.highlights
                .mark_valid_destinations(&mut self.surface, &moves)
        });
        if let Err(err) = marked {
            self.report("fetching valid moves", &err);
        }
    }

    /// Reflects the engine's answer to a move, then starts over.
    ///
    /// The reset happens whatever the outcome: a refused move needs a fresh
    /// selection.
    pub fn apply_move(&mut self, source: Square, destination: Square, result: ClientResult<MoveApplied>) {
        let shown = result.and_then(|applied| self.show_move(source, destination, &applied));
        match shown {
            Ok(()) => log::info!("move {source} -> {destination} applied"),
            Err(err) => self.report("moving piece", &err),
        }
        self.reset();
    }

    /// Drops the current selection and all markers.
    pub fn reset(&mut self) {
        if let Err(err) = self.highlights.clear_all(&mut self.surface) {
            self.report("clearing highlights", &err);
        }
        self.phase = Phase::AwaitingSource;
    }

    pub fn report(&mut self, context: &str, err: &ClientError) {
        feedback::report(&mut self.surface, self.config.notices, context, err);
    }

    fn show_move(&mut self, source: Square, destination: Square, applied: &MoveApplied) -> ClientResult<()> {
        let dims = self.config.board;
        match self.config.render_mode {
            RenderMode::Full => renderer::render_board(&mut self.surface, dims, &applied.new_board)?,
            RenderMode::Patch => renderer::render_squares(
                &mut self.surface,
                dims,
                &applied.new_board,
                &[source, destination],
            )?,
        }
        feedback::present_move(&mut self.surface, applied, destination)
    }
}

/// Drives a [`BoardSession`] against a game server.
///
/// Cloning shares the session, so one click handler can be spawned per click
/// while earlier requests are still in flight.
pub struct Interaction<S, E> {
    session: Rc<RefCell<BoardSession<S>>>,
    client: Rc<MoveProtocolClient<E>>,
}

impl<S, E> Clone for Interaction<S, E> {
    fn clone(&self) -> Self {
        Self {
            session: Rc::clone(&self.session),
            client: Rc::clone(&self.client),
        }
    }
}

impl<S: BoardSurface, E: GameServer> Interaction<S, E> {
    pub fn new(session: BoardSession<S>, client: MoveProtocolClient<E>) -> Self {
        Self {
            session: Rc::new(RefCell::new(session)),
            client: Rc::new(client),
        }
    }

    pub fn session(&self) -> Ref<'_, BoardSession<S>> {
        self.session.borrow()
    }

    pub fn client(&self) -> &MoveProtocolClient<E> {
        &self.client
    }

    /// Handles a click on `square`. Never fails; errors end up in the report
    /// funnel.
    pub async fn click(&self, square: Square) {
        let action = self.session.borrow_mut().click(square);
        match action {
            ClickAction::QueryMoves { source, ticket } => {
                let result = self.client.query_moves(source).await;
                self.session.borrow_mut().apply_destinations(ticket, result);
            }
            ClickAction::SubmitMove {
                source,
                destination,
            } => {
                let result = self.client.submit_move(source, destination).await;
                self.session
                    .borrow_mut()
                    .apply_move(source, destination, result);
            }
        }
    }

    /// Asks the engine to start a new game and reloads the page once it
    /// agrees.
    pub async fn reset_game(&self) {
        let result = self.client.reset_game().await;
        let mut session = self.session.borrow_mut();
        match result {
            Ok(true) => {
                session.reset();
                if let Err(err) = session.surface_mut().reload() {
                    session.report("reloading page", &err);
                }
            }
            Ok(false) => log::warn!("engine did not acknowledge the reset"),
            Err(err) => session.report("resetting game", &err),
        }
    }

    pub async fn update_mode(&self, mode: &str) {
        self.client.update_mode(mode).await;
    }
}
