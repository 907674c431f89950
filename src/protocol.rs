use async_trait::async_trait;
use web_time::Instant;

use crate::error::{ClientError, ClientResult};
use crate::types::{
    DestinationsResponse, MoveApplied, MoveOutcome, Square, StatusResponse,
};

/// The authoritative game engine, as seen from the page.
///
/// Implementations only move bytes and decode them; classifying replies is
/// left to [`MoveProtocolClient`]. Futures are not `Send`: everything runs on
/// the page's single thread.
#[async_trait(?Send)]
pub trait GameServer {
    async fn query_moves(&self, source: Square) -> ClientResult<DestinationsResponse>;

    async fn submit_move(&self, source: Square, destination: Square) -> ClientResult<MoveOutcome>;

    async fn reset_game(&self) -> ClientResult<StatusResponse>;

    /// Fire-and-forget from the caller's point of view.
    async fn update_mode(&self, mode: &str) -> ClientResult<()>;
}

/// Request/response client over a [`GameServer`].
///
/// No retries, no de-duplication, no timeouts.
pub struct MoveProtocolClient<E> {
    server: E,
}

impl<E: GameServer> MoveProtocolClient<E> {
    pub fn new(server: E) -> Self {
        Self { server }
    }

    pub fn server(&self) -> &E {
        &self.server
    }

    /// Legal destinations for the piece on `source`, in engine order.
    pub async fn query_moves(&self, source: Square) -> ClientResult<Vec<Square>> {
        let started = Instant::now();
        let resp = self.server.query_moves(source).await;
        log::debug!("destinations for {source} answered in {:?}", started.elapsed());

        let resp = resp?;
        if resp.status.as_deref() == Some("error") {
            let message = resp
                .message
                .unwrap_or_else(|| format!("no moves available from {source}"));
            return Err(ClientError::Rejected(message));
        }
        Ok(resp.moves)
    }

    /// Submits `source -> destination`. Engine refusals become
    /// [`ClientError::Rejected`].
    pub async fn submit_move(&self, source: Square, destination: Square) -> ClientResult<MoveApplied> {
        let started = Instant::now();
        let outcome = self.server.submit_move(source, destination).await;
        log::debug!(
            "move {source} -> {destination} answered in {:?}",
            started.elapsed()
        );

        match outcome? {
            MoveOutcome::Success(applied) => Ok(applied),
            MoveOutcome::Fail { message } => Err(ClientError::Rejected(message)),
        }
    }

    /// Returns whether the engine acknowledged the reset.
    pub async fn reset_game(&self) -> ClientResult<bool> {
        let resp = self.server.reset_game().await?;
        Ok(resp.is_success())
    }

    /// Tells the engine which mode to play in. Failures are only logged.
    pub async fn update_mode(&self, mode: &str) {
        if let Err(err) = self.server.update_mode(mode).await {
            log::warn!("mode update to {mode:?} failed: {err}");
        }
    }
}
