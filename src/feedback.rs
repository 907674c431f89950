use crate::config::Notices;
use crate::error::{ClientError, ClientResult};
use crate::surface::BoardSurface;
use crate::types::{CaptureFlag, GamePhase, MoveApplied, PieceColor, SoundCue, Square};

/// Status line for `phase`.
///
/// `mover` is the color of the piece that just moved; it names the winner once
/// the game is over.
pub fn status_text(phase: GamePhase, mover: Option<PieceColor>) -> String {
    match (phase, mover) {
        (GamePhase::GameOver, Some(color)) => format!("{} wins!", color.title()),
        (GamePhase::GameOver, None) => "Game over!".to_string(),
        (phase, _) => {
            let side = phase.token().split('_').next().unwrap_or_default();
            format!("{}'s Turn", titlecase(side))
        }
    }
}

fn titlecase(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// The one cue played for a successful move.
pub fn sound_for(applied: &MoveApplied) -> SoundCue {
    if applied.game_state == GamePhase::GameOver {
        return SoundCue::GameOver;
    }
    match applied.is_capture {
        CaptureFlag::Cue(cue) => cue,
        CaptureFlag::Flag(true) => SoundCue::Capture,
        CaptureFlag::Flag(false) => SoundCue::Move,
    }
}

/// Replaces the on-screen move list with `history`.
pub fn rebuild_move_log<S: BoardSurface>(surface: &mut S, history: &[String]) -> ClientResult<()> {
    surface.replace_move_log(history)
}

/// Plays the cue, rebuilds the log and updates the status line for a move
/// that landed on `destination`.
///
/// All three steps run even if an earlier one fails; the first error is
/// returned.
pub fn present_move<S: BoardSurface>(
    surface: &mut S,
    applied: &MoveApplied,
    destination: Square,
) -> ClientResult<()> {
    let played = surface.play_sound(sound_for(applied));
    let logged = rebuild_move_log(surface, &applied.move_history);

    let mover = applied.new_board.piece_at(destination).map(|p| p.color);
    let status = surface.set_status(&status_text(applied.game_state, mover));

    played.and(logged).and(status)
}

/// Single sink for every client-side failure.
///
/// Logs the error and, when notices are enabled, shows it to the user.
/// Failures while showing the notice are logged and dropped.
pub fn report<S: BoardSurface>(surface: &mut S, notices: Notices, context: &str, err: &ClientError) {
    if err.is_rejection() {
        log::warn!("{context}: {err}");
    } else {
        log::error!("{context}: {err}");
    }

    if notices.enabled {
        if let Err(notice_err) = surface.show_notice(&err.to_string(), notices.duration_ms) {
            log::error!("could not show notice: {notice_err}");
        }
    }
}
