use crate::config::BoardDimensions;
use crate::error::ClientResult;
use crate::surface::BoardSurface;
use crate::types::{BoardSnapshot, PieceColor, Square};

const COLOR_CLASSES: [PieceColor; 2] = [PieceColor::White, PieceColor::Black];

/// Repaints every square of the configured grid from `snapshot`.
///
/// Cells the snapshot does not cover render empty; snapshot cells outside the
/// grid are ignored. Rendering the same snapshot twice leaves the surface
/// unchanged.
pub fn render_board<S: BoardSurface>(
    surface: &mut S,
    dims: BoardDimensions,
    snapshot: &BoardSnapshot,
) -> ClientResult<()> {
    if snapshot.rows() != dims.rows as usize || snapshot.cols() != dims.cols as usize {
        log::warn!(
            "snapshot is {}x{} but the board is configured as {}x{}",
            snapshot.rows(),
            snapshot.cols(),
            dims.rows,
            dims.cols
        );
    }

    for square in dims.squares() {
        paint_square(surface, snapshot, square)?;
    }
    Ok(())
}

/// Repaints only `squares`, skipping any outside the grid.
pub fn render_squares<S: BoardSurface>(
    surface: &mut S,
    dims: BoardDimensions,
    snapshot: &BoardSnapshot,
    squares: &[Square],
) -> ClientResult<()> {
    for &square in squares.iter().filter(|sq| dims.contains(**sq)) {
        paint_square(surface, snapshot, square)?;
    }
    Ok(())
}

fn paint_square<S: BoardSurface>(
    surface: &mut S,
    snapshot: &BoardSnapshot,
    square: Square,
) -> ClientResult<()> {
    surface.set_square_text(square, "")?;
    for color in COLOR_CLASSES {
        surface.remove_class(square, color.class())?;
    }

    if let Some(piece) = snapshot.piece_at(square) {
        surface.set_square_text(square, &piece.symbol)?;
        surface.add_class(square, piece.color.class())?;
    }
    Ok(())
}
