use crate::config::Classes;
use crate::error::ClientResult;
use crate::surface::BoardSurface;
use crate::types::Square;

/// Tracks which squares carry the selection and valid-move markers.
///
/// Invariant: at most one square is selected.
#[derive(Debug, Clone)]
pub struct Highlights {
    classes: Classes,
    selected: Option<Square>,
    marked: Vec<Square>,
}

impl Highlights {
    pub fn new(classes: Classes) -> Self {
        Self {
            classes,
            selected: None,
            marked: Vec::new(),
        }
    }

    pub fn selected(&self) -> Option<Square> {
        self.selected
    }

    pub fn marked(&self) -> &[Square] {
        &self.marked
    }

    /// Clears every marker, then selects `square`.
    pub fn select<S: BoardSurface>(&mut self, surface: &mut S, square: Square) -> ClientResult<()> {
        self.clear_all(surface)?;
        if surface.has_square(square) {
            surface.add_class(square, &self.classes.selected)?;
            self.selected = Some(square);
        }
        Ok(())
    }

    /// Marks each resolvable square in `squares` as a valid destination.
    pub fn mark_valid_destinations<S: BoardSurface>(
        &mut self,
        surface: &mut S,
        squares: &[Square],
    ) -> ClientResult<()> {
        for &square in squares {
            if self.marked.contains(&square) || !surface.has_square(square) {
                continue;
            }
            surface.add_class(square, &self.classes.valid_move)?;
            self.marked.push(square);
        }
        Ok(())
    }

    /// Removes all markers. A no-op when nothing is marked.
    pub fn clear_all<S: BoardSurface>(&mut self, surface: &mut S) -> ClientResult<()> {
        if let Some(square) = self.selected.take() {
            surface.remove_class(square, &self.classes.selected)?;
        }
        for square in self.marked.drain(..) {
            surface.remove_class(square, &self.classes.valid_move)?;
        }
        Ok(())
    }
}
