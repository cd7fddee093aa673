//! Piece selection for interactive inspection of a partition.

use macroquad::prelude::*;
use plane_split::{Partition, Polygon};

/// Output group a piece belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Group {
    Above,
    On,
    Below,
}

impl Group {
    pub fn label(self) -> &'static str {
        match self {
            Group::Above => "above",
            Group::On => "on",
            Group::Below => "below",
        }
    }
}

/// Every piece of a partition tagged with its group, above first.
pub fn pieces(partition: &Partition) -> impl Iterator<Item = (Group, &Polygon)> + '_ {
    let above = partition.above.iter().map(|p| (Group::Above, p));
    let on = partition.on.iter().map(|p| (Group::On, p));
    let below = partition.below.iter().map(|p| (Group::Below, p));
    above.chain(on).chain(below)
}

/// Cycles a highlight through the pieces of a partition.
///
/// The selection is a plain index, so it survives re-partitioning as long as
/// the piece count does not shrink below it.
#[derive(Debug, Default)]
pub struct PieceNavigator {
    selected: Option<usize>,
}

impl PieceNavigator {
    /// Creates a navigator with nothing highlighted.
    pub fn new() -> Self {
        Self { selected: None }
    }

    /// Index of the highlighted piece, if any.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Highlights the next piece, wrapping around.
    pub fn select_next(&mut self, count: usize) {
        self.selected = match (self.selected, count) {
            (_, 0) => None,
            (None, _) => Some(0),
            (Some(i), n) => Some((i + 1) % n),
        };
    }

    /// Highlights the previous piece, wrapping around.
    pub fn select_prev(&mut self, count: usize) {
        self.selected = match (self.selected, count) {
            (_, 0) => None,
            (None, n) => Some(n - 1),
            (Some(i), n) => Some((i + n - 1) % n),
        };
    }

    /// Drops a selection that no longer points at a piece.
    pub fn clamp(&mut self, count: usize) {
        if self.selected.is_some_and(|i| i >= count) {
            self.selected = None;
        }
    }

    /// Handles keyboard input. Returns true if the selection changed.
    pub fn update(&mut self, partition: &Partition) -> bool {
        let before = self.selected;
        let count = partition.len();
        self.clamp(count);

        if is_key_pressed(KeyCode::N) {
            self.select_next(count);
        }
        if is_key_pressed(KeyCode::P) {
            self.select_prev(count);
        }
        if is_key_pressed(KeyCode::Escape) {
            self.selected = None;
        }

        self.selected != before
    }

    /// Draws the selection overlay.
    pub fn draw_ui(&self, partition: &Partition, y_offset: f32) {
        let selected = self
            .selected
            .and_then(|i| pieces(partition).nth(i).map(|piece| (i, piece)));

        match selected {
            Some((index, (group, polygon))) => {
                draw_text(
                    &format!(
                        "Piece {}/{}: {} ({} vertices)",
                        index + 1,
                        partition.len(),
                        group.label(),
                        polygon.n_points()
                    ),
                    10.0,
                    y_offset,
                    18.0,
                    YELLOW,
                );
            }
            None => {
                draw_text("No piece selected", 10.0, y_offset, 18.0, GRAY);
            }
        }
        draw_text("[N]ext | [P]revious | [Esc] clear", 10.0, y_offset + 20.0, 16.0, DARKGRAY);
    }
}
