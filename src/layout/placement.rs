//! Play area and per-card placement.

use serde::{Deserialize, Serialize};

use super::grid::{plan_card_geometry, plan_grid, CardGeometry, GridLayout, Viewport};
use crate::core::{DeckConfig, GameRng};

/// Horizontal margin on each side, as a fraction of screen width.
pub const MARGIN_X_RATIO: f64 = 0.08;
/// Vertical margin on each side, as a fraction of screen height.
pub const MARGIN_Y_RATIO: f64 = 0.12;

/// The part of the screen cards are dealt into.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlayArea {
    /// The viewport minus its fixed margins.
    #[must_use]
    pub fn for_viewport(viewport: Viewport) -> Self {
        let width = f64::from(viewport.width);
        let height = f64::from(viewport.height);
        let left = width * MARGIN_X_RATIO;
        let top = height * MARGIN_Y_RATIO;

        Self {
            left,
            top,
            width: width - 2.0 * left,
            height: height - 2.0 * top,
        }
    }
}

/// Where one card sits on screen: its center and tilt.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub tilt_degrees: i32,
}

/// Everything the presentation layer needs to lay out a deal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TableLayout {
    pub viewport: Viewport,
    pub play_area: PlayArea,
    pub grid: GridLayout,
    pub geometry: CardGeometry,

    /// One entry per card, row-major, in deck order.
    pub placements: Vec<Placement>,
}

/// Lay out `deck.total_cards` cards on `viewport`.
///
/// The grid is centered in the play area and filled row by row. Each card
/// gets its own tilt and offset drawn from the deck's jitter ranges.
#[must_use]
pub fn plan_table(deck: &DeckConfig, viewport: Viewport, rng: &mut GameRng) -> TableLayout {
    let card_count = deck.total_cards;
    let play_area = PlayArea::for_viewport(viewport);
    let grid = plan_grid(card_count, viewport.width, viewport.height);
    let geometry = plan_card_geometry(grid, play_area.width, play_area.height);

    let card_w = f64::from(geometry.card_width);
    let card_h = f64::from(geometry.card_height);
    let step_x = card_w + f64::from(geometry.gap_x);
    let step_y = card_h + f64::from(geometry.gap_y);

    let start_x = play_area.left + (play_area.width - geometry.grid_width(grid.columns)) / 2.0 + card_w / 2.0;
    let start_y = play_area.top + (play_area.height - geometry.grid_height(grid.rows)) / 2.0 + card_h / 2.0;

    let mut placements = Vec::with_capacity(card_count);
    for row in 0..grid.rows {
        for col in 0..grid.columns {
            if placements.len() == card_count {
                break;
            }
            let tilt_degrees = rng.jitter(deck.tilt_range);
            let offset_x = rng.jitter(deck.offset_range);
            let offset_y = rng.jitter(deck.offset_range);

            placements.push(Placement {
                x: start_x + col as f64 * step_x + f64::from(offset_x),
                y: start_y + row as f64 * step_y + f64::from(offset_y),
                tilt_degrees,
            });
        }
    }

    tracing::debug!(
        target: "deal",
        %viewport,
        columns = grid.columns,
        rows = grid.rows,
        card_width = geometry.card_width,
        card_height = geometry.card_height,
        "table planned"
    );

    TableLayout {
        viewport,
        play_area,
        grid,
        geometry,
        placements,
    }
}
