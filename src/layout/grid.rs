//! Grid shape and card size.
//!
//! Both functions are pure: the same card count and screen always give the
//! same grid, which keeps re-layout on orientation change trivial.

use serde::{Deserialize, Serialize};

/// Cards are 200 wide by 275 tall.
pub const CARD_ASPECT_RATIO: f64 = 200.0 / 275.0;
/// Horizontal gap as a fraction of card width.
pub const GAP_X_RATIO: f64 = 0.4;
/// Vertical gap as a fraction of card height (20px on a 275px card).
pub const GAP_Y_RATIO: f64 = 0.073;
/// Cap on the short side of the grid.
pub const MAX_SHORT_SIDE: usize = 3;

/// Screen orientation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Portrait,
    Landscape,
}

/// Screen size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Landscape when strictly wider than tall. Square screens are portrait.
    #[must_use]
    pub const fn orientation(self) -> Orientation {
        if self.width > self.height {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }
}

impl std::fmt::Display for Viewport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Rows and columns of the deal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridLayout {
    pub columns: usize,
    pub rows: usize,
}

impl GridLayout {
    /// Number of cells; may exceed the card count on ragged grids.
    #[must_use]
    pub const fn cells(self) -> usize {
        self.columns * self.rows
    }
}

/// Per-card pixel geometry, floored to whole pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardGeometry {
    pub card_width: u32,
    pub card_height: u32,
    pub gap_x: u32,
    pub gap_y: u32,
}

impl CardGeometry {
    /// Total width of `columns` cards and the gaps between them.
    #[must_use]
    pub fn grid_width(self, columns: usize) -> f64 {
        let columns = columns as f64;
        columns * f64::from(self.card_width) + (columns - 1.0).max(0.0) * f64::from(self.gap_x)
    }

    /// Total height of `rows` cards and the gaps between them.
    #[must_use]
    pub fn grid_height(self, rows: usize) -> f64 {
        let rows = rows as f64;
        rows * f64::from(self.card_height) + (rows - 1.0).max(0.0) * f64::from(self.gap_y)
    }
}

fn div_ceil(n: usize, d: usize) -> usize {
    if d == 0 {
        0
    } else {
        n.div_ceil(d)
    }
}

/// Pick a grid for `card_count` cards on a `width` x `height` screen.
///
/// Landscape caps rows at 3, portrait caps columns at 3; the other side is
/// whatever it takes to hold every card.
///
/// ```
/// use memory_kiosk::layout::{plan_grid, GridLayout};
///
/// assert_eq!(plan_grid(15, 1080, 1920), GridLayout { columns: 3, rows: 5 });
/// assert_eq!(plan_grid(21, 1920, 1080), GridLayout { columns: 7, rows: 3 });
/// ```
#[must_use]
pub fn plan_grid(card_count: usize, width: u32, height: u32) -> GridLayout {
    match Viewport::new(width, height).orientation() {
        Orientation::Landscape => {
            let columns = div_ceil(card_count, MAX_SHORT_SIDE);
            let rows = MAX_SHORT_SIDE.min(div_ceil(card_count, columns));
            GridLayout { columns, rows }
        }
        Orientation::Portrait => {
            let rows = div_ceil(card_count, MAX_SHORT_SIDE);
            let columns = MAX_SHORT_SIDE.min(div_ceil(card_count, rows));
            GridLayout { columns, rows }
        }
    }
}

/// Largest card that fits the play area at the fixed aspect and gap ratios.
///
/// The width-limited size is tried first and kept if the resulting grid
/// height still fits; otherwise the height-limited size is used.
#[must_use]
pub fn plan_card_geometry(grid: GridLayout, play_width: f64, play_height: f64) -> CardGeometry {
    let columns = grid.columns as f64;
    let rows = grid.rows as f64;

    let width_units = columns + (columns - 1.0) * GAP_X_RATIO;
    let height_units = rows + (rows - 1.0) * GAP_Y_RATIO;

    let width_from_width = play_width / width_units;
    let height_from_width = width_from_width / CARD_ASPECT_RATIO;

    let height_from_height = play_height / height_units;
    let width_from_height = height_from_height * CARD_ASPECT_RATIO;

    let (card_width, card_height) = if height_from_width * height_units <= play_height {
        (width_from_width, height_from_width)
    } else {
        (width_from_height, height_from_height)
    };

    CardGeometry {
        card_width: floor_px(card_width),
        card_height: floor_px(card_height),
        gap_x: floor_px(card_width * GAP_X_RATIO),
        gap_y: floor_px(card_height * GAP_Y_RATIO),
    }
}

fn floor_px(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.floor() as u32
    } else {
        0
    }
}
