//! Grid layout planning.
//!
//! Maps a card count and screen to a grid, a card size and a placement per
//! card. Orientation decides which side of the grid is capped.

pub mod grid;
pub mod placement;

pub use grid::{plan_card_geometry, plan_grid, CardGeometry, GridLayout, Orientation, Viewport};
pub use placement::{plan_table, PlayArea, Placement, TableLayout};
