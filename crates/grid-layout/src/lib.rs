//! Grid layout planning for workspace windows.
//!
//! Given an ordered list of apps with [`SizeClass`] hints and a target area,
//! [`plan`] produces one non-overlapping rectangle per app. The planner is
//! pure and deterministic: the same input always yields the same output.
//!
//! - [`GridConfiguration`] derives the column count from the app count.
//! - [`place_cells`] assigns unit-cell blocks with first-fit, no backtracking.
//! - [`CellLayout::to_rects`] maps blocks to padded, bottom-up screen rectangles.

mod geom;
mod grid;
mod plan;

pub use geom::Rect;
pub use grid::{GridConfiguration, SizeClass, columns_for};
pub use plan::{
    CellLayout, MIN_HEIGHT, MIN_WIDTH, PADDING, PlanOptions, Placement, place_cells, plan,
    plan_with,
};
