//! First-fit grid planner.
//!
//! Apps are placed in input order into a virtual grid of unit cells. Each app
//! takes the first free block (row-major) large enough for its size class;
//! there is no backtracking and spans are never rotated or shrunk, except
//! that a span wider than the grid is clamped in the fallback path. The
//! resulting cells are mapped onto the target area.

use std::collections::HashSet;

use tracing::debug;

use crate::{
    geom::Rect,
    grid::{SizeClass, columns_for},
};

/// Gap inset from each raw cell rectangle, in points.
pub const PADDING: f64 = 4.0;
/// Smallest width ever emitted for a window.
pub const MIN_WIDTH: f64 = 200.0;
/// Smallest height ever emitted for a window.
pub const MIN_HEIGHT: f64 = 150.0;
/// Rows scanned past the cursor before falling back to a fresh row.
const SCAN_ROWS: u32 = 10;

/// Tunables for mapping cells to screen rectangles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlanOptions {
    /// Inset applied on all sides of every cell block.
    pub padding: f64,
    /// Minimum emitted width.
    pub min_width: f64,
    /// Minimum emitted height.
    pub min_height: f64,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            padding: PADDING,
            min_width: MIN_WIDTH,
            min_height: MIN_HEIGHT,
        }
    }
}

/// A block of grid cells assigned to one app.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    /// Leftmost column.
    pub col: u32,
    /// Topmost row (row 0 is the top of the screen).
    pub row: u32,
    /// Columns covered.
    pub col_span: u32,
    /// Rows covered.
    pub row_span: u32,
}

impl Placement {
    /// Every `(col, row)` cell covered by this block.
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (self.row..self.row + self.row_span)
            .flat_map(move |r| (self.col..self.col + self.col_span).map(move |c| (c, r)))
    }
}

/// Grid-space result of planning, before mapping to screen coordinates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellLayout {
    /// Grid columns.
    pub columns: u32,
    /// Grid rows actually used (at least one).
    pub rows: u32,
    /// One block per input app, in input order.
    pub placements: Vec<Placement>,
}

impl CellLayout {
    /// Map the cell blocks onto `area`.
    pub fn to_rects(&self, area: Rect, opts: PlanOptions) -> Vec<Rect> {
        let cell_w = area.w / f64::from(self.columns.max(1));
        let cell_h = area.h / f64::from(self.rows.max(1));
        self.placements
            .iter()
            .map(|p| {
                let raw = Rect::new(
                    area.x + f64::from(p.col) * cell_w,
                    area.y + area.h - f64::from(p.row + p.row_span) * cell_h,
                    f64::from(p.col_span) * cell_w,
                    f64::from(p.row_span) * cell_h,
                );
                let mut r = raw.inset(opts.padding);
                r.w = r.w.max(opts.min_width);
                r.h = r.h.max(opts.min_height);
                r
            })
            .collect()
    }
}

/// Occupancy tracker for unit cells.
struct Occupancy {
    /// Grid width.
    columns: u32,
    /// Taken cells as `(col, row)`.
    cells: HashSet<(u32, u32)>,
}

impl Occupancy {
    /// Whether the block at `(col, row)` with the given spans is entirely free.
    fn fits(&self, col: u32, row: u32, col_span: u32, row_span: u32) -> bool {
        (row..row + row_span)
            .all(|r| (col..col + col_span).all(|c| !self.cells.contains(&(c, r))))
    }

    /// Whether every cell in `row` is taken.
    fn row_full(&self, row: u32) -> bool {
        (0..self.columns).all(|c| self.cells.contains(&(c, row)))
    }

    /// Mark all cells of `p` as taken.
    fn mark(&mut self, p: &Placement) {
        self.cells.extend(p.cells());
    }
}

/// Assign grid cells to each size class in order.
pub fn place_cells(classes: &[SizeClass]) -> CellLayout {
    let columns = columns_for(classes.len());
    let mut occ = Occupancy {
        columns,
        cells: HashSet::new(),
    };
    let mut current_row = 0;
    let mut max_row = 0;
    let mut placements = Vec::with_capacity(classes.len());

    for (idx, class) in classes.iter().enumerate() {
        let (col_span, row_span) = class.span();
        let found = if col_span <= columns {
            (current_row..current_row + SCAN_ROWS).find_map(|row| {
                (0..=columns - col_span)
                    .find(|&col| occ.fits(col, row, col_span, row_span))
                    .map(|col| (col, row))
            })
        } else {
            None
        };
        let placement = match found {
            Some((col, row)) => Placement {
                col,
                row,
                col_span,
                row_span,
            },
            None => {
                debug!(
                    index = idx,
                    class = %class,
                    columns,
                    row = max_row,
                    "no first-fit slot; placing on a fresh row"
                );
                Placement {
                    col: 0,
                    row: max_row,
                    col_span: col_span.min(columns),
                    row_span,
                }
            }
        };
        occ.mark(&placement);
        max_row = max_row.max(placement.row + placement.row_span);
        while occ.row_full(current_row) {
            current_row += 1;
        }
        placements.push(placement);
    }

    CellLayout {
        columns,
        rows: max_row.max(1),
        placements,
    }
}

/// Plan one rectangle per app, preserving input order.
///
/// Returns an empty list for an empty input without consulting the column
/// table.
pub fn plan<K: Clone>(apps: &[(K, SizeClass)], area: Rect) -> Vec<(K, Rect)> {
    plan_with(apps, area, PlanOptions::default())
}

/// [`plan`] with explicit mapping options.
pub fn plan_with<K: Clone>(
    apps: &[(K, SizeClass)],
    area: Rect,
    opts: PlanOptions,
) -> Vec<(K, Rect)> {
    if apps.is_empty() {
        return Vec::new();
    }
    let classes: Vec<SizeClass> = apps.iter().map(|(_, c)| *c).collect();
    let layout = place_cells(&classes);
    debug!(
        apps = apps.len(),
        columns = layout.columns,
        rows = layout.rows,
        "planned grid"
    );
    apps.iter()
        .map(|(k, _)| k.clone())
        .zip(layout.to_rects(area, opts))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const AREA: Rect = Rect::new(0.0, 0.0, 1000.0, 800.0);

    fn rects(classes: &[SizeClass], area: Rect) -> Vec<Rect> {
        let apps: Vec<(usize, SizeClass)> = classes.iter().copied().enumerate().collect();
        plan(&apps, area).into_iter().map(|(_, r)| r).collect()
    }

    #[test]
    fn empty_input_plans_nothing() {
        let apps: Vec<(u32, SizeClass)> = Vec::new();
        assert!(plan(&apps, AREA).is_empty());
    }

    #[test]
    fn four_small_tile_two_by_two() {
        let out = rects(&[SizeClass::Small; 4], AREA);
        assert_eq!(
            out,
            vec![
                Rect::new(4.0, 404.0, 492.0, 392.0),
                Rect::new(504.0, 404.0, 492.0, 392.0),
                Rect::new(4.0, 4.0, 492.0, 392.0),
                Rect::new(504.0, 4.0, 492.0, 392.0),
            ]
        );
        let covered: f64 = out.iter().map(|r| r.inset(-PADDING).area()).sum();
        assert_eq!(covered, AREA.area());
    }

    #[test]
    fn single_large_fills_area() {
        let layout = place_cells(&[SizeClass::Large]);
        assert_eq!(layout.columns, 1);
        assert_eq!(
            layout.placements,
            vec![Placement {
                col: 0,
                row: 0,
                col_span: 1,
                row_span: 2,
            }]
        );
        let out = rects(&[SizeClass::Large], AREA);
        assert_eq!(out, vec![AREA.inset(PADDING)]);
    }

    #[test]
    fn medium_then_small_wraps() {
        let layout = place_cells(&[SizeClass::Medium, SizeClass::Small]);
        assert_eq!(layout.columns, 2);
        assert_eq!(layout.rows, 2);
        assert_eq!(layout.placements[1].row, 1);
        assert_eq!(layout.placements[1].col, 0);
    }

    #[test]
    fn first_fit_backfills_gaps() {
        // 3 columns: medium leaves column 2 free on row 0 for the small that follows.
        let layout = place_cells(&[
            SizeClass::Medium,
            SizeClass::Medium,
            SizeClass::Small,
            SizeClass::Small,
            SizeClass::Small,
        ]);
        assert_eq!(layout.columns, 3);
        let p = &layout.placements;
        assert_eq!((p[0].col, p[0].row), (0, 0));
        assert_eq!((p[1].col, p[1].row), (0, 1));
        assert_eq!((p[2].col, p[2].row), (2, 0));
        assert_eq!((p[3].col, p[3].row), (2, 1));
        assert_eq!((p[4].col, p[4].row), (0, 2));
        assert_eq!(layout.rows, 3);
    }

    #[test]
    fn tiny_area_clamps_to_minimum() {
        let out = rects(&[SizeClass::Small; 4], Rect::new(0.0, 0.0, 300.0, 200.0));
        for r in out {
            assert_eq!(r.w, MIN_WIDTH);
            assert_eq!(r.h, MIN_HEIGHT);
        }
    }

    #[test]
    fn respects_area_origin() {
        let area = Rect::new(100.0, 50.0, 1000.0, 800.0);
        let out = rects(&[SizeClass::Small, SizeClass::Small], area);
        assert_eq!(out[0], Rect::new(104.0, 54.0, 492.0, 792.0));
        assert_eq!(out[1], Rect::new(604.0, 54.0, 492.0, 792.0));
    }

    #[test]
    fn keys_follow_input_order() {
        let apps = vec![
            ("b", SizeClass::Large),
            ("a", SizeClass::Small),
            ("b", SizeClass::Small),
        ];
        let out = plan(&apps, AREA);
        let keys: Vec<&str> = out.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["b", "a", "b"]);
    }
}
