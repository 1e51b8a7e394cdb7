//! Size classes and the app-count → column table.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

/// Size hint controlling how many grid cells a window occupies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeClass {
    /// One cell.
    Small,
    /// Two cells side by side.
    #[default]
    Medium,
    /// A two by two block.
    Large,
}

impl SizeClass {
    /// `(col_span, row_span)` in grid cells.
    pub const fn span(self) -> (u32, u32) {
        match self {
            Self::Small => (1, 1),
            Self::Medium => (2, 1),
            Self::Large => (2, 2),
        }
    }
}

impl Display for SizeClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let s = match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        };
        f.write_str(s)
    }
}

/// Column count and a short description, derived from the number of apps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridConfiguration {
    /// Number of grid columns.
    pub columns: u32,
    /// Human-readable summary of the layout, for status displays.
    pub description: String,
}

impl GridConfiguration {
    /// Derive the grid for `app_count` apps.
    pub fn for_app_count(app_count: usize) -> Self {
        let columns = columns_for(app_count);
        let rows = app_count.div_ceil(columns as usize).max(1);
        let description = match app_count {
            0 => "Empty".to_string(),
            1 => "Full screen".to_string(),
            2 => "Side by side".to_string(),
            3 => "Three columns".to_string(),
            _ => format!("{columns}×{rows} grid"),
        };
        Self {
            columns,
            description,
        }
    }
}

/// Column count for `app_count` apps. Never zero.
pub fn columns_for(app_count: usize) -> u32 {
    match app_count {
        0 | 1 => 1,
        2 => 2,
        3 => 3,
        4 => 2,
        5..=9 => 3,
        _ => 4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_table() {
        let expect = [
            (1, 1),
            (2, 2),
            (3, 3),
            (4, 2),
            (5, 3),
            (6, 3),
            (7, 3),
            (9, 3),
            (10, 4),
            (12, 4),
            (13, 4),
            (30, 4),
        ];
        for (n, cols) in expect {
            assert_eq!(GridConfiguration::for_app_count(n).columns, cols, "n={n}");
        }
    }

    #[test]
    fn columns_nondecreasing_from_four() {
        let mut prev = columns_for(4);
        for n in 5..=30 {
            let c = columns_for(n);
            assert!(c >= prev, "columns dropped at n={n}");
            prev = c;
        }
    }

    #[test]
    fn descriptions() {
        assert_eq!(GridConfiguration::for_app_count(1).description, "Full screen");
        assert_eq!(GridConfiguration::for_app_count(4).description, "2×2 grid");
        assert_eq!(GridConfiguration::for_app_count(11).description, "4×3 grid");
    }

    #[test]
    fn spans() {
        assert_eq!(SizeClass::Small.span(), (1, 1));
        assert_eq!(SizeClass::Medium.span(), (2, 1));
        assert_eq!(SizeClass::Large.span(), (2, 2));
    }
}
