//! Coordinate helpers shared by the native backend.
//!
//! Layout rectangles are bottom-up (AppKit screen space). Accessibility
//! positions are top-left, measured from the top of the primary screen.

use std::path::Path;

use grid_layout::Rect;

/// Window origin and size in accessibility (top-left) coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxFrame {
    /// Left edge.
    pub x: f64,
    /// Top edge, measured down from the top of the primary screen.
    pub y: f64,
    /// Width.
    pub w: f64,
    /// Height.
    pub h: f64,
}

/// Convert a bottom-up rect into the top-left frame accessibility expects.
pub fn to_ax_frame(rect: Rect, primary_height: f64) -> AxFrame {
    AxFrame {
        x: rect.x.round(),
        y: (primary_height - (rect.y + rect.h)).round(),
        w: rect.w.round(),
        h: rect.h.round(),
    }
}

/// Display name for an app bundle path (`/Applications/Safari.app` → `Safari`).
pub fn bundle_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_to_top_left() {
        // 1440x900 primary; a window hugging the bottom-left of the visible area.
        let f = to_ax_frame(Rect::new(4.0, 4.0, 700.0, 400.0), 900.0);
        assert_eq!(
            f,
            AxFrame {
                x: 4.0,
                y: 496.0,
                w: 700.0,
                h: 400.0
            }
        );
    }

    #[test]
    fn secondary_screen_above_primary_goes_negative() {
        let f = to_ax_frame(Rect::new(0.0, 900.0, 800.0, 600.0), 900.0);
        assert_eq!(f.y, -600.0);
    }

    #[test]
    fn bundle_names() {
        assert_eq!(bundle_name(Path::new("/Applications/Safari.app")), "Safari");
        assert_eq!(bundle_name(Path::new("/")), "");
    }
}
