//! `WxH[+X+Y]` area arguments.

use std::{fmt, str::FromStr};

use grid_layout::Rect;

/// A target rectangle given on the command line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Area(pub Rect);

impl FromStr for Area {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || format!("expected WxH or WxH+X+Y, got '{s}'");
        let (size, origin) = match s.split_once('+') {
            Some((size, origin)) => (size, Some(origin)),
            None => (s, None),
        };
        let (w, h) = size.split_once(['x', 'X']).ok_or_else(bad)?;
        let w: f64 = w.trim().parse().map_err(|_| bad())?;
        let h: f64 = h.trim().parse().map_err(|_| bad())?;
        let (x, y) = match origin {
            Some(o) => {
                let (x, y) = o.split_once('+').ok_or_else(bad)?;
                (
                    x.trim().parse().map_err(|_| bad())?,
                    y.trim().parse().map_err(|_| bad())?,
                )
            }
            None => (0.0, 0.0),
        };
        if w <= 0.0 || h <= 0.0 {
            return Err(format!("area must have a positive size, got '{s}'"));
        }
        Ok(Self(Rect::new(x, y, w, h)))
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.0;
        write!(f, "{}x{}+{}+{}", r.w, r.h, r.x, r.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_size_only() {
        let a: Area = "1440x875".parse().unwrap();
        assert_eq!(a.0, Rect::new(0.0, 0.0, 1440.0, 875.0));
    }

    #[test]
    fn parses_origin() {
        let a: Area = "800x600+1440+25".parse().unwrap();
        assert_eq!(a.0, Rect::new(1440.0, 25.0, 800.0, 600.0));
        assert_eq!(a.to_string(), "800x600+1440+25");
    }

    #[test]
    fn rejects_garbage() {
        assert!("800".parse::<Area>().is_err());
        assert!("0x600".parse::<Area>().is_err());
        assert!("800x600+1".parse::<Area>().is_err());
    }
}
