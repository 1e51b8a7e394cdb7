//! `deskset plan`.

use config::Config;
use grid_layout::{GridConfiguration, Rect, SizeClass};
use tracing::debug;
use winops::{MacOps, WindowControl};

use crate::{cli::PlanArgs, error::Result, workspace};

/// Print the planned rectangle for each app without touching any window.
pub fn run(cfg: &Config, args: &PlanArgs) -> Result<()> {
    let ws = workspace(cfg, &args.name)?;
    let area = match args.area {
        Some(a) => a.0,
        None => MacOps.usable_area()?,
    };
    debug!(workspace = ws.name, ?area, "planning");
    let grid = GridConfiguration::for_app_count(ws.apps.len());
    println!(
        "{}: {} ({} columns) in {}",
        ws.name,
        grid.description,
        grid.columns,
        format_rect(area)
    );
    let keyed: Vec<(&str, SizeClass)> = ws.apps.iter().map(|a| (a.name.as_str(), a.size)).collect();
    for (name, rect) in grid_layout::plan(&keyed, area) {
        println!("  {:<20} {}", name, format_rect(rect));
    }
    Ok(())
}

/// `WxH+X+Y`, rounded to whole points.
fn format_rect(r: Rect) -> String {
    format!("{:.0}x{:.0}+{:.0}+{:.0}", r.w, r.h, r.x, r.y)
}
