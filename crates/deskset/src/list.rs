//! `deskset list`.

use config::Config;

/// Print every workspace with its apps.
pub fn run(cfg: &Config) {
    if cfg.workspaces.is_empty() {
        println!("No workspaces defined.");
        return;
    }
    for ws in &cfg.workspaces {
        let mut flags = Vec::new();
        if ws.isolate_desktop {
            flags.push("isolate");
        }
        if ws.tile_windows {
            flags.push("tile");
        }
        let flags = if flags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", flags.join(", "))
        };
        println!("{} ({} apps){}", ws.name, ws.apps.len(), flags);
        for app in &ws.apps {
            let identifier = if app.identifier.is_empty() {
                "<no identifier>"
            } else {
                app.identifier.as_str()
            };
            println!("  {:<20} {:<8} {}", app.name, app.size, identifier);
        }
    }
}
