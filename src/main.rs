//! Headless board inspector.
//!
//! Loads a board snapshot (a JSON array of element records), runs it through
//! the engine the way a host would on board load, and prints the resulting
//! render order and the viewport transforms for "home" and "fit all".
//!
//! ```text
//! corkboard <board.json> [width height]
//! ```

use std::process::ExitCode;

use corkboard::config::EngineConfig;
use corkboard::engine::{Action, EngineCore};
use corkboard::geom::Size;

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(path) = args.first() else {
        tracing::error!("usage: corkboard <board.json> [width height]");
        return ExitCode::from(2);
    };
    let screen = match parse_screen(&args[1..]) {
        Ok(size) => size,
        Err(e) => {
            tracing::error!(error = %e, "invalid viewport size");
            return ExitCode::from(2);
        }
    };

    match run(path, screen) {
        Ok(report) => {
            println!("{report}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, path = %path, "inspection failed");
            ExitCode::FAILURE
        }
    }
}

fn parse_screen(args: &[String]) -> Result<Size, String> {
    match args {
        [] => Ok(Size::new(1280.0, 800.0)),
        [w, h] => {
            let width: f64 = w.parse().map_err(|_| format!("bad width: {w}"))?;
            let height: f64 = h.parse().map_err(|_| format!("bad height: {h}"))?;
            Ok(Size::new(width, height))
        }
        _ => Err("expected both width and height".into()),
    }
}

fn run(path: &str, screen: Size) -> Result<String, Box<dyn std::error::Error>> {
    let config = EngineConfig::from_env()?;
    let raw = std::fs::read_to_string(path)?;
    let records: Vec<serde_json::Value> = serde_json::from_str(&raw)?;

    let mut engine = EngineCore::new(config);
    engine.set_viewport_size(screen);
    let actions = engine.load_snapshot(&records, 0.0);
    let repairs = actions.iter().filter(|a| matches!(a, Action::UpdateElement { .. })).count();
    let home = engine.get_transform();

    engine.fit_all_elements(0.0);
    let fit = engine.get_transform();

    tracing::info!(elements = engine.registry.len(), repairs, "board loaded");

    let report = serde_json::json!({
        "elements": engine.registry.len(),
        "repairs": repairs,
        "renderOrder": engine.render_order(),
        "home": home,
        "fitAll": fit,
    });
    Ok(serde_json::to_string_pretty(&report)?)
}
