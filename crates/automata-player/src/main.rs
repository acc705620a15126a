//! Headless, timer-driven player for the automaton engine.
//!
//! Usage: `automata-player [config.json]`. `AUTOMATA_SEED` overrides the seed.

mod telemetry;

use anyhow::{Context, Result};
use automata_core::PlayerConfig;
use automata_world::{Automaton, Frame, Session};
use tokio::signal;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, info, warn};

const SEED_VAR: &str = "AUTOMATA_SEED";

#[tokio::main]
async fn main() -> Result<()> {
    let path = std::env::args().nth(1);
    let seed = std::env::var(SEED_VAR).ok();
    let config = resolve_config(path.as_deref(), seed.as_deref())?;

    telemetry::init_telemetry(config.json_logs)?;
    debug!(config = %serde_json::to_string(&config)?, "Effective configuration");

    let mut session = Session::new(config.session.clone())?;
    info!(
        model = %session.model().kind(),
        dims = %session.dims(),
        seed = session.seed(),
        fps = config.session.playback.frames_per_second,
        "Starting automata player"
    );

    let mut frame = Frame::new(session.dims());
    frame.apply(&session.initial_paint());

    let period = Duration::from_secs_f64(1.0 / config.session.playback.frames_per_second as f64);
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);
    let mut halt_reported = false;

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            _ = ticker.tick() => {
                let repaint = session.advance();
                frame.apply(&repaint);
                let stats = session.stats();

                if config.stats_interval > 0 && stats.ticks % config.stats_interval == 0 {
                    info!(
                        tick = stats.ticks,
                        changed = repaint.len(),
                        cells_changed_total = stats.cells_changed,
                        full_refreshes = stats.full_refreshes,
                        "Session stats"
                    );
                }

                if session.model().is_halted() && !halt_reported {
                    info!(tick = stats.ticks, "Agent left the grid; nothing more will change");
                    halt_reported = true;
                }

                if config.max_ticks.is_some_and(|max| stats.ticks >= max) {
                    info!(tick = stats.ticks, "Reached tick limit");
                    break;
                }
            }
        }
    }

    let stats = session.stats();
    info!(
        ticks = stats.ticks,
        cells_changed = stats.cells_changed,
        full_refreshes = stats.full_refreshes,
        "Player stopped"
    );

    if config.print_final_frame {
        print!("{}", frame.to_text());
    }

    Ok(())
}

/// Config file (or defaults) with the seed override applied
fn resolve_config(path: Option<&str>, seed: Option<&str>) -> Result<PlayerConfig> {
    let mut config = match path {
        Some(path) => PlayerConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path))?,
        None => PlayerConfig::default(),
    };

    if let Some(seed) = seed {
        let seed = seed
            .trim()
            .parse::<u64>()
            .with_context(|| format!("{} must be an unsigned integer", SEED_VAR))?;
        config.session.seed = Some(seed);
    }

    config.session.validate()?;
    Ok(config)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use automata_core::{ModelKind, ModelParams};
    use std::io::Write;

    #[test]
    fn test_defaults_without_arguments() {
        let config = resolve_config(None, None).unwrap();
        assert_eq!(config.session.seed, None);
        assert_eq!(config.session.model.kind(), ModelKind::GameOfLife);
    }

    #[test]
    fn test_seed_override() {
        let config = resolve_config(None, Some(" 1234 ")).unwrap();
        assert_eq!(config.session.seed, Some(1234));
        assert!(resolve_config(None, Some("abc")).is_err());
    }

    #[test]
    fn test_config_file() {
        let path = std::env::temp_dir().join(format!("automata-player-{}.json", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            r#"{{"session": {{"grid": {{"width": 30, "height": 20}},
                "model": {{"model": "elementary", "rule": 30, "seed": 1}},
                "playback": {{"frames_per_second": 10, "refresh_interval": 5}},
                "seed": 3}}, "max_ticks": 12}}"#
        )
        .unwrap();
        drop(file);

        let config = resolve_config(path.to_str(), None).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.session.model, ModelParams::Elementary { rule: 30, seed: 1 });
        assert_eq!(config.session.grid.width, 30);
        assert_eq!(config.session.seed, Some(3));
        assert_eq!(config.max_ticks, Some(12));
        assert!(config.print_final_frame);
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(resolve_config(Some("/nonexistent/automata.json"), None).is_err());
    }
}
