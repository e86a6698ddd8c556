//! Brick Quest entry point
//!
//! Window and input plumbing live outside this crate. Natively this runs an
//! attract-mode session through the headless frontend and logs the outcome.
//!
//! Usage: `brick-quest [settings.json] [--realtime] [--dump-settings]`

use std::path::Path;
use std::process::ExitCode;

use brick_quest::platform::Headless;
use brick_quest::sim::GameState;
use brick_quest::{Settings, run};

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Brick Quest (headless) starting...");

    let mut settings_path = None;
    let mut realtime = false;
    let mut dump = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--realtime" => realtime = true,
            "--dump-settings" => dump = true,
            other => settings_path = Some(other.to_string()),
        }
    }

    let settings = match &settings_path {
        Some(path) => Settings::load(Path::new(path)),
        None => Settings::default(),
    };

    if dump {
        match settings.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                log::error!("Cannot serialize settings: {}", e);
                return ExitCode::FAILURE;
            }
        }
        return ExitCode::SUCCESS;
    }

    let mut state = GameState::with_settings(&settings);
    let mut frontend = Headless::new(&settings, realtime);

    match run(&mut state, &mut frontend, Some(settings.demo_ticks)) {
        Ok(summary) => {
            log::info!(
                "Session over after {} ticks: world {}-{}, score {}, {} levels cleared, {} deaths, {} game overs",
                summary.ticks,
                summary.world,
                summary.level,
                summary.score,
                summary.levels_cleared,
                summary.deaths,
                summary.game_overs
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Frontend failure: {}", e);
            ExitCode::FAILURE
        }
    }
}
