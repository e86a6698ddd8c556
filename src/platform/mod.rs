//! Platform abstraction layer
//!
//! The simulation never talks to a window directly. A `Frontend` supplies one
//! input snapshot per tick and presents the resulting frame; `run` drives the
//! fixed-rate loop between the two.

use std::fmt;
use std::time::{Duration, Instant};

use crate::autopilot::Autopilot;
use crate::consts::*;
use crate::scene::{Frame, build_frame};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

/// Fatal collaborator failure; ends the session between ticks
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrontendError {
    /// Window or device went away
    Closed,
    Input(String),
    Present(String),
}

impl fmt::Display for FrontendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrontendError::Closed => write!(f, "frontend closed"),
            FrontendError::Input(msg) => write!(f, "input failed: {}", msg),
            FrontendError::Present(msg) => write!(f, "present failed: {}", msg),
        }
    }
}

impl std::error::Error for FrontendError {}

/// Input source and frame sink
pub trait Frontend {
    /// Input for the next tick. `state` is read-only context (attract mode uses it).
    fn poll_input(&mut self, state: &GameState) -> Result<TickInput, FrontendError>;

    /// Draw a finished frame. Pacing to the tick rate happens here.
    fn present(&mut self, frame: &Frame) -> Result<(), FrontendError>;
}

/// What happened over a `run`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub score: u64,
    pub world: u8,
    pub level: u8,
    pub deaths: u32,
    pub levels_cleared: u32,
    pub game_overs: u32,
    /// Session reached `Finished` (quit or victory) rather than the tick cap
    pub finished: bool,
}

impl RunSummary {
    fn record(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Died { .. } => self.deaths += 1,
            GameEvent::LevelCompleted { .. } => self.levels_cleared += 1,
            GameEvent::GameOver { .. } => self.game_overs += 1,
            _ => {}
        }
    }
}

/// Run the session until it finishes, `max_ticks` elapse, or the frontend fails
pub fn run(
    state: &mut GameState,
    frontend: &mut dyn Frontend,
    max_ticks: Option<u64>,
) -> Result<RunSummary, FrontendError> {
    let mut summary = RunSummary::default();

    while state.phase != GamePhase::Finished {
        if max_ticks.is_some_and(|max| summary.ticks >= max) {
            break;
        }

        let input = frontend.poll_input(state)?;
        tick(state, &input, SIM_DT);
        summary.ticks += 1;

        for event in state.take_events() {
            log::debug!("{:?}", event);
            summary.record(&event);
        }

        frontend.present(&build_frame(state))?;
    }

    summary.score = state.score;
    summary.world = state.world;
    summary.level = state.level;
    summary.finished = state.phase == GamePhase::Finished;
    Ok(summary)
}

/// Windowless frontend driven by the autopilot
pub struct Headless {
    pilot: Autopilot,
    /// Sleep to the tick rate instead of running flat out
    realtime: bool,
    next_deadline: Option<Instant>,
    frames: u64,
}

impl Headless {
    pub fn new(settings: &Settings, realtime: bool) -> Self {
        Self {
            pilot: Autopilot::from_settings(settings),
            realtime,
            next_deadline: None,
            frames: 0,
        }
    }

    fn pace(&mut self) {
        let period = Duration::from_secs_f32(SIM_DT);
        let now = Instant::now();
        let deadline = self.next_deadline.unwrap_or(now) + period;
        if deadline > now {
            std::thread::sleep(deadline - now);
            self.next_deadline = Some(deadline);
        } else {
            // Fell behind; don't try to catch up
            self.next_deadline = Some(now);
        }
    }
}

impl Frontend for Headless {
    fn poll_input(&mut self, state: &GameState) -> Result<TickInput, FrontendError> {
        Ok(self.pilot.next_input(state))
    }

    fn present(&mut self, frame: &Frame) -> Result<(), FrontendError> {
        self.frames += 1;
        if self.frames % u64::from(TICK_HZ * 10) == 0 {
            if let Some(hud) = &frame.hud {
                log::info!(
                    "{} | {} | {} | {} | {}",
                    hud.world_text(),
                    hud.score_text(),
                    hud.coins_text(),
                    hud.time_text(),
                    hud.lives_text()
                );
            }
        }
        if let Some(banner) = &frame.banner {
            log::trace!("{}", banner.lines().join(" / "));
        }
        if self.realtime {
            self.pace();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays a fixed input list, then reports a failure
    struct Scripted {
        inputs: Vec<TickInput>,
        presented: usize,
        fail_present_at: Option<usize>,
    }

    impl Scripted {
        fn new(inputs: Vec<TickInput>) -> Self {
            Self {
                inputs,
                presented: 0,
                fail_present_at: None,
            }
        }
    }

    impl Frontend for Scripted {
        fn poll_input(&mut self, _state: &GameState) -> Result<TickInput, FrontendError> {
            if self.inputs.is_empty() {
                return Err(FrontendError::Closed);
            }
            Ok(self.inputs.remove(0))
        }

        fn present(&mut self, _frame: &Frame) -> Result<(), FrontendError> {
            if self.fail_present_at == Some(self.presented) {
                return Err(FrontendError::Present("device lost".to_string()));
            }
            self.presented += 1;
            Ok(())
        }
    }

    #[test]
    fn test_quit_ends_run() {
        let mut state = GameState::new();
        let mut inputs = vec![TickInput::default(); 10];
        inputs.push(TickInput {
            quit: true,
            ..Default::default()
        });
        let mut frontend = Scripted::new(inputs);

        let summary = run(&mut state, &mut frontend, None).unwrap();
        assert_eq!(summary.ticks, 11);
        assert!(summary.finished);
        assert_eq!(frontend.presented, 11);
    }

    #[test]
    fn test_input_failure_propagates() {
        let mut state = GameState::new();
        let mut frontend = Scripted::new(vec![TickInput::default(); 3]);

        let err = run(&mut state, &mut frontend, None).unwrap_err();
        assert_eq!(err, FrontendError::Closed);
        // State is left intact after the last full tick
        assert_eq!(state.time_ticks, 3);
    }

    #[test]
    fn test_present_failure_propagates() {
        let mut state = GameState::new();
        let mut frontend = Scripted::new(vec![TickInput::default(); 10]);
        frontend.fail_present_at = Some(2);

        let err = run(&mut state, &mut frontend, None).unwrap_err();
        assert!(matches!(err, FrontendError::Present(_)));
    }

    #[test]
    fn test_tick_cap() {
        let mut state = GameState::new();
        let mut frontend = Headless::new(&Settings::default(), false);

        let summary = run(&mut state, &mut frontend, Some(120)).unwrap();
        assert_eq!(summary.ticks, 120);
        assert!(!summary.finished);
    }

    #[test]
    fn test_summary_counts_deaths() {
        let mut state = GameState::new();
        state.enemies.clear();
        state.platforms.clear();
        let mut frontend = Scripted::new(vec![TickInput::default(); 30]);
        let summary = run(&mut state, &mut frontend, Some(30)).unwrap();
        assert_eq!(summary.deaths, 1);
        assert_eq!(state.player.lives, 2);
    }
}
