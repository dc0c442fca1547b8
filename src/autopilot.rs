//! Headless autopilot
//!
//! Plays the game without a browser: a bot with a fixed chance per tick of
//! firing at the oldest live target. Used by the native binary and tests.

use anyhow::{Result, anyhow, ensure};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::settings::Settings;
use crate::sim::{GameEvent, GameManager, GameStatus};

#[derive(Clone, Debug, Serialize)]
pub struct RunSummary {
    pub seed: u64,
    pub ticks: u32,
    pub hits: u32,
    pub misses: u32,
    pub games_over: u32,
    pub best_score: Option<u32>,
    pub final_score: u32,
    pub final_lives: u32,
    /// Max time-to-die new spawns had when the run stopped
    pub final_max_time_to_die: u32,
}

/// Play `max_ticks` ticks. After a game over the bot starts a new run.
///
/// `shot_chance` is the probability (0..=1) of firing on any given tick.
pub fn run_autopilot(
    settings: &Settings,
    seed: u64,
    max_ticks: u32,
    shot_chance: f64,
) -> Result<RunSummary> {
    if max_ticks == 0 {
        return Err(anyhow!("max_ticks must be > 0"));
    }
    ensure!(
        (0.0..=1.0).contains(&shot_chance),
        "shot_chance must be within 0.0..=1.0, got {shot_chance}"
    );
    settings.validate()?;

    let mut game = GameManager::new(settings, seed);
    let mut bot = Pcg32::seed_from_u64(seed ^ 0x5eed);
    let mut summary = RunSummary {
        seed,
        ticks: 0,
        hits: 0,
        misses: 0,
        games_over: 0,
        best_score: None,
        final_score: 0,
        final_lives: 0,
        final_max_time_to_die: 0,
    };

    game.start();
    for _ in 0..max_ticks {
        if game.status() == GameStatus::GameOver {
            game.start();
        }
        let aim = game.controller().targets().first().map(|t| t.pos);
        if let Some(aim) = aim {
            if bot.random_bool(shot_chance) {
                game.shoot(aim);
            }
        }
        game.update();
        summary.ticks += 1;

        for event in game.drain_events() {
            match event {
                GameEvent::Hit => summary.hits += 1,
                GameEvent::Miss => summary.misses += 1,
                GameEvent::GameOver => {
                    summary.misses += 1;
                    summary.games_over += 1;
                }
                GameEvent::Started => {}
            }
        }
    }

    summary.best_score = game.best_score();
    summary.final_score = game.score();
    summary.final_lives = game.lives();
    summary.final_max_time_to_die = game.controller().max_time_to_die();
    log::info!(
        "Autopilot: {} ticks, {} hits, {} misses, {} game(s) over",
        summary.ticks,
        summary.hits,
        summary.misses,
        summary.games_over
    );
    Ok(summary)
}
