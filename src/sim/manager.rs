//! Game manager: score, lives and the game state machine

use glam::Vec2;
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::controller::{ControllerConfig, TargetController, TickReport};
use crate::scoreboard::Scoreboard;
use crate::settings::Settings;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameStatus {
    /// Nothing played yet
    #[default]
    NewGame,
    /// Targets counting down
    Playing,
    /// Frozen by the player
    Paused,
    /// Lives ran out; counters already reset for the next run
    GameOver,
}

/// Player commands that move the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
}

impl GameStatus {
    /// Transition table. `None` means the command is ignored in this state.
    pub fn apply(self, command: Command) -> Option<GameStatus> {
        use GameStatus::*;
        match (self, command) {
            (NewGame | Paused | GameOver, Command::Start) => Some(Playing),
            (Playing, Command::Pause) => Some(Paused),
            _ => None,
        }
    }

    pub fn is_playing(self) -> bool {
        self == GameStatus::Playing
    }

    pub fn is_paused(self) -> bool {
        self == GameStatus::Paused
    }
}

/// Feedback triggers for audio/presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Started,
    Hit,
    Miss,
    GameOver,
}

/// Owns the run: status, counters and the target controller
#[derive(Debug, Clone)]
pub struct GameManager {
    status: GameStatus,
    score: u32,
    misses: u32,
    lives: u32,
    initial_lives: u32,
    pause_key: String,
    controller_config: ControllerConfig,
    controller: TargetController,
    /// Seeds for each fresh controller
    seeds: Pcg32,
    events: Vec<GameEvent>,
    scoreboard: Scoreboard,
    last_score: Option<u32>,
}

impl GameManager {
    pub fn new(settings: &Settings, seed: u64) -> Self {
        let controller_config = ControllerConfig::from(settings);
        let mut seeds = Pcg32::seed_from_u64(seed);
        let controller = TargetController::new(controller_config, seeds.next_u64());
        Self {
            status: GameStatus::NewGame,
            score: 0,
            misses: 0,
            lives: settings.initial_lives,
            initial_lives: settings.initial_lives,
            pause_key: settings.pause_key.clone(),
            controller_config,
            controller,
            seeds,
            events: Vec::new(),
            scoreboard: Scoreboard::new(),
            last_score: None,
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn misses(&self) -> u32 {
        self.misses
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    /// Final score of the most recent finished run
    pub fn last_score(&self) -> Option<u32> {
        self.last_score
    }

    pub fn best_score(&self) -> Option<u32> {
        self.scoreboard.top_score()
    }

    pub fn controller(&self) -> &TargetController {
        &self.controller
    }

    /// Mutable access for scripted setups (demo layouts, tests)
    pub fn controller_mut(&mut self) -> &mut TargetController {
        &mut self.controller
    }

    pub fn pause_key(&self) -> &str {
        &self.pause_key
    }

    /// Begin or resume play. Returns false if already playing.
    pub fn start(&mut self) -> bool {
        if !self.transition(Command::Start) {
            return false;
        }
        self.events.push(GameEvent::Started);
        true
    }

    /// Freeze play. Returns false unless currently playing.
    pub fn pause(&mut self) -> bool {
        self.transition(Command::Pause)
    }

    pub fn toggle_pause(&mut self) -> bool {
        if self.status.is_playing() {
            self.pause()
        } else {
            self.start()
        }
    }

    /// Route a key press. Only the pause key does anything.
    pub fn handle_key(&mut self, key: &str) -> bool {
        if !key.eq_ignore_ascii_case(&self.pause_key) {
            log::debug!("Ignoring key {key:?}");
            return false;
        }
        self.toggle_pause()
    }

    /// Fire at a canvas point. Ignored unless playing.
    pub fn shoot(&mut self, point: Vec2) {
        if !self.status.is_playing() {
            log::debug!("Ignoring shot at {point} while {:?}", self.status);
            return;
        }
        self.controller.record_shot(point);
    }

    /// One logical tick. The controller stays frozen outside `Playing`.
    pub fn update(&mut self) -> TickReport {
        if !self.status.is_playing() {
            return TickReport::default();
        }
        let report = self.controller.tick();
        for _ in 0..report.hits {
            self.on_hit();
        }
        if report.missed {
            self.on_miss();
        }
        report
    }

    pub fn on_hit(&mut self) {
        self.score += 1;
        self.events.push(GameEvent::Hit);
    }

    pub fn on_miss(&mut self) {
        self.misses += 1;
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.game_over();
        } else {
            self.events.push(GameEvent::Miss);
        }
    }

    /// Take pending feedback events, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn game_over(&mut self) {
        log::info!(
            "Game over: score {} after {} misses",
            self.score,
            self.misses
        );
        if let Some(rank) = self.scoreboard.add_score(self.score, self.misses) {
            log::info!("Score {} ranked #{} this session", self.score, rank);
        }
        self.last_score = Some(self.score);

        self.score = 0;
        self.misses = 0;
        self.lives = self.initial_lives;
        self.controller = TargetController::new(self.controller_config, self.seeds.next_u64());
        self.status = GameStatus::GameOver;
        self.events.push(GameEvent::GameOver);
    }

    fn transition(&mut self, command: Command) -> bool {
        match self.status.apply(command) {
            Some(next) => {
                log::info!("{:?} -> {:?}", self.status, next);
                self.status = next;
                true
            }
            None => {
                log::debug!("Ignoring {:?} while {:?}", command, self.status);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::target::Lifecycle;

    fn manager() -> GameManager {
        GameManager::new(&Settings::default(), 12345)
    }

    #[test]
    fn test_transition_table() {
        use GameStatus::*;
        assert_eq!(NewGame.apply(Command::Start), Some(Playing));
        assert_eq!(Paused.apply(Command::Start), Some(Playing));
        assert_eq!(GameOver.apply(Command::Start), Some(Playing));
        assert_eq!(Playing.apply(Command::Start), None);
        assert_eq!(Playing.apply(Command::Pause), Some(Paused));
        assert_eq!(NewGame.apply(Command::Pause), None);
        assert_eq!(Paused.apply(Command::Pause), None);
        assert_eq!(GameOver.apply(Command::Pause), None);
    }

    #[test]
    fn test_start_emits_event_once() {
        let mut game = manager();
        assert!(game.start());
        assert!(!game.start());
        assert_eq!(game.drain_events(), vec![GameEvent::Started]);
        assert!(game.drain_events().is_empty());
    }

    #[test]
    fn test_not_playing_is_frozen() {
        let mut game = manager();
        let report = game.update();
        assert_eq!(report, TickReport::default());
        assert!(game.controller().targets().is_empty());
    }

    #[test]
    fn test_shots_ignored_unless_playing() {
        let mut game = manager();
        game.shoot(Vec2::new(10.0, 10.0));
        assert_eq!(game.controller().pending_shot(), None);
        game.start();
        game.shoot(Vec2::new(10.0, 10.0));
        assert_eq!(game.controller().pending_shot(), Some(Vec2::new(10.0, 10.0)));
    }

    #[test]
    fn test_handle_key() {
        let mut game = manager();
        assert!(!game.handle_key("x"));
        assert_eq!(game.status(), GameStatus::NewGame);
        assert!(game.handle_key("p"));
        assert_eq!(game.status(), GameStatus::Playing);
        assert!(game.handle_key("P"));
        assert_eq!(game.status(), GameStatus::Paused);
        assert!(game.handle_key("p"));
        assert_eq!(game.status(), GameStatus::Playing);
    }

    #[test]
    fn test_hit_scores() {
        let mut game = manager();
        game.start();
        game.controller_mut().place_target(Vec2::new(200.0, 200.0), 10);
        game.shoot(Vec2::new(200.0, 200.0));
        let report = game.update();
        assert_eq!(report.hits, 1);
        assert_eq!(game.score(), 1);
        assert_eq!(game.lives(), 3);
        assert_eq!(game.controller().targets().len(), 1);
        assert_eq!(game.drain_events(), vec![GameEvent::Started, GameEvent::Hit]);
    }

    #[test]
    fn test_expiry_costs_a_life() {
        let mut game = manager();
        game.start();
        game.controller_mut().place_target(Vec2::new(200.0, 200.0), 1);
        game.update();
        assert_eq!(game.misses(), 1);
        assert_eq!(game.lives(), 2);
        assert_eq!(game.drain_events(), vec![GameEvent::Started, GameEvent::Miss]);
    }

    #[test]
    fn test_last_life_resets_to_game_over() {
        let mut game = manager();
        game.start();
        game.on_hit();
        game.on_hit();
        game.on_miss();
        game.on_miss();
        assert_eq!(game.lives(), 1);
        game.on_miss();

        assert_eq!(game.status(), GameStatus::GameOver);
        assert_eq!(game.score(), 0);
        assert_eq!(game.misses(), 0);
        assert_eq!(game.lives(), 3);
        assert!(game.controller().targets().is_empty());
        assert_eq!(game.last_score(), Some(2));
        assert_eq!(game.best_score(), Some(2));

        let events = game.drain_events();
        assert_eq!(events.last(), Some(&GameEvent::GameOver));
        // Game over replaces the final miss feedback
        assert_eq!(events.iter().filter(|e| **e == GameEvent::Miss).count(), 2);
    }

    #[test]
    fn test_game_over_freezes_until_restart() {
        let mut game = manager();
        game.start();
        for _ in 0..3 {
            game.on_miss();
        }
        assert_eq!(game.status(), GameStatus::GameOver);
        game.update();
        assert!(game.controller().targets().is_empty());
        assert!(game.start());
        game.update();
        assert_eq!(game.controller().targets().len(), 1);
    }

    #[test]
    fn test_pause_halts_countdown() {
        let mut game = manager();
        game.start();
        game.update();
        let before = game.controller().targets()[0].life;
        assert!(game.pause());
        for _ in 0..10 {
            game.update();
        }
        assert_eq!(game.controller().targets()[0].life, before);
        game.start();
        game.update();
        let Lifecycle::Alive(n) = before else {
            panic!("target should be alive");
        };
        assert_eq!(game.controller().targets()[0].life, Lifecycle::Alive(n - 1));
    }
}
