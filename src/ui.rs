//! HUD text
//!
//! [`HudView`] turns the manager's state into display strings; on wasm,
//! [`write_hud`] pushes them into the page.

use crate::sim::{GameManager, GameStatus};

pub const HEART: &str = "\u{2665}";
pub const SKULL: &str = "\u{2620}";

/// Everything the status display shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudView {
    pub status: String,
    pub score: String,
    pub lives: String,
    pub best: String,
}

impl HudView {
    pub fn from_manager(game: &GameManager) -> Self {
        let key = key_label(game.pause_key());
        let status = match game.status() {
            GameStatus::NewGame => format!("Press {key} to start"),
            GameStatus::Playing => "Shoot the targets!".to_string(),
            GameStatus::Paused => format!("Paused - press {key} to resume"),
            GameStatus::GameOver => match game.last_score() {
                Some(score) => format!("Game over! Final score {score}. Press {key} to play again"),
                None => format!("Game over! Press {key} to play again"),
            },
        };

        let lives = if game.status() == GameStatus::GameOver {
            SKULL.to_string()
        } else {
            HEART.repeat(game.lives() as usize)
        };

        let best = game
            .best_score()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());

        Self {
            status,
            score: game.score().to_string(),
            lives,
            best,
        }
    }
}

/// Human-readable name for a `KeyboardEvent.key` value
fn key_label(key: &str) -> String {
    match key {
        " " => "Space".to_string(),
        k if k.chars().count() == 1 => k.to_uppercase(),
        k => k.to_string(),
    }
}

/// Update HUD elements in DOM
#[cfg(target_arch = "wasm32")]
pub fn write_hud(document: &web_sys::Document, view: &HudView) {
    for (id, text) in [
        ("status", &view.status),
        ("score", &view.score),
        ("lives", &view.lives),
        ("best", &view.best),
    ] {
        if let Some(el) = document.get_element_by_id(id) {
            if el.text_content().as_deref() != Some(text.as_str()) {
                el.set_text_content(Some(text.as_str()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    #[test]
    fn test_new_game_view() {
        let game = GameManager::new(&Settings::default(), 1);
        let view = HudView::from_manager(&game);
        assert_eq!(view.status, "Press P to start");
        assert_eq!(view.score, "0");
        assert_eq!(view.lives, HEART.repeat(3));
        assert_eq!(view.best, "-");
    }

    #[test]
    fn test_paused_view_names_key() {
        let settings = Settings {
            pause_key: " ".to_string(),
            ..Default::default()
        };
        let mut game = GameManager::new(&settings, 1);
        game.start();
        game.pause();
        let view = HudView::from_manager(&game);
        assert_eq!(view.status, "Paused - press Space to resume");
    }

    #[test]
    fn test_lives_follow_misses() {
        let mut game = GameManager::new(&Settings::default(), 1);
        game.start();
        game.on_miss();
        assert_eq!(HudView::from_manager(&game).lives, HEART.repeat(2));
    }

    #[test]
    fn test_game_over_view() {
        let mut game = GameManager::new(&Settings::default(), 1);
        game.start();
        game.on_hit();
        for _ in 0..3 {
            game.on_miss();
        }
        let view = HudView::from_manager(&game);
        assert_eq!(view.lives, SKULL);
        assert_eq!(view.score, "0");
        assert_eq!(view.best, "1");
        assert!(view.status.contains("Final score 1"), "{}", view.status);
    }
}
