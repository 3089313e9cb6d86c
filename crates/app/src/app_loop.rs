use crawl_core::{BattleAction, BattleInput, BattlePhase, Game, MoveIntent, RunOutcome};
use macroquad::prelude::KeyCode;

use crate::animation::AnimationPlayer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppMode {
    #[default]
    Playing,
    Finished(RunOutcome),
}

#[derive(Default)]
pub struct AppState {
    pub mode: AppMode,
    /// Battle animation currently playing, if any. Owned here because the
    /// simulation only names animations; the app owns the frame clock.
    animation: Option<AnimationPlayer>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn animation(&self) -> Option<&AnimationPlayer> {
        self.animation.as_ref()
    }

    /// Process input and logic for a single frame. Key presses arrive as a
    /// slice so tests can drive frames without a window.
    pub fn tick(&mut self, game: &mut Game, keys_pressed: &[KeyCode], intent: MoveIntent) {
        if matches!(self.mode, AppMode::Finished(_)) {
            return;
        }

        if game.battle().is_some() {
            self.drive_battle(game, keys_pressed);
        }
        game.tick(intent);

        if let Some(outcome) = game.outcome() {
            self.animation = None;
            self.mode = AppMode::Finished(outcome);
        }
    }

    fn drive_battle(&mut self, game: &mut Game, keys_pressed: &[KeyCode]) {
        if let Some(player) = self.animation.as_mut() {
            if player.advance() {
                self.animation = None;
                let _ = game.battle_animation_finished();
            }
            return;
        }
        let Some(battle) = game.battle() else {
            return;
        };
        if let Some(id) = battle.animation() {
            self.animation = Some(AnimationPlayer::new(id));
            return;
        }

        match battle.phase() {
            BattlePhase::GetInput => {
                if let Some(action) = selected_action(keys_pressed) {
                    let _ = game.battle_input(BattleInput::Select(action));
                }
            }
            BattlePhase::ConfirmAction => {
                if keys_pressed.contains(&KeyCode::Y) {
                    let _ = game.battle_input(BattleInput::Accept);
                } else if keys_pressed.contains(&KeyCode::N) {
                    let _ = game.battle_input(BattleInput::Deny);
                }
            }
            _ => {}
        }
    }
}

fn selected_action(keys_pressed: &[KeyCode]) -> Option<BattleAction> {
    for key in keys_pressed {
        let action = match key {
            KeyCode::Key1 => BattleAction::Melee,
            KeyCode::Key2 => BattleAction::Ranged,
            KeyCode::Key3 => BattleAction::CritMelee,
            KeyCode::Key4 => BattleAction::CritRanged,
            KeyCode::Q => BattleAction::ToggleQuickmode,
            KeyCode::I => BattleAction::Inspect,
            _ => continue,
        };
        return Some(action);
    }
    None
}
