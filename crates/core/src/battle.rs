//! Turn-based battle session: a tick-driven state machine alternating player
//! input, confirmation, animated action resolution, and the enemy response.
//!
//! The original blocking shape ("animate until done" loops, one-shot engine
//! timers) is expressed here as synchronization points: the battle names the
//! animation it is waiting on via [`Battle::animation`] and the front end
//! reports completion through [`Battle::animation_finished`]; timed
//! transitions are armed tick counters decremented by [`Battle::tick`].

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::combatant::{Enemy, Player};
use crate::content;
use crate::types::{
    AnimationId, AttackKind, AttackOutcome, BattleAction, BattleError, BattleInput, BattleOutcome,
    BattlePhase, TileId,
};

/// Ticks between a resolved player action and the enemy response (3 s at 60).
pub const ENEMY_RESPONSE_DELAY_TICKS: u32 = 180;
/// Ticks between a death epilogue and the battle resolving (4 s at 60).
pub const EXIT_DELAY_TICKS: u32 = 240;

/// Resolution waiting on its animation to finish before effects apply.
#[derive(Clone, Copy, Debug)]
enum InFlight {
    PlayerAttack { roll: AttackOutcome, kind: AttackKind, forced: bool },
    EnemyAttack { roll: AttackOutcome },
    EnemyDeath,
    PlayerDeath,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TimedEvent {
    EnemyResponse,
    Exit,
}

#[derive(Clone, Copy, Debug)]
struct ArmedTimer {
    remaining: u32,
    event: TimedEvent,
}

pub struct Battle {
    enemy: Enemy,
    /// Collision-index entry this battle was launched from; removed on a win.
    tile: TileId,
    phase: BattlePhase,
    loaded_action: Option<BattleAction>,
    quickmode: bool,
    caption: String,
    info_lines: Vec<String>,
    animation: Option<AnimationId>,
    in_flight: Option<InFlight>,
    timer: Option<ArmedTimer>,
    outcome: Option<BattleOutcome>,
}

impl Battle {
    pub fn new(enemy: Enemy, tile: TileId) -> Self {
        let caption = format!("A battle has begun against {}", enemy.name);
        Self {
            enemy,
            tile,
            phase: BattlePhase::GetInput,
            loaded_action: None,
            quickmode: false,
            caption,
            info_lines: Vec::new(),
            animation: None,
            in_flight: None,
            timer: None,
            outcome: None,
        }
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn enemy(&self) -> &Enemy {
        &self.enemy
    }

    #[cfg(test)]
    pub(crate) fn enemy_mut(&mut self) -> &mut Enemy {
        &mut self.enemy
    }

    pub fn tile(&self) -> TileId {
        self.tile
    }

    pub fn quickmode(&self) -> bool {
        self.quickmode
    }

    /// Caption describing the last resolved action, for the UI to display
    /// verbatim.
    pub fn caption(&self) -> &str {
        &self.caption
    }

    /// Stat text prepared for the confirm/inspect screen.
    pub fn info_lines(&self) -> &[String] {
        &self.info_lines
    }

    /// True while the confirm screen is showing enemy info rather than a
    /// pending attack.
    pub fn is_inspecting(&self) -> bool {
        self.phase == BattlePhase::ConfirmAction && self.loaded_action == Some(BattleAction::Inspect)
    }

    /// Animation the battle is currently waiting on, if any. The front end
    /// plays it and calls [`Battle::animation_finished`].
    pub fn animation(&self) -> Option<AnimationId> {
        self.animation
    }

    /// Set once the exit timer fires in the `Final` phase.
    pub fn outcome(&self) -> Option<BattleOutcome> {
        self.outcome
    }

    /// Whether `action` can currently be selected from the input menu.
    pub fn action_available(&self, player: &Player, action: BattleAction) -> bool {
        match action {
            BattleAction::ToggleQuickmode | BattleAction::Melee | BattleAction::Inspect => true,
            BattleAction::Ranged => player.has_ammo(),
            BattleAction::CritMelee => player.crit_meter_full(),
            BattleAction::CritRanged => player.has_ammo() && player.crit_meter_full(),
        }
    }

    pub fn apply_input(
        &mut self,
        player: &mut Player,
        rng: &mut ChaCha8Rng,
        input: BattleInput,
    ) -> Result<(), BattleError> {
        match (self.phase, input) {
            (BattlePhase::GetInput, BattleInput::Select(action)) => {
                self.select_action(player, rng, action)
            }
            (BattlePhase::ConfirmAction, BattleInput::Accept) => {
                let Some(action) = self.loaded_action else {
                    return Err(BattleError::InputNotAccepted);
                };
                if action == BattleAction::Inspect {
                    // The info screen has nothing to execute; only dismissal leaves it.
                    return Err(BattleError::InputNotAccepted);
                }
                self.begin_player_attack(player, rng, action);
                Ok(())
            }
            (BattlePhase::ConfirmAction, BattleInput::Deny) => {
                self.loaded_action = None;
                self.info_lines.clear();
                self.phase = BattlePhase::GetInput;
                Ok(())
            }
            _ => Err(BattleError::InputNotAccepted),
        }
    }

    fn select_action(
        &mut self,
        player: &mut Player,
        rng: &mut ChaCha8Rng,
        action: BattleAction,
    ) -> Result<(), BattleError> {
        if !self.action_available(player, action) {
            return Err(BattleError::ActionUnavailable);
        }
        match action {
            BattleAction::ToggleQuickmode => {
                self.quickmode = !self.quickmode;
                Ok(())
            }
            BattleAction::Inspect => {
                self.loaded_action = Some(action);
                self.info_lines = inspect_lines(&self.enemy, rng);
                self.phase = BattlePhase::ConfirmAction;
                Ok(())
            }
            attack => {
                if self.quickmode {
                    self.begin_player_attack(player, rng, attack);
                } else {
                    self.loaded_action = Some(attack);
                    self.info_lines = action_info_lines(player, attack);
                    self.phase = BattlePhase::ConfirmAction;
                }
                Ok(())
            }
        }
    }

    fn begin_player_attack(&mut self, player: &Player, rng: &mut ChaCha8Rng, action: BattleAction) {
        let (kind, forced) = match action {
            BattleAction::Melee => (AttackKind::Melee, false),
            BattleAction::Ranged => (AttackKind::Ranged, false),
            BattleAction::CritMelee => (AttackKind::Melee, true),
            BattleAction::CritRanged => (AttackKind::Ranged, true),
            BattleAction::ToggleQuickmode | BattleAction::Inspect => unreachable!(),
        };
        let roll = player.resolve_attack(kind, rng, forced);

        self.loaded_action = None;
        self.info_lines.clear();
        self.phase = BattlePhase::ResolveAction;
        self.in_flight = Some(InFlight::PlayerAttack { roll, kind, forced });
        self.animation = Some(match (kind, roll.critical) {
            (AttackKind::Melee, false) => AnimationId::PlayerMelee,
            (AttackKind::Melee, true) => AnimationId::PlayerCritMelee,
            (AttackKind::Ranged, false) => AnimationId::PlayerRanged,
            (AttackKind::Ranged, true) => AnimationId::PlayerCritRanged,
        });
    }

    /// Advances the armed timer by one tick, firing the enemy response or the
    /// final exit when it reaches zero.
    pub fn tick(&mut self, player: &Player, rng: &mut ChaCha8Rng) {
        let Some(timer) = self.timer.as_mut() else {
            return;
        };
        timer.remaining -= 1;
        if timer.remaining > 0 {
            return;
        }
        let event = timer.event;
        self.timer = None;
        match event {
            TimedEvent::EnemyResponse => {
                let roll = self.enemy.resolve_attack(rng);
                self.phase = BattlePhase::ResolveResponse;
                self.in_flight = Some(InFlight::EnemyAttack { roll });
                self.animation = Some(if roll.critical {
                    AnimationId::EnemyCritMelee
                } else {
                    AnimationId::EnemyMelee
                });
            }
            TimedEvent::Exit => {
                self.outcome =
                    Some(if player.is_dead() { BattleOutcome::Lost } else { BattleOutcome::Won });
            }
        }
    }

    /// Completion callback for the animation named by [`Battle::animation`]:
    /// applies the in-flight resolution's effects and enters the next phase.
    pub fn animation_finished(&mut self, player: &mut Player) {
        self.animation = None;
        match self.in_flight.take() {
            Some(InFlight::PlayerAttack { roll, kind, forced }) => {
                self.enemy.take_damage(roll.damage);
                if forced {
                    player.empty_crit_meter();
                } else {
                    // Fills even on a miss; the meter tracks attempts, not hits.
                    player.increment_crit_meter();
                }
                if kind == AttackKind::Ranged {
                    player.use_ammo();
                }
                self.caption = player_attack_caption(player, &self.enemy, roll);

                if self.enemy.is_dead() {
                    self.in_flight = Some(InFlight::EnemyDeath);
                    self.animation = Some(AnimationId::EnemyDeath);
                } else {
                    self.phase = BattlePhase::Downtime;
                    self.timer = Some(ArmedTimer {
                        remaining: ENEMY_RESPONSE_DELAY_TICKS,
                        event: TimedEvent::EnemyResponse,
                    });
                }
            }
            Some(InFlight::EnemyAttack { roll }) => {
                player.take_damage(roll.damage);
                self.caption = enemy_attack_caption(player, &self.enemy, roll);

                if player.is_dead() {
                    self.in_flight = Some(InFlight::PlayerDeath);
                    self.animation = Some(AnimationId::PlayerDeath);
                } else {
                    self.phase = BattlePhase::GetInput;
                }
            }
            Some(InFlight::EnemyDeath) => {
                self.caption =
                    format!("{} has been slain by {}!", self.enemy.name, player.display_name());
                self.phase = BattlePhase::Final;
                self.timer = Some(ArmedTimer { remaining: EXIT_DELAY_TICKS, event: TimedEvent::Exit });
            }
            Some(InFlight::PlayerDeath) => {
                self.caption =
                    format!("{} has been slain by {}!", player.display_name(), self.enemy.name);
                self.phase = BattlePhase::Final;
                self.timer = Some(ArmedTimer { remaining: EXIT_DELAY_TICKS, event: TimedEvent::Exit });
            }
            None => {}
        }
    }
}

fn player_attack_caption(player: &Player, enemy: &Enemy, roll: AttackOutcome) -> String {
    if roll.missed {
        format!("{}'s attack MISSED!", player.display_name())
    } else if roll.critical {
        format!(
            "{} dealt a Critical Strike to {} for {} damage!",
            player.display_name(),
            enemy.name,
            roll.damage
        )
    } else {
        format!("{} hit {} for {} damage!", player.display_name(), enemy.name, roll.damage)
    }
}

fn enemy_attack_caption(player: &Player, enemy: &Enemy, roll: AttackOutcome) -> String {
    if roll.critical {
        format!(
            "{} dealt a Critical Strike to {} for {} damage!",
            enemy.name,
            player.display_name(),
            roll.damage
        )
    } else {
        format!("{} hit {} for {} damage!", enemy.name, player.display_name(), roll.damage)
    }
}

/// Stat text shown on the confirm screen for a loaded attack.
pub fn action_info_lines(player: &Player, action: BattleAction) -> Vec<String> {
    match action {
        BattleAction::Melee => vec![
            "You are about to attack with a Melee Strike.".to_string(),
            format!(
                "This attack deals {} standard damage, and {} crit damage.",
                player.melee_damage,
                player.melee_damage * player.melee_crit_multiplier
            ),
            format!("Your base melee critical chance is {}", player.melee_crit_chance),
        ],
        BattleAction::Ranged => vec![
            "You are about to attack with a Ranged Strike.".to_string(),
            format!("This attack has {}% chance to miss and deal 0 damage!", 100 - player.aim),
            format!(
                "This attack deals {} standard damage, and {} crit damage.",
                player.ranged_damage,
                player.ranged_damage * player.ranged_crit_multiplier
            ),
            format!("Your base ranged critical chance is {}", player.ranged_crit_chance),
        ],
        BattleAction::CritMelee => vec![
            "You are about to cast a Critical Melee Strike.".to_string(),
            format!(
                "This attack will empty your critical meter and deal {} damage.",
                player.melee_damage * player.melee_crit_multiplier
            ),
            format!("Note: Your base melee critical chance is {}", player.melee_crit_chance),
        ],
        BattleAction::CritRanged => vec![
            "You are about to cast a Critical Ranged Strike.".to_string(),
            format!(
                "This attack will empty your critical meter and deal {} damage.",
                player.ranged_damage * player.ranged_crit_multiplier
            ),
            "This attack cannot miss.".to_string(),
            format!("Note: Your base ranged critical chance is {}", player.ranged_crit_chance),
        ],
        BattleAction::ToggleQuickmode | BattleAction::Inspect => Vec::new(),
    }
}

/// Enemy stat sheet for the inspect screen, led by a randomized flavor line.
pub fn inspect_lines(enemy: &Enemy, rng: &mut ChaCha8Rng) -> Vec<String> {
    let flavor = content::INSPECT_LINES[rng.random_range(0..content::INSPECT_LINES.len())];
    vec![
        flavor.replace("{}", &enemy.name),
        format!("Max Health: {}", enemy.max_health),
        format!(
            "Melee Damage: {} / Critical Melee Damage: {}",
            enemy.damage,
            enemy.damage * enemy.crit_multiplier
        ),
        format!("Critical Strike Chance: {}", enemy.crit_chance),
    ]
}
