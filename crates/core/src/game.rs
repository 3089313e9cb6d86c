//! Top-level engine facade: owns the dungeon, the player, and the optional
//! battle session, and advances everything one fixed tick at a time.

use std::hash::Hasher;

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;
use xxhash_rust::xxh3::Xxh3;

use crate::battle::Battle;
use crate::combatant::{Enemy, Player};
use crate::content;
use crate::dungeon::Dungeon;
use crate::mapfile::MapFile;
use crate::types::{
    BattleError, BattleInput, BattleOutcome, LogEvent, MoveIntent, Rect, RunOutcome, TileCategory,
};

pub struct Game {
    seed: u64,
    tick: u64,
    rng: ChaCha8Rng,
    player: Player,
    player_box: Rect,
    dungeon: Dungeon,
    battle: Option<Battle>,
    outcome: Option<RunOutcome>,
    log: Vec<LogEvent>,
}

impl Game {
    pub fn new(seed: u64, map: &MapFile) -> Self {
        let stats = &content::DEFAULT_PLAYER;
        let dungeon = Dungeon::from_map(map);
        let player_box = dungeon.spawn_hitbox();
        Self {
            seed,
            tick: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
            player: Player::new(stats.name, stats.title),
            player_box,
            dungeon,
            battle: None,
            outcome: None,
            log: Vec::new(),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_box(&self) -> Rect {
        self.player_box
    }

    pub fn dungeon(&self) -> &Dungeon {
        &self.dungeon
    }

    pub fn battle(&self) -> Option<&Battle> {
        self.battle.as_ref()
    }

    /// Set once the run ends; no further ticks change state after that.
    pub fn outcome(&self) -> Option<RunOutcome> {
        self.outcome
    }

    pub fn log(&self) -> &[LogEvent] {
        &self.log
    }

    /// Advances the simulation by one fixed tick. During exploration the
    /// intent moves the player and touched tiles are dispatched; during a
    /// battle only the battle's timers run.
    pub fn tick(&mut self, intent: MoveIntent) {
        if self.outcome.is_some() {
            return;
        }
        self.tick += 1;

        if let Some(battle) = self.battle.as_mut() {
            battle.tick(&self.player, &mut self.rng);
            if battle.outcome().is_some() {
                self.settle_battle();
            }
            return;
        }

        self.dungeon.try_move(&mut self.player_box, intent);
        self.dispatch_interactions();
    }

    /// Resolves every interactable tile the player currently overlaps. The
    /// touched set is materialized up front so removals cannot skip entries;
    /// processing stops early once a battle starts or the run ends.
    fn dispatch_interactions(&mut self) {
        let touched = self.dungeon.index().find_interactions(self.player_box);
        for (id, category) in touched {
            match category {
                TileCategory::Ammo => {
                    if self.player.ammo < self.player.max_ammo {
                        self.dungeon.index_mut().remove(id);
                        self.player.add_ammo(content::AMMO_PICKUP);
                        self.log.push(LogEvent::AmmoPickedUp);
                    }
                }
                TileCategory::Potions => {
                    if self.player.health < self.player.max_health {
                        self.dungeon.index_mut().remove(id);
                        let before = self.player.health;
                        self.player.take_healing(content::POTION_HEAL);
                        self.log
                            .push(LogEvent::PotionConsumed { healed: self.player.health - before });
                    }
                }
                TileCategory::Gates => {
                    self.log.push(LogEvent::GateReached);
                    self.outcome = Some(RunOutcome::Victory);
                    return;
                }
                TileCategory::Enemies => {
                    let enemy = Enemy::randomized(&mut self.rng);
                    self.log.push(LogEvent::BattleStarted { enemy: enemy.name.clone() });
                    self.battle = Some(Battle::new(enemy, id));
                    return;
                }
                TileCategory::Blocks => {}
            }
        }
    }

    /// Forwards a battle input to the active session.
    pub fn battle_input(&mut self, input: BattleInput) -> Result<(), BattleError> {
        let Some(battle) = self.battle.as_mut() else {
            return Err(BattleError::NoActiveBattle);
        };
        battle.apply_input(&mut self.player, &mut self.rng, input)
    }

    /// Front-end callback once the battle's named animation has played out.
    pub fn battle_animation_finished(&mut self) -> Result<(), BattleError> {
        let Some(battle) = self.battle.as_mut() else {
            return Err(BattleError::NoActiveBattle);
        };
        battle.animation_finished(&mut self.player);
        Ok(())
    }

    fn settle_battle(&mut self) {
        let Some(battle) = self.battle.take() else {
            return;
        };
        match battle.outcome() {
            Some(BattleOutcome::Won) => {
                self.dungeon.index_mut().remove(battle.tile());
                self.log.push(LogEvent::BattleWon { enemy: battle.enemy().name.clone() });
            }
            Some(BattleOutcome::Lost) => {
                self.log.push(LogEvent::BattleLost { enemy: battle.enemy().name.clone() });
                self.outcome = Some(RunOutcome::Defeat);
            }
            None => {}
        }
    }

    /// Order-sensitive digest of the simulation state, for determinism checks.
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u64(self.tick);
        hasher.write_i32(self.player_box.x);
        hasher.write_i32(self.player_box.y);
        hasher.write_i32(self.player.health);
        hasher.write_i32(self.player.ammo);
        hasher.write_i32(self.player.crit_meter);
        hasher.write_u8(match self.outcome {
            None => 0,
            Some(RunOutcome::Victory) => 1,
            Some(RunOutcome::Defeat) => 2,
        });
        for category in [
            TileCategory::Enemies,
            TileCategory::Potions,
            TileCategory::Ammo,
            TileCategory::Gates,
        ] {
            hasher.write_usize(self.dungeon.index().count(category));
        }
        if let Some(battle) = &self.battle {
            hasher.write_u8(1);
            hasher.write_i32(battle.enemy().health);
            hasher.write(battle.caption().as_bytes());
        } else {
            hasher.write_u8(0);
        }
        hasher.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BattleAction, BattlePhase};

    const MAP: &str = "dimensions=3x4\ncolor=10,10,10\nplayer=0,0\n A P\n    \nE  G\n";

    fn intent_right() -> MoveIntent {
        MoveIntent { right: true, ..MoveIntent::default() }
    }

    fn intent_down() -> MoveIntent {
        MoveIntent { down: true, ..MoveIntent::default() }
    }

    fn game() -> Game {
        let map = MapFile::parse(MAP).expect("map parses");
        Game::new(7, &map)
    }

    #[test]
    fn ticks_do_not_advance_after_the_run_ends() {
        let mut game = game();
        // Walk right into the ammo tile's column, then force victory by hand.
        game.tick(intent_right());
        let before = game.tick_count();
        game.outcome = Some(RunOutcome::Victory);
        game.tick(intent_right());
        assert_eq!(game.tick_count(), before);
    }

    #[test]
    fn ammo_tile_is_consumed_once_and_skipped_at_cap() {
        let mut game = game();
        game.player.ammo = game.player.max_ammo;
        // 10 ticks at 5 px/tick reach x=50, overlapping the ammo tile.
        for _ in 0..10 {
            game.tick(intent_right());
        }
        assert_eq!(game.dungeon().index().count(TileCategory::Ammo), 1);
        assert!(game.log().is_empty());

        game.player.ammo = 2;
        game.tick(MoveIntent::default());
        assert_eq!(game.player().ammo, 3);
        assert_eq!(game.dungeon().index().count(TileCategory::Ammo), 0);
        assert_eq!(game.log(), &[LogEvent::AmmoPickedUp]);
    }

    #[test]
    fn potion_heals_only_a_wounded_player() {
        const MAP_POTION: &str = "dimensions=1x2\ncolor=0,0,0\nplayer=0,0\n P\n";
        let map = MapFile::parse(MAP_POTION).expect("map parses");
        let mut game = Game::new(1, &map);
        for _ in 0..10 {
            game.tick(intent_right());
        }
        assert_eq!(game.dungeon().index().count(TileCategory::Potions), 1);

        game.player.health = 95;
        game.tick(MoveIntent::default());
        // Heal clamps at max even though the potion is worth 20.
        assert_eq!(game.player().health, 100);
        assert_eq!(game.log(), &[LogEvent::PotionConsumed { healed: 5 }]);
        assert_eq!(game.dungeon().index().count(TileCategory::Potions), 0);
    }

    #[test]
    fn touching_an_enemy_starts_a_battle_and_freezes_movement() {
        let mut game = game();
        for _ in 0..11 {
            game.tick(intent_down());
        }
        assert!(game.battle().is_some());
        assert_eq!(game.log().len(), 1);
        assert!(matches!(game.log()[0], LogEvent::BattleStarted { .. }));

        let frozen = game.player_box();
        game.tick(intent_down());
        assert_eq!(game.player_box(), frozen);
    }

    #[test]
    fn winning_a_battle_removes_the_enemy_tile() {
        let mut game = game();
        for _ in 0..11 {
            game.tick(intent_down());
        }
        assert_eq!(game.dungeon().index().count(TileCategory::Enemies), 1);

        // Script the fight so a single melee swing is lethal.
        game.player.aim = 100;
        game.player.melee_crit_chance = 0;
        if let Some(battle) = game.battle.as_mut() {
            battle.enemy_mut().health = 10;
        }
        game.battle_input(BattleInput::Select(BattleAction::Melee)).expect("select");
        game.battle_input(BattleInput::Accept).expect("accept");
        game.battle_animation_finished().expect("attack lands");
        game.battle_animation_finished().expect("death epilogue");
        assert_eq!(game.battle().map(Battle::phase), Some(BattlePhase::Final));

        for _ in 0..crate::battle::EXIT_DELAY_TICKS {
            game.tick(MoveIntent::default());
        }
        assert!(game.battle().is_none());
        assert_eq!(game.dungeon().index().count(TileCategory::Enemies), 0);
        assert_eq!(game.outcome(), None);
        assert!(matches!(game.log().last(), Some(LogEvent::BattleWon { .. })));
    }

    #[test]
    fn losing_a_battle_ends_the_run_in_defeat() {
        let mut game = game();
        for _ in 0..11 {
            game.tick(intent_down());
        }
        game.player.health = 1;
        game.player.aim = 100;
        game.player.melee_crit_chance = 0;
        if let Some(battle) = game.battle.as_mut() {
            battle.enemy_mut().health = 1000;
        }
        game.battle_input(BattleInput::Select(BattleAction::Melee)).expect("select");
        game.battle_input(BattleInput::Accept).expect("accept");
        game.battle_animation_finished().expect("attack lands");
        for _ in 0..crate::battle::ENEMY_RESPONSE_DELAY_TICKS {
            game.tick(MoveIntent::default());
        }
        game.battle_animation_finished().expect("enemy attack lands");
        game.battle_animation_finished().expect("death epilogue");
        for _ in 0..crate::battle::EXIT_DELAY_TICKS {
            game.tick(MoveIntent::default());
        }
        assert_eq!(game.outcome(), Some(RunOutcome::Defeat));
        assert!(game.battle().is_none());
    }

    #[test]
    fn battle_input_without_a_battle_is_an_error() {
        let mut game = game();
        assert_eq!(
            game.battle_input(BattleInput::Accept),
            Err(BattleError::NoActiveBattle),
        );
        assert_eq!(game.battle_animation_finished(), Err(BattleError::NoActiveBattle));
    }

    #[test]
    fn snapshot_hash_tracks_state_changes() {
        let mut game = game();
        let initial = game.snapshot_hash();
        game.tick(intent_right());
        assert_ne!(game.snapshot_hash(), initial);
    }
}
