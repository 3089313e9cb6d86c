//! Combat stats and attack resolution for the player and battle enemies.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::content;
use crate::types::{AttackKind, AttackOutcome};

#[derive(Clone, Debug)]
pub struct Player {
    pub name: String,
    pub title: String,
    pub max_health: i32,
    pub health: i32,
    pub max_ammo: i32,
    pub ammo: i32,
    pub melee_damage: i32,
    pub ranged_damage: i32,
    /// Hit chance of a ranged attack, percent in [0, 100].
    pub aim: i32,
    pub melee_crit_chance: i32,
    pub ranged_crit_chance: i32,
    pub melee_crit_multiplier: i32,
    pub ranged_crit_multiplier: i32,
    pub crit_meter: i32,
    pub crit_meter_max: i32,
}

impl Player {
    pub fn new(name: &str, title: &str) -> Self {
        let stats = &content::DEFAULT_PLAYER;
        Self {
            name: name.to_string(),
            title: title.to_string(),
            max_health: stats.health,
            health: stats.health,
            max_ammo: stats.ammo,
            ammo: stats.ammo,
            melee_damage: stats.melee_damage,
            ranged_damage: stats.ranged_damage,
            aim: stats.aim,
            melee_crit_chance: stats.melee_crit_chance,
            ranged_crit_chance: stats.ranged_crit_chance,
            melee_crit_multiplier: stats.melee_crit_multiplier,
            ranged_crit_multiplier: stats.ranged_crit_multiplier,
            crit_meter: 0,
            crit_meter_max: stats.crit_meter_max,
        }
    }

    /// Name with the quoted title, as shown in captions.
    pub fn display_name(&self) -> String {
        format!("{} '{}'", self.name, self.title)
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.health = (self.health - amount).max(0);
    }

    pub fn take_healing(&mut self, amount: i32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    pub fn has_ammo(&self) -> bool {
        self.ammo > 0
    }

    pub fn add_ammo(&mut self, amount: i32) {
        self.ammo = (self.ammo + amount).min(self.max_ammo);
    }

    /// Spends one round; silently no-ops at zero.
    pub fn use_ammo(&mut self) {
        if self.ammo > 0 {
            self.ammo -= 1;
        }
    }

    pub fn crit_meter_full(&self) -> bool {
        self.crit_meter == self.crit_meter_max
    }

    pub fn increment_crit_meter(&mut self) {
        if self.crit_meter < self.crit_meter_max {
            self.crit_meter += 1;
        }
    }

    pub fn empty_crit_meter(&mut self) {
        self.crit_meter = 0;
    }

    /// Rolls one attack. Ranged attacks check accuracy first; a miss deals 0
    /// damage. `force_crit` skips both the accuracy and the crit roll and
    /// always lands a critical.
    pub fn resolve_attack(
        &self,
        kind: AttackKind,
        rng: &mut ChaCha8Rng,
        force_crit: bool,
    ) -> AttackOutcome {
        if kind == AttackKind::Ranged && !force_crit && rng.random_range(0..100) >= self.aim {
            return AttackOutcome { damage: 0, critical: false, missed: true };
        }

        let (base, chance, multiplier) = match kind {
            AttackKind::Melee => {
                (self.melee_damage, self.melee_crit_chance, self.melee_crit_multiplier)
            }
            AttackKind::Ranged => {
                (self.ranged_damage, self.ranged_crit_chance, self.ranged_crit_multiplier)
            }
        };

        if force_crit || rng.random_range(0..100) < chance {
            AttackOutcome { damage: base * multiplier, critical: true, missed: false }
        } else {
            AttackOutcome { damage: base, critical: false, missed: false }
        }
    }
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub name: String,
    pub max_health: i32,
    pub health: i32,
    pub damage: i32,
    pub crit_chance: i32,
    pub crit_multiplier: i32,
}

impl Enemy {
    pub fn new(name: &str, health: i32, damage: i32, crit_chance: i32) -> Self {
        Self {
            name: name.to_string(),
            max_health: health,
            health,
            damage,
            crit_chance,
            crit_multiplier: content::ENEMY_RANGES.crit_multiplier,
        }
    }

    /// Fresh enemy with stats drawn from the content ranges, one per encounter.
    pub fn randomized(rng: &mut ChaCha8Rng) -> Self {
        let ranges = &content::ENEMY_RANGES;
        let name = content::ENEMY_NAMES[rng.random_range(0..content::ENEMY_NAMES.len())];
        Self::new(
            name,
            rng.random_range(ranges.health.clone()),
            rng.random_range(ranges.damage.clone()),
            rng.random_range(ranges.crit_chance.clone()),
        )
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.health = (self.health - amount).max(0);
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    /// Enemies only melee and never miss.
    pub fn resolve_attack(&self, rng: &mut ChaCha8Rng) -> AttackOutcome {
        if rng.random_range(0..100) < self.crit_chance {
            AttackOutcome { damage: self.damage * self.crit_multiplier, critical: true, missed: false }
        } else {
            AttackOutcome { damage: self.damage, critical: false, missed: false }
        }
    }
}
