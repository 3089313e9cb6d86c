//! Hardcoded gameplay content: baseline stats, randomization ranges, and
//! flavor text.

use std::ops::RangeInclusive;

/// Health restored by one potion tile.
pub const POTION_HEAL: i32 = 20;

/// Ammo granted by one ammo tile.
pub const AMMO_PICKUP: i32 = 1;

pub struct PlayerStats {
    pub name: &'static str,
    pub title: &'static str,
    pub health: i32,
    pub melee_damage: i32,
    pub ranged_damage: i32,
    pub aim: i32,
    pub ammo: i32,
    pub melee_crit_chance: i32,
    pub ranged_crit_chance: i32,
    pub melee_crit_multiplier: i32,
    pub ranged_crit_multiplier: i32,
    pub crit_meter_max: i32,
}

pub const DEFAULT_PLAYER: PlayerStats = PlayerStats {
    name: "Jimmy",
    title: "The Spelunker",
    health: 100,
    melee_damage: 18,
    ranged_damage: 25,
    aim: 80,
    ammo: 5,
    melee_crit_chance: 35,
    ranged_crit_chance: 25,
    melee_crit_multiplier: 2,
    ranged_crit_multiplier: 3,
    crit_meter_max: 5,
};

pub struct EnemyRanges {
    pub health: RangeInclusive<i32>,
    pub damage: RangeInclusive<i32>,
    pub crit_chance: RangeInclusive<i32>,
    pub crit_multiplier: i32,
}

pub const ENEMY_RANGES: EnemyRanges =
    EnemyRanges { health: 50..=100, damage: 7..=14, crit_chance: 20..=30, crit_multiplier: 2 };

pub const ENEMY_NAMES: [&str; 21] = [
    "The Gman",
    "RK900",
    "David Wallace",
    "Elder Maxon",
    "Exodia",
    "Admiral Kotch",
    "Lord Baelish",
    "Tyler Blevins",
    "He Bo",
    "Ricardo",
    "Negan",
    "Vaas Montenegro",
    "Tywin Lannister",
    "King Eredin",
    "Thanos",
    "Epic Games Representative",
    "Tod Howard",
    "Howard the Alien",
    "SCREAAAAAAAAAAAM",
    "bitconnect",
    "Emhyr var Emreis",
];

/// Flavor openers for the inspect screen; `{}` is replaced by the enemy name.
pub const INSPECT_LINES: [&str; 6] = [
    "Fear thee, for you are facing {}!",
    "Beware, for your every move is anticipated by {}!",
    "You should've chosen another path, because now you face {}!",
    "Will you let your will be crushed by {}!?",
    "Wow, you stare in {}'s eyes and yet you do not tremble!",
    "As you inspect {}, they inspect you. I can feel the tension!",
];
