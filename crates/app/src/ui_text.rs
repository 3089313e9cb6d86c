//! Text formatting for the status bar, battle menu, and run recap.

use crawl_core::{Battle, BattleAction, Game, LogEvent, Player, RunOutcome};

use crate::{format_seed, format_snapshot_hash, reason_code};

pub fn status_bar_text(player: &Player) -> String {
    format!(
        "HP {}/{}   Ammo {}/{}   Crit {}/{}",
        player.health,
        player.max_health,
        player.ammo,
        player.max_ammo,
        player.crit_meter,
        player.crit_meter_max
    )
}

/// Battle menu entries in key order; unavailable actions are bracketed out.
pub fn battle_menu_lines(player: &Player, battle: &Battle) -> Vec<String> {
    let quick = if battle.quickmode() { "on" } else { "off" };
    let mut lines = vec![format!("Q) Quickmode: {quick}")];
    let entries = [
        ("1", "Melee Strike", BattleAction::Melee),
        ("2", "Ranged Strike", BattleAction::Ranged),
        ("3", "Critical Melee", BattleAction::CritMelee),
        ("4", "Critical Ranged", BattleAction::CritRanged),
        ("I", "Inspect Enemy", BattleAction::Inspect),
    ];
    for (key, label, action) in entries {
        if battle.action_available(player, action) {
            lines.push(format!("{key}) {label}"));
        } else {
            lines.push(format!("{key}) [{label}]"));
        }
    }
    lines
}

/// Confirm screen body: the battle's prepared stat text plus the key legend.
pub fn confirm_lines(battle: &Battle) -> Vec<String> {
    let mut lines: Vec<String> = battle.info_lines().to_vec();
    if battle.is_inspecting() {
        lines.push("N = back".to_string());
    } else {
        lines.push("Y = confirm, N = cancel".to_string());
    }
    lines
}

pub fn finished_lines(game: &Game, outcome: RunOutcome) -> Vec<String> {
    let headline = match outcome {
        RunOutcome::Victory => "You escaped the dungeon!",
        RunOutcome::Defeat => "You died in the dark.",
    };
    vec![
        headline.to_string(),
        format!("Reason: {}", reason_code(outcome)),
        format!("Seed: {}", format_seed(game.seed())),
        format!("Snapshot: {}", format_snapshot_hash(game.snapshot_hash())),
        format!("Ticks: {}", game.tick_count()),
    ]
}

pub fn event_log_line(event: &LogEvent) -> String {
    match event {
        LogEvent::AmmoPickedUp => "picked up ammo".to_string(),
        LogEvent::PotionConsumed { healed } => format!("drank a potion (+{healed} hp)"),
        LogEvent::GateReached => "reached the gate".to_string(),
        LogEvent::BattleStarted { enemy } => format!("{enemy} attacks!"),
        LogEvent::BattleWon { enemy } => format!("{enemy} defeated"),
        LogEvent::BattleLost { enemy } => format!("slain by {enemy}"),
    }
}
