//! Rendering for the dungeon view, the battle screen, and the run recap.

use crawl_core::{BattlePhase, Game, RunOutcome, TileCategory};
use macroquad::prelude::*;

use crate::app_loop::{AppMode, AppState};
use crate::ui_text::{
    battle_menu_lines, confirm_lines, event_log_line, finished_lines, status_bar_text,
};

const STATUS_FONT_SIZE: f32 = 24.0;
const BODY_FONT_SIZE: f32 = 22.0;
const LINE_STEP: f32 = 26.0;
const TEXT_PAD_X: f32 = 12.0;

const BLOCK_COLOR: Color = Color { r: 0.45, g: 0.45, b: 0.45, a: 1.0 };
const ENEMY_COLOR: Color = Color { r: 0.8, g: 0.15, b: 0.15, a: 1.0 };
const POTION_COLOR: Color = Color { r: 0.15, g: 0.7, b: 0.25, a: 1.0 };
const AMMO_COLOR: Color = Color { r: 0.85, g: 0.75, b: 0.2, a: 1.0 };
const GATE_COLOR: Color = Color { r: 0.9, g: 0.6, b: 0.1, a: 1.0 };
const PLAYER_COLOR: Color = Color { r: 0.2, g: 0.4, b: 0.9, a: 1.0 };

pub fn draw_frame(game: &Game, app_state: &AppState) {
    match app_state.mode {
        AppMode::Finished(outcome) => draw_finished_screen(game, outcome),
        AppMode::Playing => {
            if game.battle().is_some() {
                draw_battle_screen(game, app_state);
            } else {
                draw_dungeon(game);
            }
        }
    }
}

fn tile_fill(category: TileCategory) -> Color {
    match category {
        TileCategory::Blocks => BLOCK_COLOR,
        TileCategory::Enemies => ENEMY_COLOR,
        TileCategory::Potions => POTION_COLOR,
        TileCategory::Ammo => AMMO_COLOR,
        TileCategory::Gates => GATE_COLOR,
    }
}

fn draw_dungeon(game: &Game) {
    let (r, g, b) = game.dungeon().background_color();
    clear_background(Color::from_rgba(r, g, b, 255));

    let index = game.dungeon().index();
    for rect in index.blocks() {
        draw_rect(*rect, BLOCK_COLOR);
    }
    for (_, entry) in index.entries() {
        draw_rect(entry.rect, tile_fill(entry.category));
    }
    draw_rect(game.player_box(), PLAYER_COLOR);

    draw_status_bar(game);

    if let Some(event) = game.log().last() {
        let (_, height) = game.dungeon().window_size_px();
        draw_text(&event_log_line(event), TEXT_PAD_X, height as f32 - 8.0, 18.0, LIGHTGRAY);
    }
}

fn draw_status_bar(game: &Game) {
    let bar_height = game.dungeon().layout().top_bar as f32;
    draw_rectangle(0.0, 0.0, screen_width(), bar_height, BLACK);
    draw_text(
        &status_bar_text(game.player()),
        TEXT_PAD_X,
        bar_height - 12.0,
        STATUS_FONT_SIZE,
        WHITE,
    );
}

fn draw_battle_screen(game: &Game, app_state: &AppState) {
    clear_background(Color { r: 0.08, g: 0.06, b: 0.1, a: 1.0 });
    let Some(battle) = game.battle() else {
        return;
    };

    draw_status_bar(game);
    let mut text_y = game.dungeon().layout().top_bar as f32 + 40.0;

    let enemy = battle.enemy();
    draw_text(
        &format!("{}  ({}/{} hp)", enemy.name, enemy.health, enemy.max_health),
        TEXT_PAD_X,
        text_y,
        BODY_FONT_SIZE,
        ENEMY_COLOR,
    );
    text_y += LINE_STEP * 1.5;

    draw_text(battle.caption(), TEXT_PAD_X, text_y, BODY_FONT_SIZE, WHITE);
    text_y += LINE_STEP * 1.5;

    if let Some(player) = app_state.animation() {
        let width = (screen_width() - 2.0 * TEXT_PAD_X) * player.progress();
        draw_rectangle(TEXT_PAD_X, text_y, width, 8.0, GATE_COLOR);
        return;
    }

    let lines = match battle.phase() {
        BattlePhase::GetInput => battle_menu_lines(game.player(), battle),
        BattlePhase::ConfirmAction => confirm_lines(battle),
        _ => Vec::new(),
    };
    for line in lines {
        draw_text(&line, TEXT_PAD_X, text_y, BODY_FONT_SIZE, LIGHTGRAY);
        text_y += LINE_STEP;
    }
}

fn draw_finished_screen(game: &Game, outcome: RunOutcome) {
    clear_background(BLACK);
    let mut text_y = 80.0;
    for line in finished_lines(game, outcome) {
        draw_text(&line, TEXT_PAD_X, text_y, BODY_FONT_SIZE, WHITE);
        text_y += LINE_STEP;
    }
}

fn draw_rect(rect: crawl_core::Rect, color: Color) {
    draw_rectangle(rect.x as f32, rect.y as f32, rect.w as f32, rect.h as f32, color);
}
