use crawl_app::app_loop::AppState;
use crawl_app::frame_input::capture_frame_input;
use crawl_app::launch::{generate_runtime_seed, resolve_launch_from_args};
use crawl_app::render::draw_frame;
use crawl_app::settings_file::SettingsFile;
use crawl_app::window_config::build_window_conf;
use crawl_core::{BattleAction, BattleInput, Game, MapFile};
use macroquad::prelude::next_frame;

const BUNDLED_MAP: &str = include_str!("../assets/default.map");

#[macroquad::main(build_window_conf)]
async fn main() {
    let args: Vec<String> = std::env::args().collect();
    let options = match resolve_launch_from_args(&args, generate_runtime_seed()) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{message}");
            std::process::exit(2);
        }
    };

    let map_text = match &options.map_path {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(error) => {
                eprintln!("cannot read map file {}: {error}", path.display());
                std::process::exit(2);
            }
        },
        None => BUNDLED_MAP.to_string(),
    };
    let map = match MapFile::parse(&map_text) {
        Ok(map) => map,
        Err(error) => {
            eprintln!("invalid map file: {error}");
            std::process::exit(2);
        }
    };

    let settings_path = SettingsFile::get_default_path();
    let mut settings = settings_path
        .as_deref()
        .and_then(|path| SettingsFile::load(path).ok())
        .unwrap_or_default();

    let mut game = Game::new(options.seed.value(), &map);
    let mut app = AppState::new();
    let mut battle_active = false;

    loop {
        let frame = capture_frame_input();
        app.tick(&mut game, &frame.keys_pressed, frame.intent);

        // Apply the saved quickmode preference as each battle opens, and
        // persist the toggle when it changes mid-battle.
        match game.battle().map(|battle| battle.quickmode()) {
            Some(quickmode) => {
                if !battle_active && settings.quickmode && !quickmode {
                    let _ = game.battle_input(BattleInput::Select(BattleAction::ToggleQuickmode));
                } else if battle_active && quickmode != settings.quickmode {
                    settings.quickmode = quickmode;
                    if let Some(path) = settings_path.as_deref() {
                        if let Err(error) = settings.write_atomic(path) {
                            eprintln!("could not save settings: {error}");
                        }
                    }
                }
                battle_active = true;
            }
            None => battle_active = false,
        }

        draw_frame(&game, &app);
        next_frame().await
    }
}
