pub mod animation;
pub mod app_loop;
pub mod frame_input;
pub mod launch;
pub mod render;
pub mod settings_file;
pub mod ui_text;
pub mod window_config;

pub const APP_NAME: &str = "crawl";

/// Format a seed as an exact decimal string with no prefix or suffix.
pub fn format_seed(seed: u64) -> String {
    seed.to_string()
}

/// Format a snapshot hash as `0x` followed by exactly 16 lowercase hex digits.
pub fn format_snapshot_hash(hash: u64) -> String {
    format!("0x{hash:016x}")
}

/// Map a `RunOutcome` to its reason code string.
pub fn reason_code(outcome: crawl_core::RunOutcome) -> &'static str {
    match outcome {
        crawl_core::RunOutcome::Victory => "WIN_GATE",
        crawl_core::RunOutcome::Defeat => "DMG_HP_ZERO",
    }
}
