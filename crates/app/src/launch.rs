use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedChoice {
    Cli(u64),
    Generated(u64),
}

impl SeedChoice {
    pub fn value(self) -> u64 {
        match self {
            Self::Cli(seed) | Self::Generated(seed) => seed,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LaunchOptions {
    pub seed: SeedChoice,
    /// Map file to load instead of the bundled one.
    pub map_path: Option<PathBuf>,
}

static GENERATED_SEED_COUNTER: AtomicU64 = AtomicU64::new(0);

pub fn generate_runtime_seed() -> u64 {
    let now_nanos =
        SystemTime::now().duration_since(UNIX_EPOCH).map_or(0_u128, |duration| duration.as_nanos());
    let pid = u64::from(std::process::id());
    let counter = GENERATED_SEED_COUNTER.fetch_add(1, Ordering::Relaxed);

    let entropy = (now_nanos as u64)
        ^ ((now_nanos >> 64) as u64)
        ^ pid.rotate_left(17)
        ^ counter.rotate_left(7);

    mix_seed(entropy)
}

pub fn resolve_launch_from_args(
    args: &[String],
    generated_seed: u64,
) -> Result<LaunchOptions, String> {
    let mut selected_seed = None;
    let mut map_path: Option<PathBuf> = None;
    let mut index = 1usize;

    while index < args.len() {
        let argument = args[index].as_str();

        if argument == "--seed" {
            let Some(value) = args.get(index + 1) else {
                return Err("missing value for --seed".to_string());
            };
            if selected_seed.is_some() {
                return Err("seed provided more than once".to_string());
            }
            selected_seed = Some(parse_seed_value(value)?);
            index += 2;
            continue;
        }
        if let Some(value) = argument.strip_prefix("--seed=") {
            if selected_seed.is_some() {
                return Err("seed provided more than once".to_string());
            }
            selected_seed = Some(parse_seed_value(value)?);
            index += 1;
            continue;
        }

        if argument == "--map" {
            let Some(value) = args.get(index + 1) else {
                return Err("missing value for --map".to_string());
            };
            if map_path.is_some() {
                return Err("map provided more than once".to_string());
            }
            map_path = Some(PathBuf::from(value));
            index += 2;
            continue;
        }
        if let Some(value) = argument.strip_prefix("--map=") {
            if map_path.is_some() {
                return Err("map provided more than once".to_string());
            }
            map_path = Some(PathBuf::from(value));
        }
        index += 1;
    }

    let seed = match selected_seed {
        Some(seed) => SeedChoice::Cli(seed),
        None => SeedChoice::Generated(generated_seed),
    };
    Ok(LaunchOptions { seed, map_path })
}

fn parse_seed_value(raw_value: &str) -> Result<u64, String> {
    raw_value.parse::<u64>().map_err(|_| format!("seed value '{raw_value}' must be a number"))
}

fn mix_seed(mut value: u64) -> u64 {
    value ^= value >> 30;
    value = value.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    value ^= value >> 27;
    value = value.wrapping_mul(0x94D0_49BB_1331_11EB);
    value ^ (value >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_args(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|part| part.to_string()).collect()
    }

    #[test]
    fn uses_generated_seed_when_seed_flag_is_absent() {
        let args = as_args(&["crawl"]);
        let options =
            resolve_launch_from_args(&args, 9_876_543).expect("launch resolution should not fail");
        assert_eq!(options.seed, SeedChoice::Generated(9_876_543));
        assert_eq!(options.map_path, None);
    }

    #[test]
    fn parses_seed_flag_with_separate_value() {
        let args = as_args(&["crawl", "--seed", "4242"]);
        let options = resolve_launch_from_args(&args, 1).expect("valid --seed should parse");
        assert_eq!(options.seed, SeedChoice::Cli(4_242));
    }

    #[test]
    fn parses_seed_flag_with_inline_value() {
        let args = as_args(&["crawl", "--seed=2026"]);
        let options = resolve_launch_from_args(&args, 1).expect("valid --seed should parse");
        assert_eq!(options.seed, SeedChoice::Cli(2_026));
    }

    #[test]
    fn parses_map_flag_in_both_forms() {
        let args = as_args(&["crawl", "--map", "caves.map"]);
        let options = resolve_launch_from_args(&args, 1).expect("valid --map should parse");
        assert_eq!(options.map_path, Some(PathBuf::from("caves.map")));

        let args = as_args(&["crawl", "--map=caves.map", "--seed=7"]);
        let options = resolve_launch_from_args(&args, 1).expect("valid flags should parse");
        assert_eq!(options.map_path, Some(PathBuf::from("caves.map")));
        assert_eq!(options.seed, SeedChoice::Cli(7));
    }

    #[test]
    fn errors_when_seed_flag_has_no_value() {
        let args = as_args(&["crawl", "--seed"]);
        let err =
            resolve_launch_from_args(&args, 1).expect_err("missing seed value should error");
        assert!(err.contains("missing"), "error should explain missing value: {err}");
    }

    #[test]
    fn errors_when_seed_value_is_not_a_number() {
        let args = as_args(&["crawl", "--seed=abc"]);
        let err =
            resolve_launch_from_args(&args, 1).expect_err("non-numeric seed value should error");
        assert!(err.contains("number"), "error should explain numeric requirement: {err}");
    }

    #[test]
    fn errors_when_a_flag_repeats() {
        let args = as_args(&["crawl", "--seed=1", "--seed", "2"]);
        let err =
            resolve_launch_from_args(&args, 1).expect_err("duplicate seed flags should be rejected");
        assert!(err.contains("more than once"), "error should explain duplicate seed: {err}");

        let args = as_args(&["crawl", "--map=a", "--map", "b"]);
        let err =
            resolve_launch_from_args(&args, 1).expect_err("duplicate map flags should be rejected");
        assert!(err.contains("more than once"), "error should explain duplicate map: {err}");
    }

    #[test]
    fn generated_seed_changes_between_calls() {
        let first = generate_runtime_seed();
        let second = generate_runtime_seed();
        assert_ne!(first, second, "runtime seed generation should vary per call");
    }
}
