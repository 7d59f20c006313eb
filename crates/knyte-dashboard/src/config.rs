use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_TICK_MS: u64 = 1000;
const MIN_TICK_MS: u64 = 100;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub seed_file: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub log_stdout: bool,
    pub tick_rate: Duration,
}

pub fn load_config() -> Config {
    resolve_config(|key| std::env::var(key).ok())
}

fn resolve_config(lookup: impl Fn(&str) -> Option<String>) -> Config {
    let non_empty = |key: &str| {
        lookup(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    };

    let seed_file = non_empty("KNYTE_SEED_FILE").map(PathBuf::from);
    let log_file = non_empty("KNYTE_LOG_FILE").map(PathBuf::from);
    let log_stdout = non_empty("KNYTE_LOG_STDOUT")
        .and_then(|value| parse_bool_flag(&value))
        .unwrap_or(false);
    let tick_ms = non_empty("KNYTE_TICK_MS")
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(DEFAULT_TICK_MS)
        .max(MIN_TICK_MS);

    Config {
        seed_file,
        log_file,
        log_stdout,
        tick_rate: Duration::from_millis(tick_ms),
    }
}

fn parse_bool_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        resolve_config(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let config = config_from(&[]);
        assert_eq!(config.seed_file, None);
        assert_eq!(config.log_file, None);
        assert!(!config.log_stdout);
        assert_eq!(config.tick_rate, Duration::from_millis(1000));
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = config_from(&[("KNYTE_SEED_FILE", "   "), ("KNYTE_TICK_MS", "")]);
        assert_eq!(config.seed_file, None);
        assert_eq!(config.tick_rate, Duration::from_millis(1000));
    }

    #[test]
    fn reads_paths_flags_and_clamps_tick() {
        let config = config_from(&[
            ("KNYTE_SEED_FILE", "/tmp/fleet.json"),
            ("KNYTE_LOG_FILE", " /tmp/knyte.log "),
            ("KNYTE_LOG_STDOUT", "YES"),
            ("KNYTE_TICK_MS", "20"),
        ]);
        assert_eq!(config.seed_file, Some(PathBuf::from("/tmp/fleet.json")));
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/knyte.log")));
        assert!(config.log_stdout);
        assert_eq!(config.tick_rate, Duration::from_millis(100));
    }

    #[test]
    fn bool_flag_rejects_garbage() {
        assert_eq!(parse_bool_flag("off"), Some(false));
        assert_eq!(parse_bool_flag("maybe"), None);
    }
}
