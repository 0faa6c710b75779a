use std::env;
use std::path::{Path, PathBuf};

pub const TOURNAMENTS_FILE: &str = "WorldCups.csv";
pub const MATCHES_FILE: &str = "WorldCupMatches.csv";
pub const PLAYERS_FILE: &str = "WorldCupPlayers.csv";

pub const DATA_DIR_ENV: &str = "WC_DATA_DIR";
pub const TOURNAMENTS_ENV: &str = "WC_TOURNAMENTS_CSV";
pub const MATCHES_ENV: &str = "WC_MATCHES_CSV";
pub const PLAYERS_ENV: &str = "WC_PLAYERS_CSV";

/// Locations of the three CSV tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub tournaments: PathBuf,
    pub matches: PathBuf,
    pub players: PathBuf,
}

impl DataPaths {
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            tournaments: dir.join(TOURNAMENTS_FILE),
            matches: dir.join(MATCHES_FILE),
            players: dir.join(PLAYERS_FILE),
        }
    }
}

impl Default for DataPaths {
    fn default() -> Self {
        Self::in_dir(".")
    }
}

/// Read `.env.local` then `.env`; missing files are fine.
pub fn load_dotenv() {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
}

/// Resolve paths from command-line flags first, then the process environment.
pub fn resolve_data_paths(args: &[String]) -> DataPaths {
    resolve_data_paths_with(args, |key| env::var(key).ok())
}

pub fn resolve_data_paths_with<F>(args: &[String], lookup: F) -> DataPaths
where
    F: Fn(&str) -> Option<String>,
{
    let setting = |flag: &str, key: &str| {
        flag_value(args, flag).or_else(|| lookup(key).filter(|raw| !raw.trim().is_empty()))
    };

    let dir = setting("--data-dir", DATA_DIR_ENV)
        .map(|raw| PathBuf::from(raw.trim()))
        .unwrap_or_else(|| PathBuf::from("."));
    let mut paths = DataPaths::in_dir(&dir);
    if let Some(raw) = setting("--tournaments", TOURNAMENTS_ENV) {
        paths.tournaments = PathBuf::from(raw.trim());
    }
    if let Some(raw) = setting("--matches", MATCHES_ENV) {
        paths.matches = PathBuf::from(raw.trim());
    }
    if let Some(raw) = setting("--players", PLAYERS_ENV) {
        paths.players = PathBuf::from(raw.trim());
    }
    paths
}

/// Value of `--name value` or `--name=value`. Blank values are ignored.
pub fn flag_value(args: &[String], name: &str) -> Option<String> {
    for (idx, arg) in args.iter().enumerate() {
        if let Some(raw) = arg
            .strip_prefix(name)
            .and_then(|rest| rest.strip_prefix('='))
        {
            let trimmed = raw.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
        if arg == name
            && let Some(next) = args.get(idx + 1)
            && !next.trim().is_empty()
        {
            return Some(next.trim().to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn flag_value_supports_both_forms() {
        let a = args(&["--data-dir=/tmp/wc", "--view", "winners"]);
        assert_eq!(flag_value(&a, "--data-dir").as_deref(), Some("/tmp/wc"));
        assert_eq!(flag_value(&a, "--view").as_deref(), Some("winners"));
        assert_eq!(flag_value(&a, "--players"), None);
    }

    #[test]
    fn flag_value_skips_blank() {
        let a = args(&["--view=", "--view", "  "]);
        assert_eq!(flag_value(&a, "--view"), None);
    }

    #[test]
    fn defaults_to_current_directory() {
        let paths = resolve_data_paths_with(&[], |_| None);
        assert_eq!(paths, DataPaths::default());
        assert_eq!(paths.tournaments, PathBuf::from("./WorldCups.csv"));
    }

    #[test]
    fn flags_override_environment() {
        let env = |key: &str| match key {
            DATA_DIR_ENV => Some("/env/data".to_string()),
            PLAYERS_ENV => Some("/env/players.csv".to_string()),
            MATCHES_ENV => Some("   ".to_string()),
            _ => None,
        };
        let paths = resolve_data_paths_with(&args(&["--data-dir", "/cli/data"]), env);
        assert_eq!(paths.tournaments, PathBuf::from("/cli/data/WorldCups.csv"));
        assert_eq!(paths.matches, PathBuf::from("/cli/data/WorldCupMatches.csv"));
        assert_eq!(paths.players, PathBuf::from("/env/players.csv"));

        let paths = resolve_data_paths_with(&[], env);
        assert_eq!(paths.tournaments, PathBuf::from("/env/data/WorldCups.csv"));
    }

    #[test]
    fn flag_value_does_not_match_prefixes() {
        let a = args(&["--data-directory=/x"]);
        assert_eq!(flag_value(&a, "--data-dir"), None);
    }
}
