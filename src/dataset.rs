use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::DataPaths;

/// Why the three tables could not be loaded. Any variant means no table is
/// available and nothing downstream may be aggregated.
#[derive(Debug, Error)]
pub enum DataLoadFailure {
    #[error("{file}: file not found")]
    Missing { file: String },
    #[error("{file}: {source}")]
    Unreadable {
        file: String,
        #[source]
        source: io::Error,
    },
    #[error("{file}: malformed csv: {source}")]
    Malformed {
        file: String,
        #[source]
        source: csv::Error,
    },
    #[error("{file}: missing column `{column}`")]
    MissingColumn { file: String, column: &'static str },
    #[error("{file} line {line}: column `{column}` has invalid value {value:?} ({reason})")]
    InvalidField {
        file: String,
        line: u64,
        column: &'static str,
        value: String,
        reason: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tournament {
    pub year: u16,
    pub host_country: String,
    pub winner: String,
    pub runner_up: String,
    pub third: Option<String>,
    pub fourth: Option<String>,
    pub goals_scored: u32,
    pub qualified_teams: u32,
    pub matches_played: u32,
    /// Spectators across the whole tournament, already stripped of its
    /// thousands separators.
    pub attendance: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub year: u16,
    pub stage: Option<String>,
    pub home_team: String,
    pub away_team: String,
    pub home_goals: Option<u32>,
    pub away_goals: Option<u32>,
}

impl Match {
    /// Combined score, or `None` when either side's goal count is missing.
    /// Summed in `u64`, which holds any pair of `u32` cells.
    pub fn total_goals(&self) -> Option<u64> {
        let (Some(home_goals), Some(away_goals)) = (self.home_goals, self.away_goals) else {
            return None;
        };
        Some(u64::from(home_goals) + u64::from(away_goals))
    }

    pub fn has_score(&self) -> bool {
        self.home_goals.is_some() && self.away_goals.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerAppearance {
    pub player_name: Option<String>,
    pub position: Option<String>,
    pub team_initials: Option<String>,
    pub coach_name: Option<String>,
}

impl PlayerAppearance {
    pub fn is_named(&self) -> bool {
        self.player_name.is_some()
    }
}

/// The three tables, loaded together and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub tournaments: Vec<Tournament>,
    pub matches: Vec<Match>,
    pub players: Vec<PlayerAppearance>,
}

impl Snapshot {
    pub fn new(
        tournaments: Vec<Tournament>,
        matches: Vec<Match>,
        players: Vec<PlayerAppearance>,
    ) -> Self {
        Self {
            tournaments,
            matches,
            players,
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "{} tournaments, {} matches, {} player rows",
            self.tournaments.len(),
            self.matches.len(),
            self.players.len()
        )
    }
}

#[derive(Debug, Deserialize)]
struct RawTournament {
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "Country")]
    country: Option<String>,
    #[serde(rename = "Winner")]
    winner: Option<String>,
    #[serde(rename = "Runners-Up")]
    runner_up: Option<String>,
    #[serde(rename = "Third", default)]
    third: Option<String>,
    #[serde(rename = "Fourth", default)]
    fourth: Option<String>,
    #[serde(rename = "GoalsScored")]
    goals_scored: Option<String>,
    #[serde(rename = "QualifiedTeams")]
    qualified_teams: Option<String>,
    #[serde(rename = "MatchesPlayed")]
    matches_played: Option<String>,
    #[serde(rename = "Attendance")]
    attendance: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawMatch {
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "Stage")]
    stage: Option<String>,
    #[serde(rename = "Home Team Name")]
    home_team: Option<String>,
    #[serde(rename = "Away Team Name")]
    away_team: Option<String>,
    #[serde(rename = "Home Team Goals")]
    home_goals: Option<String>,
    #[serde(rename = "Away Team Goals")]
    away_goals: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawPlayer {
    #[serde(rename = "Player Name")]
    player_name: Option<String>,
    #[serde(rename = "Position")]
    position: Option<String>,
    #[serde(rename = "Team Initials")]
    team_initials: Option<String>,
    #[serde(rename = "Coach Name")]
    coach_name: Option<String>,
}

const TOURNAMENT_COLUMNS: &[&str] = &[
    "Year",
    "Country",
    "Winner",
    "Runners-Up",
    "GoalsScored",
    "QualifiedTeams",
    "MatchesPlayed",
    "Attendance",
];

const MATCH_COLUMNS: &[&str] = &[
    "Year",
    "Stage",
    "Home Team Name",
    "Home Team Goals",
    "Away Team Goals",
    "Away Team Name",
];

const PLAYER_COLUMNS: &[&str] = &["Team Initials", "Coach Name", "Player Name", "Position"];

/// Load all three tables. The first failure aborts the whole load.
pub fn load_snapshot(paths: &DataPaths) -> Result<Snapshot, DataLoadFailure> {
    let tournaments = load_tournaments(&paths.tournaments)?;
    let matches = load_matches(&paths.matches)?;
    let players = load_players(&paths.players)?;
    Ok(Snapshot::new(tournaments, matches, players))
}

pub fn load_tournaments(path: &Path) -> Result<Vec<Tournament>, DataLoadFailure> {
    let file = open_table(path)?;
    load_tournaments_from_reader(file, &path.display().to_string())
}

pub fn load_matches(path: &Path) -> Result<Vec<Match>, DataLoadFailure> {
    let file = open_table(path)?;
    load_matches_from_reader(file, &path.display().to_string())
}

pub fn load_players(path: &Path) -> Result<Vec<PlayerAppearance>, DataLoadFailure> {
    let file = open_table(path)?;
    load_players_from_reader(file, &path.display().to_string())
}

pub fn load_tournaments_from_reader<R: Read>(
    rdr: R,
    source: &str,
) -> Result<Vec<Tournament>, DataLoadFailure> {
    read_table(rdr, source, TOURNAMENT_COLUMNS, |row, raw: RawTournament| {
        Ok(Tournament {
            year: row.year("Year", raw.year)?,
            host_country: row.text("Country", raw.country)?,
            winner: row.text("Winner", raw.winner)?,
            runner_up: row.text("Runners-Up", raw.runner_up)?,
            third: raw.third,
            fourth: raw.fourth,
            goals_scored: row.count("GoalsScored", raw.goals_scored)?,
            qualified_teams: row.count("QualifiedTeams", raw.qualified_teams)?,
            matches_played: row.count("MatchesPlayed", raw.matches_played)?,
            attendance: row.attendance("Attendance", raw.attendance)?,
        })
    })
}

pub fn load_matches_from_reader<R: Read>(
    rdr: R,
    source: &str,
) -> Result<Vec<Match>, DataLoadFailure> {
    read_table(rdr, source, MATCH_COLUMNS, |row, raw: RawMatch| {
        Ok(Match {
            year: row.year("Year", raw.year)?,
            stage: raw.stage,
            home_team: row.text("Home Team Name", raw.home_team)?,
            away_team: row.text("Away Team Name", raw.away_team)?,
            home_goals: row.optional_count("Home Team Goals", raw.home_goals)?,
            away_goals: row.optional_count("Away Team Goals", raw.away_goals)?,
        })
    })
}

pub fn load_players_from_reader<R: Read>(
    rdr: R,
    source: &str,
) -> Result<Vec<PlayerAppearance>, DataLoadFailure> {
    read_table(rdr, source, PLAYER_COLUMNS, |_, raw: RawPlayer| {
        Ok(PlayerAppearance {
            player_name: raw.player_name,
            position: raw.position,
            team_initials: raw.team_initials,
            coach_name: raw.coach_name,
        })
    })
}

/// Strip the thousands separators from an attendance figure such as
/// `3.386.810` and parse what is left. Plain integers pass through unchanged.
pub fn normalize_attendance(raw: &str) -> Option<u64> {
    let digits = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '.' | ','))
        .collect::<String>();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Parse a non-negative integer cell. Accepts `4` as well as `4.0`, which is
/// how spreadsheet exports render integer columns that contain blanks.
pub fn parse_count(raw: &str) -> Option<u32> {
    let trimmed = raw.trim();
    if let Ok(value) = trimmed.parse::<u32>() {
        return Some(value);
    }
    let value = trimmed.parse::<f64>().ok()?;
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value > f64::from(u32::MAX) {
        return None;
    }
    Some(value as u32)
}

fn open_table(path: &Path) -> Result<File, DataLoadFailure> {
    File::open(path).map_err(|source| {
        let file = path.display().to_string();
        if source.kind() == io::ErrorKind::NotFound {
            DataLoadFailure::Missing { file }
        } else {
            DataLoadFailure::Unreadable { file, source }
        }
    })
}

fn read_table<R, Raw, T, F>(
    rdr: R,
    source: &str,
    columns: &[&'static str],
    mut convert: F,
) -> Result<Vec<T>, DataLoadFailure>
where
    R: Read,
    Raw: DeserializeOwned,
    F: FnMut(&RowContext<'_>, Raw) -> Result<T, DataLoadFailure>,
{
    let fail = |err: csv::Error| table_failure(source, err);

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(rdr);
    let headers = reader.headers().map_err(fail)?.clone();
    for column in columns {
        if !headers.iter().any(|header| header == *column) {
            return Err(DataLoadFailure::MissingColumn {
                file: source.to_string(),
                column: *column,
            });
        }
    }

    let mut rows = Vec::new();
    let mut record = csv::StringRecord::new();
    while reader.read_record(&mut record).map_err(fail)? {
        // Exports pad the file with rows of bare commas.
        if record.iter().all(str::is_empty) {
            continue;
        }
        let line = record.position().map_or(0, |pos| pos.line());
        let raw: Raw = record.deserialize(Some(&headers)).map_err(fail)?;
        let row = RowContext { source, line };
        rows.push(convert(&row, raw)?);
    }
    Ok(rows)
}

/// I/O errors raised while reading (a directory in place of a file, for one)
/// are `Unreadable`; everything else the csv reader reports is `Malformed`.
fn table_failure(file: &str, err: csv::Error) -> DataLoadFailure {
    if let csv::ErrorKind::Io(io_err) = err.kind() {
        return DataLoadFailure::Unreadable {
            file: file.to_string(),
            source: io::Error::new(io_err.kind(), io_err.to_string()),
        };
    }
    DataLoadFailure::Malformed {
        file: file.to_string(),
        source: err,
    }
}

struct RowContext<'a> {
    source: &'a str,
    line: u64,
}

impl RowContext<'_> {
    fn invalid(&self, column: &'static str, value: &str, reason: &'static str) -> DataLoadFailure {
        DataLoadFailure::InvalidField {
            file: self.source.to_string(),
            line: self.line,
            column,
            value: value.to_string(),
            reason,
        }
    }

    fn text(&self, column: &'static str, value: Option<String>) -> Result<String, DataLoadFailure> {
        value.ok_or_else(|| self.invalid(column, "", "value is required"))
    }

    fn count(&self, column: &'static str, value: Option<String>) -> Result<u32, DataLoadFailure> {
        self.optional_count(column, value)?
            .ok_or_else(|| self.invalid(column, "", "value is required"))
    }

    fn optional_count(
        &self,
        column: &'static str,
        value: Option<String>,
    ) -> Result<Option<u32>, DataLoadFailure> {
        let Some(raw) = value else {
            return Ok(None);
        };
        parse_count(&raw)
            .map(Some)
            .ok_or_else(|| self.invalid(column, &raw, "expected a non-negative integer"))
    }

    fn year(&self, column: &'static str, value: Option<String>) -> Result<u16, DataLoadFailure> {
        let raw = value.unwrap_or_default();
        parse_count(&raw)
            .and_then(|year| u16::try_from(year).ok())
            .ok_or_else(|| self.invalid(column, &raw, "expected a year"))
    }

    fn attendance(
        &self,
        column: &'static str,
        value: Option<String>,
    ) -> Result<u64, DataLoadFailure> {
        let raw = value.unwrap_or_default();
        normalize_attendance(&raw)
            .ok_or_else(|| self.invalid(column, &raw, "expected a separator-grouped integer"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attendance_strips_dot_separators() {
        assert_eq!(normalize_attendance("590.549"), Some(590_549));
        assert_eq!(normalize_attendance("3.386.810"), Some(3_386_810));
        assert_eq!(normalize_attendance(" 1,045,246 "), Some(1_045_246));
        assert_eq!(normalize_attendance("363000"), Some(363_000));
    }

    #[test]
    fn attendance_rejects_non_numeric() {
        assert_eq!(normalize_attendance(""), None);
        assert_eq!(normalize_attendance("..."), None);
        assert_eq!(normalize_attendance("12a.000"), None);
        assert_eq!(normalize_attendance("-5"), None);
    }

    #[test]
    fn count_accepts_integral_floats() {
        assert_eq!(parse_count("4"), Some(4));
        assert_eq!(parse_count("4.0"), Some(4));
        assert_eq!(parse_count(" 0 "), Some(0));
        assert_eq!(parse_count("4.5"), None);
        assert_eq!(parse_count("-1"), None);
        assert_eq!(parse_count("NaN"), None);
        assert_eq!(parse_count("four"), None);
    }

    #[test]
    fn total_goals_needs_both_sides() {
        let mut m = Match {
            year: 1930,
            stage: Some("Group 1".to_string()),
            home_team: "France".to_string(),
            away_team: "Mexico".to_string(),
            home_goals: Some(4),
            away_goals: Some(1),
        };
        assert_eq!(m.total_goals(), Some(5));
        m.away_goals = None;
        assert_eq!(m.total_goals(), None);
        assert!(!m.has_score());
    }
}
