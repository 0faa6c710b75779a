use std::path::PathBuf;

use wc_history::config::DataPaths;
use wc_history::dataset::{
    DataLoadFailure, load_matches, load_matches_from_reader, load_players, load_snapshot,
    load_tournaments, load_tournaments_from_reader, normalize_attendance,
};

fn fixture(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    path
}

fn fixture_paths() -> DataPaths {
    let mut dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    dir.push("tests");
    dir.push("fixtures");
    DataPaths::in_dir(dir)
}

#[test]
fn loads_all_three_fixture_tables() {
    let snapshot = load_snapshot(&fixture_paths()).expect("fixtures should load");
    assert_eq!(snapshot.tournaments.len(), 20);
    // Twelve real rows; the two comma-only padding rows are dropped.
    assert_eq!(snapshot.matches.len(), 12);
    assert_eq!(snapshot.players.len(), 14);
    assert_eq!(
        snapshot.summary(),
        "20 tournaments, 12 matches, 14 player rows"
    );
}

#[test]
fn tournaments_normalize_attendance_on_load() {
    let tournaments = load_tournaments(&fixture("WorldCups.csv")).expect("should load");
    let first = &tournaments[0];
    assert_eq!(first.year, 1930);
    assert_eq!(first.host_country, "Uruguay");
    assert_eq!(first.runner_up, "Argentina");
    assert_eq!(first.third.as_deref(), Some("USA"));
    assert_eq!(first.attendance, 590_549);
    assert_eq!(tournaments[3].attendance, 1_045_246);
    assert_eq!(tournaments[19].attendance, 3_386_810);
}

#[test]
fn matches_keep_missing_goals_as_none() {
    let matches = load_matches(&fixture("WorldCupMatches.csv")).expect("should load");
    let spain = matches
        .iter()
        .find(|m| m.home_team == "Spain")
        .expect("Spain row should load");
    assert_eq!(spain.home_goals, None);
    assert_eq!(spain.away_goals, None);
    assert_eq!(spain.total_goals(), None);
    assert_eq!(spain.stage.as_deref(), Some("Group B"));

    let opener = &matches[0];
    assert_eq!(opener.home_goals, Some(4));
    assert_eq!(opener.total_goals(), Some(5));
}

#[test]
fn players_keep_blank_names_and_positions_as_none() {
    let players = load_players(&fixture("WorldCupPlayers.csv")).expect("should load");
    let unnamed = players.iter().filter(|p| p.player_name.is_none()).count();
    assert_eq!(unnamed, 1);
    assert_eq!(players[2].position, None);
    assert_eq!(players[0].position.as_deref(), Some("GK"));
    assert_eq!(players[0].coach_name.as_deref(), Some("CAUDRON Raoul (FRA)"));
}

#[test]
fn missing_file_fails_the_whole_load() {
    let mut paths = fixture_paths();
    paths.players = fixture("does_not_exist.csv");
    let err = load_snapshot(&paths).expect_err("missing file must fail");
    assert!(matches!(err, DataLoadFailure::Missing { .. }));
    assert!(err.to_string().contains("does_not_exist.csv"));
}

#[test]
fn directory_in_place_of_a_file_is_unreadable() {
    let mut paths = fixture_paths();
    let mut dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    dir.push("tests");
    dir.push("fixtures");
    paths.tournaments = dir;
    let err = load_snapshot(&paths).expect_err("a directory is not a table");
    assert!(
        matches!(err, DataLoadFailure::Unreadable { .. }),
        "unexpected error: {err}"
    );
    assert!(err.to_string().contains("fixtures"));
}

#[test]
fn non_numeric_goals_report_the_cell() {
    let err = load_matches(&fixture("WorldCupMatches_bad_goals.csv"))
        .expect_err("bad goal cell must fail");
    match err {
        DataLoadFailure::InvalidField {
            line,
            column,
            value,
            ..
        } => {
            assert_eq!(line, 3);
            assert_eq!(column, "Home Team Goals");
            assert_eq!(value, "three");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_required_column_is_rejected() {
    let err = load_tournaments(&fixture("WorldCups_missing_attendance.csv"))
        .expect_err("missing column must fail");
    assert!(matches!(
        err,
        DataLoadFailure::MissingColumn {
            column: "Attendance",
            ..
        }
    ));
}

#[test]
fn ragged_rows_are_malformed() {
    let raw = "Year,Stage,Home Team Name,Home Team Goals,Away Team Goals,Away Team Name\n\
               1930,Group 1,France,4,1\n";
    let err = load_matches_from_reader(raw.as_bytes(), "inline").expect_err("ragged row");
    assert!(matches!(err, DataLoadFailure::Malformed { .. }));
}

#[test]
fn integral_float_goals_are_accepted() {
    let raw = "Year,Stage,Home Team Name,Home Team Goals,Away Team Goals,Away Team Name\n\
               1930.0,Group 1,France,4.0,1.0,Mexico\n";
    let matches = load_matches_from_reader(raw.as_bytes(), "inline").expect("should parse");
    assert_eq!(matches[0].year, 1930);
    assert_eq!(matches[0].total_goals(), Some(5));
}

#[test]
fn bad_attendance_is_invalid_field() {
    let raw = "Year,Country,Winner,Runners-Up,GoalsScored,QualifiedTeams,MatchesPlayed,Attendance\n\
               1930,Uruguay,Uruguay,Argentina,70,13,18,lots\n";
    let err = load_tournaments_from_reader(raw.as_bytes(), "inline").expect_err("bad attendance");
    assert!(matches!(
        err,
        DataLoadFailure::InvalidField {
            column: "Attendance",
            ..
        }
    ));
}

#[test]
fn attendance_normalization_is_idempotent() {
    for raw in ["590.549", "3.386.810", "363.000", "0", "1,045,246"] {
        let once = normalize_attendance(raw).expect("should normalize");
        let twice = normalize_attendance(&once.to_string()).expect("should normalize again");
        assert_eq!(once, twice, "{raw}");
    }
}
