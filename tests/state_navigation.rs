use std::path::PathBuf;

use wc_history::config::DataPaths;
use wc_history::dataset::{Snapshot, load_snapshot};
use wc_history::state::{AppState, DataState, View, view_label};
use wc_history::views::{self, ViewData};

fn fixture_paths() -> DataPaths {
    let mut dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    dir.push("tests");
    dir.push("fixtures");
    DataPaths::in_dir(dir)
}

fn loaded_state() -> AppState {
    AppState::new(load_snapshot(&fixture_paths()))
}

fn failed_state() -> AppState {
    let mut paths = fixture_paths();
    paths.matches = PathBuf::from("/definitely/not/here/WorldCupMatches.csv");
    AppState::new(load_snapshot(&paths))
}

#[test]
fn starts_on_overview_with_data() {
    let state = loaded_state();
    assert_eq!(state.view, View::Overview);
    assert!(state.snapshot().is_some());
    assert!(matches!(state.view_data, Some(ViewData::Overview(_))));
    assert!(state.logs.back().is_some_and(|l| l.starts_with("[INFO] Loaded")));
}

#[test]
fn failed_load_builds_no_view_data() {
    let mut state = failed_state();
    assert!(matches!(state.data, DataState::Failed(_)));
    assert!(state.snapshot().is_none());
    assert!(state.view_data.is_none());
    assert!(
        state
            .load_error()
            .is_some_and(|e| e.contains("WorldCupMatches.csv"))
    );
    assert!(state.logs.iter().any(|l| l.starts_with("[ERROR]")));

    for view in View::ALL {
        state.select_view(view);
        assert_eq!(state.view, view);
        assert!(state.view_data.is_none());
    }
}

#[test]
fn next_and_prev_wrap_around() {
    let mut state = loaded_state();
    state.prev_view();
    assert_eq!(state.view, View::PlayerAnalysis);
    state.next_view();
    assert_eq!(state.view, View::Overview);
    for _ in 0..View::ALL.len() {
        state.next_view();
    }
    assert_eq!(state.view, View::Overview);
}

#[test]
fn selecting_a_view_rebuilds_its_data() {
    let mut state = loaded_state();
    for view in View::ALL {
        state.select_view(view);
        let data = state.view_data.as_ref().expect("data should be built");
        assert_eq!(data.view(), view);
    }
}

#[test]
fn view_builder_matches_direct_aggregation() {
    let snapshot = load_snapshot(&fixture_paths()).expect("fixtures should load");
    let ViewData::Winners(winners) = views::build(View::Winners, &snapshot) else {
        panic!("winners view should build winners data");
    };
    assert!(winners.win_counts.len() <= 10);
    assert_eq!(winners.timeline.len(), 20);
    assert_eq!(winners.host_wins.count, 5);

    let ViewData::MatchStats(stats) = views::build(View::MatchStats, &snapshot) else {
        panic!("match view should build match data");
    };
    assert_eq!(stats.highest_scoring.len(), 10);
    assert_eq!(stats.histogram.len(), 20);
    assert_eq!(stats.home_away.total(), 81);

    let ViewData::PlayerAnalysis(players) = views::build(View::PlayerAnalysis, &snapshot) else {
        panic!("player view should build player data");
    };
    assert_eq!(players.teams[0].label, "FRA");
}

#[test]
fn empty_snapshot_still_builds_every_view() {
    let snapshot = Snapshot::default();
    for view in View::ALL {
        assert_eq!(views::build(view, &snapshot).view(), view);
    }
}

#[test]
fn digit_keys_and_names_resolve_views() {
    assert_eq!(View::from_key('1'), Some(View::Overview));
    assert_eq!(View::from_key('5'), Some(View::PlayerAnalysis));
    assert_eq!(View::from_key('0'), None);
    assert_eq!(View::from_key('6'), None);
    assert_eq!(View::from_key('x'), None);

    assert_eq!(View::from_name("winners"), Some(View::Winners));
    assert_eq!(View::from_name(" Match Statistics "), Some(View::MatchStats));
    assert_eq!(View::from_name("goals & attendance"), Some(View::GoalsAttendance));
    assert_eq!(View::from_name("rankings"), None);
    assert_eq!(view_label(View::Winners), "World Cup Winners");
}

#[test]
fn help_toggles() {
    let mut state = loaded_state();
    assert!(!state.help_overlay);
    state.toggle_help();
    assert!(state.help_overlay);
    state.toggle_help();
    assert!(!state.help_overlay);
}

#[test]
fn console_log_is_bounded() {
    let mut state = loaded_state();
    for idx in 0..500 {
        state.push_log(format!("[INFO] message {idx}"));
    }
    assert_eq!(state.logs.len(), 200);
    assert_eq!(state.logs.back().map(String::as_str), Some("[INFO] message 499"));
}
