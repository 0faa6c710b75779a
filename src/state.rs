use std::collections::VecDeque;

use crate::dataset::{DataLoadFailure, Snapshot};
use crate::views::{self, ViewData};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Overview,
    Winners,
    GoalsAttendance,
    MatchStats,
    PlayerAnalysis,
}

impl View {
    pub const ALL: [View; 5] = [
        View::Overview,
        View::Winners,
        View::GoalsAttendance,
        View::MatchStats,
        View::PlayerAnalysis,
    ];

    pub fn index(self) -> usize {
        match self {
            View::Overview => 0,
            View::Winners => 1,
            View::GoalsAttendance => 2,
            View::MatchStats => 3,
            View::PlayerAnalysis => 4,
        }
    }

    pub fn next(self) -> View {
        View::ALL[(self.index() + 1) % View::ALL.len()]
    }

    pub fn prev(self) -> View {
        View::ALL[(self.index() + View::ALL.len() - 1) % View::ALL.len()]
    }

    /// Digit shortcut, `1` for the first view.
    pub fn from_key(c: char) -> Option<View> {
        let digit = c.to_digit(10)? as usize;
        digit.checked_sub(1).and_then(|idx| View::ALL.get(idx).copied())
    }

    /// Match a label or slug, ignoring case and surrounding whitespace.
    pub fn from_name(raw: &str) -> Option<View> {
        let needle = raw.trim().to_ascii_lowercase();
        View::ALL.into_iter().find(|view| {
            view_slug(*view) == needle || view_label(*view).to_ascii_lowercase() == needle
        })
    }
}

pub fn view_label(view: View) -> &'static str {
    match view {
        View::Overview => "Overview",
        View::Winners => "World Cup Winners",
        View::GoalsAttendance => "Goals & Attendance",
        View::MatchStats => "Match Statistics",
        View::PlayerAnalysis => "Player Analysis",
    }
}

pub fn view_slug(view: View) -> &'static str {
    match view {
        View::Overview => "overview",
        View::Winners => "winners",
        View::GoalsAttendance => "goals",
        View::MatchStats => "matches",
        View::PlayerAnalysis => "players",
    }
}

/// Outcome of the startup load. A failure keeps only its message.
#[derive(Debug, Clone)]
pub enum DataState {
    Loaded(Snapshot),
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub view: View,
    pub data: DataState,
    pub view_data: Option<ViewData>,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl AppState {
    pub fn new(load: Result<Snapshot, DataLoadFailure>) -> Self {
        let mut state = Self {
            view: View::Overview,
            data: DataState::Failed(String::new()),
            view_data: None,
            logs: VecDeque::new(),
            help_overlay: false,
        };
        match load {
            Ok(snapshot) => {
                state.push_log(format!("[INFO] Loaded {}", snapshot.summary()));
                state.data = DataState::Loaded(snapshot);
            }
            Err(err) => {
                let msg = err.to_string();
                state.push_log(format!("[ERROR] Error loading data: {msg}"));
                state.data = DataState::Failed(msg);
            }
        }
        state.rebuild();
        state
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        match &self.data {
            DataState::Loaded(snapshot) => Some(snapshot),
            DataState::Failed(_) => None,
        }
    }

    pub fn load_error(&self) -> Option<&str> {
        match &self.data {
            DataState::Loaded(_) => None,
            DataState::Failed(msg) => Some(msg.as_str()),
        }
    }

    pub fn select_view(&mut self, view: View) {
        if self.view == view && self.view_data.is_some() {
            return;
        }
        self.view = view;
        self.rebuild();
    }

    pub fn next_view(&mut self) {
        self.select_view(self.view.next());
    }

    pub fn prev_view(&mut self) {
        self.select_view(self.view.prev());
    }

    pub fn toggle_help(&mut self) {
        self.help_overlay = !self.help_overlay;
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        const MAX_LOGS: usize = 200;
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    fn rebuild(&mut self) {
        let built = self.snapshot().map(|snapshot| views::build(self.view, snapshot));
        if built.is_none() {
            self.push_log(format!(
                "[WARN] No data loaded; {} is empty",
                view_label(self.view)
            ));
        }
        self.view_data = built;
    }
}
