use crate::aggregates::{
    self, CountRow, GoalsAttendancePoint, HistogramBin, HomeAwayTotals, HostWins,
    OverviewTotals, RecentTournament, ScoringMatch, SeriesPoint, TimelinePoint,
};
use crate::dataset::Snapshot;
use crate::state::View;

#[derive(Debug, Clone, PartialEq)]
pub struct OverviewData {
    pub totals: OverviewTotals,
    pub recent: Vec<RecentTournament>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WinnersData {
    pub win_counts: Vec<CountRow>,
    pub timeline: Vec<TimelinePoint>,
    pub host_wins: HostWins,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GoalsAttendanceData {
    pub goals: Vec<SeriesPoint>,
    pub attendance: Vec<SeriesPoint>,
    pub scatter: Vec<GoalsAttendancePoint>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchStatsData {
    pub highest_scoring: Vec<ScoringMatch>,
    pub histogram: Vec<HistogramBin>,
    pub home_away: HomeAwayTotals,
    pub stages: Vec<CountRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerAnalysisData {
    pub positions: Vec<CountRow>,
    pub teams: Vec<CountRow>,
    pub coaches: Vec<CountRow>,
}

/// Everything one view draws, computed fresh from the snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewData {
    Overview(OverviewData),
    Winners(WinnersData),
    GoalsAttendance(GoalsAttendanceData),
    MatchStats(MatchStatsData),
    PlayerAnalysis(PlayerAnalysisData),
}

impl ViewData {
    pub fn view(&self) -> View {
        match self {
            ViewData::Overview(_) => View::Overview,
            ViewData::Winners(_) => View::Winners,
            ViewData::GoalsAttendance(_) => View::GoalsAttendance,
            ViewData::MatchStats(_) => View::MatchStats,
            ViewData::PlayerAnalysis(_) => View::PlayerAnalysis,
        }
    }
}

pub fn build(view: View, snapshot: &Snapshot) -> ViewData {
    match view {
        View::Overview => ViewData::Overview(overview(snapshot)),
        View::Winners => ViewData::Winners(winners(snapshot)),
        View::GoalsAttendance => ViewData::GoalsAttendance(goals_attendance(snapshot)),
        View::MatchStats => ViewData::MatchStats(match_stats(snapshot)),
        View::PlayerAnalysis => ViewData::PlayerAnalysis(player_analysis(snapshot)),
    }
}

pub fn overview(snapshot: &Snapshot) -> OverviewData {
    OverviewData {
        totals: aggregates::overview_totals(&snapshot.tournaments),
        recent: aggregates::recent_tournaments(
            &snapshot.tournaments,
            aggregates::RECENT_TOURNAMENTS,
        ),
    }
}

pub fn winners(snapshot: &Snapshot) -> WinnersData {
    WinnersData {
        win_counts: aggregates::top_n(
            aggregates::win_counts_by_country(&snapshot.tournaments),
            aggregates::TOP_WINNERS,
        ),
        timeline: aggregates::winners_timeline(&snapshot.tournaments),
        host_wins: aggregates::host_country_wins(&snapshot.tournaments),
    }
}

pub fn goals_attendance(snapshot: &Snapshot) -> GoalsAttendanceData {
    GoalsAttendanceData {
        goals: aggregates::goals_per_tournament(&snapshot.tournaments),
        attendance: aggregates::attendance_per_tournament(&snapshot.tournaments),
        scatter: aggregates::goals_vs_attendance(&snapshot.tournaments),
    }
}

pub fn match_stats(snapshot: &Snapshot) -> MatchStatsData {
    let totals = aggregates::total_goals_values(&snapshot.matches);
    MatchStatsData {
        highest_scoring: aggregates::highest_scoring_matches(
            &snapshot.matches,
            aggregates::TOP_SCORING_MATCHES,
        ),
        histogram: aggregates::goals_histogram(&totals, aggregates::HISTOGRAM_BINS),
        home_away: aggregates::home_away_goal_totals(&snapshot.matches),
        stages: aggregates::matches_by_stage(&snapshot.matches, aggregates::TOP_STAGES),
    }
}

pub fn player_analysis(snapshot: &Snapshot) -> PlayerAnalysisData {
    PlayerAnalysisData {
        positions: aggregates::position_counts(&snapshot.players, aggregates::TOP_POSITIONS),
        teams: aggregates::players_by_team(&snapshot.players, aggregates::TOP_TEAMS),
        coaches: aggregates::top_coaches(&snapshot.players, aggregates::TOP_COACHES),
    }
}
