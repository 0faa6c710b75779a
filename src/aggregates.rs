use std::collections::{HashMap, HashSet};

use crate::dataset::{Match, PlayerAppearance, Tournament};

pub const RECENT_TOURNAMENTS: usize = 5;
pub const TOP_WINNERS: usize = 10;
pub const TOP_SCORING_MATCHES: usize = 10;
pub const HISTOGRAM_BINS: usize = 20;
pub const TOP_STAGES: usize = 10;
pub const TOP_POSITIONS: usize = 10;
pub const TOP_TEAMS: usize = 20;
pub const TOP_COACHES: usize = 10;

/// One entry of a descending frequency table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountRow {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OverviewTotals {
    pub tournaments: usize,
    pub goals: u64,
    pub matches: u64,
    pub teams: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentTournament {
    pub year: u16,
    pub host_country: String,
    pub winner: String,
    pub runner_up: String,
    pub third: Option<String>,
    pub fourth: Option<String>,
    pub goals_scored: u32,
    pub attendance: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelinePoint {
    pub year: u16,
    pub winner: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HostWins {
    pub count: usize,
    /// Host-and-winner countries in table order; repeat winners appear once per title.
    pub countries: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesPoint {
    pub year: u16,
    pub value: u64,
}

/// One tournament in the goals-vs-attendance scatter. No coefficient is
/// derived from these points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalsAttendancePoint {
    pub goals_scored: u32,
    pub attendance: u64,
    pub year: u16,
    pub matches_played: u32,
    pub host_country: String,
    pub winner: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringMatch {
    pub year: u16,
    pub home_team: String,
    pub home_goals: u32,
    pub away_team: String,
    pub away_goals: u32,
    pub total_goals: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistogramBin {
    /// Inclusive bounds.
    pub start: u64,
    pub end: u64,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HomeAwayTotals {
    pub home: u64,
    pub away: u64,
}

impl HomeAwayTotals {
    pub fn total(&self) -> u64 {
        self.home + self.away
    }

    /// Fraction of goals scored by the home side, 0.0 when nothing was scored.
    pub fn home_share(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.home as f64 / total as f64
        }
    }

    pub fn away_share(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            1.0 - self.home_share()
        }
    }
}

pub fn tournament_count(tournaments: &[Tournament]) -> usize {
    tournaments.len()
}

pub fn total_goals(tournaments: &[Tournament]) -> u64 {
    tournaments.iter().map(|t| u64::from(t.goals_scored)).sum()
}

pub fn total_matches(tournaments: &[Tournament]) -> u64 {
    tournaments.iter().map(|t| u64::from(t.matches_played)).sum()
}

pub fn total_teams(tournaments: &[Tournament]) -> u64 {
    tournaments.iter().map(|t| u64::from(t.qualified_teams)).sum()
}

pub fn overview_totals(tournaments: &[Tournament]) -> OverviewTotals {
    OverviewTotals {
        tournaments: tournament_count(tournaments),
        goals: total_goals(tournaments),
        matches: total_matches(tournaments),
        teams: total_teams(tournaments),
    }
}

/// The last `n` tournaments in table order, which the source files keep chronological.
pub fn recent_tournaments(tournaments: &[Tournament], n: usize) -> Vec<RecentTournament> {
    let start = tournaments.len().saturating_sub(n);
    tournaments[start..]
        .iter()
        .map(|t| RecentTournament {
            year: t.year,
            host_country: t.host_country.clone(),
            winner: t.winner.clone(),
            runner_up: t.runner_up.clone(),
            third: t.third.clone(),
            fourth: t.fourth.clone(),
            goals_scored: t.goals_scored,
            attendance: t.attendance,
        })
        .collect()
}

/// Titles per country, most successful first. Not truncated.
pub fn win_counts_by_country(tournaments: &[Tournament]) -> Vec<CountRow> {
    value_counts(tournaments.iter().map(|t| t.winner.as_str()))
}

pub fn winners_timeline(tournaments: &[Tournament]) -> Vec<TimelinePoint> {
    tournaments
        .iter()
        .map(|t| TimelinePoint {
            year: t.year,
            winner: t.winner.clone(),
        })
        .collect()
}

pub fn host_country_wins(tournaments: &[Tournament]) -> HostWins {
    let countries = tournaments
        .iter()
        .filter(|t| t.host_country == t.winner)
        .map(|t| t.host_country.clone())
        .collect::<Vec<_>>();
    HostWins {
        count: countries.len(),
        countries,
    }
}

pub fn goals_per_tournament(tournaments: &[Tournament]) -> Vec<SeriesPoint> {
    by_year(tournaments, |t| u64::from(t.goals_scored))
}

pub fn attendance_per_tournament(tournaments: &[Tournament]) -> Vec<SeriesPoint> {
    by_year(tournaments, |t| t.attendance)
}

pub fn goals_vs_attendance(tournaments: &[Tournament]) -> Vec<GoalsAttendancePoint> {
    tournaments
        .iter()
        .map(|t| GoalsAttendancePoint {
            goals_scored: t.goals_scored,
            attendance: t.attendance,
            year: t.year,
            matches_played: t.matches_played,
            host_country: t.host_country.clone(),
            winner: t.winner.clone(),
        })
        .collect()
}

/// Top `n` scored matches by combined goals. Equal totals keep file order.
pub fn highest_scoring_matches(matches: &[Match], n: usize) -> Vec<ScoringMatch> {
    let mut rows = matches
        .iter()
        .filter_map(|m| {
            let (Some(home_goals), Some(away_goals)) = (m.home_goals, m.away_goals) else {
                return None;
            };
            Some(ScoringMatch {
                year: m.year,
                home_team: m.home_team.clone(),
                home_goals,
                away_team: m.away_team.clone(),
                away_goals,
                total_goals: u64::from(home_goals) + u64::from(away_goals),
            })
        })
        .collect::<Vec<_>>();
    rows.sort_by(|a, b| b.total_goals.cmp(&a.total_goals));
    rows.truncate(n);
    rows
}

/// Combined goals of every match with both scores recorded, in file order.
pub fn total_goals_values(matches: &[Match]) -> Vec<u64> {
    matches.iter().filter_map(Match::total_goals).collect()
}

/// Bucket values into exactly `bins` contiguous integer ranges starting at
/// the smallest value. The width is the smallest integer that lets `bins`
/// ranges cover the largest value.
pub fn goals_histogram(values: &[u64], bins: usize) -> Vec<HistogramBin> {
    let (Some(&min), Some(&max)) = (values.iter().min(), values.iter().max()) else {
        return Vec::new();
    };
    if bins == 0 {
        return Vec::new();
    }

    let span = (max - min).saturating_add(1);
    let width = span.div_ceil(bins as u64).max(1);
    let mut out = (0..bins as u64)
        .map(|idx| {
            let start = min.saturating_add(idx.saturating_mul(width));
            HistogramBin {
                start,
                end: start.saturating_add(width - 1),
                count: 0,
            }
        })
        .collect::<Vec<_>>();
    for value in values {
        let idx = usize::try_from((value - min) / width).unwrap_or(usize::MAX);
        out[idx.min(bins - 1)].count += 1;
    }
    out
}

pub fn home_away_goal_totals(matches: &[Match]) -> HomeAwayTotals {
    matches
        .iter()
        .filter_map(|m| Some((m.home_goals?, m.away_goals?)))
        .fold(HomeAwayTotals::default(), |mut acc, (home, away)| {
            acc.home += u64::from(home);
            acc.away += u64::from(away);
            acc
        })
}

/// Stage frequencies over matches that have both scores recorded.
pub fn matches_by_stage(matches: &[Match], n: usize) -> Vec<CountRow> {
    let keys = matches
        .iter()
        .filter(|m| m.has_score())
        .filter_map(|m| m.stage.as_deref());
    top_n(value_counts(keys), n)
}

pub fn position_counts(players: &[PlayerAppearance], n: usize) -> Vec<CountRow> {
    let keys = named(players).filter_map(|p| p.position.as_deref());
    top_n(value_counts(keys), n)
}

/// Distinct player names per team code, not appearance rows.
pub fn players_by_team(players: &[PlayerAppearance], n: usize) -> Vec<CountRow> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    let mut rows: Vec<CountRow> = Vec::new();

    for p in named(players) {
        let (Some(team), Some(name)) = (p.team_initials.as_deref(), p.player_name.as_deref())
        else {
            continue;
        };
        let pos = *index.entry(team).or_insert_with(|| {
            rows.push(CountRow {
                label: team.to_string(),
                count: 0,
            });
            rows.len() - 1
        });
        if seen.insert((team, name)) {
            rows[pos].count += 1;
        }
    }

    rows.sort_by(|a, b| b.count.cmp(&a.count));
    top_n(rows, n)
}

/// Coaching appearances: one row per named player per match.
pub fn top_coaches(players: &[PlayerAppearance], n: usize) -> Vec<CountRow> {
    let keys = named(players).filter_map(|p| p.coach_name.as_deref());
    top_n(value_counts(keys), n)
}

pub fn top_n(mut rows: Vec<CountRow>, n: usize) -> Vec<CountRow> {
    rows.truncate(n);
    rows
}

/// Frequency table sorted by count descending. The sort is stable, so equal
/// counts stay in first-seen order.
fn value_counts<'a>(keys: impl IntoIterator<Item = &'a str>) -> Vec<CountRow> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut rows: Vec<CountRow> = Vec::new();
    for key in keys {
        match index.get(key) {
            Some(&pos) => rows[pos].count += 1,
            None => {
                index.insert(key, rows.len());
                rows.push(CountRow {
                    label: key.to_string(),
                    count: 1,
                });
            }
        }
    }
    rows.sort_by(|a, b| b.count.cmp(&a.count));
    rows
}

fn named(players: &[PlayerAppearance]) -> impl Iterator<Item = &PlayerAppearance> {
    players.iter().filter(|p| p.is_named())
}

fn by_year(tournaments: &[Tournament], value: impl Fn(&Tournament) -> u64) -> Vec<SeriesPoint> {
    let mut points = tournaments
        .iter()
        .map(|t| SeriesPoint {
            year: t.year,
            value: value(t),
        })
        .collect::<Vec<_>>();
    points.sort_by_key(|p| p.year);
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(rows: &[CountRow]) -> Vec<(&str, usize)> {
        rows.iter().map(|r| (r.label.as_str(), r.count)).collect()
    }

    #[test]
    fn value_counts_keeps_first_seen_order_on_ties() {
        let rows = value_counts(["b", "a", "c", "a", "b", "d"]);
        assert_eq!(keys(&rows), vec![("b", 2), ("a", 2), ("c", 1), ("d", 1)]);
    }

    #[test]
    fn histogram_width_one_for_small_span() {
        let bins = goals_histogram(&[0, 1, 1, 5], 20);
        assert_eq!(bins.len(), 20);
        assert_eq!(bins[0], HistogramBin { start: 0, end: 0, count: 1 });
        assert_eq!(bins[1].count, 2);
        assert_eq!(bins[5].count, 1);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 4);
    }

    #[test]
    fn histogram_widens_bins_for_large_span() {
        let bins = goals_histogram(&[10, 49, 50], 20);
        // span 41 over 20 bins needs width 3
        assert_eq!(bins[0].start, 10);
        assert_eq!(bins[0].end, 12);
        assert_eq!(bins[19].end, 69);
        assert_eq!(bins[13].count, 2);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 3);
    }

    #[test]
    fn histogram_of_nothing_is_empty() {
        assert!(goals_histogram(&[], 20).is_empty());
        assert!(goals_histogram(&[3], 0).is_empty());
    }

    #[test]
    fn shares_handle_goalless_data() {
        let totals = HomeAwayTotals::default();
        assert_eq!(totals.home_share(), 0.0);
        assert_eq!(totals.away_share(), 0.0);
        let totals = HomeAwayTotals { home: 3, away: 1 };
        assert!((totals.home_share() - 0.75).abs() < 1e-9);
        assert!((totals.away_share() - 0.25).abs() < 1e-9);
    }
}
