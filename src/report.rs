//! Plain-text rendering of view data, used by the `wc_summary` binary.

use std::fmt::Write as _;

use crate::aggregates::CountRow;
use crate::render::format_thousands;
use crate::state::view_label;
use crate::views::ViewData;

pub fn view_report(data: &ViewData) -> String {
    let mut out = String::new();
    let title = view_label(data.view());
    let _ = writeln!(out, "== {title} ==");
    match data {
        ViewData::Overview(d) => {
            let _ = writeln!(out, "Tournaments: {}", d.totals.tournaments);
            let _ = writeln!(out, "Total goals: {}", format_thousands(d.totals.goals));
            let _ = writeln!(out, "Total matches: {}", format_thousands(d.totals.matches));
            let _ = writeln!(out, "Teams participated: {}", format_thousands(d.totals.teams));
            let _ = writeln!(out, "Recent tournaments:");
            for t in &d.recent {
                let _ = writeln!(
                    out,
                    "  {} {:<14} winner={} runner-up={} third={} fourth={} goals={} attendance={}",
                    t.year,
                    t.host_country,
                    t.winner,
                    t.runner_up,
                    t.third.as_deref().unwrap_or("-"),
                    t.fourth.as_deref().unwrap_or("-"),
                    t.goals_scored,
                    format_thousands(t.attendance)
                );
            }
        }
        ViewData::Winners(d) => {
            write_counts(&mut out, "Most successful countries", &d.win_counts);
            let _ = writeln!(out, "Winners timeline:");
            for point in &d.timeline {
                let _ = writeln!(out, "  {} {}", point.year, point.winner);
            }
            let _ = writeln!(
                out,
                "Host countries have won {} times: {}",
                d.host_wins.count,
                d.host_wins.countries.join(", ")
            );
        }
        ViewData::GoalsAttendance(d) => {
            let _ = writeln!(out, "Goals per tournament:");
            for p in &d.goals {
                let _ = writeln!(out, "  {} {}", p.year, p.value);
            }
            let _ = writeln!(out, "Attendance per tournament:");
            for p in &d.attendance {
                let _ = writeln!(out, "  {} {}", p.year, format_thousands(p.value));
            }
            let _ = writeln!(out, "Goals vs attendance:");
            for p in &d.scatter {
                let _ = writeln!(
                    out,
                    "  {} goals={} attendance={} matches={} host={} winner={}",
                    p.year,
                    p.goals_scored,
                    format_thousands(p.attendance),
                    p.matches_played,
                    p.host_country,
                    p.winner
                );
            }
        }
        ViewData::MatchStats(d) => {
            let _ = writeln!(out, "Highest scoring matches:");
            for m in &d.highest_scoring {
                let _ = writeln!(
                    out,
                    "  {} {} {}-{} {} (total {})",
                    m.year, m.home_team, m.home_goals, m.away_goals, m.away_team, m.total_goals
                );
            }
            let _ = writeln!(out, "Total goals per match:");
            for bin in d.histogram.iter().filter(|bin| bin.count > 0) {
                let _ = writeln!(out, "  {:>2}-{:<2} {}", bin.start, bin.end, bin.count);
            }
            let _ = writeln!(
                out,
                "Home goals: {} ({:.1}%)  Away goals: {} ({:.1}%)",
                format_thousands(d.home_away.home),
                d.home_away.home_share() * 100.0,
                format_thousands(d.home_away.away),
                d.home_away.away_share() * 100.0
            );
            write_counts(&mut out, "Matches by stage", &d.stages);
        }
        ViewData::PlayerAnalysis(d) => {
            write_counts(&mut out, "Player positions", &d.positions);
            write_counts(&mut out, "Players by team", &d.teams);
            write_counts(&mut out, "Coaching appearances", &d.coaches);
        }
    }
    out
}

fn write_counts(out: &mut String, title: &str, rows: &[CountRow]) {
    let _ = writeln!(out, "{title}:");
    if rows.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for row in rows {
        let _ = writeln!(out, "  {:<28} {}", row.label, row.count);
    }
}
