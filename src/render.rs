use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols;
use ratatui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Clear, Dataset, Gauge, GraphType, List,
    ListItem, ListState, Paragraph, Row, Table, Wrap,
};

use crate::aggregates::{CountRow, HistogramBin, SeriesPoint};
use crate::state::{AppState, View, view_label};
use crate::views::{
    GoalsAttendanceData, MatchStatsData, OverviewData, PlayerAnalysisData, ViewData, WinnersData,
};

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load data. Please check if CSV files are present.";

pub fn draw(frame: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(5),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(state))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(26), Constraint::Min(1)])
        .split(chunks[1]);
    render_sidebar(frame, body[0], state.view);

    match (&state.view_data, state.load_error()) {
        (Some(data), _) => render_view(frame, body[1], data),
        (None, Some(err)) => render_load_error(frame, body[1], err),
        (None, None) => render_empty(frame, body[1], "No data"),
    }

    let console = Paragraph::new(console_text(state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[2]);

    let footer = Paragraph::new("1-5 View | j/k/↑/↓/Tab Cycle | ? Help | q Quit")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[3]);

    if state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let status = match state.snapshot() {
        Some(snapshot) => snapshot.summary(),
        None => "data unavailable".to_string(),
    };
    let line1 = format!("  .-.  WORLD CUP HISTORY | {}", view_label(state.view));
    let line2 = format!(" (   )  {status}");
    let line3 = "  `-'".to_string();
    format!("{line1}\n{line2}\n{line3}")
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No messages".to_string();
    }
    let start = state.logs.len().saturating_sub(3);
    state
        .logs
        .iter()
        .skip(start)
        .cloned()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_sidebar(frame: &mut Frame, area: Rect, active: View) {
    let items = View::ALL
        .iter()
        .enumerate()
        .map(|(idx, view)| ListItem::new(format!("{} {}", idx + 1, view_label(*view))))
        .collect::<Vec<_>>();
    let list = List::new(items)
        .block(Block::default().title("Navigation").borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    let mut list_state = ListState::default().with_selected(Some(active.index()));
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_view(frame: &mut Frame, area: Rect, data: &ViewData) {
    match data {
        ViewData::Overview(data) => render_overview(frame, area, data),
        ViewData::Winners(data) => render_winners(frame, area, data),
        ViewData::GoalsAttendance(data) => render_goals_attendance(frame, area, data),
        ViewData::MatchStats(data) => render_match_stats(frame, area, data),
        ViewData::PlayerAnalysis(data) => render_player_analysis(frame, area, data),
    }
}

fn render_load_error(frame: &mut Frame, area: Rect, err: &str) {
    let text = vec![
        Line::from(Span::styled(
            LOAD_FAILED_MESSAGE,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Error loading data: {err}")),
    ];
    let paragraph = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(Block::default().title("Error").borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn render_empty(frame: &mut Frame, area: Rect, text: &str) {
    let empty = Paragraph::new(text.to_string()).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(empty, area);
}

fn render_overview(frame: &mut Frame, area: Rect, data: &OverviewData) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(3)])
        .split(area);
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(25); 4])
        .split(rows[0]);

    let metrics = [
        (data.totals.tournaments.to_string(), "Tournaments"),
        (format_thousands(data.totals.goals), "Total Goals"),
        (format_thousands(data.totals.matches), "Total Matches"),
        (format_thousands(data.totals.teams), "Teams Participated"),
    ];
    for (card, (value, label)) in cards.iter().zip(metrics) {
        render_metric_card(frame, *card, &value, label);
    }

    let header = Row::new(vec![
        "Year",
        "Host",
        "Winner",
        "Runner-up",
        "Third",
        "Fourth",
        "Goals",
        "Attendance",
    ])
    .style(Style::default().add_modifier(Modifier::BOLD));
    let body = data.recent.iter().map(|t| {
        Row::new(vec![
            t.year.to_string(),
            t.host_country.clone(),
            t.winner.clone(),
            t.runner_up.clone(),
            t.third.clone().unwrap_or_else(|| "-".to_string()),
            t.fourth.clone().unwrap_or_else(|| "-".to_string()),
            t.goals_scored.to_string(),
            format_thousands(t.attendance),
        ])
    });
    let table = Table::new(
        body,
        [
            Constraint::Length(5),
            Constraint::Min(10),
            Constraint::Min(10),
            Constraint::Min(10),
            Constraint::Min(10),
            Constraint::Min(10),
            Constraint::Length(5),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .title("Recent World Cup Tournaments")
            .borders(Borders::ALL),
    );
    frame.render_widget(table, rows[1]);
}

fn render_metric_card(frame: &mut Frame, area: Rect, value: &str, label: &str) {
    let text = vec![
        Line::from(Span::styled(
            value.to_string(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            label.to_string(),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let card = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(card, area);
}

fn render_winners(frame: &mut Frame, area: Rect, data: &WinnersData) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);
    render_counts(
        frame,
        columns[0],
        "Most Successful Countries",
        &data.win_counts,
        Color::Blue,
        Direction::Horizontal,
    );

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(3)])
        .split(columns[1]);

    let host_text = if data.host_wins.count == 0 {
        "No host country has won its own tournament".to_string()
    } else {
        format!(
            "Host countries have won {} times: {}",
            data.host_wins.count,
            data.host_wins.countries.join(", ")
        )
    };
    let host = Paragraph::new(host_text)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title("Host Countries Performance")
                .borders(Borders::ALL),
        );
    frame.render_widget(host, right[0]);

    let timeline = data
        .timeline
        .iter()
        .map(|point| Row::new(vec![point.year.to_string(), point.winner.clone()]));
    let table = Table::new(timeline, [Constraint::Length(6), Constraint::Min(10)])
        .header(
            Row::new(vec!["Year", "Winner"]).style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(
            Block::default()
                .title("Winners Timeline")
                .borders(Borders::ALL),
        );
    frame.render_widget(table, right[1]);
}

fn render_goals_attendance(frame: &mut Frame, area: Rect, data: &GoalsAttendanceData) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);
    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[1]);

    render_series(
        frame,
        top[0],
        "Goals Scored Per Tournament",
        &data.goals,
        Color::Yellow,
    );
    render_series(
        frame,
        top[1],
        "Tournament Attendance Over Time",
        &data.attendance,
        Color::Green,
    );

    if data.scatter.is_empty() {
        render_empty(frame, bottom[0], "No tournaments");
    } else {
        let points = data
            .scatter
            .iter()
            .map(|p| (f64::from(p.goals_scored), p.attendance as f64))
            .collect::<Vec<_>>();
        let max_goals = data.scatter.iter().map(|p| p.goals_scored).max().unwrap_or(0);
        let max_attendance = data.scatter.iter().map(|p| p.attendance).max().unwrap_or(0);
        let x_max = padded_max(u64::from(max_goals));
        let y_max = padded_max(max_attendance);
        let datasets = vec![
            Dataset::default()
                .name("Tournaments")
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(Color::Magenta))
                .data(&points),
        ];
        let chart = Chart::new(datasets)
            .block(
                Block::default()
                    .title("Goals vs Attendance")
                    .borders(Borders::ALL),
            )
            .x_axis(
                Axis::default()
                    .title("Goals")
                    .bounds([0.0, x_max])
                    .labels(vec![Span::raw("0"), Span::raw(format!("{x_max:.0}"))]),
            )
            .y_axis(
                Axis::default()
                    .title("Attendance")
                    .bounds([0.0, y_max])
                    .labels(vec![Span::raw("0"), Span::raw(format_thousands(y_max as u64))]),
            );
        frame.render_widget(chart, bottom[0]);
    }

    let detail = data.scatter.iter().map(|p| {
        Row::new(vec![
            p.year.to_string(),
            p.host_country.clone(),
            p.winner.clone(),
            p.matches_played.to_string(),
            p.goals_scored.to_string(),
            format_thousands(p.attendance),
        ])
    });
    let table = Table::new(
        detail,
        [
            Constraint::Length(5),
            Constraint::Min(8),
            Constraint::Min(8),
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Length(10),
        ],
    )
    .header(
        Row::new(vec!["Year", "Host", "Winner", "M", "G", "Attendance"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(Block::default().title("Points").borders(Borders::ALL));
    frame.render_widget(table, bottom[1]);
}

fn render_series(frame: &mut Frame, area: Rect, title: &str, series: &[SeriesPoint], color: Color) {
    let (Some(first), Some(last)) = (series.first(), series.last()) else {
        render_empty(frame, area, "No tournaments");
        return;
    };
    let points = series
        .iter()
        .map(|p| (f64::from(p.year), p.value as f64))
        .collect::<Vec<_>>();
    let x_min = f64::from(first.year);
    let x_max = if last.year > first.year {
        f64::from(last.year)
    } else {
        x_min + 1.0
    };
    let y_max = padded_max(series.iter().map(|p| p.value).max().unwrap_or(0));

    let datasets = vec![
        Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(color))
            .data(&points),
    ];
    let chart = Chart::new(datasets)
        .block(Block::default().title(title.to_string()).borders(Borders::ALL))
        .x_axis(
            Axis::default()
                .title("Year")
                .bounds([x_min, x_max])
                .labels(vec![
                    Span::raw(first.year.to_string()),
                    Span::raw(last.year.to_string()),
                ]),
        )
        .y_axis(
            Axis::default()
                .bounds([0.0, y_max])
                .labels(vec![Span::raw("0"), Span::raw(format_thousands(y_max as u64))]),
        );
    frame.render_widget(chart, area);
}

fn render_match_stats(frame: &mut Frame, area: Rect, data: &MatchStatsData) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
        ])
        .split(area);
    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[1]);

    let body = data.highest_scoring.iter().map(|m| {
        Row::new(vec![
            m.year.to_string(),
            m.home_team.clone(),
            m.home_goals.to_string(),
            m.away_team.clone(),
            m.away_goals.to_string(),
            m.total_goals.to_string(),
        ])
    });
    let table = Table::new(
        body,
        [
            Constraint::Length(6),
            Constraint::Min(12),
            Constraint::Length(4),
            Constraint::Min(12),
            Constraint::Length(4),
            Constraint::Length(6),
        ],
    )
    .header(
        Row::new(vec!["Year", "Home", "HG", "Away", "AG", "Total"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(
        Block::default()
            .title("Highest Scoring Matches")
            .borders(Borders::ALL),
    );
    frame.render_widget(table, rows[0]);

    render_histogram(frame, middle[0], &data.histogram);

    let block = Block::default()
        .title("Home vs Away Goals")
        .borders(Borders::ALL);
    let inner = block.inner(middle[1]);
    frame.render_widget(block, middle[1]);
    if inner.height > 0 {
        let split = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(inner);
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(Color::LightRed).bg(Color::Green))
            .ratio(data.home_away.home_share())
            .label(format!(
                "Home {:.1}% / Away {:.1}%",
                data.home_away.home_share() * 100.0,
                data.home_away.away_share() * 100.0
            ));
        frame.render_widget(gauge, split[0]);
        let totals = Paragraph::new(format!(
            "Home team goals: {}\nAway team goals: {}\nTotal: {}",
            format_thousands(data.home_away.home),
            format_thousands(data.home_away.away),
            format_thousands(data.home_away.total())
        ));
        frame.render_widget(totals, split[1]);
    }

    render_counts(
        frame,
        rows[2],
        "Matches by Stage",
        &data.stages,
        Color::Red,
        Direction::Horizontal,
    );
}

fn render_histogram(frame: &mut Frame, area: Rect, bins: &[HistogramBin]) {
    let block = Block::default()
        .title("Distribution of Total Goals Per Match")
        .borders(Borders::ALL);
    if bins.is_empty() {
        let empty = Paragraph::new("No scored matches").block(block);
        frame.render_widget(empty, area);
        return;
    }
    let bars = bins
        .iter()
        .map(|bin| {
            Bar::default()
                .value(bin.count as u64)
                .label(Line::from(bin_label(bin)))
                .style(Style::default().fg(Color::Blue))
        })
        .collect::<Vec<_>>();
    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width(area, bins.len()))
        .bar_gap(1);
    frame.render_widget(chart, area);
}

fn render_player_analysis(frame: &mut Frame, area: Rect, data: &PlayerAnalysisData) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    render_counts(
        frame,
        top[0],
        "Most Common Player Positions",
        &data.positions,
        Color::Green,
        Direction::Vertical,
    );

    let coaches = data
        .coaches
        .iter()
        .map(|row| Row::new(vec![row.label.clone(), row.count.to_string()]));
    let table = Table::new(coaches, [Constraint::Min(16), Constraint::Length(12)])
        .header(
            Row::new(vec!["Coach", "Appearances"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(Block::default().title("Famous Coaches").borders(Borders::ALL));
    frame.render_widget(table, top[1]);

    render_counts(
        frame,
        rows[1],
        "Number of Players by Team (Top 20)",
        &data.teams,
        Color::Magenta,
        Direction::Vertical,
    );
}

fn render_counts(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    rows: &[CountRow],
    color: Color,
    direction: Direction,
) {
    let block = Block::default().title(title.to_string()).borders(Borders::ALL);
    if rows.is_empty() {
        let empty = Paragraph::new("Nothing to show").block(block);
        frame.render_widget(empty, area);
        return;
    }
    let bars = rows
        .iter()
        .map(|row| {
            Bar::default()
                .value(row.count as u64)
                .label(Line::from(row.label.clone()))
                .text_value(row.count.to_string())
                .style(Style::default().fg(color))
        })
        .collect::<Vec<_>>();
    let width = match direction {
        Direction::Horizontal => 1,
        Direction::Vertical => bar_width(area, rows.len()),
    };
    let gap = match direction {
        Direction::Horizontal => 0,
        Direction::Vertical => 1,
    };
    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .direction(direction)
        .bar_width(width)
        .bar_gap(gap);
    frame.render_widget(chart, area);
}

/// Widest bar that still fits `count` bars plus one-cell gaps inside a bordered area.
fn bar_width(area: Rect, count: usize) -> u16 {
    let inner = area.width.saturating_sub(2);
    let count = u16::try_from(count.max(1)).unwrap_or(u16::MAX);
    (inner / count).saturating_sub(1).clamp(1, 9)
}

fn bin_label(bin: &HistogramBin) -> String {
    if bin.start == bin.end {
        bin.start.to_string()
    } else {
        format!("{}-{}", bin.start, bin.end)
    }
}

fn padded_max(value: u64) -> f64 {
    (value as f64 * 1.1).max(1.0)
}

/// `1234567` → `1,234,567`.
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let mut lines = vec!["World Cup History - Help".to_string(), String::new()];
    lines.push("Views:".to_string());
    for (idx, view) in View::ALL.iter().enumerate() {
        lines.push(format!("  {}            {}", idx + 1, view_label(*view)));
    }
    lines.extend(
        [
            "",
            "Navigation:",
            "  j / ↓ / Tab  Next view",
            "  k / ↑        Previous view",
            "  ?            Toggle help",
            "  q / Esc      Quit",
        ]
        .map(str::to_string),
    );

    let help = Paragraph::new(lines.join("\n"))
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_grouping() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1_000), "1,000");
        assert_eq!(format_thousands(3_386_810), "3,386,810");
    }

    #[test]
    fn bar_width_fits_area() {
        let area = Rect::new(0, 0, 42, 10);
        assert_eq!(bar_width(area, 20), 1);
        assert_eq!(bar_width(area, 4), 9);
        assert_eq!(bar_width(Rect::new(0, 0, 2, 2), 5), 1);
    }

    #[test]
    fn bin_label_collapses_unit_bins() {
        let unit = HistogramBin { start: 3, end: 3, count: 1 };
        let wide = HistogramBin { start: 3, end: 5, count: 1 };
        assert_eq!(bin_label(&unit), "3");
        assert_eq!(bin_label(&wide), "3-5");
    }
}
