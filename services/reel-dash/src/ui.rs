// services/reel-dash/src/ui.rs
//
// Rendering: header, stat boxes, top-actor chart, recent activity,
// records table, input bar, activity log, key help
//

use ratatui::{prelude::*, widgets::*};

use crate::pipeline::{DerivedView, FilterMode};
use crate::state::{Connection, DashboardState, InputMode, LogLevel};

// Amber on slate
mod colors {
    use ratatui::style::Color;

    pub const AMBER: Color = Color::Rgb(251, 191, 36);
    pub const DARK_AMBER: Color = Color::Rgb(180, 120, 10);
    pub const WHITE: Color = Color::Rgb(241, 245, 249);
    pub const SILVER: Color = Color::Rgb(148, 163, 184);
    pub const RED: Color = Color::Rgb(239, 68, 68);
    pub const GREEN: Color = Color::Rgb(132, 204, 22);
    pub const BG_DARK: Color = Color::Rgb(2, 6, 23);
    pub const BG_PANEL: Color = Color::Rgb(15, 23, 42);
    pub const BG_SELECTED: Color = Color::Rgb(51, 65, 85);
}

pub fn draw(frame: &mut Frame, state: &DashboardState, view: &DerivedView, endpoint: &str) {
    let area = frame.area();

    frame.render_widget(
        Block::default().style(Style::default().bg(colors::BG_DARK)),
        area,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Header
            Constraint::Length(5),  // Stats
            Constraint::Min(12),    // Sidebar + records
            Constraint::Length(3),  // Input bar
            Constraint::Length(7),  // Activity log
            Constraint::Length(3),  // Footer
        ])
        .split(area);

    draw_header(frame, chunks[0], state, endpoint);
    draw_stats_panel(frame, chunks[1], view);
    draw_main_content(frame, chunks[2], state, view);
    draw_input_bar(frame, chunks[3], state);
    draw_activity_panel(frame, chunks[4], state);
    draw_footer(frame, chunks[5], state.input_mode);
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(colors::AMBER).bold(),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::SILVER))
        .border_type(BorderType::Rounded)
        .style(Style::default().bg(colors::BG_PANEL))
}

fn draw_header(frame: &mut Frame, area: Rect, state: &DashboardState, endpoint: &str) {
    let (mode_text, mode_color) = match state.connection {
        Connection::Demo => ("DEMO", colors::AMBER),
        Connection::Live => ("LIVE", colors::GREEN),
        Connection::Disconnected => ("DISCONNECTED", colors::RED),
    };

    let title = Line::from(vec![
        Span::styled(
            " REEL-DASH ",
            Style::default().fg(colors::BG_DARK).bg(colors::AMBER).bold(),
        ),
        Span::raw("  "),
        Span::styled(
            "ACTOR & MOVIE RECORDS",
            Style::default().fg(colors::WHITE).bold(),
        ),
        Span::raw("  "),
        Span::styled(
            format!("[{}]", mode_text),
            Style::default().fg(mode_color).bold(),
        ),
        Span::raw("  "),
        Span::styled(endpoint, Style::default().fg(colors::SILVER)),
    ]);

    let header = Paragraph::new(title)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(colors::DARK_AMBER))
                .style(Style::default().bg(colors::BG_DARK)),
        );

    frame.render_widget(header, area);
}

fn draw_stats_panel(frame: &mut Frame, area: Rect, view: &DerivedView) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    draw_stat_box(frame, chunks[0], "RECORDS", &view.total_count.to_string(), colors::WHITE);
    draw_stat_box(frame, chunks[1], "ACTORS", &view.unique_actor_count.to_string(), colors::AMBER);
    draw_stat_box(
        frame,
        chunks[2],
        "TOP ACTORS",
        &view.top_actors.len().to_string(),
        colors::AMBER,
    );
    draw_stat_box(frame, chunks[3], "SHOWING", &view.filtered_count.to_string(), colors::GREEN);
}

fn draw_stat_box(frame: &mut Frame, area: Rect, label: &str, value: &str, value_color: Color) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::SILVER))
        .border_type(BorderType::Rounded)
        .style(Style::default().bg(colors::BG_PANEL));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let text = vec![
        Line::from(Span::styled(
            label,
            Style::default().fg(colors::SILVER).add_modifier(Modifier::DIM),
        )),
        Line::from(Span::styled(
            value,
            Style::default().fg(value_color).add_modifier(Modifier::BOLD),
        )),
    ];

    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), inner);
}

fn draw_main_content(frame: &mut Frame, area: Rect, state: &DashboardState, view: &DerivedView) {
    if state.sidebar_collapsed {
        draw_records_panel(frame, area, state, view);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(area);

    let sidebar = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[0]);

    draw_top_actors(frame, sidebar[0], view);
    draw_recent_activity(frame, sidebar[1], view);
    draw_records_panel(frame, chunks[1], state, view);
}

fn draw_top_actors(frame: &mut Frame, area: Rect, view: &DerivedView) {
    let block = panel("TOP ACTORS");

    if view.top_actors.is_empty() {
        let empty = Paragraph::new(Span::styled("No data yet", Style::default().fg(colors::SILVER)))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let count = view.top_actors.len() as u16;
    let inner_width = block.inner(area).width;
    let bar_width = (inner_width.saturating_sub(count) / count).clamp(3, 14);

    let bars: Vec<Bar> = view
        .top_actors
        .iter()
        .map(|point| {
            Bar::default()
                .value(point.value)
                .label(Line::from(truncate(&point.label, bar_width as usize)))
                .style(Style::default().fg(colors::AMBER))
                .value_style(Style::default().fg(colors::BG_DARK).bg(colors::AMBER).bold())
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(1)
        .label_style(Style::default().fg(colors::SILVER));

    frame.render_widget(chart, area);
}

fn draw_recent_activity(frame: &mut Frame, area: Rect, view: &DerivedView) {
    let items: Vec<ListItem> = view
        .recent_activity
        .iter()
        .map(|record| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{} ", record.created_at.date_label()),
                    Style::default().fg(colors::SILVER).add_modifier(Modifier::DIM),
                ),
                Span::styled(&record.actor_name, Style::default().fg(colors::WHITE)),
                Span::styled(" - ", Style::default().fg(colors::SILVER)),
                Span::styled(&record.movie_name, Style::default().fg(colors::SILVER)),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items).block(panel("RECENT ACTIVITY")), area);
}

fn draw_records_panel(frame: &mut Frame, area: Rect, state: &DashboardState, view: &DerivedView) {
    let title = format!(
        "RECORDS - {} total - Page {}/{} - Sort: {}",
        view.filtered_count,
        view.page,
        view.page_count,
        state.params.sort_mode.label()
    );
    let block = panel(&title);

    if view.page_rows.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "No records found. Press [A] to add your first entry",
                Style::default().fg(colors::SILVER).add_modifier(Modifier::ITALIC),
            )),
        ])
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let rows: Vec<Row> = view
        .page_rows
        .iter()
        .map(|record| {
            Row::new(vec![
                Cell::from(Span::styled(
                    &record.actor_name,
                    Style::default().fg(colors::WHITE).bold(),
                )),
                Cell::from(Span::styled(&record.movie_name, Style::default().fg(colors::SILVER))),
                Cell::from(Span::styled(
                    record.created_at.date_label(),
                    Style::default().fg(colors::SILVER).add_modifier(Modifier::DIM),
                )),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(40),
            Constraint::Percentage(40),
            Constraint::Length(12),
        ],
    )
    .header(
        Row::new(vec![
            Cell::from(Span::styled("ACTOR NAME", Style::default().fg(colors::AMBER).bold())),
            Cell::from(Span::styled("MOVIE NAME", Style::default().fg(colors::AMBER).bold())),
            Cell::from(Span::styled("ADDED", Style::default().fg(colors::AMBER).bold())),
        ])
        .bottom_margin(1),
    )
    .block(block)
    .row_highlight_style(Style::default().bg(colors::BG_SELECTED))
    .highlight_symbol("> ");

    let mut table_state = TableState::default().with_selected(Some(state.selected));
    frame.render_stateful_widget(table, area, &mut table_state);
}

fn draw_input_bar(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let label = Style::default().fg(colors::SILVER);
    let value = Style::default().fg(colors::WHITE).bold();
    let active = Style::default().fg(colors::BG_DARK).bg(colors::AMBER).bold();

    let (title, line) = match state.input_mode {
        InputMode::Normal => {
            let filter = match state.params.filter_mode {
                FilterMode::All => "All".to_string(),
                mode => format!("{} contains \"{}\"", mode.label(), state.params.filter_text),
            };
            let mut spans = vec![
                Span::styled("Filter: ", label),
                Span::styled(filter, value),
            ];
            if let Some(path) = &state.last_export {
                spans.push(Span::raw("  |  "));
                spans.push(Span::styled("Last export: ", label));
                spans.push(Span::styled(path.as_str(), value));
            }
            ("VIEW", Line::from(spans))
        }
        InputMode::EditingFilter => (
            "SEARCH",
            Line::from(vec![
                Span::styled(format!("{}: ", state.params.filter_mode.label()), label),
                Span::styled(format!("{}_", state.params.filter_text), active),
            ]),
        ),
        InputMode::EditingActor | InputMode::EditingMovie => {
            let (actor_style, movie_style) = if state.input_mode == InputMode::EditingActor {
                (active, value)
            } else {
                (value, active)
            };
            (
                "ADD RECORD",
                Line::from(vec![
                    Span::styled("Actor: ", label),
                    Span::styled(format!("{}_", state.actor_input), actor_style),
                    Span::raw("   "),
                    Span::styled("Movie: ", label),
                    Span::styled(format!("{}_", state.movie_input), movie_style),
                ]),
            )
        }
    };

    frame.render_widget(Paragraph::new(line).block(panel(title)), area);
}

fn draw_activity_panel(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let logs: Vec<Line> = state
        .activity_log
        .iter()
        .rev()
        .take(20)
        .map(|entry| {
            let (prefix, color) = match entry.level {
                LogLevel::Error => ("[ERR]", colors::RED),
                LogLevel::Warn => ("[WRN]", colors::AMBER),
                LogLevel::Info => ("[INF]", colors::GREEN),
            };

            Line::from(vec![
                Span::styled(
                    format!("{} ", entry.timestamp.format("%H:%M:%S")),
                    Style::default().fg(colors::SILVER).add_modifier(Modifier::DIM),
                ),
                Span::styled(format!("{} ", prefix), Style::default().fg(color)),
                Span::styled(&entry.message, Style::default().fg(colors::WHITE)),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(logs)
        .block(panel("ACTIVITY LOG"))
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

fn draw_footer(frame: &mut Frame, area: Rect, mode: InputMode) {
    let keys: &[(&str, &str)] = match mode {
        InputMode::Normal => &[
            ("Q", "Quit"),
            ("A", "Add"),
            ("D", "Delete"),
            ("F", "Filter"),
            ("/", "Search"),
            ("S", "Sort"),
            ("<-/->", "Page"),
            ("E", "Export"),
            ("R", "Refresh"),
            ("C", "Sidebar"),
        ],
        InputMode::EditingFilter => &[("ENTER", "Apply"), ("ESC", "Done")],
        InputMode::EditingActor | InputMode::EditingMovie => {
            &[("TAB", "Switch field"), ("ENTER", "Save"), ("ESC", "Cancel")]
        }
    };

    let mut spans = Vec::with_capacity(keys.len() * 3);
    for (key, action) in keys {
        spans.push(Span::styled(
            format!(" [{}] ", key),
            Style::default().fg(colors::BG_DARK).bg(colors::AMBER),
        ));
        spans.push(Span::styled(format!(" {} ", action), Style::default().fg(colors::SILVER)));
        spans.push(Span::raw(" "));
    }

    let footer = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(colors::DARK_AMBER))
                .style(Style::default().bg(colors::BG_DARK)),
        );

    frame.render_widget(footer, area);
}

fn truncate(label: &str, width: usize) -> String {
    label.chars().take(width).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use svckit::{Record, RecordId, Timestamp};

    use crate::pipeline::{self, ViewParams};

    fn records() -> Vec<Record> {
        vec![
            Record {
                id: RecordId::Number(1),
                actor_name: "Tabu".to_string(),
                movie_name: "Maqbool".to_string(),
                created_at: Timestamp::parse("2024-01-01"),
            },
            Record {
                id: RecordId::Number(2),
                actor_name: "Irrfan Khan".to_string(),
                movie_name: "The Lunchbox".to_string(),
                created_at: Timestamp::parse("2024-02-01"),
            },
        ]
    }

    fn render(state: &DashboardState, view: &DerivedView) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 40)).unwrap();
        terminal
            .draw(|frame| draw(frame, state, view, "http://localhost:8080"))
            .unwrap();

        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_renders_rows_and_page_indicator() {
        let state = DashboardState::new(10, Connection::Live);
        let view = pipeline::compute(&records(), &ViewParams::default());
        let screen = render(&state, &view);

        assert!(screen.contains("Maqbool"));
        assert!(screen.contains("The Lunchbox"));
        assert!(screen.contains("Page 1/1"));
        assert!(screen.contains("[LIVE]"));
    }

    #[test]
    fn test_renders_empty_state() {
        let mut state = DashboardState::new(10, Connection::Disconnected);
        state.sidebar_collapsed = true;
        let view = pipeline::compute(&[], &ViewParams::default());
        let screen = render(&state, &view);

        assert!(screen.contains("No records found"));
        assert!(screen.contains("[DISCONNECTED]"));
    }

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("Mammootty", 4), "Mamm");
        assert_eq!(truncate("Tabu", 10), "Tabu");
    }
}
