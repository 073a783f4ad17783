//! Rendering.
//!
//! Layout:
//!   ┌ sidebar ─┬─── header (industry, market, problem, solution points) ───┐
//!   │ 🌾 Food  │─── product input ──────────────────────────────────────────│
//!   │ 👔 ...   │─── stepper: Intake › Mapping › ... › Notarization ─────────│
//!   │          │─── agent cards (3 × 2) ─────────┬─── orchestration log ────│
//!   │ $700B+   │─── summary (after completion) ──┴──────────────────────────│
//!   ├──────────┴──── footer (key bindings) ────────────────────────────────┤
//!
//! Every decision shown here comes from `veripura_core::present`.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use veripura_contracts::industry::Industry;
use veripura_core::present::{agent_cards, header, stepper, summary, CardStatus};
use veripura_ref_trade::catalog::{industry_config, TOTAL_MARKET};

use crate::app::{App, Focus};

const ACCENT: Color = Color::Green;

pub fn ui(f: &mut Frame, app: &App) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(3)])
        .split(f.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(28), Constraint::Min(40)])
        .split(outer[0]);

    render_sidebar(f, columns[0], app);

    let show_summary = summary(
        app.controller.result(),
        app.controller.is_in_progress(),
        app.hitm_threshold,
    )
    .is_some();

    let mut constraints = vec![
        Constraint::Length(7),
        Constraint::Length(3),
        Constraint::Length(4),
        Constraint::Min(8),
    ];
    if show_summary {
        constraints.push(Constraint::Length(9));
    }
    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(columns[1]);

    render_header(f, main[0], app);
    render_input(f, main[1], app);
    render_stepper(f, main[2], app);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(main[3]);
    render_cards(f, body[0], app);
    render_log(f, body[1], app);

    if show_summary {
        render_summary(f, main[4], app);
    }

    render_footer(f, outer[1], app);
}

fn dim() -> Style {
    Style::default().fg(Color::DarkGray)
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(dim())
}

// ── Sidebar ───────────────────────────────────────────────────────────────────

fn render_sidebar(f: &mut Frame, area: Rect, app: &App) {
    let mut items: Vec<ListItem> = vec![
        ListItem::new(Span::styled(
            " VeriPura",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        ListItem::new(Span::styled(" Multi-Agent Compliance", dim())),
        ListItem::new(""),
    ];

    for industry in Industry::ALL {
        let config = industry_config(industry);
        let style = if industry == app.selected {
            Style::default()
                .fg(Color::Black)
                .bg(ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        items.push(ListItem::new(Span::styled(
            format!(" {} {}", config.icon, industry.label()),
            style,
        )));
    }

    items.push(ListItem::new(""));
    items.push(ListItem::new(Span::styled(" Total market", dim())));
    items.push(ListItem::new(Span::styled(
        format!(" {TOTAL_MARKET}"),
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    )));

    let border = if app.focus == Focus::Sidebar {
        Style::default().fg(ACCENT)
    } else {
        dim()
    };
    let list = List::new(items).block(
        Block::default()
            .title(" Industries ")
            .borders(Borders::ALL)
            .border_style(border),
    );
    f.render_widget(list, area);
}

// ── Header and input ──────────────────────────────────────────────────────────

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let view = header(app.selected, industry_config(app.selected));

    let mut lines = vec![
        Line::from(vec![
            Span::styled(view.title, Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(format!("   {}", view.market_size), Style::default().fg(ACCENT)),
        ]),
        Line::from(Span::styled(view.blurb, Style::default().fg(Color::Gray))),
    ];
    for point in view.solution_points {
        lines.push(Line::from(vec![
            Span::styled("  ✓ ", Style::default().fg(ACCENT)),
            Span::raw(point),
        ]));
    }

    let paragraph = Paragraph::new(lines)
        .block(panel("Industry"))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn render_input(f: &mut Frame, area: Rect, app: &App) {
    let running = app.controller.is_in_progress();
    let mut spans = vec![Span::styled(" Product: ", Style::default().fg(Color::Gray))];

    if app.input.is_empty() {
        spans.push(Span::styled("Enter product description...", dim()));
    } else {
        spans.push(Span::raw(app.input.as_str()));
    }
    if app.focus == Focus::Input && !running {
        spans.push(Span::styled("▏", Style::default().fg(ACCENT)));
    }

    spans.push(Span::raw("   "));
    if running {
        spans.push(Span::styled(
            "Processing...",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
    } else if let Some(notice) = &app.notice {
        spans.push(Span::styled(notice.as_str(), Style::default().fg(Color::Red)));
    } else {
        spans.push(Span::styled("[Enter] Run Multi-Agent Simulation", dim()));
    }

    let border = if app.focus == Focus::Input {
        Style::default().fg(ACCENT)
    } else {
        dim()
    };
    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .title(" Document Intake ")
            .borders(Borders::ALL)
            .border_style(border),
    );
    f.render_widget(paragraph, area);
}

// ── Stepper ───────────────────────────────────────────────────────────────────

fn render_stepper(f: &mut Frame, area: Rect, app: &App) {
    let mut labels: Vec<Span> = Vec::new();
    let mut descriptions: Vec<Span> = Vec::new();

    for (i, (stage, reached)) in stepper(app.controller.step()).into_iter().enumerate() {
        if i > 0 {
            labels.push(Span::styled(" › ", dim()));
            descriptions.push(Span::raw("   "));
        }
        let (marker, style) = if reached {
            ("●", Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
        } else {
            ("○", dim())
        };
        let label = format!("{marker} {} {}", stage.ordinal(), stage.label());
        let width = label.chars().count().max(stage.description().chars().count());
        labels.push(Span::styled(format!("{label:<width$}"), style));
        descriptions.push(Span::styled(
            format!("{:<width$}", stage.description()),
            if reached { Style::default().fg(Color::Gray) } else { dim() },
        ));
    }

    let paragraph = Paragraph::new(vec![Line::from(labels), Line::from(descriptions)])
        .block(panel("Workflow"));
    f.render_widget(paragraph, area);
}

// ── Agent cards ───────────────────────────────────────────────────────────────

fn render_cards(f: &mut Frame, area: Rect, app: &App) {
    let block = panel("Agents");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(inner);

    let cards = agent_cards(
        app.controller.step(),
        app.controller.result(),
        app.hitm_threshold,
    );

    for (row, pair) in rows.iter().zip(cards.chunks(2)) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(*row);

        for (area, card) in cols.iter().zip(pair) {
            let (status_color, border) = match card.status {
                CardStatus::Idle => (Color::DarkGray, dim()),
                CardStatus::Processing => (Color::Yellow, Style::default().fg(Color::Yellow)),
                CardStatus::Done => (ACCENT, Style::default().fg(ACCENT)),
            };

            let mut lines = vec![Line::from(Span::styled(
                card.status.label(),
                Style::default().fg(status_color).add_modifier(Modifier::BOLD),
            ))];
            match &card.content {
                Some(content) if card.status == CardStatus::Done => {
                    for text in content.lines() {
                        let style = if text.starts_with("ALERT") {
                            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
                        } else {
                            Style::default().fg(Color::White)
                        };
                        lines.push(Line::from(Span::styled(text.to_string(), style)));
                    }
                }
                _ => lines.push(Line::from(Span::styled(card.card.description(), dim()))),
            }

            let paragraph = Paragraph::new(lines)
                .block(
                    Block::default()
                        .title(format!(" {} {} ", card.card.icon(), card.card.name()))
                        .borders(Borders::ALL)
                        .border_style(border),
                )
                .wrap(Wrap { trim: true });
            f.render_widget(paragraph, *area);
        }
    }
}

// ── Log ───────────────────────────────────────────────────────────────────────

fn render_log(f: &mut Frame, area: Rect, app: &App) {
    let logs = app.controller.logs();
    let block = panel("Live Orchestration Log");

    if logs.is_empty() {
        let p = Paragraph::new(Span::styled(" Waiting for input...", dim())).block(block);
        f.render_widget(p, area);
        return;
    }

    // Keep the newest lines in view.
    let visible = area.height.saturating_sub(2) as usize;
    let skip = logs.len().saturating_sub(visible);

    let items: Vec<ListItem> = logs
        .iter()
        .skip(skip)
        .map(|line| {
            let style = if line.is_alert() {
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(ACCENT)
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!(" [{}] ", line.clock()), dim()),
                Span::styled(line.text.as_str(), style),
            ]))
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}

// ── Summary ───────────────────────────────────────────────────────────────────

fn render_summary(f: &mut Frame, area: Rect, app: &App) {
    let Some(view) = summary(
        app.controller.result(),
        app.controller.is_in_progress(),
        app.hitm_threshold,
    ) else {
        return;
    };

    let mut badges = vec![Span::raw(" ")];
    for badge in view.badges {
        badges.push(Span::styled(
            format!("[{badge}]"),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ));
        badges.push(Span::raw(" "));
    }
    if let Some(hash) = &app.last_hash {
        badges.push(Span::styled(format!(" 0x{hash}"), dim()));
    }
    match app.ledger_verified() {
        Some(true) => {
            badges.push(Span::styled("  Ledger VERIFIED", Style::default().fg(ACCENT)))
        }
        Some(false) => badges.push(Span::styled(
            "  Ledger FAILED",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        None => {}
    }

    let lines = vec![
        Line::from(Span::styled(
            format!(" {}", view.title),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(badges),
        Line::from(""),
        Line::from(Span::styled(
            format!(" {}", view.trust_framework),
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled(
            format!(" {}", view.efficiency_gain),
            Style::default().fg(Color::White),
        )),
        Line::from(Span::styled(format!(" {}", view.efficiency_detail), dim())),
        Line::from(Span::styled(
            format!(" {}", view.digital_passport),
            Style::default().fg(Color::White),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ACCENT)),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

// ── Footer ────────────────────────────────────────────────────────────────────

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let key = Style::default().fg(Color::Cyan);
    let mut spans = vec![
        Span::styled(" [↑/↓] ", key),
        Span::raw("Industry  "),
        Span::styled("[Tab] ", key),
        Span::raw(match app.focus {
            Focus::Sidebar => "Edit product  ",
            Focus::Input => "Industry list  ",
        }),
        Span::styled("[Enter] ", key),
        Span::raw("Run  "),
    ];
    if app.focus == Focus::Sidebar {
        spans.push(Span::styled("[q] ", key));
        spans.push(Span::raw("Quit  "));
    }
    spans.push(Span::styled("[Esc] ", key));
    spans.push(Span::raw("Quit"));

    let footer = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(dim()),
    );
    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use ratatui::{backend::TestBackend, Terminal};

    use veripura_ref_trade::{mock_data::CannedGenerator, requester::trade_requester};

    use super::*;

    fn app() -> App {
        App::new(
            trade_requester(Box::new(CannedGenerator::new())),
            Duration::ZERO,
            85.0,
        )
    }

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 48)).unwrap();
        terminal.draw(|f| ui(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn idle_screen_shows_selected_industry_and_placeholder() {
        let screen = render(&app());
        assert!(screen.contains("Food Import"));
        assert!(screen.contains("$296B"));
        assert!(screen.contains("$700B+"));
        assert!(screen.contains("Waiting for input..."));
        assert!(screen.contains("Classification Agent"));
        assert!(!screen.contains("Transaction Finalized"));
    }

    #[test]
    fn switching_industry_updates_header() {
        let mut app = app();
        app.select(Industry::Cosmetics);
        let screen = render(&app);
        assert!(screen.contains("$17-18B"));
        assert!(screen.contains("1,600+ prohibited substances"));
    }

    #[test]
    fn completed_run_shows_summary_and_routing() {
        let mut app = app();
        app.trigger();
        let deadline = Instant::now() + Duration::from_secs(5);
        while app.controller.is_in_progress() && Instant::now() < deadline {
            app.on_tick(Instant::now());
            std::thread::sleep(Duration::from_millis(5));
        }

        let screen = render(&app);
        assert!(screen.contains("Transaction Finalized"));
        assert!(screen.contains("Token Reward: +15 VERI"));
        assert!(screen.contains("AUTO-APPROVE"));
        assert!(screen.contains("[Blockchain] Transaction notarized"));
        assert!(screen.contains("Ledger VERIFIED"));
    }
}
