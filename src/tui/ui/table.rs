use crate::cards::Card;
use crate::game::{Action, Side};
use crate::session::StepReport;
use crate::tui::app::AppState;
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::layout::{centered_rect, inner};

pub(super) fn draw_table(f: &mut Frame, app: &AppState) {
    let size = f.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // header
            Constraint::Min(7),    // cards
            Constraint::Length(6), // status bar
        ])
        .split(size);

    let Some(round) = app.session.round() else {
        let para = Paragraph::new("No round dealt. Press M for the menu.")
            .block(Block::default().title("akq-rs").borders(Borders::ALL));
        f.render_widget(para, size);
        return;
    };

    // Header
    let toss_line = app.toss_report.map(|r| r.message()).unwrap_or_default();
    let header_lines = vec![
        Line::from(format!("Pot: ${}   You are {}", round.pot(), round.human_role())),
        Line::from(toss_line),
    ];
    let header = Paragraph::new(header_lines)
        .block(Block::default().title("akq-rs").borders(Borders::ALL));
    f.render_widget(header, chunks[0]);

    let report = app.session.report(app.last_opponent_move);
    let outcome = match &report {
        Ok(StepReport::Finished(outcome)) => Some(outcome),
        _ => None,
    };

    // Cards: yours always, the computer's only after the round
    let card_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);
    let (human_border, opponent_border) = match outcome {
        Some(o) if o.human_won() => (Color::Green, Color::DarkGray),
        Some(_) => (Color::DarkGray, Color::Green),
        None if round.next_side() == Some(Side::Human) => (Color::Yellow, Color::White),
        None => (Color::White, Color::Yellow),
    };
    render_card_widget(
        f,
        card_cols[0],
        format!("You ({})", round.human_role()),
        Some(round.human_card()),
        human_border,
    );
    render_card_widget(
        f,
        card_cols[1],
        format!("Computer ({})", round.opponent_role()),
        round.revealed_opponent_card(),
        opponent_border,
    );

    // Status bar
    let status_area = chunks[2];
    f.render_widget(Block::default().borders(Borders::ALL).title("Status"), status_area);
    let status_inner = inner(status_area);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(status_inner);

    let mut left_info: Vec<Line> = Vec::new();
    match &report {
        Ok(StepReport::Finished(outcome)) => {
            let style = if outcome.human_won() {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
            };
            left_info.push(Line::from(Span::styled(outcome.money_message(), style)));
            left_info.push(Line::from(outcome.reason.to_string()));
            left_info.push(Line::from("Round over. Press Space for a new toss."));
        }
        Ok(StepReport::InProgress(prompt)) => {
            left_info.push(Line::from(prompt.message.clone()));
            let action_style = |action: Action| {
                if prompt.options.contains(&action) {
                    Style::default().add_modifier(Modifier::BOLD)
                } else {
                    Style::default().add_modifier(Modifier::DIM)
                }
            };
            left_info.push(Line::from(vec![
                Span::raw("Actions: "),
                Span::styled("K check", action_style(Action::Check)),
                Span::raw(" • "),
                Span::styled("B bet", action_style(Action::Bet)),
                Span::raw(" • "),
                Span::styled("C call", action_style(Action::Call)),
                Span::raw(" • "),
                Span::styled("F fold", action_style(Action::Fold)),
            ]));
        }
        Err(err) => left_info.push(Line::from(format!("Round unavailable: {err}"))),
    }

    if let Some(err) = app.action_error() {
        left_info.push(Line::from(Span::styled(
            format!("Error: {err}"),
            Style::default().fg(Color::Red),
        )));
    }

    let right_keys = vec![Line::from(""), Line::from("? help • H history • M menu")];
    let left_para = Paragraph::new(left_info).wrap(Wrap { trim: true });
    let right_para =
        Paragraph::new(right_keys).wrap(Wrap { trim: true }).alignment(Alignment::Right);
    f.render_widget(left_para, cols[0]);
    f.render_widget(right_para, cols[1]);

    if app.help_open() {
        draw_help(f);
    } else if app.history_open() {
        draw_history(f, app);
    }
}

fn draw_history(f: &mut Frame, app: &AppState) {
    let area = centered_rect(60, 60, f.area());
    let block = Block::default().title("History").borders(Borders::ALL);
    let mut lines: Vec<Line> = Vec::new();
    let entries = app.session.round().map(|r| r.entries()).unwrap_or_default();
    if entries.is_empty() {
        lines.push(Line::from("No actions yet."));
    } else {
        for entry in entries {
            lines.push(Line::from(format!(
                "{} ({}): {}   pot ${}",
                entry.role, entry.side, entry.action, entry.pot
            )));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Close: H or Esc",
        Style::default().add_modifier(Modifier::DIM),
    )));
    let para = Paragraph::new(lines).wrap(Wrap { trim: true });
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(para, inner(area));
}

pub(super) fn draw_help(f: &mut Frame) {
    let area = centered_rect(70, 80, f.area());
    let block = Block::default().title("Help").borders(Borders::ALL);
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(Span::styled("Rules:", bold)),
        Line::from("- Ace beats King beats Queen; each side antes $1"),
        Line::from("- Player 1 checks or bets $1; a bet must be called or folded"),
        Line::from("- Check then bet gives Player 1 one chance to call or fold"),
        Line::from(""),
        Line::from(Span::styled("Coin Toss:", bold)),
        Line::from("- H / T: call heads / tails"),
        Line::from(""),
        Line::from(Span::styled("Table:", bold)),
        Line::from("- K or X: check"),
        Line::from("- B: bet $1"),
        Line::from("- C: call $1"),
        Line::from("- F: fold"),
        Line::from("- Space: new toss once the round is over"),
        Line::from("- H: history"),
        Line::from(""),
        Line::from(Span::styled("Menu:", bold)),
        Line::from("- M: open / close menu"),
        Line::from("- Up / Down: move selection"),
        Line::from("- + / -: adjust value"),
        Line::from("- Enter: apply"),
        Line::from("- Esc: cancel"),
        Line::from("- Q: quit (menu)"),
        Line::from(""),
        Line::from("Close help: ? or Esc"),
    ];
    let para = Paragraph::new(lines).wrap(Wrap { trim: true });
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(para, inner(area));
}

fn card_style(c: Card) -> Style {
    match c {
        Card::Ace => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        Card::King => Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        Card::Queen => Style::default().fg(Color::LightBlue).add_modifier(Modifier::BOLD),
    }
}

fn render_card_widget(f: &mut Frame, area: Rect, title: String, card: Option<Card>, border: Color) {
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .title_alignment(Alignment::Center)
        .border_style(Style::default().fg(border));
    let inner = inner(area);
    f.render_widget(block, area);
    let lines = match card {
        Some(c) => vec![
            Line::from(""),
            Line::from(Span::styled(c.to_char().to_string(), card_style(c))),
            Line::from(c.name()),
        ],
        None => vec![Line::from(""), Line::from("[ ? ]"), Line::from("face down")],
    };
    let para = Paragraph::new(lines).alignment(Alignment::Center);
    f.render_widget(para, inner);
}
