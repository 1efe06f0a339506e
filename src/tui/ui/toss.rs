use crate::tui::app::AppState;
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::layout::{centered_fixed, inner};
use super::table::draw_help;

pub(super) fn draw_toss(f: &mut Frame, app: &AppState) {
    let area = centered_fixed(52, 9, f.area());
    let block = Block::default().title("Coin Toss").borders(Borders::ALL);
    let mut lines = vec![
        Line::from("Call the coin. The winner acts first as Player 1."),
        Line::from(""),
        Line::from(vec![
            Span::styled("H", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" heads  •  "),
            Span::styled("T", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" tails"),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "? help • M menu",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];
    if let Some(err) = app.action_error() {
        lines.push(Line::from(Span::styled(
            format!("Error: {err}"),
            Style::default().fg(Color::Red),
        )));
    }
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner(area));

    if app.help_open() {
        draw_help(f);
    }
}
