use crate::app::App;
use crate::models::{Modal, ModalKind};
use crate::ui::utils::{centered_rect, hex_to_rgb};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, modal: &Modal) {
    let width = (modal.title.len() as u16 + 6)
        .max(46)
        .min(f.area().width.saturating_sub(4));
    let area = centered_rect(width, 5, f.area());

    f.render_widget(Clear, area);

    let window_title = match modal.kind {
        ModalKind::CustomLabel => "Make your own mad libs",
        ModalKind::GenTheme => "Theme Selection",
        ModalKind::GenCount { .. } => "Prompt Number",
        ModalKind::FillAnswer => "Fill-in-the-blanks!",
        ModalKind::SaveName => "Save File",
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(window_title)
        .border_style(Style::default().fg(hex_to_rgb(&app.theme.main)))
        .style(Style::default().bg(hex_to_rgb(&app.theme.bg)));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    f.render_widget(
        Paragraph::new(modal.title.clone())
            .style(Style::default().fg(hex_to_rgb(&app.theme.text))),
        rows[0],
    );

    let input = Line::from(vec![
        Span::styled(
            modal.buffer.clone(),
            Style::default()
                .fg(hex_to_rgb(&app.theme.main))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ", Style::default().bg(hex_to_rgb(&app.theme.caret))),
    ]);
    f.render_widget(Paragraph::new(input), rows[2]);
}
