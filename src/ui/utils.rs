use ratatui::style::Color;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::models::Phase;

pub fn hex_to_rgb(hex: &str) -> Color {
    let hex = hex.trim_start_matches('#');
    if hex.len() == 6 {
        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);
        Color::Rgb(r, g, b)
    } else {
        Color::White
    }
}

pub fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Editing => "editing",
        Phase::Filling => "fill-in",
        Phase::Finalized => "finalized",
    }
}

pub fn render_header(f: &mut Frame, app: &App) {
    let mut header_spans = Vec::new();

    header_spans.push(Span::styled(
        "madly",
        Style::default()
            .fg(hex_to_rgb(&app.theme.main))
            .add_modifier(ratatui::style::Modifier::BOLD),
    ));
    header_spans.push(Span::styled(
        format!(" | {}", phase_label(app.phase)),
        Style::default().fg(hex_to_rgb(&app.theme.sub)),
    ));

    let header_row_area = Rect::new(0, 1, f.area().width, 1);

    let header_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Percentage(90),
            Constraint::Fill(1),
        ])
        .split(header_row_area);

    f.render_widget(Paragraph::new(Line::from(header_spans)), header_layout[1]);
}

pub fn render_footer(f: &mut Frame, app: &App) {
    let help = match app.phase {
        Phase::Editing => {
            "tab: focus | enter: insert prompt | ^g: generate | ^d: done | ^z: undo | ^s: save | ^n: new | esc: quit"
        }
        Phase::Filling => "type the answer | enter: next | esc: skip the rest",
        Phase::Finalized => "edit freely | ^s: save | ^n: new | esc: quit",
    };

    let footer = Paragraph::new(help)
        .style(Style::default().fg(hex_to_rgb(&app.theme.sub)))
        .alignment(Alignment::Center);
    f.render_widget(
        footer,
        Rect::new(0, f.area().height.saturating_sub(1), f.area().width, 1),
    );
}

/// A `width` x `height` rect centered inside `area`, clamped to fit.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
