use crate::app::App;
use crate::models::{Focus, Phase};
use crate::template;
use crate::ui::utils::{hex_to_rgb, render_footer, render_header};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use textwrap::Options;

pub fn draw(f: &mut Frame, app: &App) {
    render_header(f, app);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header rows
            Constraint::Length(1), // theme line
            Constraint::Length(1),
            Constraint::Fill(1),   // story + categories
            Constraint::Length(1), // prompt counter
            Constraint::Length(1), // error / status line
            Constraint::Length(1), // footer
        ])
        .split(f.area());

    let centered = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Percentage(90),
            Constraint::Fill(1),
        ]);

    draw_theme_line(f, app, centered.split(vertical[1])[1]);

    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Fill(1), Constraint::Length(28)])
        .split(centered.split(vertical[3])[1]);

    draw_story(f, app, main[0]);
    draw_categories(f, app, main[1]);
    draw_counter(f, app, centered.split(vertical[4])[1]);
    draw_message(f, app, centered.split(vertical[5])[1]);

    render_footer(f, app);
}

fn draw_theme_line(f: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let label_color = if app.focus == Focus::Theme && app.text_editable() {
        hex_to_rgb(&app.theme.main)
    } else {
        hex_to_rgb(&app.theme.sub)
    };

    let mut spans = vec![
        Span::styled("Theme: ", Style::default().fg(label_color)),
        Span::styled(
            app.story_theme.clone(),
            Style::default().fg(hex_to_rgb(&app.theme.text)),
        ),
    ];
    if app.focus == Focus::Theme && app.text_editable() {
        spans.push(Span::styled(
            " ",
            Style::default().bg(hex_to_rgb(&app.theme.caret)),
        ));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_story(f: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let focused = app.focus == Focus::Story && app.phase != Phase::Filling;
    let border_color = if focused {
        hex_to_rgb(&app.theme.main)
    } else {
        hex_to_rgb(&app.theme.sub_alt)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Story")
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if app.text.is_empty() && app.focus != Focus::Story && app.phase == Phase::Editing {
        let hint = Paragraph::new("Type a story, then insert fill-in-the-blank prompts from the list.")
            .style(Style::default().fg(hex_to_rgb(&app.theme.sub)))
            .wrap(Wrap { trim: false });
        f.render_widget(hint, inner);
        return;
    }

    let scroll = cursor_scroll(app, inner.width as usize, inner.height as usize);
    let story = Paragraph::new(story_lines(app))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    f.render_widget(story, inner);
}

// per-character spans: tokens get the brand color, the cursor is a block
fn story_lines(app: &App) -> Vec<Line<'static>> {
    let ranges = template::token_ranges(&app.text);
    let show_cursor = app.focus == Focus::Story && app.text_editable();

    let color_text = hex_to_rgb(&app.theme.text);
    let color_token = hex_to_rgb(&app.theme.main);
    let color_cursor_bg = hex_to_rgb(&app.theme.caret);
    let color_cursor_fg = hex_to_rgb(&app.theme.sub);

    let mut lines = Vec::new();
    let mut offset = 0usize;

    for raw in app.text.split('\n') {
        let line_end = offset + raw.len();
        let mut spans: Vec<Span> = Vec::new();

        for (i, c) in raw.char_indices() {
            let pos = offset + i;
            let in_token = ranges.iter().any(|(start, end)| pos >= *start && pos < *end);

            let mut style = if in_token {
                Style::default()
                    .fg(color_token)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(color_text)
            };
            if show_cursor && pos == app.cursor {
                style = Style::default().bg(color_cursor_bg).fg(color_cursor_fg);
            }
            spans.push(Span::styled(c.to_string(), style));
        }

        // cursor sitting at the end of this line
        if show_cursor && app.cursor == line_end {
            spans.push(Span::styled(" ", Style::default().bg(color_cursor_bg)));
        }

        lines.push(Line::from(spans));
        offset = line_end + 1;
    }

    lines
}

// approximate visual row of the cursor in the wrapped story, so long texts
// scroll to keep it on screen
fn cursor_scroll(app: &App, width: usize, height: usize) -> u16 {
    if width == 0 || height == 0 {
        return 0;
    }
    let options = Options::new(width);
    let wrapped = textwrap::wrap(&app.text, options);

    let mut row = wrapped.len().saturating_sub(1);
    let mut running = 0usize;
    for (i, line) in wrapped.iter().enumerate() {
        let line_len = line.len() + 1;
        if app.cursor < running + line_len {
            row = i;
            break;
        }
        running += line_len;
    }

    row.saturating_sub(height - 1) as u16
}

fn draw_categories(f: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let focused = app.focus == Focus::Categories && app.phase != Phase::Filling;
    let border_color = if focused {
        hex_to_rgb(&app.theme.main)
    } else {
        hex_to_rgb(&app.theme.sub_alt)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Prompts")
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let visible = inner.height as usize;
    if visible == 0 {
        return;
    }
    let skip = (app.selected_category + 1).saturating_sub(visible);

    let mut lines = Vec::new();
    for (i, label) in app
        .categories
        .iter()
        .map(String::as_str)
        .chain(std::iter::once("Custom..."))
        .enumerate()
        .skip(skip)
        .take(visible)
    {
        let selected = i == app.selected_category;
        let style = if selected && focused {
            Style::default()
                .fg(hex_to_rgb(&app.theme.main))
                .bg(hex_to_rgb(&app.theme.sub_alt))
                .add_modifier(Modifier::BOLD)
        } else if selected {
            Style::default().fg(hex_to_rgb(&app.theme.text))
        } else {
            Style::default().fg(hex_to_rgb(&app.theme.sub))
        };
        let marker = if selected { "> " } else { "  " };
        lines.push(Line::from(Span::styled(format!("{}{}", marker, label), style)));
    }

    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_counter(f: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let counter = Paragraph::new(format!("Number of Prompts: {}", app.placeholders.len()))
        .style(
            Style::default()
                .fg(hex_to_rgb(&app.theme.main))
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(counter, area);
}

fn draw_message(f: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let (message, color) = if let Some(err) = &app.error {
        (err.clone(), hex_to_rgb(&app.theme.error))
    } else if let Some(status) = &app.status {
        (status.clone(), hex_to_rgb(&app.theme.sub))
    } else {
        return;
    };

    f.render_widget(
        Paragraph::new(message).style(Style::default().fg(color)),
        area,
    );
}
