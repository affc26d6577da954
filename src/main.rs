mod app;
mod config;
mod document;
mod generator;
mod history;
mod models;
mod template;
mod ui;
pub mod utils;

use anyhow::Result;
use app::App;
use clap::{ArgAction, Parser};
use config::AppConfig;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use models::Focus;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "madly")]
#[command(version)]
#[command(about = "Make your own mad libs in the terminal", long_about = None)]
// disable the default flags so i can customize them manually below
#[command(disable_help_flag = true)]
#[command(disable_version_flag = true)]
#[command(help_template = "\
{name} {version}
{about-section}
{usage-heading} {usage}

{all-args}
")]
struct Cli {
    /// Open a previously saved story file
    #[arg(short, long, value_name = "FILE")]
    open: Option<PathBuf>,

    /// Background image (only checked for existence; drawing it is up to the terminal)
    #[arg(short, long, value_name = "FILE")]
    background: Option<PathBuf>,

    /// Show finished story history
    #[arg(long, default_value_t = false, help_heading = "Flags")]
    history: bool,

    /// Print help
    #[arg(short, long, action = ArgAction::Help, help_heading = "Flags")]
    help: Option<bool>,

    /// Print version
    #[arg(short = 'V', long, action = ArgAction::Version, help_heading = "Flags")]
    version: Option<bool>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.history {
        history::show_history()?;
        return Ok(());
    }

    let app_config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!(
            "Warning: Failed to load config, using defaults. Error: {}",
            e
        );
        AppConfig {
            theme: config::Theme::default(),
            generation: config::GenerationConfig::default(),
        }
    });

    let mut app = App::new(app_config)?;

    if let Some(path) = &cli.background {
        app.set_background(path);
    }
    if let Some(path) = &cli.open {
        app.open_story(path);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(app, key.code, key.modifiers);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    // an open modal swallows everything; this also covers the whole
    // fill-in phase, which is one modal after another
    if app.modal_open() {
        match code {
            KeyCode::Esc => app.modal_cancel(),
            KeyCode::Enter => app.modal_submit(),
            KeyCode::Backspace => app.modal_backspace(),
            KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => app.modal_char(c),
            _ => {}
        }
        return;
    }

    if modifiers.contains(KeyModifiers::CONTROL) {
        match code {
            KeyCode::Char('q') => app.quit(),
            KeyCode::Char('s') => app.start_save(),
            KeyCode::Char('g') => app.start_generate(),
            KeyCode::Char('d') => app.start_fill(),
            KeyCode::Char('z') => app.undo_placeholder(),
            KeyCode::Char('n') => app.clear(),
            _ => {}
        }
        return;
    }

    match code {
        KeyCode::Esc => app.quit(),
        KeyCode::Tab => app.cycle_focus(),
        _ => match app.focus {
            Focus::Theme => match code {
                KeyCode::Char(c) => app.theme_push(c),
                KeyCode::Backspace => app.theme_backspace(),
                _ => {}
            },
            Focus::Story => match code {
                KeyCode::Char(c) => app.insert_char(c),
                KeyCode::Backspace => app.backspace(),
                KeyCode::Enter => app.insert_char('\n'),
                KeyCode::Left => app.move_left(),
                KeyCode::Right => app.move_right(),
                KeyCode::Up => app.move_up(),
                KeyCode::Down => app.move_down(),
                KeyCode::Home => app.move_home(),
                KeyCode::End => app.move_end(),
                _ => {}
            },
            Focus::Categories => match code {
                KeyCode::Up => app.select_prev_category(),
                KeyCode::Down => app.select_next_category(),
                KeyCode::Enter => app.insert_selected_category(),
                _ => {}
            },
        },
    }
}
