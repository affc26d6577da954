use crate::config::{AppConfig, GenerationConfig, Theme};
use crate::document::{self, StoryDocument};
use crate::generator::{self, OpenAiGenerator, StoryGenerator};
use crate::history;
use crate::models::{CategoryData, Focus, Modal, ModalKind, Phase};
use crate::template;
use anyhow::{Context, Result};
use rand::Rng;
use rust_embed::RustEmbed;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(RustEmbed)]
#[folder = "resources/"]
struct Asset;

pub struct App {
    pub should_quit: bool,
    pub phase: Phase,
    pub focus: Focus,

    pub story_theme: String,
    pub text: String,
    pub cursor: usize, // byte index into text, always on a char boundary

    // cache of the placeholder scan, refreshed by reconcile() after every
    // structural edit; never mutated on its own
    pub placeholders: Vec<String>,
    pub answers: Vec<(String, String)>,
    fill_index: usize,
    pub pre_fill_text: String,
    pub prompt_map: BTreeMap<usize, String>,

    pub categories: Vec<String>,
    pub selected_category: usize,

    pub modal: Option<Modal>,
    pub error: Option<String>,
    pub status: Option<String>,

    pub theme: Theme,
    pub generation: GenerationConfig,
    pub background: Option<PathBuf>,
    generated: bool,
    history_enabled: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let file = Asset::get("categories.json")
            .context("could not find embedded categories.json")?;
        let raw = std::str::from_utf8(file.data.as_ref())?;
        let data: CategoryData = serde_json::from_str(raw)?;

        Ok(Self {
            should_quit: false,
            phase: Phase::Editing,
            focus: Focus::Story,
            story_theme: String::new(),
            text: String::new(),
            cursor: 0,
            placeholders: Vec::new(),
            answers: Vec::new(),
            fill_index: 0,
            pre_fill_text: String::new(),
            prompt_map: BTreeMap::new(),
            categories: data.categories,
            selected_category: 0,
            modal: None,
            error: None,
            status: None,
            theme: config.theme,
            generation: config.generation,
            background: None,
            generated: false,
            history_enabled: true,
        })
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Re-scans the text and refreshes the cached placeholder list. The scan
    /// is the source of truth; this runs after every edit that could have
    /// added or removed a token.
    pub fn reconcile(&mut self) {
        self.placeholders = template::placeholder_list(&self.text);
    }

    pub fn can_fill(&self) -> bool {
        !self.placeholders.is_empty()
    }

    pub fn text_editable(&self) -> bool {
        self.phase != Phase::Filling
    }

    // --- story text editing ---

    pub fn insert_char(&mut self, c: char) {
        if !self.text_editable() {
            return;
        }
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
        self.reconcile();
    }

    pub fn backspace(&mut self) {
        if !self.text_editable() || self.cursor == 0 {
            return;
        }
        let Some(prev) = self.text[..self.cursor].chars().last() else {
            return;
        };
        self.cursor -= prev.len_utf8();
        self.text.remove(self.cursor);
        self.reconcile();
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = self.text[..self.cursor].chars().last() {
            self.cursor -= prev.len_utf8();
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = self.text[self.cursor..].chars().next() {
            self.cursor += next.len_utf8();
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = self.line_start(self.cursor);
    }

    pub fn move_end(&mut self) {
        self.cursor = self.line_end(self.cursor);
    }

    pub fn move_up(&mut self) {
        let start = self.line_start(self.cursor);
        if start == 0 {
            return;
        }
        let col = self.text[start..self.cursor].chars().count();
        let prev_start = self.line_start(start - 1);
        self.cursor = self.seek_col(prev_start, col);
    }

    pub fn move_down(&mut self) {
        let end = self.line_end(self.cursor);
        if end == self.text.len() {
            return;
        }
        let start = self.line_start(self.cursor);
        let col = self.text[start..self.cursor].chars().count();
        self.cursor = self.seek_col(end + 1, col);
    }

    fn line_start(&self, at: usize) -> usize {
        self.text[..at].rfind('\n').map(|i| i + 1).unwrap_or(0)
    }

    fn line_end(&self, at: usize) -> usize {
        self.text[at..]
            .find('\n')
            .map(|i| at + i)
            .unwrap_or(self.text.len())
    }

    fn seek_col(&self, line_start: usize, col: usize) -> usize {
        let end = self.line_end(line_start);
        self.text[line_start..end]
            .char_indices()
            .nth(col)
            .map(|(i, _)| line_start + i)
            .unwrap_or(end)
    }

    // --- theme line editing ---

    pub fn theme_push(&mut self, c: char) {
        if self.text_editable() {
            self.story_theme.push(c);
        }
    }

    pub fn theme_backspace(&mut self) {
        if self.text_editable() {
            self.story_theme.pop();
        }
    }

    // --- category sidebar ---

    // the sidebar is every category plus a trailing "Custom..." row
    pub fn category_rows(&self) -> usize {
        self.categories.len() + 1
    }

    pub fn select_prev_category(&mut self) {
        if self.selected_category == 0 {
            self.selected_category = self.category_rows() - 1;
        } else {
            self.selected_category -= 1;
        }
    }

    pub fn select_next_category(&mut self) {
        self.selected_category = (self.selected_category + 1) % self.category_rows();
    }

    pub fn insert_selected_category(&mut self) {
        if self.selected_category == self.categories.len() {
            self.open_custom_modal();
            return;
        }
        let label = self.categories[self.selected_category].clone();
        self.insert_category(&label);
    }

    pub fn insert_category(&mut self, label: &str) {
        if self.phase == Phase::Filling {
            return;
        }
        // empty labels are silently ignored
        if let Some((text, cursor)) = template::insert_placeholder(&self.text, self.cursor, label) {
            self.text = text;
            self.cursor = cursor;
            self.reconcile();
            self.focus = Focus::Story;
        }
    }

    pub fn undo_placeholder(&mut self) {
        if self.phase == Phase::Filling {
            return;
        }
        // no-op when the token was already edited out of the text
        if let Some((text, at)) = template::remove_last_placeholder(&self.text) {
            self.text = text;
            self.cursor = at;
            self.reconcile();
        }
    }

    fn open_custom_modal(&mut self) {
        self.modal = Some(Modal::new(ModalKind::CustomLabel, "Enter your custom prompt:"));
    }

    // --- fill-in phase ---

    pub fn start_fill(&mut self) {
        if self.phase == Phase::Filling {
            return;
        }
        self.reconcile();
        if self.placeholders.is_empty() {
            self.error = Some("You didn't write any fill-in-the-blanks!".to_string());
            return;
        }
        self.error = None;
        self.pre_fill_text = self.text.clone();
        self.prompt_map = self.placeholders.iter().cloned().enumerate().collect();
        self.answers.clear();
        self.fill_index = 0;
        self.phase = Phase::Filling;
        self.open_fill_modal();
    }

    fn open_fill_modal(&mut self) {
        let token = &self.placeholders[self.fill_index];
        let title = format!("Enter a(n) {}:", template::prompt_label(token));
        self.modal = Some(Modal::new(ModalKind::FillAnswer, title));
    }

    fn finish_fill(&mut self) {
        // answers gathered so far are applied even after a cancel; tokens
        // with no answer stay as literal bracket text
        self.text = template::apply_answers(&self.text, &self.answers);
        self.phase = Phase::Finalized;
        self.focus = Focus::Story;
        self.cursor = self.text.len();
        let total = self.prompt_map.len();
        let answered = self.answers.len();
        self.reconcile();

        if self.history_enabled {
            if let Err(err) = history::record_story(&self.story_theme, self.generated, total, answered)
            {
                self.status = Some(format!("history not saved: {}", err));
            }
        }
    }

    // --- modal input ---

    pub fn modal_open(&self) -> bool {
        self.modal.is_some()
    }

    pub fn modal_char(&mut self, c: char) {
        if let Some(modal) = &mut self.modal {
            modal.buffer.push(c);
        }
    }

    pub fn modal_backspace(&mut self) {
        if let Some(modal) = &mut self.modal {
            modal.buffer.pop();
        }
    }

    pub fn modal_submit(&mut self) {
        let Some(modal) = self.modal.take() else {
            return;
        };

        match modal.kind {
            ModalKind::CustomLabel => {
                self.insert_category(modal.buffer.trim());
            }
            ModalKind::GenTheme => {
                let theme = if modal.buffer.trim().is_empty() {
                    generator::DEFAULT_THEME.to_string()
                } else {
                    modal.buffer.trim().to_string()
                };
                self.modal = Some(Modal::new(
                    ModalKind::GenCount { theme },
                    "How many prompts should be generated?",
                ));
            }
            ModalKind::GenCount { theme } => {
                let raw = modal.buffer.trim().to_string();
                self.run_generation(&theme, &raw);
            }
            ModalKind::FillAnswer => {
                let token = self.placeholders[self.fill_index].clone();
                self.answers.push((token, modal.buffer));
                self.fill_index += 1;
                if self.fill_index < self.placeholders.len() {
                    self.open_fill_modal();
                } else {
                    self.finish_fill();
                }
            }
            ModalKind::SaveName => {
                let name = modal.buffer.trim().to_string();
                if !name.is_empty() {
                    self.save_story(&name);
                }
            }
        }
    }

    pub fn modal_cancel(&mut self) {
        let Some(modal) = self.modal.take() else {
            return;
        };
        if modal.kind == ModalKind::FillAnswer {
            // abort the remaining prompts, keep what was collected
            self.finish_fill();
        }
    }

    // --- story generation ---

    pub fn start_generate(&mut self) {
        if self.phase == Phase::Filling {
            return;
        }
        self.error = None;
        self.modal = Some(Modal::new(ModalKind::GenTheme, "Enter the theme to generate:"));
    }

    fn run_generation(&mut self, theme: &str, raw_count: &str) {
        let Some(count) = resolve_count(raw_count) else {
            self.error = Some("Prompt count must be a number.".to_string());
            return;
        };

        let generator = match OpenAiGenerator::from_config(&self.generation) {
            Ok(generator) => generator,
            Err(err) => {
                self.error = Some(format!("{:#}", err));
                return;
            }
        };

        self.apply_generation(&generator, theme, count);
    }

    /// Runs the count-validated generation flow; the request blocks until the
    /// service answers. On success the paragraph becomes the template and
    /// flows straight into fill-in, as if it had been built by hand. On
    /// failure nothing is committed.
    pub fn apply_generation(&mut self, generator: &dyn StoryGenerator, theme: &str, count: usize) {
        match generator::generate_validated(generator, theme, count) {
            Ok(paragraph) => {
                self.story_theme = theme.to_string();
                self.text = paragraph;
                self.cursor = self.text.len();
                self.pre_fill_text.clear();
                self.generated = true;
                self.phase = Phase::Editing;
                self.reconcile();
                self.start_fill();
            }
            Err(err) => {
                self.error = Some(format!("{:#}", err));
            }
        }
    }

    // --- persistence ---

    pub fn start_save(&mut self) {
        if self.phase == Phase::Filling {
            return;
        }
        self.modal = Some(Modal::new(ModalKind::SaveName, "Save story as:"));
    }

    fn save_story(&mut self, name: &str) {
        let mut path = PathBuf::from(name);
        if path.extension().is_none() {
            path.set_extension("md");
        }

        // saving before any fill-in keeps the current text as the template
        let template_text = if self.pre_fill_text.is_empty() {
            self.text.clone()
        } else {
            self.pre_fill_text.clone()
        };
        let prompts = if self.prompt_map.is_empty() {
            template::placeholder_list(&template_text)
                .into_iter()
                .enumerate()
                .collect()
        } else {
            self.prompt_map.clone()
        };

        let doc = StoryDocument {
            theme: self.story_theme.clone(),
            story: self.text.clone(),
            template: template_text,
            prompts,
        };

        match document::save(&path, &doc) {
            Ok(()) => self.status = Some(format!("saved {}", path.display())),
            Err(err) => self.error = Some(format!("{:#}", err)),
        }
    }

    pub fn open_story(&mut self, path: &Path) {
        match document::load(path) {
            Ok(doc) => {
                self.clear();
                self.story_theme = doc.theme;
                self.text = doc.template;
                self.pre_fill_text = self.text.clone();
                self.cursor = self.text.len();
                self.reconcile();
                self.status = Some(format!("opened {}", path.display()));
            }
            Err(err) => {
                // an invalid file resets to a blank editor, never a crash
                self.clear();
                self.error = Some(format!("{:#}", err));
            }
        }
    }

    // --- misc ---

    pub fn clear(&mut self) {
        self.text.clear();
        self.story_theme.clear();
        self.cursor = 0;
        self.placeholders.clear();
        self.answers.clear();
        self.fill_index = 0;
        self.pre_fill_text.clear();
        self.prompt_map.clear();
        self.phase = Phase::Editing;
        self.focus = Focus::Story;
        self.modal = None;
        self.error = None;
        self.status = None;
        self.generated = false;
    }

    pub fn set_background(&mut self, path: &Path) {
        // only existence is checked; drawing the image is up to the terminal
        if path.exists() {
            self.background = Some(path.to_path_buf());
            self.status = Some(format!("background set to {}", path.display()));
        } else {
            self.error = Some(format!("no such image: {}", path.display()));
        }
    }

    pub fn cycle_focus(&mut self) {
        if self.phase == Phase::Filling {
            return;
        }
        self.focus = match self.focus {
            Focus::Theme => Focus::Story,
            Focus::Story => Focus::Categories,
            Focus::Categories => Focus::Theme,
        };
    }
}

// blank -> random 1..=10, otherwise a positive integer or nothing
fn resolve_count(raw: &str) -> Option<usize> {
    if raw.is_empty() {
        return Some(rand::rng().random_range(1..=10));
    }
    match raw.parse::<usize>() {
        Ok(n) if n >= 1 => Some(n),
        _ => None,
    }
}
