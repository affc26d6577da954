use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    Editing,
    Filling,
    Finalized,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Focus {
    Theme,
    Story,
    Categories,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModalKind {
    CustomLabel,
    GenTheme,
    GenCount { theme: String },
    FillAnswer,
    SaveName,
}

#[derive(Debug, Clone)]
pub struct Modal {
    pub kind: ModalKind,
    pub title: String,
    pub buffer: String,
}

impl Modal {
    pub fn new(kind: ModalKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            buffer: String::new(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct CategoryData {
    #[allow(dead_code)]
    pub name: String,
    pub categories: Vec<String>,
}
