use anyhow::{anyhow, Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub const REDO_MARKER: &str = "Do it again!";

/// A saved story: the finalized text plus everything needed to do the same
/// mad lib again from scratch.
#[derive(Debug, Clone, PartialEq)]
pub struct StoryDocument {
    pub theme: String,
    pub story: String,
    /// pre-fill-in text, placeholders still bracketed
    pub template: String,
    /// ordinal -> token, in encounter order
    pub prompts: BTreeMap<usize, String>,
}

pub fn to_text(doc: &StoryDocument) -> Result<String> {
    let prompts: BTreeMap<String, String> = doc
        .prompts
        .iter()
        .map(|(ordinal, token)| (ordinal.to_string(), token.clone()))
        .collect();
    let mapping = serde_json::to_string(&prompts).context("failed to encode prompt mapping")?;

    Ok(format!(
        "# {}\n\n{}\n\n{}\n\n{}\n\n{}\n",
        doc.theme, doc.story, REDO_MARKER, doc.template, mapping
    ))
}

pub fn from_text(raw: &str) -> Result<StoryDocument> {
    let lines: Vec<&str> = raw.lines().collect();

    let heading = lines.first().ok_or_else(|| anyhow!("story file is empty"))?;
    let theme = heading
        .strip_prefix('#')
        .ok_or_else(|| anyhow!("missing theme heading"))?
        .trim()
        .to_string();

    let marker_idx = lines
        .iter()
        .position(|line| line.trim().eq_ignore_ascii_case(REDO_MARKER))
        .ok_or_else(|| anyhow!("missing \"{}\" marker", REDO_MARKER))?;

    let mapping_idx = lines
        .iter()
        .rposition(|line| line.trim_start().starts_with('{'))
        .filter(|idx| *idx > marker_idx)
        .ok_or_else(|| anyhow!("missing prompt mapping"))?;

    let raw_prompts: BTreeMap<String, String> = serde_json::from_str(lines[mapping_idx].trim())
        .context("prompt mapping is not valid JSON")?;
    let mut prompts = BTreeMap::new();
    for (key, token) in raw_prompts {
        let ordinal: usize = key
            .parse()
            .map_err(|_| anyhow!("prompt mapping has a non-numeric ordinal: {}", key))?;
        prompts.insert(ordinal, token);
    }

    Ok(StoryDocument {
        theme,
        story: trim_block(&lines[1..marker_idx]),
        template: trim_block(&lines[marker_idx + 1..mapping_idx]),
        prompts,
    })
}

// drop surrounding blank lines, keep interior ones
fn trim_block(lines: &[&str]) -> String {
    let start = lines.iter().position(|l| !l.trim().is_empty());
    let Some(start) = start else {
        return String::new();
    };
    let end = lines.iter().rposition(|l| !l.trim().is_empty()).unwrap_or(start);
    lines[start..=end].join("\n")
}

pub fn save(path: &Path, doc: &StoryDocument) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("could not create {:?}", parent))?;
        }
    }
    fs::write(path, to_text(doc)?).with_context(|| format!("could not write {:?}", path))
}

pub fn load(path: &Path) -> Result<StoryDocument> {
    let raw = fs::read_to_string(path).with_context(|| format!("could not read {:?}", path))?;
    from_text(&raw).with_context(|| format!("{:?} is not a valid story file", path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template;

    fn sample() -> StoryDocument {
        let mut prompts = BTreeMap::new();
        prompts.insert(0, "Noun1".to_string());
        prompts.insert(1, "Place1".to_string());
        StoryDocument {
            theme: "Winter".to_string(),
            story: "I saw a dog in the park".to_string(),
            template: "I saw a [Noun1] in the [Place1]".to_string(),
            prompts,
        }
    }

    #[test]
    fn round_trip_restores_template_and_placeholders() {
        let doc = sample();
        let loaded = from_text(&to_text(&doc).unwrap()).unwrap();
        assert_eq!(loaded, doc);
        assert_eq!(
            template::placeholder_list(&loaded.template),
            vec!["Noun1", "Place1"]
        );
    }

    #[test]
    fn round_trip_keeps_multi_line_template() {
        let mut doc = sample();
        doc.template = "Line one [Noun1].\nLine two [Place1].".to_string();
        doc.story = "Line one dog.\nLine two park.".to_string();
        let loaded = from_text(&to_text(&doc).unwrap()).unwrap();
        assert_eq!(loaded.template, doc.template);
        assert_eq!(loaded.story, doc.story);
    }

    #[test]
    fn round_trip_with_blank_theme() {
        let mut doc = sample();
        doc.theme = String::new();
        let loaded = from_text(&to_text(&doc).unwrap()).unwrap();
        assert_eq!(loaded.theme, "");
    }

    #[test]
    fn marker_match_is_case_insensitive() {
        let raw = "# Snow\n\nstory\n\nDO IT AGAIN!\n\na [Noun1]\n\n{\"0\":\"Noun1\"}\n";
        let doc = from_text(raw).unwrap();
        assert_eq!(doc.template, "a [Noun1]");
    }

    #[test]
    fn rejects_malformed_files() {
        assert!(from_text("").is_err());
        assert!(from_text("no heading\n\nDo it again!\n\nx\n\n{}\n").is_err());
        assert!(from_text("# t\n\nstory with no marker\n\n{}\n").is_err());
        assert!(from_text("# t\n\nstory\n\nDo it again!\n\ntemplate but no mapping\n").is_err());
        assert!(from_text("# t\n\ns\n\nDo it again!\n\nx\n\n{not json}\n").is_err());
        assert!(from_text("# t\n\ns\n\nDo it again!\n\nx\n\n{\"zero\":\"Noun1\"}\n").is_err());
    }

    #[test]
    fn save_and_load_file() {
        let path = std::env::temp_dir().join("madly-doc-test.md");
        let doc = sample();
        save(&path, &doc).unwrap();
        let loaded = load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, doc);
    }
}
