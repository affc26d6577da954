// generation services like to answer with typographic quotes and dashes;
// normalize to characters a terminal font always has
pub fn clean_typography_symbols(text: &str) -> String {
    let mut output = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '“' | '”' | '„' => output.push('"'),
            '’' | '‘' | '᾽' | 'ʼ' => output.push('\''),

            '—' | '–' | '‐' => output.push('-'),

            '\u{00A0}' | '\u{2007}' | '\u{202F}' => output.push(' '),

            '…' => output.push_str("..."),
            '«' => output.push_str("<<"),
            '»' => output.push_str(">>"),

            _ => output.push(c),
        }
    }
    output
}

/// Truncates to at most `width` characters, appending ".." when cut.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let cut: String = text.chars().take(width.saturating_sub(2)).collect();
    format!("{}..", cut)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleans_smart_punctuation() {
        assert_eq!(
            clean_typography_symbols("“Hello” — it’s…"),
            "\"Hello\" - it's..."
        );
    }

    #[test]
    fn truncate_short_strings_untouched() {
        assert_eq!(truncate("winter", 10), "winter");
        assert_eq!(truncate("a very long theme", 8), "a very..");
    }
}
