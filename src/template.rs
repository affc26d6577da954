use regex::Regex;
use std::sync::LazyLock;

// letters with interior spaces, optional trailing digits, bracketed;
// padding inside the brackets is tolerated but never part of the token
static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\s*([A-Za-z][A-Za-z ]*?[0-9]*)\s*\]").unwrap());

/// Scans `text` for placeholder tokens in left-to-right order.
///
/// This scan is the single source of truth for which placeholders exist;
/// everything else (counter, undo, fill-in) re-derives its view from it
/// after any structural edit. The iterator is lazy and restartable: call
/// again to scan from the top.
pub fn placeholders(text: &str) -> impl Iterator<Item = &str> {
    PLACEHOLDER_RE
        .captures_iter(text)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str()))
}

pub fn placeholder_list(text: &str) -> Vec<String> {
    placeholders(text).map(str::to_string).collect()
}

pub fn placeholder_count(text: &str) -> usize {
    placeholders(text).count()
}

/// Inserts `[label{N+1}]` at the byte cursor, where N is the authoritative
/// count from a fresh scan. An empty or whitespace label is a no-op.
/// Returns the new text and the cursor position just past the token.
pub fn insert_placeholder(text: &str, cursor: usize, label: &str) -> Option<(String, usize)> {
    let label = label.trim();
    if label.is_empty() {
        return None;
    }

    let token = format!("[{}{}]", label, placeholder_count(text) + 1);
    let cursor = cursor.min(text.len());

    let mut out = String::with_capacity(text.len() + token.len());
    out.push_str(&text[..cursor]);
    out.push_str(&token);
    out.push_str(&text[cursor..]);

    Some((out, cursor + token.len()))
}

/// Removes the most recently scanned placeholder together with its brackets.
/// If the exact bracketed form is no longer in the text (the user edited it
/// out from under us) this is a no-op, not an error.
/// Returns the new text and the byte position the token was removed from.
pub fn remove_last_placeholder(text: &str) -> Option<(String, usize)> {
    let last = placeholders(text).last()?;
    let needle = format!("[{}]", last);
    let at = text.find(&needle)?;

    let mut out = String::with_capacity(text.len() - needle.len());
    out.push_str(&text[..at]);
    out.push_str(&text[at + needle.len()..]);

    Some((out, at))
}

/// Replaces every occurrence of each bracketed token with its answer, in
/// collection order. Tokens with no answer (a cancelled prompt) are left
/// as literal bracket text.
pub fn apply_answers(text: &str, answers: &[(String, String)]) -> String {
    let mut out = text.to_string();
    for (token, answer) in answers {
        out = out.replace(&format!("[{}]", token), answer);
    }
    out
}

/// "Noun1" -> "Noun": the trailing ordinal is dropped when the token is
/// shown as a fill-in prompt.
pub fn prompt_label(token: &str) -> &str {
    token
        .trim_end_matches(|c: char| c.is_ascii_digit())
        .trim_end()
}

/// Byte ranges of whole bracketed tokens, used by the UI to highlight them.
pub fn token_ranges(text: &str) -> Vec<(usize, usize)> {
    PLACEHOLDER_RE
        .find_iter(text)
        .map(|m| (m.start(), m.end()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extraction_in_order_and_idempotent() {
        let text = "I saw a [Noun1] in the [Place2] with [Silly Word3].";
        let first = placeholder_list(text);
        let second = placeholder_list(text);
        assert_eq!(first, vec!["Noun1", "Place2", "Silly Word3"]);
        assert_eq!(first, second);
    }

    #[test]
    fn extraction_strips_brackets_and_padding() {
        assert_eq!(placeholder_list("x [ Adjective2 ] y"), vec!["Adjective2"]);
        assert_eq!(placeholder_list("[noun1]"), vec!["noun1"]);
    }

    #[test]
    fn extraction_rejects_non_tokens() {
        assert_eq!(placeholder_count("[123] [] [ ] [!?] no brackets"), 0);
    }

    #[test]
    fn insertion_appends_next_ordinal() {
        let text = "A [Noun1] walked. ";
        let (text, cursor) = insert_placeholder(text, text.len(), "Verb").unwrap();
        assert_eq!(text, "A [Noun1] walked. [Verb2]");
        assert_eq!(cursor, text.len());

        let list = placeholder_list(&text);
        assert_eq!(list.len(), 2);
        assert_eq!(list.last().unwrap(), "Verb2");
    }

    #[test]
    fn insertion_at_cursor_mid_text() {
        let (text, cursor) = insert_placeholder("ab", 1, "Noun").unwrap();
        assert_eq!(text, "a[Noun1]b");
        assert_eq!(cursor, 8);
    }

    #[test]
    fn insertion_empty_label_is_noop() {
        assert!(insert_placeholder("text", 0, "").is_none());
        assert!(insert_placeholder("text", 0, "   ").is_none());
    }

    #[test]
    fn undo_is_inverse_of_insert() {
        let before = "Once upon a time ";
        let (inserted, _) = insert_placeholder(before, before.len(), "Animal").unwrap();
        let (after, at) = remove_last_placeholder(&inserted).unwrap();
        assert_eq!(after, before);
        assert_eq!(at, before.len());
        assert_eq!(placeholder_count(&after), 0);
    }

    #[test]
    fn undo_removes_last_scanned_not_last_inserted() {
        // manual editing moved [Verb2] ahead of [Noun1]; the last *scanned*
        // token is Noun1 and that is the one undo removes
        let text = "[Verb2] then [Noun1]";
        let (after, _) = remove_last_placeholder(text).unwrap();
        assert_eq!(after, "[Verb2] then ");
    }

    #[test]
    fn undo_with_no_exact_match_is_noop() {
        // padded token scans as "Noun1" but "[Noun1]" is not present verbatim
        assert!(remove_last_placeholder("[ Noun1 ]").is_none());
        assert!(remove_last_placeholder("no tokens here").is_none());
    }

    #[test]
    fn apply_answers_worked_example() {
        let text = "I saw a [Noun1] in the [Place1]";
        let answers = vec![
            ("Noun1".to_string(), "dog".to_string()),
            ("Place1".to_string(), "park".to_string()),
        ];
        assert_eq!(apply_answers(text, &answers), "I saw a dog in the park");
    }

    #[test]
    fn apply_answers_replaces_all_occurrences() {
        let text = "[Noun1] meets [Noun1]";
        let answers = vec![("Noun1".to_string(), "cat".to_string())];
        assert_eq!(apply_answers(text, &answers), "cat meets cat");
    }

    #[test]
    fn full_fill_leaves_no_tokens() {
        let text = "[Adjective1] [Animal2] [Verb Past Tense3]!";
        let answers: Vec<(String, String)> = placeholders(text)
            .map(|t| (t.to_string(), "x".to_string()))
            .collect();
        let finalized = apply_answers(text, &answers);
        assert_eq!(placeholder_count(&finalized), 0);
    }

    #[test]
    fn partial_fill_leaves_unanswered_tokens_literal() {
        let text = "[Noun1] and [Verb2]";
        let answers = vec![("Noun1".to_string(), "dog".to_string())];
        assert_eq!(apply_answers(text, &answers), "dog and [Verb2]");
    }

    #[test]
    fn prompt_label_strips_trailing_ordinal() {
        assert_eq!(prompt_label("Noun1"), "Noun");
        assert_eq!(prompt_label("Silly Word12"), "Silly Word");
        assert_eq!(prompt_label("Place"), "Place");
        assert_eq!(prompt_label("Noun 1"), "Noun");
    }

    #[test]
    fn token_ranges_cover_brackets() {
        let text = "a [Noun1] b";
        assert_eq!(token_ranges(text), vec![(2, 9)]);
    }
}
