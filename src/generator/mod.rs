mod client;
mod prompt;

pub use client::OpenAiGenerator;

use crate::template;
use crate::utils::strings;
use anyhow::{bail, Result};

pub const MAX_ATTEMPTS: usize = 3;
pub const DEFAULT_THEME: &str = "Winter";

pub trait StoryGenerator {
    /// Returns the raw response text from the generation service.
    fn generate(&self, theme: &str, count: usize) -> Result<String>;
}

/// Requests a themed paragraph containing exactly `count` placeholders.
/// The placeholder count is re-derived by scanning the response; a mismatch
/// burns one of MAX_ATTEMPTS tries, a transport error gives up immediately.
/// Returns the story paragraph: the first response line, cleaned of
/// typographic symbols. Everything after the first newline is discarded.
pub fn generate_validated(
    generator: &dyn StoryGenerator,
    theme: &str,
    count: usize,
) -> Result<String> {
    for _ in 0..MAX_ATTEMPTS {
        let response = generator.generate(theme, count)?;

        // the count check runs over the full response, the committed
        // paragraph is only the first line
        if template::placeholder_count(&response) != count {
            continue;
        }

        let paragraph = response.lines().next().unwrap_or("").trim();
        return Ok(strings::clean_typography_symbols(paragraph));
    }

    bail!(
        "could not generate a story with exactly {} placeholders after {} attempts",
        count,
        MAX_ATTEMPTS
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct FakeGenerator {
        responses: Vec<String>,
        calls: RefCell<usize>,
    }

    impl FakeGenerator {
        fn new(responses: Vec<&str>) -> Self {
            Self {
                responses: responses.into_iter().map(str::to_string).collect(),
                calls: RefCell::new(0),
            }
        }

        fn calls(&self) -> usize {
            *self.calls.borrow()
        }
    }

    impl StoryGenerator for FakeGenerator {
        fn generate(&self, _theme: &str, _count: usize) -> Result<String> {
            let mut calls = self.calls.borrow_mut();
            let response = self.responses[*calls % self.responses.len()].clone();
            *calls += 1;
            Ok(response)
        }
    }

    struct FailingGenerator {
        calls: RefCell<usize>,
    }

    impl StoryGenerator for FailingGenerator {
        fn generate(&self, _theme: &str, _count: usize) -> Result<String> {
            *self.calls.borrow_mut() += 1;
            bail!("connection refused")
        }
    }

    #[test]
    fn accepts_response_with_matching_count() {
        let fake = FakeGenerator::new(vec!["A [Adjective1] [Animal2] sings."]);
        let paragraph = generate_validated(&fake, "Winter", 2).unwrap();
        assert_eq!(paragraph, "A [Adjective1] [Animal2] sings.");
        assert_eq!(fake.calls(), 1);
    }

    #[test]
    fn retries_on_mismatch_then_succeeds() {
        let fake = FakeGenerator::new(vec![
            "Only [Noun1] here.",
            "A [Noun1] and a [Verb2] now.",
        ]);
        let paragraph = generate_validated(&fake, "Winter", 2).unwrap();
        assert_eq!(paragraph, "A [Noun1] and a [Verb2] now.");
        assert_eq!(fake.calls(), 2);
    }

    #[test]
    fn gives_up_after_three_attempts_never_a_fourth() {
        let fake = FakeGenerator::new(vec!["wrong [Noun1] count"]);
        let result = generate_validated(&fake, "Winter", 5);
        assert!(result.is_err());
        assert_eq!(fake.calls(), 3);
    }

    #[test]
    fn transport_error_aborts_immediately() {
        let failing = FailingGenerator {
            calls: RefCell::new(0),
        };
        assert!(generate_validated(&failing, "Winter", 2).is_err());
        assert_eq!(*failing.calls.borrow(), 1);
    }

    #[test]
    fn counts_full_response_but_commits_first_line() {
        // a stray token after the newline still counts toward validation,
        // yet the committed paragraph stops at the first line
        let fake = FakeGenerator::new(vec!["A [Noun1] appears.\nExtra [Verb2] trailer."]);
        let paragraph = generate_validated(&fake, "Winter", 2).unwrap();
        assert_eq!(paragraph, "A [Noun1] appears.");
    }

    #[test]
    fn cleans_typography_in_committed_paragraph() {
        let fake = FakeGenerator::new(vec!["“The [Noun1]” — done."]);
        let paragraph = generate_validated(&fake, "Winter", 1).unwrap();
        assert_eq!(paragraph, "\"The [Noun1]\" - done.");
    }
}
