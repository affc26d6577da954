pub const CATEGORY_VOCABULARY: &[&str] = &[
    "Verb Past Tense",
    "Plural Noun",
    "Silly word",
    "Adjective",
    "Body Part",
    "Animal",
    "Verb",
    "Verb-ing",
    "Adverb",
    "Number",
    "Colour",
    "Type of Liquid",
    "Type of Food",
    "Place",
    "Celebrity",
    "Exclamation",
    "Person in Room",
    "Part of the Body",
    "Part of the Body Plural",
];

pub fn build_prompt(theme: &str, count: usize) -> String {
    format!(
        "Generate a one-paragraph Mad Lib based on the theme of {theme} using **exactly** {count} placeholders.\n\
         The total number of placeholders in the paragraph **must be exactly {count}**. Do not generate any more or any fewer placeholders.\n\
         Here are the allowed prompt types: {types}.\n\
         **Instructions**:\n\
         1. Include exactly {count} placeholders in the paragraph.\n\
         2. Mark each fill-in-the-blank spot in square brackets with ascending numbers (e.g., [adjective1], [verb1], [noun1]).\n\
         3. If duplicates are needed, give each a unique number (e.g., [verb1], [verb2]).\n\
         4. Count the number of placeholders in your response to ensure the total is *exactly* {count}. If the count is incorrect, regenerate the paragraph.\n\n\
         Do not list the placeholders separately; only integrate them into the paragraph. Double-check the output before responding to ensure the correct number of placeholders.",
        theme = theme,
        count = count,
        types = CATEGORY_VOCABULARY.join(", "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vocabulary_is_the_fixed_nineteen() {
        assert_eq!(CATEGORY_VOCABULARY.len(), 19);
    }

    #[test]
    fn prompt_names_theme_count_and_types() {
        let p = build_prompt("Winter", 4);
        assert!(p.contains("theme of Winter"));
        assert!(p.contains("exactly** 4 placeholders"));
        assert!(p.contains("Verb Past Tense"));
        assert!(p.contains("Part of the Body Plural"));
    }
}
