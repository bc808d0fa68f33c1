//! Mock improvement suggestions: a static template chosen by word count.

use serde::Serialize;

/// Marker each suggestion line starts with
pub const BULLET: &str = "* ";

const BRIEF: &[&str] = &[
    "Consider expanding the content with more detailed information.",
    "Add an introductory paragraph to set the context for the reader.",
    "Include a clear concluding statement to summarize key takeaways.",
    "Provide specific examples to illustrate any abstract concepts.",
];

const MODERATE: &[&str] = &[
    "Review the document for overall clarity and conciseness across sections.",
    "Ensure smooth and logical transitions between paragraphs and sections.",
    "Check for consistent terminology and phrasing throughout the text.",
    "Break down any overly long or complex sentences for better readability.",
    "Add specific data or evidence to support claims where appropriate.",
];

const EXTENSIVE: &[&str] = &[
    "Evaluate the document's overall structure and flow for maximum impact.",
    "Condense lengthy sections into more digestible parts without losing meaning.",
    "Verify the accuracy and currency of all facts, figures, and external references.",
    "Explore opportunities for incorporating visual aids such as charts, graphs, or diagrams.",
    "Ensure the generated summary accurately reflects the most critical points of the entire document.",
    "Refine the language to enhance precision, impact, and to eliminate any redundancy.",
    "Consider adding an executive summary if the document is very extensive.",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionBucket {
    /// Fewer than 50 words
    Brief,
    /// 50 to 299 words
    Moderate,
    /// 300 words and up
    Extensive,
}

impl SuggestionBucket {
    pub fn for_word_count(words: usize) -> Self {
        if words < 50 {
            SuggestionBucket::Brief
        } else if words < 300 {
            SuggestionBucket::Moderate
        } else {
            SuggestionBucket::Extensive
        }
    }

    pub fn items(self) -> &'static [&'static str] {
        match self {
            SuggestionBucket::Brief => BRIEF,
            SuggestionBucket::Moderate => MODERATE,
            SuggestionBucket::Extensive => EXTENSIVE,
        }
    }
}

/// Whitespace-delimited, non-empty tokens
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Suggestion list for `text`, one bulleted line per item
pub fn suggest(text: &str) -> String {
    SuggestionBucket::for_word_count(word_count(text))
        .items()
        .iter()
        .map(|item| format!("{}{}", BULLET, item))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    #[test]
    fn test_bucket_boundaries() {
        assert_eq!(SuggestionBucket::for_word_count(0), SuggestionBucket::Brief);
        assert_eq!(SuggestionBucket::for_word_count(49), SuggestionBucket::Brief);
        assert_eq!(SuggestionBucket::for_word_count(50), SuggestionBucket::Moderate);
        assert_eq!(SuggestionBucket::for_word_count(299), SuggestionBucket::Moderate);
        assert_eq!(SuggestionBucket::for_word_count(300), SuggestionBucket::Extensive);
        assert_eq!(SuggestionBucket::for_word_count(301), SuggestionBucket::Extensive);
    }

    #[test]
    fn test_empty_text_gets_brief_template() {
        let out = suggest("");
        assert_eq!(out.lines().count(), 4);
        assert!(out.lines().all(|line| line.starts_with(BULLET)));
    }

    #[test]
    fn test_template_sizes() {
        assert_eq!(suggest(&words(120)).lines().count(), 5);
        assert_eq!(suggest(&words(300)).lines().count(), 7);
    }

    #[test]
    fn test_word_count_ignores_extra_whitespace() {
        assert_eq!(word_count("  one\ttwo\n\nthree  "), 3);
        assert_eq!(word_count("   "), 0);
    }
}
