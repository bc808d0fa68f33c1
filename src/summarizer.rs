//! Mock summary generator.
//!
//! Picks a handful of sentences (beginning, middle, end, then padding) and
//! bolds a fixed vocabulary of "important sounding" words. There is no model
//! behind this; the output only looks like a summary.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

pub const NO_TEXT_MESSAGE: &str = "No extractable text to summarize.";
pub const EMPTY_SUMMARY_MESSAGE: &str = "Could not generate a summary from the provided text.";

/// Delimiter wrapped around emphasized spans
pub const EMPHASIS: &str = "**";

pub const KEY_PHRASES: &[&str] = &[
    "main idea", "key aspect", "important point", "core concept", "primary focus",
    "significant finding", "crucial element", "major challenge", "effective solution",
    "overall result", "study shows", "research indicates", "future implications",
    "strategic goal", "key benefit", "critical factor", "essential component",
    "fundamental principle", "major implication", "key takeaway", "critical analysis",
    "primary objective", "key finding", "demonstrates that", "suggests that", "highlights the need",
    "crucial role", "significant impact", "potential benefits", "major obstacle", "novel approach",
    "current state", "future outlook", "historical context", "methodology used", "data analysis",
    "key recommendations", "actionable insights", "proposed solution", "critical evaluation",
    "understanding of", "impact of", "role of", "development of", "challenges in", "opportunities for",
];

pub const KEYWORDS: &[&str] = &[
    "important", "key", "main", "focus", "result", "benefit", "challenge", "solution",
    "impact", "effect", "data", "analysis", "study", "research", "development", "future",
    "innovation", "growth", "success", "failure", "principle", "implication", "takeaway",
    "objective", "finding", "role", "obstacle", "approach", "demonstrates", "suggests", "highlights",
    "current", "outlook", "context", "methodology", "recommendations", "insights", "proposed",
    "evaluation", "understanding", "opportunities", "critical", "significant", "crucial", "essential",
    "primary", "major", "fundamental", "novel", "effective", "overall",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryLength {
    Short,
    #[default]
    Medium,
    Long,
}

impl SummaryLength {
    pub const ALL: [SummaryLength; 3] = [SummaryLength::Short, SummaryLength::Medium, SummaryLength::Long];

    /// Upper bound on sentences for this length
    pub fn target(self) -> usize {
        match self {
            SummaryLength::Short => 3,
            SummaryLength::Medium => 6,
            SummaryLength::Long => 10,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SummaryLength::Short => "short",
            SummaryLength::Medium => "medium",
            SummaryLength::Long => "long",
        }
    }

    pub fn next(self) -> Self {
        match self {
            SummaryLength::Short => SummaryLength::Medium,
            SummaryLength::Medium => SummaryLength::Long,
            SummaryLength::Long => SummaryLength::Short,
        }
    }
}

impl fmt::Display for SummaryLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SummaryLength {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "short" | "s" => Ok(SummaryLength::Short),
            "medium" | "m" => Ok(SummaryLength::Medium),
            "long" | "l" => Ok(SummaryLength::Long),
            other => Err(format!("unknown summary length '{}' (expected short, medium or long)", other)),
        }
    }
}

/// Source of the padding choices. `pick(n)` returns an index in `0..n`.
pub trait SentencePicker {
    fn pick(&mut self, upper: usize) -> usize;
}

/// Uniform random picks, optionally seeded
pub struct RandomPicker {
    rng: StdRng,
}

impl RandomPicker {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }
}

impl SentencePicker for RandomPicker {
    fn pick(&mut self, upper: usize) -> usize {
        if upper == 0 {
            0
        } else {
            self.rng.gen_range(0..upper)
        }
    }
}

/// Deterministic stride sampling: walks the pool in fixed steps
#[derive(Debug, Clone)]
pub struct StridePicker {
    offset: usize,
    stride: usize,
}

impl StridePicker {
    pub fn new(stride: usize) -> Self {
        Self {
            offset: 0,
            stride: stride.max(1),
        }
    }
}

impl Default for StridePicker {
    fn default() -> Self {
        Self::new(3)
    }
}

impl SentencePicker for StridePicker {
    fn pick(&mut self, upper: usize) -> usize {
        if upper == 0 {
            return 0;
        }
        let index = self.offset % upper;
        self.offset = self.offset.wrapping_add(self.stride);
        index
    }
}

fn sentence_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[^.!?]+[.!?]+").expect("sentence pattern is valid"))
}

/// Phrases first, then single keywords, each list in its fixed order
fn emphasis_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        KEY_PHRASES
            .iter()
            .chain(KEYWORDS.iter())
            .map(|term| {
                Regex::new(&format!(r"(?i){}", regex::escape(term)))
                    .expect("emphasis pattern is valid")
            })
            .collect()
    })
}

fn delimiter_run_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\*{2,}|_{2,}").expect("delimiter run pattern is valid"))
}

fn is_ascii_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Whole-word check with ASCII word characters only, so `keyé` still
/// counts `key` as a word.
fn on_word_boundaries(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back().map_or(false, is_ascii_word);
    let after = text[end..].chars().next().map_or(false, is_ascii_word);
    !before && !after
}

/// Collapse `**` / `__` runs already in the text to a single character so
/// they can't pair up with the emphasis markup.
fn neutralize_delimiters(sentence: &str) -> Cow<'_, str> {
    delimiter_run_pattern().replace_all(sentence, |caps: &regex::Captures| caps[0][..1].to_string())
}

/// Runs of non-terminator characters closed by `.`, `!` or `?`.
/// Trailing text without a terminator is dropped.
pub fn split_sentences(text: &str) -> Vec<&str> {
    sentence_pattern().find_iter(text).map(|m| m.as_str()).collect()
}

/// Indices of the sentences that make it into the summary, in document order
pub fn select_sentences(
    sentences: &[&str],
    length: SummaryLength,
    picker: &mut dyn SentencePicker,
) -> Vec<usize> {
    let total = sentences.len();
    let count = length.target().min(total);
    if count == 0 {
        return Vec::new();
    }

    // Structural coverage: first, middle, last
    let mut seeds = vec![0];
    if total > 1 && total * 2 > count {
        seeds.push(total / 2);
    }
    if total > 2 && total > count {
        seeds.push(total - 1);
    }

    let mut seen: HashSet<&str> = HashSet::new();
    let mut selected: Vec<usize> = Vec::with_capacity(count);
    for index in seeds {
        if seen.insert(sentences[index].trim()) {
            selected.push(index);
        }
    }

    let mut pool: Vec<usize> = Vec::new();
    let mut pooled: HashSet<&str> = HashSet::new();
    for (index, sentence) in sentences.iter().enumerate() {
        let key = sentence.trim();
        if !seen.contains(key) && pooled.insert(key) {
            pool.push(index);
        }
    }

    while selected.len() < count && !pool.is_empty() {
        let choice = picker.pick(pool.len()).min(pool.len() - 1);
        selected.push(pool.remove(choice));
    }

    selected.truncate(count);
    selected.sort_unstable();
    selected
}

/// Byte spans (in `sentence`) that should be emphasized. Spans never overlap.
pub fn emphasis_spans(sentence: &str) -> Vec<(usize, usize)> {
    let mut spans: Vec<(usize, usize)> = Vec::new();

    // Offsets always refer to the untouched sentence, so earlier markup can't
    // shift or garble later matches.
    for pattern in emphasis_patterns() {
        for found in pattern.find_iter(sentence) {
            let (start, end) = (found.start(), found.end());
            if !on_word_boundaries(sentence, start, end) {
                continue;
            }
            let overlaps = spans.iter().any(|&(s, e)| start < e && s < end);
            if !overlaps {
                spans.push((start, end));
            }
        }
    }

    spans.sort_unstable();
    spans
}

/// Wrap every emphasized span in the emphasis delimiter
pub fn emphasize(sentence: &str) -> String {
    let neutral = neutralize_delimiters(sentence);
    let sentence: &str = &neutral;
    let spans = emphasis_spans(sentence);
    let mut out = String::with_capacity(sentence.len() + spans.len() * EMPHASIS.len() * 2);
    let mut cursor = 0;

    for (start, end) in spans {
        out.push_str(&sentence[cursor..start]);
        out.push_str(EMPHASIS);
        out.push_str(&sentence[start..end]);
        out.push_str(EMPHASIS);
        cursor = end;
    }
    out.push_str(&sentence[cursor..]);
    out
}

/// Build the mock summary for `text`
pub fn summarize(text: &str, length: SummaryLength, picker: &mut dyn SentencePicker) -> String {
    let sentences = split_sentences(text);
    if sentences.is_empty() {
        return NO_TEXT_MESSAGE.to_string();
    }

    let summary = select_sentences(&sentences, length, picker)
        .into_iter()
        .map(|index| emphasize(sentences[index].trim()))
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string();

    if summary.is_empty() {
        EMPTY_SUMMARY_MESSAGE.to_string()
    } else {
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(n: usize) -> String {
        (1..=n).map(|i| format!("Sentence number {}.", i)).collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn test_no_terminators_gives_fixed_message() {
        let mut picker = StridePicker::default();
        assert_eq!(summarize("", SummaryLength::Short, &mut picker), NO_TEXT_MESSAGE);
        assert_eq!(
            summarize("just some words without an ending", SummaryLength::Long, &mut picker),
            NO_TEXT_MESSAGE
        );
    }

    #[test]
    fn test_two_sentences_long_keeps_both() {
        let mut picker = StridePicker::default();
        let summary = summarize("The cat sat. The dog ran!", SummaryLength::Long, &mut picker);
        assert_eq!(summary, "The cat sat. The dog ran!");
    }

    #[test]
    fn test_split_sentences() {
        let sentences = split_sentences("One. Two?! Three... trailing words");
        assert_eq!(sentences, vec!["One.", " Two?!", " Three..."]);
    }

    #[test]
    fn test_selection_respects_target_and_order() {
        let text = numbered(20);
        let sentences = split_sentences(&text);
        let mut picker = StridePicker::new(5);

        let short = select_sentences(&sentences, SummaryLength::Short, &mut picker);
        assert_eq!(short, vec![0, 10, 19]);

        let long = select_sentences(&sentences, SummaryLength::Long, &mut picker);
        assert_eq!(long.len(), 10);
        assert!(long.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(long.first(), Some(&0));
        assert_eq!(long.last(), Some(&19));
    }

    #[test]
    fn test_duplicate_sentences_collapse() {
        let sentences = split_sentences("Same. Same. Same. Other.");
        let mut picker = StridePicker::default();
        let picked = select_sentences(&sentences, SummaryLength::Long, &mut picker);
        let texts: Vec<&str> = picked.iter().map(|&i| sentences[i].trim()).collect();
        assert_eq!(texts, vec!["Same.", "Other."]);
    }

    #[test]
    fn test_emphasis_phrases_before_keywords() {
        assert_eq!(
            emphasize("The key finding is important."),
            "The **key finding** is **important**."
        );
    }

    #[test]
    fn test_emphasis_case_insensitive_whole_word() {
        assert_eq!(emphasize("KEY ideas on a keyboard."), "**KEY** ideas on a keyboard.");
        assert_eq!(
            emphasize("Data and more data."),
            "**Data** and more **data**."
        );
    }

    #[test]
    fn test_emphasis_skips_overlapping_matches() {
        // "impact of" claims the span first; "impact" alone must not nest inside it
        let spans = emphasis_spans("The impact of growth.");
        assert_eq!(spans, vec![(4, 13), (14, 20)]);
        assert_eq!(emphasize("The impact of growth."), "The **impact of** **growth**.");
    }

    #[test]
    fn test_word_boundaries_are_ascii() {
        assert_eq!(emphasize("The keyé data."), "The **key**é **data**.");
        assert_eq!(emphasize("Keys and monkey data."), "Keys and monkey **data**.");
    }

    #[test]
    fn test_literal_delimiters_do_not_pair_with_markup() {
        let marked = emphasize("Compute 2 ** 3 as the key step.");
        assert_eq!(marked, "Compute 2 * 3 as the **key** step.");
        assert_eq!(
            crate::render::emphasis_segments(&marked),
            vec![
                crate::render::Segment::Plain("Compute 2 * 3 as the ".to_string()),
                crate::render::Segment::Emphasis("key".to_string()),
                crate::render::Segment::Plain(" step.".to_string()),
            ]
        );
        assert_eq!(emphasize("Call __init__ first."), "Call _init_ first.");
    }

    #[test]
    fn test_seeded_random_is_reproducible() {
        let text = numbered(30);
        let a = summarize(&text, SummaryLength::Medium, &mut RandomPicker::new(Some(7)));
        let b = summarize(&text, SummaryLength::Medium, &mut RandomPicker::new(Some(7)));
        assert_eq!(a, b);
    }

    #[test]
    fn test_length_parsing() {
        assert_eq!("Short".parse::<SummaryLength>().unwrap(), SummaryLength::Short);
        assert_eq!("long".parse::<SummaryLength>().unwrap(), SummaryLength::Long);
        assert!("huge".parse::<SummaryLength>().is_err());
        assert_eq!(SummaryLength::Long.next(), SummaryLength::Short);
    }
}
