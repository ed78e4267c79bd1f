//! Sentence and word segmentation.
//!
//! Sentences are split at terminal punctuation with an abbreviation list and
//! initial detection in the style of the Punkt tokenizer. Words are split per
//! sentence with the Penn Treebank rules: punctuation becomes separate tokens,
//! clitics are split off (`don't` -> `do` `n't`), and only the final period of
//! a sentence is detached, so `Dr.` or `e.g.` mid-sentence stay whole.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

/// Closing characters allowed after terminal punctuation.
const CLOSERS: &[char] = &['"', '\'', ')', ']', '}', '»', '”', '’'];

/// Characters stripped from the front of a token before abbreviation lookup.
const OPENERS: &[char] = &['"', '\'', '(', '[', '{', '«', '“', '‘'];

/// Abbreviations that precede a name or number, so they never end a sentence.
const TITLES: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "mt", "ft", "rev", "hon", "capt", "lt",
    "sgt", "gov", "sen", "pres", "vs", "nos", "vol", "vols", "pp", "figs",
];

/// Abbreviations that end a sentence only when a capitalised word follows.
///
/// Ordinary words that are also abbreviations ("no", "sat", "co") are left
/// out; a period after them always ends the sentence.
const ABBREVIATIONS: &[&str] = &[
    "inc", "ltd", "corp", "bros", "dept", "univ", "assn", "approx", "etc", "cf", "eds", "jan",
    "feb", "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov", "tue", "thu", "fri",
];

lazy_static! {
    static ref NON_SPACE: Regex = Regex::new(r"\S+").unwrap();
    static ref LETTERS_ONLY: Regex = Regex::new(r"^\p{L}+$").unwrap();

    // Starting quotes
    static ref LEADING_DOUBLE_QUOTE: Regex = Regex::new(r#"^""#).unwrap();
    static ref OPEN_QUOTES: Regex = Regex::new(r"(``)").unwrap();
    static ref QUOTE_AFTER_OPENER: Regex = Regex::new(r#"([ (\[{<])("|'')"#).unwrap();
    static ref QUOTED_LETTER: Regex = Regex::new(r"'(\w)\b").unwrap();

    // Punctuation
    static ref FINAL_PERIOD: Regex = Regex::new(r#"([^.])(\.)([\])}>"']*)\s*$"#).unwrap();
    static ref COMMA_COLON: Regex = Regex::new(r"([:,])([^\d])").unwrap();
    static ref TRAILING_COMMA_COLON: Regex = Regex::new(r"([:,])$").unwrap();
    static ref ELLIPSIS: Regex = Regex::new(r"\.{2,}").unwrap();
    static ref SYMBOLS: Regex = Regex::new(r"[;@#$%&*?!]").unwrap();
    static ref CLOSING_SINGLE_QUOTE: Regex = Regex::new(r"([^'])' ").unwrap();
    static ref BRACKETS: Regex = Regex::new(r"[\]\[(){}<>]").unwrap();
    static ref DOUBLE_DASH: Regex = Regex::new(r"--").unwrap();

    // Ending quotes and clitics
    static ref CURLY_CLOSERS: Regex = Regex::new(r"([»”’])").unwrap();
    static ref DOUBLE_SINGLE_QUOTES: Regex = Regex::new(r"''").unwrap();
    static ref DOUBLE_QUOTE: Regex = Regex::new(r#"""#).unwrap();
    static ref CLITIC_SHORT: Regex = Regex::new(r"([^' ])('[sS]|'[mM]|'[dD]|') ").unwrap();
    static ref CLITIC_LONG: Regex =
        Regex::new(r"([^' ])('ll|'LL|'re|'RE|'ve|'VE|n't|N'T) ").unwrap();

    /// Fused words split into two tokens (`cannot` -> `can` `not`).
    static ref FUSED: Vec<Regex> = vec![
        Regex::new(r"(?i)\b(can)(not)\b").unwrap(),
        Regex::new(r"(?i)\b(d)('ye)\b").unwrap(),
        Regex::new(r"(?i)\b(gim)(me)\b").unwrap(),
        Regex::new(r"(?i)\b(gon)(na)\b").unwrap(),
        Regex::new(r"(?i)\b(got)(ta)\b").unwrap(),
        Regex::new(r"(?i)\b(lem)(me)\b").unwrap(),
        Regex::new(r"(?i)\b(more)('n)\b").unwrap(),
        Regex::new(r"(?i) ('t)(is)\b").unwrap(),
        Regex::new(r"(?i) ('t)(was)\b").unwrap(),
    ];
    static ref WANNA: Regex = Regex::new(r"(?i)\b(wan)(na)(\s)").unwrap();
}

/// Sentences and word tokens of a text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokenized {
    pub sentences: Vec<String>,
    pub words: Vec<String>,
}

impl Tokenized {
    /// Tokens made only of alphabetic characters.
    pub fn clean_words(&self) -> Vec<&str> {
        self.words
            .iter()
            .map(String::as_str)
            .filter(|w| is_clean_word(w))
            .collect()
    }
}

/// Split `text` into sentences and word tokens.
pub fn tokenize(text: &str) -> Tokenized {
    let sentences = split_sentences(text);
    let words = sentences
        .iter()
        .flat_map(|sentence| split_words(sentence))
        .collect();
    Tokenized { sentences, words }
}

/// Whether a token consists entirely of letters.
///
/// Only the Unicode letter categories count: letter numbers such as `Ⅻ`
/// and combining marks are rejected even though they are alphabetic.
pub fn is_clean_word(token: &str) -> bool {
    LETTERS_ONLY.is_match(token)
}

/// Split text into sentences.
///
/// Empty or whitespace-only text has no sentences. Text without terminal
/// punctuation is a single sentence.
pub fn split_sentences(text: &str) -> Vec<String> {
    let tokens: Vec<_> = NON_SPACE.find_iter(text).collect();
    let mut sentences = Vec::new();
    let mut start: Option<usize> = None;

    for (i, token) in tokens.iter().enumerate() {
        let begin = *start.get_or_insert(token.start());
        let next = tokens.get(i + 1).map(|m| m.as_str());

        if ends_sentence(token.as_str(), next) {
            sentences.push(text[begin..token.end()].to_string());
            start = None;
        }
    }

    if let (Some(begin), Some(last)) = (start, tokens.last()) {
        sentences.push(text[begin..last.end()].to_string());
    }

    sentences
}

/// Whether `token` closes a sentence, given the token that follows it.
fn ends_sentence(token: &str, next: Option<&str>) -> bool {
    let core = token.trim_end_matches(CLOSERS);

    if core.ends_with('!') || core.ends_with('?') {
        return true;
    }
    if !core.ends_with('.') {
        return false;
    }

    // Ellipsis only ends a sentence when a capitalised word follows
    if core.ends_with("..") {
        return next.is_some_and(starts_uppercase);
    }

    let word = core
        .trim_end_matches('.')
        .trim_start_matches(OPENERS)
        .to_lowercase();

    if word.is_empty() {
        return true;
    }
    let capital_follows = next.is_some_and(starts_uppercase);

    // Initials ("J. Doe"), except the pronoun ("but I. We")
    if word.chars().count() == 1 && word.chars().all(char::is_alphabetic) {
        return word == "i" && capital_follows;
    }
    // Dotted acronyms ("U.S.", "e.g.")
    if word.contains('.') {
        return false;
    }
    if TITLES.contains(&word.as_str()) {
        return false;
    }
    if ABBREVIATIONS.contains(&word.as_str()) {
        return capital_follows;
    }
    true
}

fn starts_uppercase(token: &str) -> bool {
    token
        .trim_start_matches(OPENERS)
        .chars()
        .next()
        .is_some_and(char::is_uppercase)
}

/// Split one sentence into word tokens using Treebank rules.
pub fn split_words(sentence: &str) -> Vec<String> {
    let mut text = LEADING_DOUBLE_QUOTE.replace(sentence, "``").into_owned();
    text = OPEN_QUOTES.replace_all(&text, " $1 ").into_owned();
    text = QUOTE_AFTER_OPENER.replace_all(&text, "$1 `` ").into_owned();
    text = QUOTED_LETTER
        .replace_all(&text, |caps: &Captures| {
            let letter = &caps[1];
            if matches!(letter, "m" | "t" | "s" | "d" | "n" | "M" | "T" | "S" | "D" | "N") {
                caps[0].to_string()
            } else {
                format!("' {}", letter)
            }
        })
        .into_owned();

    text = FINAL_PERIOD.replace_all(&text, "$1 $2 $3 ").into_owned();
    text = COMMA_COLON.replace_all(&text, " $1 $2").into_owned();
    text = TRAILING_COMMA_COLON.replace_all(&text, " $1 ").into_owned();
    text = ELLIPSIS.replace_all(&text, " $0 ").into_owned();
    text = SYMBOLS.replace_all(&text, " $0 ").into_owned();
    text = CLOSING_SINGLE_QUOTE.replace_all(&text, "$1 ' ").into_owned();
    text = BRACKETS.replace_all(&text, " $0 ").into_owned();
    text = DOUBLE_DASH.replace_all(&text, " -- ").into_owned();

    text = format!(" {} ", text);
    text = CURLY_CLOSERS.replace_all(&text, " $1 ").into_owned();
    text = DOUBLE_SINGLE_QUOTES.replace_all(&text, " '' ").into_owned();
    text = DOUBLE_QUOTE.replace_all(&text, " '' ").into_owned();
    text = CLITIC_SHORT.replace_all(&text, "$1 $2 ").into_owned();
    text = CLITIC_LONG.replace_all(&text, "$1 $2 ").into_owned();

    for re in FUSED.iter() {
        text = re.replace_all(&text, " ${1} ${2} ").into_owned();
    }
    text = WANNA.replace_all(&text, " ${1} ${2} ${3}").into_owned();

    text.split_whitespace().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sentences_basic() {
        let sentences = split_sentences("The cat sat. The dog ran! Did it? Yes.");
        assert_eq!(
            sentences,
            vec!["The cat sat.", "The dog ran!", "Did it?", "Yes."]
        );
    }

    #[test]
    fn test_split_sentences_abbreviations_and_initials() {
        let sentences = split_sentences("Dr. Smith met J. Doe in the U.S. today. Then he left.");
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0], "Dr. Smith met J. Doe in the U.S. today.");
    }

    #[test]
    fn test_split_sentences_common_words_end_sentences() {
        assert_eq!(
            split_sentences("She said no. Then she left."),
            vec!["She said no.", "Then she left."]
        );
        assert_eq!(split_sentences("We met on the sun. It was hot.").len(), 2);
        assert_eq!(split_sentences("He was at the co. We left.").len(), 2);
    }

    #[test]
    fn test_split_sentences_pronoun_i_ends_sentence() {
        let tokenized = tokenize("Nobody came but I. We waited.");
        assert_eq!(tokenized.sentences, vec!["Nobody came but I.", "We waited."]);
        assert_eq!(tokenized.clean_words(), vec!["Nobody", "came", "but", "I", "We", "waited"]);
    }

    #[test]
    fn test_split_sentences_abbreviation_before_capital() {
        let sentences = split_sentences("They joined Acme Inc. The deal closed. See pp. Nine.");
        assert_eq!(
            sentences,
            vec!["They joined Acme Inc.", "The deal closed.", "See pp. Nine."]
        );
        assert_eq!(split_sentences("Acme Inc. and others agreed.").len(), 1);
    }

    #[test]
    fn test_split_sentences_closing_quote() {
        let sentences = split_sentences("He said \"stop.\" She did not.");
        assert_eq!(sentences, vec!["He said \"stop.\"", "She did not."]);
    }

    #[test]
    fn test_split_sentences_ellipsis() {
        let sentences = split_sentences("Wait... and see... Then go.");
        assert_eq!(sentences, vec!["Wait... and see...", "Then go."]);
    }

    #[test]
    fn test_split_sentences_degenerate() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("  \n\t ").is_empty());
        assert_eq!(split_sentences("no terminal punctuation"), vec!["no terminal punctuation"]);
    }

    #[test]
    fn test_split_words_punctuation() {
        assert_eq!(
            split_words("Hello, world: it's (really) fine."),
            vec!["Hello", ",", "world", ":", "it", "'s", "(", "really", ")", "fine", "."]
        );
    }

    #[test]
    fn test_split_words_clitics_and_fused() {
        assert_eq!(split_words("I don't know."), vec!["I", "do", "n't", "know", "."]);
        assert_eq!(split_words("We cannot stay"), vec!["We", "can", "not", "stay"]);
        assert_eq!(split_words("You're gonna go"), vec!["You", "'re", "gon", "na", "go"]);
    }

    #[test]
    fn test_split_words_keeps_inner_periods() {
        assert_eq!(
            split_words("Dr. Smith paid $3.50 e.g. today."),
            vec!["Dr.", "Smith", "paid", "$", "3.50", "e.g.", "today", "."]
        );
    }

    #[test]
    fn test_split_words_quotes() {
        assert_eq!(
            split_words("\"Go now,\" he said."),
            vec!["``", "Go", "now", ",", "''", "he", "said", "."]
        );
    }

    #[test]
    fn test_clean_words_filter() {
        let tokenized = tokenize("Well-known facts: 42 cats, café. Naïve?");
        assert_eq!(tokenized.sentences.len(), 2);
        assert_eq!(tokenized.clean_words(), vec!["facts", "cats", "café", "Naïve"]);
    }

    #[test]
    fn test_is_clean_word() {
        assert!(is_clean_word("hello"));
        assert!(is_clean_word("Über"));
        assert!(is_clean_word("日本"));
        assert!(!is_clean_word("Ⅻ"));
        assert!(!is_clean_word("e\u{301}"));
        assert!(!is_clean_word(""));
        assert!(!is_clean_word("n't"));
        assert!(!is_clean_word("x2"));
        assert!(!is_clean_word("well-known"));
    }
}
