use std::fmt::{self, Display};
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use super::split::smart_split;

/// `XMLHttp` -> `XML_Http`
static ACRONYM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z]+)([A-Z][a-z])").expect("acronym regex"));
/// `aB` -> `a_B`
static BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("boundary regex"));

/// What to do with an all-lowercase input that has no visible word boundary.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LowercaseMode {
    #[default]
    Keep,
    Split,
    Ask,
}

impl FromStr for LowercaseMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "keep" => Ok(LowercaseMode::Keep),
            "split" => Ok(LowercaseMode::Split),
            "ask" => Ok(LowercaseMode::Ask),
            other => Err(format!("unknown lowercase mode {other}, expect keep|split|ask")),
        }
    }
}

impl Display for LowercaseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = match self {
            LowercaseMode::Keep => "keep",
            LowercaseMode::Split => "split",
            LowercaseMode::Ask => "ask",
        };
        write!(f, "{mode}")
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SnakeOptions {
    pub lowercase: LowercaseMode,
}

impl SnakeOptions {
    pub fn new(lowercase: LowercaseMode) -> SnakeOptions {
        SnakeOptions { lowercase }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnakeCase {
    Converted(String),
    /// All lowercase without boundaries, the caller has to decide between
    /// keeping and splitting it.
    NeedsDecision(String),
}

impl SnakeCase {
    /// Flattens the outcome, `NeedsDecision` becomes a prompt string.
    pub fn into_string(self) -> String {
        match self {
            SnakeCase::Converted(converted) => converted,
            SnakeCase::NeedsDecision(input) => {
                format!("[需要处理全小写字符串: {input}] 请选择处理方式")
            }
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn words(phrase: &str) -> Vec<String> {
    phrase
        .trim()
        .chars()
        .filter(|c| is_word_char(*c) || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// `user name` -> `userName`
pub fn to_camel_case(phrase: &str) -> String {
    words(phrase)
        .iter()
        .enumerate()
        .map(|(idx, word)| {
            if idx == 0 {
                return word.to_lowercase();
            }
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => format!(
                    "{}{}",
                    first.to_uppercase(),
                    chars.as_str().to_lowercase()
                ),
                None => String::new(),
            }
        })
        .collect()
}

/// Classifies `phrase` and converts it to snake_case.
///
/// - with whitespace: punctuation is dropped and words are joined by `_`
/// - with an uppercase letter: camelCase / PascalCase boundaries, acronym
///   runs included (`XMLHttpRequest` -> `xml_http_request`)
/// - otherwise: decided by [`SnakeOptions::lowercase`]
pub fn snake_case(phrase: &str, options: &SnakeOptions) -> SnakeCase {
    if phrase.is_empty() {
        return SnakeCase::Converted(String::new());
    }

    if phrase.chars().any(char::is_whitespace) {
        return SnakeCase::Converted(words(phrase).join("_").to_lowercase());
    }

    if phrase.chars().any(|c| c.is_ascii_uppercase()) {
        let split = ACRONYM.replace_all(phrase, "${1}_${2}");
        let split = BOUNDARY.replace_all(&split, "${1}_${2}");
        return SnakeCase::Converted(split.to_lowercase());
    }

    match options.lowercase {
        LowercaseMode::Keep => SnakeCase::Converted(phrase.to_string()),
        LowercaseMode::Split => SnakeCase::Converted(smart_split(phrase)),
        LowercaseMode::Ask => SnakeCase::NeedsDecision(phrase.to_string()),
    }
}

pub fn to_snake_case(phrase: &str, options: &SnakeOptions) -> String {
    snake_case(phrase, options).into_string()
}

/// Lowercase with every non word character removed.
pub fn to_lower_compact(phrase: &str) -> String {
    phrase
        .to_lowercase()
        .chars()
        .filter(|c| is_word_char(*c))
        .collect()
}

/// Uppercase with every non word character removed.
pub fn to_upper_compact(phrase: &str) -> String {
    phrase
        .to_uppercase()
        .chars()
        .filter(|c| is_word_char(*c))
        .collect()
}
