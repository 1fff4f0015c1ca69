use std::sync::LazyLock;

use regex::Regex;

static CONSONANT_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([bcdfghjklmnpqrstvwxyz]{2,})([aeiou])").expect("consonant run regex")
});

const COMMON_WORDS: [&str; 6] = ["data", "user", "name", "id", "type", "status"];

/// Guesses word boundaries in an all-lowercase token and joins the pieces
/// with `_`.
///
/// Heuristic only: a boundary goes before every run of two or more consonants
/// followed by a vowel, then before every occurrence of a few frequent
/// identifier words. Wrong splits are expected (`username` -> `use_r_name`).
pub fn smart_split(token: &str) -> String {
    let lowered = token.to_lowercase();
    let mut result = CONSONANT_RUN.replace_all(&lowered, "_${1}${2}").into_owned();

    for word in COMMON_WORDS {
        if result.contains(word) {
            result = result.replace(word, &format!("_{word}"));
        }
    }

    result
        .split('_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}
