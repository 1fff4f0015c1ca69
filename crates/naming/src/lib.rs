//! Identifier naming conventions.
//!
//! Everything here is a pure string transform. `smart_split` is a best-effort
//! guess at word boundaries and gives no guarantee of being right.

mod case;
mod split;

pub use case::{
    LowercaseMode, SnakeCase, SnakeOptions, snake_case, to_camel_case, to_lower_compact,
    to_snake_case, to_upper_compact,
};
pub use split::smart_split;

/// True when `text` holds at least one CJK unified ideograph (U+4E00..=U+9FA5).
pub fn contains_cjk(text: &str) -> bool {
    text.chars().any(|c| ('\u{4e00}'..='\u{9fa5}').contains(&c))
}
