use std::fmt::{self, Display};
use std::str::FromStr;

use getset::{CopyGetters, Getters};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lang {
    Zh,
    En,
}

impl Lang {
    /// Language code shared by every backend.
    pub fn code(&self) -> &'static str {
        match self {
            Lang::Zh => "zh",
            Lang::En => "en",
        }
    }
}

impl Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Lang {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "zh" | "cn" | "chinese" => Ok(Lang::Zh),
            "en" | "english" => Ok(Lang::En),
            other => Err(format!("unsupported language {other}, expect zh|en")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Getters, CopyGetters)]
pub struct Request {
    #[getset(get = "pub")]
    text: String,
    #[getset(get_copy = "pub")]
    source: Lang,
    #[getset(get_copy = "pub")]
    target: Lang,
}

impl Request {
    pub fn new(text: impl Into<String>, source: Lang, target: Lang) -> Request {
        Request {
            text: text.into(),
            source,
            target,
        }
    }
}
