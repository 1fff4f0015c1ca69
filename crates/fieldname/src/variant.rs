use std::fmt::{self, Display};

use getset::{CopyGetters, Getters};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantKind {
    Translation,
    CamelCase,
    SnakeCase,
    Lowercase,
    Uppercase,
}

impl VariantKind {
    pub fn label(&self) -> &'static str {
        match self {
            VariantKind::Translation => "翻译",
            VariantKind::CamelCase => "驼峰命名",
            VariantKind::SnakeCase => "下划线命名",
            VariantKind::Lowercase => "全小写",
            VariantKind::Uppercase => "全大写",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Getters, CopyGetters)]
pub struct Variant {
    #[getset(get_copy = "pub")]
    kind: VariantKind,
    #[getset(get = "pub")]
    value: String,
}

impl Variant {
    pub fn new(kind: VariantKind, value: impl Into<String>) -> Variant {
        Variant {
            kind,
            value: value.into(),
        }
    }
}

impl Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.label(), self.value)
    }
}
