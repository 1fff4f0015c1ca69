use std::sync::LazyLock;

use regex::{NoExpand, Regex, RegexBuilder};

use super::{Fallback, Lang, Request};

const ZH_EN: [(&str, &str); 20] = [
    ("用户", "user"),
    ("名称", "name"),
    ("时间", "time"),
    ("状态", "status"),
    ("价格", "price"),
    ("数量", "quantity"),
    ("描述", "description"),
    ("创建", "create"),
    ("更新", "update"),
    ("删除", "delete"),
    ("是否", "is"),
    ("号", "number"),
    ("码", "code"),
    ("ID", "id"),
    ("邮箱", "email"),
    ("手机", "phone"),
    ("密码", "password"),
    ("姓名", "name"),
    ("地址", "address"),
    ("年龄", "age"),
];

const EN_ZH: [(&str, &str); 19] = [
    ("user", "用户"),
    ("name", "名称"),
    ("time", "时间"),
    ("status", "状态"),
    ("price", "价格"),
    ("quantity", "数量"),
    ("description", "描述"),
    ("create", "创建"),
    ("update", "更新"),
    ("delete", "删除"),
    ("is", "是否"),
    ("number", "号"),
    ("code", "码"),
    ("id", "ID"),
    ("email", "邮箱"),
    ("phone", "手机"),
    ("password", "密码"),
    ("address", "地址"),
    ("age", "年龄"),
];

type Rules = Vec<(Regex, &'static str)>;

static ZH_EN_RULES: LazyLock<Rules> = LazyLock::new(|| compile(&ZH_EN));
static EN_ZH_RULES: LazyLock<Rules> = LazyLock::new(|| compile(&EN_ZH));

fn compile(table: &[(&str, &'static str)]) -> Rules {
    table
        .iter()
        .map(|(source, target)| {
            let pattern = RegexBuilder::new(&regex::escape(source))
                .case_insensitive(true)
                .build()
                .expect("dictionary regex");
            (pattern, *target)
        })
        .collect()
}

/// Offline term substitution for zh <-> en.
///
/// Entries are applied one after another in table order, each replacing every
/// case-insensitive occurrence of its term in the running result. There is no
/// longest-match rule, so overlapping terms depend on that order: `username`
/// becomes `用户名称` and `用户名` becomes `user名`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Dictionary;

impl Dictionary {
    pub fn translate(&self, text: &str, from: Lang, to: Lang) -> String {
        let rules: &Rules = match (from, to) {
            (Lang::Zh, Lang::En) => &ZH_EN_RULES,
            (Lang::En, Lang::Zh) => &EN_ZH_RULES,
            _ => return text.to_string(),
        };

        rules
            .iter()
            .fold(text.to_string(), |result, (pattern, target)| {
                pattern.replace_all(&result, NoExpand(target)).into_owned()
            })
    }
}

impl Fallback for Dictionary {
    fn translate(&self, request: &Request) -> String {
        Dictionary::translate(self, request.text(), request.source(), request.target())
    }
}
