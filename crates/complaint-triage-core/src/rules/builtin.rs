//! Builtin Rule Definitions
//!
//! コード内で定義されるビルトインのカテゴリ→キーワード対応表。
//! ルールファイルが指定されない場合に使用される。

use serde::{Deserialize, Serialize};

/// ビルトインルール定義
pub const BUILTIN_RULES: &[BuiltinRule] = &[
    BuiltinRule {
        name: "Technical Issue",
        keywords: &["bug", "error", "crash", "technical", "glitch", "failure"],
    },
    BuiltinRule {
        name: "Billing Inquiry",
        keywords: &[
            "bill",
            "invoice",
            "charge",
            "payment",
            "money",
            "subscription",
        ],
    },
    BuiltinRule {
        name: "Service Quality",
        keywords: &[
            "slow",
            "unresponsive",
            "poor quality",
            "bad service",
            "intermittent",
        ],
    },
    BuiltinRule {
        name: "Feature Request",
        keywords: &["wish", "suggest", "add feature", "new functionality"],
    },
    BuiltinRule {
        name: "General Inquiry",
        keywords: &["question", "help", "information"],
    },
];

/// ビルトインルールの静的定義
#[derive(Debug, Clone)]
pub struct BuiltinRule {
    /// カテゴリ名（一意識別子）
    pub name: &'static str,
    /// トリガーキーワード（単語またはフレーズ）
    pub keywords: &'static [&'static str],
}

/// ランタイムのカテゴリ定義
///
/// ビルトインまたはルールファイル（TOML）から構築される。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    /// カテゴリ名
    pub name: String,
    /// キーワード（記述順を保持、大文字小文字は記述のまま）
    pub keywords: Vec<String>,
}

impl CategoryRule {
    pub fn new<N, K, I>(name: N, keywords: I) -> Self
    where
        N: Into<String>,
        K: Into<String>,
        I: IntoIterator<Item = K>,
    {
        Self {
            name: name.into(),
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<&BuiltinRule> for CategoryRule {
    fn from(builtin: &BuiltinRule) -> Self {
        Self {
            name: builtin.name.to_string(),
            keywords: builtin.keywords.iter().map(|s| s.to_string()).collect(),
        }
    }
}
