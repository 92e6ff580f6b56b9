//! # Classifier Module
//!
//! RuleTableに基づいて苦情テキストにカテゴリ（0個以上）を割り当てる。
//!
//! ## マッチング規則
//!
//! 1. テキストを小文字化する（アクセント除去や句読点除去は行わない）
//! 2. 各カテゴリのキーワードを順に試し、単語境界で区切られた出現のみを一致とする
//!    （"bill" は "billiard" に一致しない。複数語のキーワードは連続したフレーズとして一致）
//! 3. カテゴリ内で1つでも一致したら、そのカテゴリの残りのキーワードはスキップ
//! 4. 一致したカテゴリの集合を返す（重複なし）
//!
//! 単語境界は `regex` クレートの `\b`（Unicodeモード）と同じ定義：
//! Unicodeの単語文字（英数字・結合文字・`_` 等）とそれ以外（または文字列端）の間。
//!
//! ## 使用例
//!
//! ```rust
//! use complaint_triage_core::{Classifier, RuleTable};
//!
//! let table = RuleTable::builtin().unwrap();
//! let classifier = Classifier::new(&table).unwrap();
//!
//! let categories = classifier.classify(Some("I have an incorrect charge on my last bill."));
//! assert!(categories.contains("Billing Inquiry"));
//! assert!(classifier.classify(None).is_empty());
//! ```

mod batch;

use std::collections::BTreeSet;

use regex::Regex;

use crate::error::ConfigError;
use crate::rules::{CategoryRule, RuleTable};

pub use batch::{CategoryCount, ClassifiedBatch, ClassifiedRecord, ComplaintRecord};

/// 分類結果（カテゴリ名の集合）
pub type CategorySet = BTreeSet<String>;

/// コンパイル済みのカテゴリ
#[derive(Debug)]
struct CompiledCategory<'a> {
    rule: &'a CategoryRule,
    matchers: Vec<Regex>,
}

impl CompiledCategory<'_> {
    /// いずれかのキーワードが一致するか（最初の一致で打ち切り）
    fn matches(&self, normalized: &str) -> bool {
        self.matchers.iter().any(|m| m.is_match(normalized))
    }
}

/// キーワードによるカテゴリ分類器
///
/// RuleTableを参照で保持する。コンパイル済みパターンは不変なので
/// スレッド間で共有できる。
#[derive(Debug)]
pub struct Classifier<'a> {
    table: &'a RuleTable,
    compiled: Vec<CompiledCategory<'a>>,
}

impl<'a> Classifier<'a> {
    /// 新規分類器を作成（キーワードごとに境界付きパターンをコンパイル）
    pub fn new(table: &'a RuleTable) -> std::result::Result<Self, ConfigError> {
        let compiled = table
            .categories()
            .iter()
            .map(|rule| -> std::result::Result<CompiledCategory<'a>, ConfigError> {
                let matchers = rule
                    .keywords
                    .iter()
                    .map(|k| compile_keyword(k))
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(CompiledCategory { rule, matchers })
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self { table, compiled })
    }

    /// 使用中のRuleTable
    pub fn table(&self) -> &'a RuleTable {
        self.table
    }

    /// 利用可能なカテゴリ名を取得
    pub fn category_names(&self) -> Vec<&'a str> {
        self.table.names()
    }

    /// テキストを分類
    ///
    /// `None` は空集合を返す。分類自体が失敗することはない。
    pub fn classify(&self, text: Option<&str>) -> CategorySet {
        let Some(text) = text else {
            return CategorySet::new();
        };

        let normalized = text.to_lowercase();
        self.compiled
            .iter()
            .filter(|c| c.matches(&normalized))
            .map(|c| c.rule.name.clone())
            .collect()
    }
}

/// 単発の分類（RuleTableから都度コンパイル）
///
/// 多数のテキストを処理する場合は [`Classifier`] を使い回すこと。
pub fn classify(
    text: Option<&str>,
    table: &RuleTable,
) -> std::result::Result<CategorySet, ConfigError> {
    Ok(Classifier::new(table)?.classify(text))
}

fn compile_keyword(keyword: &str) -> std::result::Result<Regex, ConfigError> {
    let pattern = format!(r"\b{}\b", regex::escape(&keyword.to_lowercase()));
    Regex::new(&pattern).map_err(|e| ConfigError::Pattern {
        keyword: keyword.to_string(),
        message: e.to_string(),
    })
}
