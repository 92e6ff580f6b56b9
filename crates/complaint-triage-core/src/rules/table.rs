//! Rule Table
//!
//! カテゴリ→キーワード対応表のランタイム表現。
//! 起動時に一度だけ構築し、以降は読み取り専用で参照渡しする。

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result, TriageError};

use super::builtin::{CategoryRule, BUILTIN_RULES};

/// ルールファイルの標準ファイル名
pub const RULES_FILE: &str = "rules.toml";

/// ビルトインと同じ内容のルールファイルテンプレート（コメント付き）
const DEFAULT_RULES_TEMPLATE: &str = r#"# complaint-triage rule file
# Location: ~/.complaint-triage/rules.toml (or pass --rules <FILE>)
#
# Each [[categories]] entry maps a category name to its trigger keywords.
# Keywords match case-insensitively as whole words; multi-word keywords
# must appear as a contiguous phrase. Every category needs at least one
# keyword and category names must be unique.

[[categories]]
name = "Technical Issue"
keywords = ["bug", "error", "crash", "technical", "glitch", "failure"]

[[categories]]
name = "Billing Inquiry"
keywords = ["bill", "invoice", "charge", "payment", "money", "subscription"]

[[categories]]
name = "Service Quality"
keywords = ["slow", "unresponsive", "poor quality", "bad service", "intermittent"]

[[categories]]
name = "Feature Request"
keywords = ["wish", "suggest", "add feature", "new functionality"]

[[categories]]
name = "General Inquiry"
keywords = ["question", "help", "information"]
"#;

static SHARED_BUILTIN: OnceCell<RuleTable> = OnceCell::new();

/// ルールファイル（TOML）の構造
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RulesFile {
    #[serde(default)]
    pub categories: Vec<CategoryRule>,
}

/// 検証済みのカテゴリ→キーワード対応表
///
/// 構築時に以下を保証する：
///
/// - カテゴリが1つ以上ある
/// - カテゴリ名が空でなく、重複しない
/// - 各カテゴリにキーワードが1つ以上あり、空白のみのキーワードがない
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    categories: Vec<CategoryRule>,
}

impl RuleTable {
    /// エントリ列を検証して構築
    pub fn from_entries(
        entries: Vec<CategoryRule>,
    ) -> std::result::Result<Self, ConfigError> {
        if entries.is_empty() {
            return Err(ConfigError::Empty);
        }

        let mut seen = HashSet::new();
        for entry in &entries {
            if entry.name.trim().is_empty() {
                return Err(ConfigError::BlankCategory);
            }
            if !seen.insert(entry.name.as_str()) {
                return Err(ConfigError::DuplicateCategory {
                    category: entry.name.clone(),
                });
            }
            if entry.keywords.is_empty() {
                return Err(ConfigError::EmptyKeywords {
                    category: entry.name.clone(),
                });
            }
            if entry.keywords.iter().any(|k| k.trim().is_empty()) {
                return Err(ConfigError::BlankKeyword {
                    category: entry.name.clone(),
                });
            }
        }

        tracing::debug!(categories = entries.len(), "rule table loaded");
        Ok(Self {
            categories: entries,
        })
    }

    /// ビルトインルールで構築
    pub fn builtin() -> std::result::Result<Self, ConfigError> {
        Self::from_entries(BUILTIN_RULES.iter().map(CategoryRule::from).collect())
    }

    /// プロセス全体で共有するビルトインテーブル（初回呼び出し時に一度だけ構築）
    pub fn shared_builtin() -> std::result::Result<&'static RuleTable, ConfigError> {
        SHARED_BUILTIN.get_or_try_init(Self::builtin)
    }

    /// TOML文字列から構築
    pub fn load_from_str(content: &str) -> std::result::Result<Self, ConfigError> {
        let file: RulesFile = toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        Self::from_entries(file.categories)
    }

    /// ルールファイルから構築
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::load_from_str(&content).map_err(|source| TriageError::ConfigFile {
            path: path.to_path_buf(),
            source,
        })
    }

    /// デフォルトのルールファイルテンプレート
    pub fn default_template() -> &'static str {
        DEFAULT_RULES_TEMPLATE
    }

    /// 全カテゴリを取得（記述順）
    pub fn categories(&self) -> &[CategoryRule] {
        &self.categories
    }

    /// カテゴリ名一覧（記述順）
    pub fn names(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }

    /// カテゴリ定義を取得
    pub fn get(&self, name: &str) -> Option<&CategoryRule> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// ルールファイル形式に変換
    pub fn to_rules_file(&self) -> RulesFile {
        RulesFile {
            categories: self.categories.clone(),
        }
    }
}
