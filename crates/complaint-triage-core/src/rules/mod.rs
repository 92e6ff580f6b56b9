//! # Rules Module
//!
//! 苦情テキストの分類に使うカテゴリ→キーワード対応表を提供する。
//!
//! ## モジュール構成
//!
//! - `builtin`: ビルトインルール定義
//! - `table`: 検証済みのランタイムテーブルとルールファイル（TOML）
//!
//! ## 使用例
//!
//! ```rust
//! use complaint_triage_core::rules::RuleTable;
//!
//! let table = RuleTable::builtin().unwrap();
//! assert!(table.get("Billing Inquiry").is_some());
//! assert_eq!(table.len(), 5);
//! ```

mod builtin;
mod table;

// Re-exports
pub use builtin::{BuiltinRule, CategoryRule, BUILTIN_RULES};
pub use table::{RuleTable, RulesFile, RULES_FILE};
