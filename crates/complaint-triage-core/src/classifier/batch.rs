//! Batch Classification
//!
//! レコード列への分類の適用（データ並列map）と集計ビュー。

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::{CategorySet, Classifier};

/// 入力レコード（テキストは欠損し得る）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplaintRecord {
    pub id: i64,
    #[serde(default)]
    pub text: Option<String>,
}

impl ComplaintRecord {
    pub fn new(id: i64, text: Option<&str>) -> Self {
        Self {
            id,
            text: text.map(str::to_string),
        }
    }
}

/// 分類済みレコード
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedRecord {
    pub id: i64,
    pub text: Option<String>,
    pub categories: CategorySet,
}

impl ClassifiedRecord {
    pub fn has_category(&self, category: &str) -> bool {
        self.categories.contains(category)
    }
}

/// カテゴリ別の件数
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// バッチ全体の分類結果
#[derive(Debug, Clone, Serialize)]
pub struct ClassifiedBatch {
    /// 分類時のカテゴリ名（RuleTableの記述順）
    categories: Vec<String>,
    records: Vec<ClassifiedRecord>,
}

impl ClassifiedBatch {
    pub fn records(&self) -> &[ClassifiedRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 特定カテゴリを含むレコードを取得
    pub fn in_category(&self, category: &str) -> Vec<&ClassifiedRecord> {
        self.records
            .iter()
            .filter(|r| r.has_category(category))
            .collect()
    }

    /// 未分類レコードを取得
    pub fn uncategorized(&self) -> Vec<&ClassifiedRecord> {
        self.records
            .iter()
            .filter(|r| r.categories.is_empty())
            .collect()
    }

    /// カテゴリ別のレコード数（件数0のカテゴリも含む、記述順）
    pub fn category_counts(&self) -> Vec<CategoryCount> {
        self.categories
            .iter()
            .map(|category| CategoryCount {
                category: category.clone(),
                count: self
                    .records
                    .iter()
                    .filter(|r| r.has_category(category))
                    .count(),
            })
            .collect()
    }

    pub fn into_records(self) -> Vec<ClassifiedRecord> {
        self.records
    }
}

impl Classifier<'_> {
    /// 1レコードを分類
    pub fn classify_record(&self, record: &ComplaintRecord) -> ClassifiedRecord {
        ClassifiedRecord {
            id: record.id,
            text: record.text.clone(),
            categories: self.classify(record.text.as_deref()),
        }
    }

    /// レコード列を並列に分類（出力順は入力順と同じ）
    pub fn classify_batch(&self, records: &[ComplaintRecord]) -> ClassifiedBatch {
        tracing::debug!(records = records.len(), "classifying batch");

        let classified: Vec<ClassifiedRecord> = records
            .par_iter()
            .map(|r| self.classify_record(r))
            .collect();

        ClassifiedBatch {
            categories: self
                .category_names()
                .into_iter()
                .map(str::to_string)
                .collect(),
            records: classified,
        }
    }
}
