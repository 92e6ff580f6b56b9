pub mod classifier;
pub mod error;
pub mod rules;
pub mod sample;

pub use classifier::{
    classify, CategoryCount, CategorySet, ClassifiedBatch, ClassifiedRecord, Classifier,
    ComplaintRecord,
};
pub use error::{ConfigError, Result, TriageError};
pub use rules::{BuiltinRule, CategoryRule, RuleTable, RulesFile, BUILTIN_RULES, RULES_FILE};
pub use sample::sample_records;
