use std::path::PathBuf;
use thiserror::Error;

/// Problems with a rule table. Fatal at startup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Rule table is empty - at least one category is required")]
    Empty,

    #[error("Category '{category}' has no keywords")]
    EmptyKeywords { category: String },

    #[error("Category name must not be blank")]
    BlankCategory,

    #[error("Category defined more than once: '{category}'")]
    DuplicateCategory { category: String },

    #[error("Category '{category}' contains a blank keyword")]
    BlankKeyword { category: String },

    #[error("Rule file parse error: {message}")]
    Parse { message: String },

    #[error("Invalid keyword pattern '{keyword}': {message}")]
    Pattern { keyword: String, message: String },
}

#[derive(Debug, Error)]
pub enum TriageError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid rule file {path}: {source}")]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },

    #[error("Invalid input at line {line}: {message}")]
    InputParse { line: usize, message: String },

    #[error("Rule file already exists: {path} (use --force to overwrite)")]
    RulesFileExists { path: PathBuf },

    #[error("Home directory not found")]
    HomeNotFound,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TriageError>;

impl TriageError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::ConfigFile { .. } => 2,
            Self::InputParse { .. } => 3,
            Self::RulesFileExists { .. } => 4,
            _ => 1,
        }
    }
}
