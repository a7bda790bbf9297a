use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Question id is not in the catalog
    #[error("unknown question: {0}")]
    UnknownQuestion(String),
    /// Option label is not offered by the question
    #[error("unknown option {option:?} for question {question}")]
    UnknownOption { question: String, option: String },
    /// Weight is not offered by the question
    #[error("weight {weight} is not offered by question {question}")]
    UnknownWeight { question: String, weight: u8 },
    #[error("unknown tier: {0}")]
    UnknownTier(String),
    /// Not every question has been answered
    #[error("assessment incomplete: {missing} question(s) unanswered")]
    IncompleteAssessment { missing: usize },
    /// A bulk input names the same question in two columns
    #[error("duplicate column: {0}")]
    DuplicateColumn(String),
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
}
