//! Self-assessment stress quiz: a fixed questionnaire, weighted scoring and
//! tier-specific suggestions.

use once_cell::sync::Lazy;

pub mod bulk;
pub mod catalog;
pub mod engine;
pub mod error;
pub mod export;
pub mod response;
pub mod session;
pub mod tier;

pub use bulk::read_bulk;
pub use catalog::{Catalog, ContentBundle, InsightRule, QuestionDefinition, Quote, Recommendation};
pub use engine::{breakdown, classify, derive_insights, ClassificationResult};
pub use error::{Error, Result};
pub use export::AssessmentReport;
pub use response::ResponseSet;
pub use session::{Progress, Session, SessionState};
pub use tier::Tier;

/// The reference catalog document
pub const REFERENCE_CATALOG: &str = include_str!("../resources/youthwell.json");

/// Reference catalog, parsed once per process
pub static CATALOG: Lazy<Catalog> = Lazy::new(|| {
    Catalog::from_json(REFERENCE_CATALOG).expect("reference catalog is valid")
});
