use log::info;
use serde::Serialize;

use crate::catalog::Catalog;
use crate::engine::{self, ClassificationResult};
use crate::error::Result;
use crate::response::ResponseSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    NotStarted,
    InProgress,
    Complete,
    Classified,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Progress {
    pub answered: usize,
    pub total: usize,
}

impl Progress {
    /// Share of questions answered, between 0.0 and 1.0
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.answered as f64 / self.total as f64
        }
    }
}

/// One assessment attempt.
///
/// The caller owns the session outright; nothing here is shared between
/// attempts, so each respondent gets their own value.
#[derive(Debug, Clone, Default)]
pub struct Session {
    responses: ResponseSet,
    result: Option<ClassificationResult>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, catalog: &Catalog) -> SessionState {
        if self.result.is_some() {
            SessionState::Classified
        } else if self.responses.is_empty() {
            SessionState::NotStarted
        } else if self.responses.is_complete(catalog) {
            SessionState::Complete
        } else {
            SessionState::InProgress
        }
    }

    pub fn progress(&self, catalog: &Catalog) -> Progress {
        Progress {
            answered: catalog
                .questions()
                .iter()
                .filter(|question| self.responses.get(&question.id).is_some())
                .count(),
            total: catalog.len(),
        }
    }

    /// Records an answer by option label. Changing an answer discards any
    /// earlier classification; repeating the same answer keeps it.
    pub fn answer(&mut self, catalog: &Catalog, question_id: &str, label: &str) -> Result<u8> {
        let previous = self.responses.get(question_id);
        let weight = self.responses.answer(catalog, question_id, label)?;
        if previous != Some(weight) && self.result.take().is_some() {
            info!("answer to {} changed, discarding classification", question_id);
        }
        Ok(weight)
    }

    /// Classifies the answers. On error the session is left untouched.
    pub fn submit(&mut self, catalog: &Catalog) -> Result<&ClassificationResult> {
        let result = engine::classify(&self.responses, catalog)?;
        info!(
            "assessment classified as {} ({:.1}%)",
            result.tier, result.percentage
        );
        Ok(&*self.result.insert(result))
    }

    /// Insights for whatever has been answered so far.
    pub fn insights(&self, catalog: &Catalog) -> Vec<String> {
        engine::derive_insights(&self.responses, catalog)
    }

    pub fn responses(&self) -> &ResponseSet {
        &self.responses
    }

    pub fn result(&self) -> Option<&ClassificationResult> {
        self.result.as_ref()
    }

    pub fn reset(&mut self) {
        info!("assessment reset");
        self.responses.clear();
        self.result = None;
    }
}
