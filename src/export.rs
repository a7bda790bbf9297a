use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use log::info;
use serde::{Deserialize, Serialize};

use crate::engine::ClassificationResult;
use crate::error::Result;
use crate::response::ResponseSet;
use crate::tier::Tier;

pub const REPORT_VERSION: u32 = 1;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Flat, downloadable record of one classified assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentReport {
    pub version: u32,
    pub date: String,
    pub stress_level: Tier,
    pub stress_percentage: f64,
    pub raw_score: u32,
    pub label: String,
    pub responses: ResponseSet,
    pub insights: Vec<String>,
}

impl AssessmentReport {
    pub fn new(
        result: &ClassificationResult,
        responses: &ResponseSet,
        timestamp: DateTime<Local>,
    ) -> Self {
        Self {
            version: REPORT_VERSION,
            date: timestamp.format(DATE_FORMAT).to_string(),
            stress_level: result.tier,
            stress_percentage: result.percentage,
            raw_score: result.raw_score,
            label: result.label.clone(),
            responses: responses.clone(),
            insights: result.insights.clone(),
        }
    }

    /// Report stamped with the current local time
    pub fn now(result: &ClassificationResult, responses: &ResponseSet) -> Self {
        Self::new(result, responses, Local::now())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Single-line JSON, one report per line
    pub fn to_json_line(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// `youthwell_assessment_<YYYYmmdd_HHMMSS>.json`, taken from `date`
    pub fn file_name(&self) -> String {
        let stamp = self.date.replace(['-', ':'], "").replace(' ', "_");
        format!("youthwell_assessment_{}.json", stamp)
    }

    /// Writes the pretty JSON into `dir` and returns the file's path.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let path = dir.as_ref().join(self.file_name());
        fs::write(&path, self.to_json()?)?;
        info!("report written to {}", path.display());
        Ok(path)
    }
}
