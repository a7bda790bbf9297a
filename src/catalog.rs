use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::tier::Tier;

/// A single questionnaire item.
///
/// `options` and `weights` are parallel: the n-th option label scores the
/// n-th weight.
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionDefinition {
    pub id: String,
    pub prompt: String,
    /// Short name used in per-category breakdowns
    pub category: String,
    pub options: Vec<String>,
    pub weights: Vec<u8>,
}

impl QuestionDefinition {
    /// Resolves an option label to its weight.
    pub fn weight_for(&self, label: &str) -> Result<u8> {
        self.choices()
            .find(|(option, _)| *option == label)
            .map(|(_, weight)| weight)
            .ok_or_else(|| Error::UnknownOption {
                question: self.id.clone(),
                option: label.to_string(),
            })
    }

    pub fn offers_weight(&self, weight: u8) -> bool {
        self.weights.contains(&weight)
    }

    /// (label, weight) pairs in presentation order
    pub fn choices(&self) -> impl Iterator<Item = (&str, u8)> + '_ {
        self.options
            .iter()
            .map(String::as_str)
            .zip(self.weights.iter().copied())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    /// Text in the original language
    pub source: String,
    pub translation: String,
    /// Chapter and verse
    pub attribution: String,
    pub relevance: String,
}

/// Static suggestions and quotations for one tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentBundle {
    pub exercises: Vec<String>,
    pub quotes: Vec<Quote>,
    /// Crisis contacts, only populated for the most severe tier
    #[serde(default)]
    pub emergency_resources: Vec<String>,
}

/// Emits `text` when the answer to `question_id` weighs at least `threshold`.
#[derive(Debug, Clone, Deserialize)]
pub struct InsightRule {
    pub question_id: String,
    pub threshold: u8,
    pub text: String,
}

/// Tier-independent lifestyle tips.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub tips: Vec<String>,
}

/// On-disk shape of a catalog, before validation.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogDocument {
    questions: Vec<QuestionDefinition>,
    content: BTreeMap<String, ContentBundle>,
    #[serde(default)]
    insight_rules: Vec<InsightRule>,
    #[serde(default)]
    recommendations: Vec<Recommendation>,
}

/// Validated, read-only question list and content banks.
#[derive(Debug)]
pub struct Catalog {
    questions: Vec<QuestionDefinition>,
    content: BTreeMap<Tier, ContentBundle>,
    insight_rules: Vec<InsightRule>,
    recommendations: Vec<Recommendation>,
}

impl Catalog {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str::<CatalogDocument>(json)?.try_into()
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        serde_json::from_reader::<_, CatalogDocument>(reader)?.try_into()
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Self::from_reader(reader)
    }

    /// All questions in presentation order
    pub fn questions(&self) -> &[QuestionDefinition] {
        &self.questions
    }

    /// Looks up a question by id
    pub fn question(&self, id: &str) -> Option<&QuestionDefinition> {
        self.questions.iter().find(|question| question.id == id)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn content_bundle(&self, tier: Tier) -> Result<&ContentBundle> {
        self.content
            .get(&tier)
            .ok_or_else(|| Error::UnknownTier(tier.to_string()))
    }

    /// Label to weight resolution applied before answers reach the engine.
    pub fn weight_for_option(&self, question_id: &str, label: &str) -> Result<u8> {
        self.question(question_id)
            .ok_or_else(|| Error::UnknownQuestion(question_id.to_string()))?
            .weight_for(label)
    }

    pub fn insight_rules(&self) -> &[InsightRule] {
        &self.insight_rules
    }

    pub fn recommendations(&self) -> &[Recommendation] {
        &self.recommendations
    }

    /// Largest weight any question offers.
    pub fn max_weight(&self) -> u8 {
        self.all_weights().max().unwrap_or(0)
    }

    /// Smallest weight any question offers.
    pub fn min_weight(&self) -> u8 {
        self.all_weights().min().unwrap_or(0)
    }

    fn all_weights(&self) -> impl Iterator<Item = u8> + '_ {
        self.questions
            .iter()
            .flat_map(|question| question.weights.iter().copied())
    }

    fn validate(&self) -> Result<()> {
        if self.questions.is_empty() {
            return Err(Error::InvalidCatalog("no questions".to_string()));
        }
        let mut seen = HashSet::new();
        for question in &self.questions {
            if question.options.is_empty() {
                return Err(Error::InvalidCatalog(format!(
                    "question {} has no options",
                    question.id
                )));
            }
            if question.options.len() != question.weights.len() {
                return Err(Error::InvalidCatalog(format!(
                    "question {} has {} options but {} weights",
                    question.id,
                    question.options.len(),
                    question.weights.len()
                )));
            }
            if !seen.insert(question.id.as_str()) {
                return Err(Error::InvalidCatalog(format!(
                    "duplicate question id {}",
                    question.id
                )));
            }
        }
        if self.max_weight() == 0 {
            return Err(Error::InvalidCatalog("all weights are zero".to_string()));
        }
        if let Some(tier) = Tier::ALL.iter().find(|tier| !self.content.contains_key(*tier)) {
            return Err(Error::InvalidCatalog(format!("no content for {}", tier)));
        }
        if let Some(rule) = self
            .insight_rules
            .iter()
            .find(|rule| self.question(&rule.question_id).is_none())
        {
            return Err(Error::InvalidCatalog(format!(
                "insight rule refers to unknown question {}",
                rule.question_id
            )));
        }
        Ok(())
    }
}

impl TryFrom<CatalogDocument> for Catalog {
    type Error = Error;

    fn try_from(document: CatalogDocument) -> Result<Self> {
        let content = document
            .content
            .into_iter()
            .map(|(key, bundle)| key.parse::<Tier>().map(|tier| (tier, bundle)))
            .collect::<Result<BTreeMap<Tier, ContentBundle>>>()?;
        let catalog = Catalog {
            questions: document.questions,
            content,
            insight_rules: document.insight_rules,
            recommendations: document.recommendations,
        };
        catalog.validate()?;
        Ok(catalog)
    }
}
