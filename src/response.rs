use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::{Error, Result};

/// Answers given so far, as question id to weight.
///
/// Option labels are resolved to weights before they are stored, so the
/// scoring engine only ever sees numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseSet {
    values: BTreeMap<String, u8>,
}

impl ResponseSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves `label` against the question's options and stores the
    /// matching weight, replacing any earlier answer.
    pub fn answer(&mut self, catalog: &Catalog, question_id: &str, label: &str) -> Result<u8> {
        let weight = catalog.weight_for_option(question_id, label)?;
        self.values.insert(question_id.to_string(), weight);
        Ok(weight)
    }

    /// Stores a raw weight. Only weights the question offers are accepted.
    pub fn insert_weight(
        &mut self,
        catalog: &Catalog,
        question_id: &str,
        weight: u8,
    ) -> Result<()> {
        let question = catalog
            .question(question_id)
            .ok_or_else(|| Error::UnknownQuestion(question_id.to_string()))?;
        if !question.offers_weight(weight) {
            return Err(Error::UnknownWeight {
                question: question_id.to_string(),
                weight,
            });
        }
        self.values.insert(question_id.to_string(), weight);
        Ok(())
    }

    pub fn get(&self, question_id: &str) -> Option<u8> {
        self.values.get(question_id).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u8)> + '_ {
        self.values.iter().map(|(id, &weight)| (id.as_str(), weight))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sum of every stored weight
    pub fn total(&self) -> u32 {
        self.values.values().map(|&weight| u32::from(weight)).sum()
    }

    /// Unanswered question ids, in catalog order.
    pub fn missing<'a>(&self, catalog: &'a Catalog) -> Vec<&'a str> {
        catalog
            .questions()
            .iter()
            .filter(|question| !self.values.contains_key(&question.id))
            .map(|question| question.id.as_str())
            .collect()
    }

    pub fn is_complete(&self, catalog: &Catalog) -> bool {
        self.missing(catalog).is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}

/// Builds a set without consulting a catalog; `classify` still rejects
/// unknown ids.
impl<S: Into<String>> FromIterator<(S, u8)> for ResponseSet {
    fn from_iter<I: IntoIterator<Item = (S, u8)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(id, weight)| (id.into(), weight))
                .collect(),
        }
    }
}
