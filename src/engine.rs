//! Weighted-sum scoring, tier classification and per-answer insights.
//!
//! Every function here is pure: the catalog is read-only and the response
//! set is only borrowed, so independent sessions can score concurrently.

use log::debug;
use serde::Serialize;

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::response::ResponseSet;
use crate::tier::Tier;

/// Outcome of scoring one complete response set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    pub tier: Tier,
    pub raw_score: u32,
    pub max_score: u32,
    /// raw_score / max_score, in percent
    pub percentage: f64,
    pub label: String,
    pub insights: Vec<String>,
}

/// Sums the weights, normalizes against `questions * max weight` and
/// buckets the percentage into a [`Tier`].
///
/// Fails with [`Error::UnknownQuestion`] if the set holds an id the catalog
/// does not define, with [`Error::UnknownWeight`] if a weight is not one the
/// question offers, and with [`Error::IncompleteAssessment`] if any question
/// is unanswered. Nothing is produced on failure.
pub fn classify(responses: &ResponseSet, catalog: &Catalog) -> Result<ClassificationResult> {
    for (id, weight) in responses.iter() {
        let question = catalog
            .question(id)
            .ok_or_else(|| Error::UnknownQuestion(id.to_string()))?;
        if !question.offers_weight(weight) {
            return Err(Error::UnknownWeight {
                question: id.to_string(),
                weight,
            });
        }
    }
    let missing = responses.missing(catalog).len();
    if missing > 0 {
        return Err(Error::IncompleteAssessment { missing });
    }

    let raw_score = responses.total();
    let max_score = catalog.len() as u32 * u32::from(catalog.max_weight());
    // Scale before dividing so that exact band edges stay exact.
    let percentage = f64::from(raw_score * 100) / f64::from(max_score);
    let tier = Tier::from_percentage(percentage);
    debug!(
        "classified raw_score={} max_score={} percentage={:.1} tier={}",
        raw_score, max_score, percentage, tier
    );

    Ok(ClassificationResult {
        tier,
        raw_score,
        max_score,
        percentage,
        label: tier.label().to_string(),
        insights: derive_insights(responses, catalog),
    })
}

/// Applies the catalog's insight rules to whatever has been answered.
///
/// Output follows catalog question order. Unanswered questions never
/// trigger a rule, so this works on partial sets too.
pub fn derive_insights(responses: &ResponseSet, catalog: &Catalog) -> Vec<String> {
    catalog
        .questions()
        .iter()
        .flat_map(move |question| {
            let weight = responses.get(&question.id);
            catalog
                .insight_rules()
                .iter()
                .filter(move |rule| rule.question_id == question.id)
                .filter(move |rule| weight.map_or(false, |weight| weight >= rule.threshold))
                .map(|rule| rule.text.clone())
        })
        .collect()
}

/// (category, weight) per answered question, in catalog order.
pub fn breakdown<'a>(responses: &ResponseSet, catalog: &'a Catalog) -> Vec<(&'a str, u8)> {
    catalog
        .questions()
        .iter()
        .filter_map(|question| {
            responses
                .get(&question.id)
                .map(|weight| (question.category.as_str(), weight))
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::CATALOG;

    fn uniform(weight: u8) -> ResponseSet {
        CATALOG
            .questions()
            .iter()
            .map(|question| (question.id.clone(), weight))
            .collect()
    }

    #[test]
    fn test_classify_low_boundary() {
        let responses: ResponseSet = [
            ("sleep_quality", 2),
            ("stress_level", 2),
            ("social_connection", 2),
            ("physical_activity", 2),
            ("mood_stability", 2),
            ("concentration", 2),
            ("life_satisfaction", 2),
            ("anxiety_level", 2),
        ]
        .into_iter()
        .collect();
        let result = classify(&responses, &CATALOG).unwrap();
        assert_eq!(result.raw_score, 16);
        assert_eq!(result.max_score, 40);
        assert_eq!(result.percentage, 40.0);
        assert_eq!(result.tier, Tier::Low);
        assert_eq!(result.label, Tier::Low.label());
        assert!(result.insights.is_empty());
    }

    #[test]
    fn test_classify_medium_boundary() {
        // 28 / 40 = 70%
        let mut responses = uniform(3);
        for id in ["sleep_quality", "stress_level", "mood_stability", "concentration"] {
            responses.insert_weight(&CATALOG, id, 4).unwrap();
        }
        let result = classify(&responses, &CATALOG).unwrap();
        assert_eq!(result.raw_score, 28);
        assert_eq!(result.percentage, 70.0);
        assert_eq!(result.tier, Tier::Medium);
    }

    #[test]
    fn test_classify_just_above_boundaries() {
        // 17 / 40 = 42.5%
        let mut responses = uniform(2);
        responses.insert_weight(&CATALOG, "concentration", 3).unwrap();
        assert_eq!(classify(&responses, &CATALOG).unwrap().tier, Tier::Medium);

        // 29 / 40 = 72.5%
        let mut responses = uniform(3);
        for id in [
            "sleep_quality",
            "stress_level",
            "mood_stability",
            "concentration",
            "life_satisfaction",
        ] {
            responses.insert_weight(&CATALOG, id, 4).unwrap();
        }
        let result = classify(&responses, &CATALOG).unwrap();
        assert_eq!(result.raw_score, 29);
        assert_eq!(result.tier, Tier::High);
    }

    #[test]
    fn test_classify_high() {
        let result = classify(&uniform(4), &CATALOG).unwrap();
        assert_eq!(result.raw_score, 32);
        assert_eq!(result.percentage, 80.0);
        assert_eq!(result.tier, Tier::High);
        assert_eq!(
            result.insights,
            vec![
                "Sleep Quality: Consider establishing a better sleep routine",
                "Social Connection: Building stronger relationships may help reduce stress",
                "Physical Activity: Increasing exercise could significantly improve your mood",
                "Anxiety Management: Consider learning anxiety-reduction techniques",
            ]
        );
    }

    #[test]
    fn test_percentage_range() {
        assert_eq!(classify(&uniform(1), &CATALOG).unwrap().percentage, 20.0);
        assert_eq!(classify(&uniform(5), &CATALOG).unwrap().percentage, 100.0);
    }

    #[test]
    fn test_monotonic() {
        for base in 1..=4 {
            let before = classify(&uniform(base), &CATALOG).unwrap();
            for question in CATALOG.questions() {
                let mut responses = uniform(base);
                responses.insert_weight(&CATALOG, &question.id, base + 1).unwrap();
                let after = classify(&responses, &CATALOG).unwrap();
                assert!(after.percentage > before.percentage);
                assert!(after.tier >= before.tier);
            }
        }
    }

    #[test]
    fn test_classify_incomplete() {
        let mut responses = uniform(3);
        let mut partial: ResponseSet = responses
            .iter()
            .filter(|(id, _)| *id != "life_satisfaction")
            .map(|(id, weight)| (id.to_string(), weight))
            .collect();
        match classify(&partial, &CATALOG) {
            Err(Error::IncompleteAssessment { missing }) => assert_eq!(missing, 1),
            other => panic!("unexpected: {:?}", other),
        }

        partial.clear();
        match classify(&partial, &CATALOG) {
            Err(Error::IncompleteAssessment { missing }) => assert_eq!(missing, 8),
            other => panic!("unexpected: {:?}", other),
        }

        responses.clear();
        assert!(classify(&responses, &CATALOG).is_err());
    }

    #[test]
    fn test_classify_unknown_question() {
        let mut responses: Vec<(String, u8)> = uniform(2)
            .iter()
            .map(|(id, weight)| (id.to_string(), weight))
            .collect();
        responses.push(("appetite".to_string(), 5));
        let responses: ResponseSet = responses.into_iter().collect();
        match classify(&responses, &CATALOG) {
            Err(Error::UnknownQuestion(id)) => assert_eq!(id, "appetite"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_classify_rejects_off_scale_weights() {
        for weight in [0, 6, 9] {
            match classify(&uniform(weight), &CATALOG) {
                Err(Error::UnknownWeight { weight: rejected, .. }) => assert_eq!(rejected, weight),
                other => panic!("unexpected: {:?}", other),
            }
        }

        let mut responses: serde_json::Map<String, serde_json::Value> = CATALOG
            .questions()
            .iter()
            .map(|question| (question.id.clone(), serde_json::Value::from(1)))
            .collect();
        responses.insert("sleep_quality".to_string(), serde_json::Value::from(200));
        let responses: ResponseSet =
            serde_json::from_value(serde_json::Value::Object(responses)).unwrap();
        match classify(&responses, &CATALOG) {
            Err(Error::UnknownWeight { question, weight }) => {
                assert_eq!(question, "sleep_quality");
                assert_eq!(weight, 200);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_insights_empty_for_lowest() {
        assert!(derive_insights(&uniform(1), &CATALOG).is_empty());
        assert!(derive_insights(&ResponseSet::new(), &CATALOG).is_empty());
    }

    #[test]
    fn test_insights_partial() {
        let responses: ResponseSet = [("sleep_quality", 4)].into_iter().collect();
        assert_eq!(
            derive_insights(&responses, &CATALOG),
            vec!["Sleep Quality: Consider establishing a better sleep routine"]
        );

        let responses: ResponseSet = [("anxiety_level", 5), ("sleep_quality", 3)]
            .into_iter()
            .collect();
        assert_eq!(
            derive_insights(&responses, &CATALOG),
            vec!["Anxiety Management: Consider learning anxiety-reduction techniques"]
        );
    }

    #[test]
    fn test_insights_ignore_unruled_questions() {
        let responses: ResponseSet = [("stress_level", 5), ("mood_stability", 5)]
            .into_iter()
            .collect();
        assert!(derive_insights(&responses, &CATALOG).is_empty());
    }

    #[test]
    fn test_breakdown() {
        let responses: ResponseSet = [("anxiety_level", 5), ("sleep_quality", 3)]
            .into_iter()
            .collect();
        assert_eq!(
            breakdown(&responses, &CATALOG),
            vec![("Sleep", 3), ("Anxiety", 5)]
        );
    }
}
