//! Chi-squared feature selection over bags of bigrams.
//!
//! Follows the univariate chi-squared test of scikit-learn's
//! `feature_selection.chi2`, computed on presence counts: a sample either
//! contains a feature or not, however often it occurs there. The statistic
//! thus tests whether a feature occurs in a class more or less often than
//! chance, not how many times.

use std::collections::{BTreeMap, HashMap};

use statrs::distribution::{ChiSquared, ContinuousCDF};
use tracing::info;

use crate::bag::BagOfBigrams;
use crate::dictionary::{FeatureDictionary, FeatureId, IdSpace};
use crate::error::{MuseError, Result};
use crate::series::ClassLabel;

/// Outcome of [`filter_chi_squared`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterSummary {
    /// Distinct features present in any bag before filtering
    pub features_before: usize,
    /// Features whose score reached the limit
    pub features_after: usize,
    /// Bag entries set to zero
    pub entries_zeroed: usize,
}

/// Number of bags containing each feature with a positive count.
pub fn presence_counts(bags: &[BagOfBigrams]) -> HashMap<FeatureId, usize> {
    let mut presence = HashMap::new();
    for bag in bags {
        for (id, _) in bag.iter() {
            *presence.entry(id).or_insert(0) += 1;
        }
    }
    presence
}

/// Score every present feature: the largest per-class chi-squared statistic
/// that reaches `chi_limit`. Features without such a class score 0.
pub fn chi_squared_scores(bags: &[BagOfBigrams], chi_limit: f64) -> HashMap<FeatureId, f64> {
    let n = bags.len();
    let presence = presence_counts(bags);

    let mut class_counts: BTreeMap<ClassLabel, usize> = BTreeMap::new();
    let mut observed: HashMap<(ClassLabel, FeatureId), usize> = HashMap::new();
    for bag in bags {
        *class_counts.entry(bag.label).or_insert(0) += 1;
        for (id, _) in bag.iter() {
            *observed.entry((bag.label, id)).or_insert(0) += 1;
        }
    }

    let mut scores: HashMap<FeatureId, f64> = presence.keys().map(|&id| (id, 0.0)).collect();
    for (&label, &n_class) in &class_counts {
        let class_prob = n_class as f64 / n as f64;

        for (&id, &n_present) in &presence {
            let expected = class_prob * n_present as f64;
            if expected <= 0.0 {
                continue;
            }
            let observed = observed.get(&(label, id)).copied().unwrap_or(0) as f64;
            let chi = (observed - expected).powi(2) / expected;

            if let Some(score) = scores.get_mut(&id) {
                if chi >= chi_limit && chi > *score {
                    *score = chi;
                }
            }
        }
    }
    scores
}

/// Zero every entry whose feature scores below `chi_limit`, then compact
/// the dictionary and move all bags into the compacted id space.
pub fn filter_chi_squared(
    dict: &mut FeatureDictionary,
    bags: &mut [BagOfBigrams],
    chi_limit: f64,
) -> Result<FilterSummary> {
    if !chi_limit.is_finite() || chi_limit < 0.0 {
        return Err(MuseError::invalid_parameter(
            "chi_limit",
            chi_limit,
            "must be finite and non-negative",
        ));
    }
    if bags.iter().any(|b| b.space != IdSpace::Raw) {
        return Err(MuseError::InvalidInput(
            "chi-squared filtering requires bags in the raw id space".to_string(),
        ));
    }

    let scores = chi_squared_scores(bags, chi_limit);
    let mut summary = FilterSummary {
        features_before: scores.len(),
        features_after: scores.values().filter(|&&s| s >= chi_limit).count(),
        entries_zeroed: 0,
    };

    for bag in bags.iter_mut() {
        for (id, count) in bag.counts.iter_mut() {
            let score = scores.get(id).copied().unwrap_or(0.0);
            if score < chi_limit && *count > 0 {
                *count = 0;
                summary.entries_zeroed += 1;
            }
        }
    }

    dict.compact(bags);
    info!(
        features_before = summary.features_before,
        features_after = summary.features_after,
        entries_zeroed = summary.entries_zeroed,
        chi_limit,
        "chi-squared filter applied"
    );
    Ok(summary)
}

/// Chi-squared critical value at significance `p_value` for `n_classes` classes.
///
/// Uses `n_classes - 1` degrees of freedom. With fewer than two classes no
/// feature can be discriminative and the limit is infinite.
pub fn chi_limit_for_p_value(p_value: f64, n_classes: usize) -> Result<f64> {
    if !(p_value > 0.0 && p_value < 1.0) {
        return Err(MuseError::invalid_parameter(
            "p_value",
            p_value,
            "must be in (0, 1)",
        ));
    }
    if n_classes < 2 {
        return Ok(f64::INFINITY);
    }

    let dist = ChiSquared::new((n_classes - 1) as f64)
        .map_err(|e| MuseError::invalid_parameter("n_classes", n_classes, e.to_string()))?;
    Ok(dist.inverse_cdf(1.0 - p_value))
}
