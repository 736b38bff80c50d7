//! ROC analysis of the predicted mortality score.
//!
//! The curve has one point per distinct score, swept from the highest score
//! (most restrictive cutoff) to the lowest. A point's rates are those obtained
//! when a stay is predicted to die iff its score is at least the point's
//! threshold, so the last point is always (1, 1).
//!
//! The operating threshold maximizes Youden's J (`TPR - FPR`). When several
//! points share the maximum, the first one in sweep order wins, which is the
//! highest such threshold.

use eicu_model::{PatientStay, RocPoint, ThresholdResult};
use tracing::debug;

use crate::error::{AnalyticsError, Result};

/// Builds the ROC curve from `(actual, score)` pairs.
///
/// # Errors
///
/// Returns [`AnalyticsError::InsufficientData`] unless both labels occur.
pub fn roc_curve<I>(observations: I) -> Result<Vec<RocPoint>>
where
    I: IntoIterator<Item = (bool, f64)>,
{
    let mut observations: Vec<(bool, f64)> = observations.into_iter().collect();
    let positives = observations.iter().filter(|(actual, _)| *actual).count();
    let negatives = observations.len() - positives;
    if positives == 0 || negatives == 0 {
        return Err(AnalyticsError::InsufficientData {
            positives,
            negatives,
        });
    }

    observations.sort_by(|left, right| right.1.total_cmp(&left.1));

    let mut points = Vec::new();
    let mut true_positives = 0usize;
    let mut false_positives = 0usize;
    let mut idx = 0usize;
    while idx < observations.len() {
        let score = observations[idx].1;
        loop {
            if observations[idx].0 {
                true_positives += 1;
            } else {
                false_positives += 1;
            }
            idx += 1;
            if idx == observations.len() || observations[idx].1 != score {
                break;
            }
        }
        points.push(RocPoint {
            threshold: score,
            false_positive_rate: false_positives as f64 / negatives as f64,
            true_positive_rate: true_positives as f64 / positives as f64,
        });
    }
    Ok(points)
}

/// Area under a curve produced by [`roc_curve`], by trapezoidal integration
/// from the origin.
pub fn roc_auc(points: &[RocPoint]) -> f64 {
    let mut area = 0.0;
    let (mut prev_fpr, mut prev_tpr) = (0.0, 0.0);
    for point in points {
        area +=
            (point.false_positive_rate - prev_fpr) * (point.true_positive_rate + prev_tpr) / 2.0;
        prev_fpr = point.false_positive_rate;
        prev_tpr = point.true_positive_rate;
    }
    area
}

/// Point of maximal Youden's J, first in sweep order on ties.
pub fn youden_optimal(points: &[RocPoint]) -> Option<&RocPoint> {
    let mut best: Option<&RocPoint> = None;
    for point in points {
        match best {
            Some(current) if point.youden_j() <= current.youden_j() => {}
            _ => best = Some(point),
        }
    }
    best
}

/// Selects the decision threshold for the mortality score and reports the AUC.
///
/// # Errors
///
/// Returns [`AnalyticsError::InsufficientData`] when every stay has the same outcome.
pub fn select_threshold(stays: &[PatientStay]) -> Result<ThresholdResult> {
    let points = roc_curve(
        stays
            .iter()
            .map(|stay| (stay.actual_mortality, stay.predicted_mortality_score)),
    )?;
    let auc_score = roc_auc(&points);
    // roc_curve only succeeds with both labels present, so the curve is never empty.
    let optimal = youden_optimal(&points).ok_or_else(|| insufficient_data(stays))?;
    debug!(
        stays = stays.len(),
        roc_points = points.len(),
        threshold = optimal.threshold,
        youden_j = optimal.youden_j(),
        auc = auc_score,
        "selected mortality threshold"
    );
    Ok(ThresholdResult {
        threshold: optimal.threshold,
        auc_score,
    })
}

/// Error carrying the label counts of `stays`.
fn insufficient_data(stays: &[PatientStay]) -> AnalyticsError {
    let positives = stays.iter().filter(|stay| stay.actual_mortality).count();
    AnalyticsError::InsufficientData {
        positives,
        negatives: stays.len() - positives,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observations(pairs: &[(bool, f64)]) -> Vec<(bool, f64)> {
        pairs.to_vec()
    }

    #[test]
    fn curve_has_one_point_per_distinct_score() {
        let points = roc_curve(observations(&[
            (true, 0.9),
            (false, 0.9),
            (true, 0.5),
            (false, 0.1),
        ]))
        .unwrap();
        let thresholds: Vec<f64> = points.iter().map(|p| p.threshold).collect();
        assert_eq!(thresholds, vec![0.9, 0.5, 0.1]);
        assert_eq!(points[0].true_positive_rate, 0.5);
        assert_eq!(points[0].false_positive_rate, 0.5);
        let last = points.last().unwrap();
        assert_eq!((last.false_positive_rate, last.true_positive_rate), (1.0, 1.0));
    }

    #[test]
    fn degenerate_labels_are_rejected() {
        let err = roc_curve(observations(&[(true, 0.2), (true, 0.4)])).unwrap_err();
        assert_eq!(
            err,
            AnalyticsError::InsufficientData {
                positives: 2,
                negatives: 0
            }
        );
        assert!(roc_curve(Vec::<(bool, f64)>::new()).is_err());
    }

    #[test]
    fn auc_of_inverted_scores_is_zero() {
        let points = roc_curve(observations(&[(false, 0.9), (true, 0.1)])).unwrap();
        assert_eq!(roc_auc(&points), 0.0);
    }

    #[test]
    fn auc_counts_tied_scores_as_half() {
        let points = roc_curve(observations(&[(true, 0.5), (false, 0.5)])).unwrap();
        assert_eq!(roc_auc(&points), 0.5);
    }

    #[test]
    fn ties_in_youden_pick_the_highest_threshold() {
        // J = 0.5 at 0.8 and again at 0.4.
        let points = roc_curve(observations(&[
            (true, 0.8),
            (false, 0.6),
            (true, 0.4),
            (false, 0.2),
        ]))
        .unwrap();
        let best = youden_optimal(&points).unwrap();
        assert_eq!(best.threshold, 0.8);
        assert_eq!(best.youden_j(), 0.5);
    }

    fn stay(actual: bool, score: f64) -> PatientStay {
        PatientStay {
            region: "South".to_string(),
            hospital_id: "73".to_string(),
            gender: None,
            ethnicity: "Caucasian".to_string(),
            admit_hour: None,
            actual_mortality: actual,
            predicted_mortality_score: score,
            actual_hospital_los: 3.0,
            predicted_hospital_los: 3.0,
            actual_icu_los: 1.0,
            predicted_icu_los: 1.0,
        }
    }

    #[test]
    fn insufficient_data_reports_actual_label_counts() {
        let stays = vec![stay(true, 0.7), stay(false, 0.2), stay(false, 0.1)];
        assert_eq!(
            insufficient_data(&stays),
            AnalyticsError::InsufficientData {
                positives: 1,
                negatives: 2
            }
        );
        let survivors = vec![stay(false, 0.4), stay(false, 0.3)];
        assert_eq!(
            select_threshold(&survivors).unwrap_err(),
            AnalyticsError::InsufficientData {
                positives: 0,
                negatives: 2
            }
        );
    }
}
