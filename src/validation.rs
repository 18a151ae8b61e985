//! Rolling-origin cross-validation of the selected model

use crate::models::{holt_winters, HoltLinear, HoltWinters, ModelKind, Selection, SmoothingModel};

/// Estimate out-of-sample error by repeatedly truncating the series and
/// forecasting the held-out tail.
///
/// For k = 1..=min(6, n/5) the series is cut to its first n-k points, refit
/// under the same selection rule applied to the truncated length, and the
/// k-th forecast is scored against the held-out value as an absolute
/// percentage error. Folds that cannot be fit are skipped.
///
/// Returns the mean fold error, or `None` when no fold was computable; the
/// caller substitutes the in-sample MAPE. Note the fold rule can switch model
/// families as the truncation crosses cycle boundaries; this mirrors how the
/// engine behaves on genuinely shorter histories.
pub(crate) fn rolling_origin_mape(
    prices: &[f64],
    period: usize,
    selection: &Selection,
) -> Option<f64> {
    let n = prices.len();
    let folds = (n / 5).min(6);
    if folds == 0 {
        return None;
    }

    let mut errors = Vec::with_capacity(folds);

    for k in 1..=folds {
        let train = &prices[..n - k];
        let actual = prices[n - k];

        let fit = if selection.kind == ModelKind::SeasonalOptimized && train.len() >= 2 * period {
            HoltWinters::new(period, selection.alpha, selection.beta, selection.gamma)
                .and_then(|m| m.fit(train, k))
        } else if train.len() >= period {
            let (alpha, beta, gamma) = holt_winters::DEFAULT_PARAMS;
            HoltWinters::new(period, alpha, beta, gamma).and_then(|m| m.fit(train, k))
        } else {
            // Reuses the selection's alpha even when it came from a seasonal
            // fit; the fold mirrors production behavior on short histories.
            HoltLinear::new(selection.alpha).and_then(|m| m.fit(train, k))
        };

        if let Ok(fit) = fit {
            if let Some(&fc) = fit.forecasts.get(k - 1) {
                errors.push((fc - actual).abs() / actual.max(1.0) * 100.0);
            }
        }
    }

    if errors.is_empty() {
        None
    } else {
        let cv_mape = errors.iter().sum::<f64>() / errors.len() as f64;
        tracing::debug!(folds = errors.len(), cv_mape, "rolling-origin validation complete");
        Some(cv_mape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::select_and_fit;

    #[test]
    fn too_short_series_has_no_folds() {
        let y = vec![100.0, 102.0, 101.0, 103.0];
        let sel = select_and_fit(&y, 12, 1).unwrap();
        assert!(rolling_origin_mape(&y, 12, &sel).is_none());
    }

    #[test]
    fn fold_count_is_capped_at_six() {
        // n = 60 would allow n/5 = 12 folds; the cap keeps it at 6, and
        // every fold of this smooth series is computable.
        let y: Vec<f64> = (0..60)
            .map(|t| 100.0 + (t % 12) as f64 * 2.0 + t as f64 * 0.5)
            .collect();
        let sel = select_and_fit(&y, 12, 1).unwrap();
        let cv = rolling_origin_mape(&y, 12, &sel);
        assert!(cv.is_some());
    }

    #[test]
    fn perfect_linear_series_scores_low_error() {
        let y: Vec<f64> = (0..10).map(|t| 100.0 + 5.0 * t as f64).collect();
        let sel = select_and_fit(&y, 12, 1).unwrap();
        let cv = rolling_origin_mape(&y, 12, &sel).unwrap();
        assert!(cv < 15.0, "cv_mape was {}", cv);
    }

    #[test]
    fn validation_is_deterministic() {
        let y: Vec<f64> = (0..30)
            .map(|t| 150.0 + (t % 12) as f64 * 4.0 - t as f64 * 0.3)
            .collect();
        let sel = select_and_fit(&y, 12, 1).unwrap();
        let a = rolling_origin_mape(&y, 12, &sel);
        let b = rolling_origin_mape(&y, 12, &sel);
        assert_eq!(a, b);
    }
}
