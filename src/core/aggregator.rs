use crate::domain::model::{RateObservation, RatePair, RateSummary};
use crate::utils::error::{RatesError, Result};
use statrs::statistics::Statistics;

struct FieldStats {
    maximum: f64,
    minimum: f64,
    average: f64,
    deviation: f64,
}

/// Dispersion here is the quadratic mean of each value's ratio to the average,
/// `sqrt(mean((v / avg)^2))`. It is not the textbook standard deviation: a
/// constant series yields 1.0, not 0.0. A zero average makes it NaN; the
/// extractor only admits positive rates, so that needs hand-built input.
fn field_stats(values: &[f64]) -> FieldStats {
    let average: f64 = Statistics::mean(values);
    FieldStats {
        maximum: Statistics::max(values),
        minimum: Statistics::min(values),
        average,
        deviation: Statistics::quadratic_mean(values.iter().map(|v| v / average)),
    }
}

/// Folds the observations into a summary. The code is reported as requested.
pub fn aggregate(observations: &[RateObservation], currency_code: &str) -> Result<RateSummary> {
    if observations.is_empty() {
        return Err(RatesError::NoObservations {
            currency_code: currency_code.to_string(),
        });
    }

    let (buys, sells): (Vec<f64>, Vec<f64>) = observations
        .iter()
        .map(|o| (o.buy_value, o.sell_value))
        .unzip();
    let buy = field_stats(&buys);
    let sell = field_stats(&sells);

    Ok(RateSummary {
        currency_code: currency_code.to_string(),
        average: RatePair::new(buy.average, sell.average),
        deviation: RatePair::new(buy.deviation, sell.deviation),
        maximum: RatePair::new(buy.maximum, sell.maximum),
        minimum: RatePair::new(buy.minimum, sell.minimum),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    fn obs(buy: f64, sell: f64) -> RateObservation {
        RateObservation {
            currency_code: "USD".to_string(),
            buy_value: buy,
            sell_value: sell,
        }
    }

    #[test]
    fn test_two_observations() {
        let summary = aggregate(&[obs(4.00, 4.10), obs(4.20, 4.30)], "USD").unwrap();

        assert_eq!(summary.currency_code, "USD");
        assert!((summary.average.buy - 4.10).abs() < EPS);
        assert!((summary.average.sell - 4.20).abs() < EPS);
        assert_eq!(summary.maximum.buy, 4.20);
        assert_eq!(summary.minimum.buy, 4.00);
        assert_eq!(summary.maximum.sell, 4.30);
        assert_eq!(summary.minimum.sell, 4.10);
    }

    #[test]
    fn test_deviation_is_ratio_to_average() {
        let summary = aggregate(&[obs(4.00, 4.10), obs(4.20, 4.30)], "USD").unwrap();

        let expected = (((4.00f64 / 4.10).powi(2) + (4.20f64 / 4.10).powi(2)) / 2.0).sqrt();
        assert!((summary.deviation.buy - expected).abs() < EPS);
    }

    #[test]
    fn test_constant_series_has_unit_deviation() {
        // Known oddity of the ratio formula: no spread still reports 1.0.
        let summary = aggregate(&[obs(3.95, 4.05), obs(3.95, 4.05)], "USD").unwrap();
        assert!((summary.deviation.buy - 1.0).abs() < EPS);
        assert!((summary.deviation.sell - 1.0).abs() < EPS);
    }

    #[test]
    fn test_currency_code_comes_from_caller() {
        let summary = aggregate(&[obs(1.0, 2.0)], "XYZ").unwrap();
        assert_eq!(summary.currency_code, "XYZ");
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let err = aggregate(&[], "USD").unwrap_err();
        assert!(matches!(err, RatesError::NoObservations { .. }));
    }
}
