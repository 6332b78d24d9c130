//! Present value of arbitrary cash flow schedules.

use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, AnalyticsResult};

/// How discount factors are formed from rates and times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Discounting {
    /// `(1 + r)^-t`
    Discrete,
    /// `e^(-r t)`
    Continuous,
}

/// One rate for every flow, or a rate per flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Rates {
    /// The same rate discounts every cash flow.
    Flat(f64),
    /// One rate per cash flow, matched by position.
    PerFlow(Vec<f64>),
}

/// Discounted cash flow breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresentValue {
    /// Sum of the discounted flows.
    pub present_value: f64,
    /// Each flow after discounting.
    pub discounted_flows: Vec<f64>,
    /// Sum of the raw flows.
    pub total_undiscounted: f64,
    /// The rate applied to each flow.
    pub effective_rates: Vec<f64>,
    /// The time of each flow in years.
    pub times: Vec<f64>,
}

/// Discounts a cash flow schedule.
///
/// Times default to `1, 2, ..., n` years when not given. Discrete
/// discounting rejects rates at or below -100%; continuous discounting
/// accepts any finite rate.
pub fn present_value(
    cash_flows: &[f64],
    rates: &Rates,
    times: Option<&[f64]>,
    discounting: Discounting,
) -> AnalyticsResult<PresentValue> {
    if cash_flows.is_empty() {
        return Err(AnalyticsError::EmptyCashFlows);
    }
    let n = cash_flows.len();

    let effective_rates: Vec<f64> = match rates {
        Rates::Flat(rate) => vec![*rate; n],
        Rates::PerFlow(list) => {
            if list.len() != n {
                return Err(AnalyticsError::RateCountMismatch {
                    rates: list.len(),
                    flows: n,
                });
            }
            list.clone()
        }
    };

    if discounting == Discounting::Discrete && effective_rates.iter().any(|&r| r <= -1.0) {
        return Err(AnalyticsError::RateTooLow);
    }

    let times: Vec<f64> = match times {
        Some(given) => {
            if given.len() != n {
                return Err(AnalyticsError::TimeCountMismatch {
                    times: given.len(),
                    flows: n,
                });
            }
            given.to_vec()
        }
        None => (1..=n).map(|i| i as f64).collect(),
    };

    let discounted_flows: Vec<f64> = cash_flows
        .iter()
        .zip(effective_rates.iter().zip(times.iter()))
        .map(|(&flow, (&rate, &time))| {
            let factor = match discounting {
                Discounting::Continuous => (-rate * time).exp(),
                Discounting::Discrete => (1.0 + rate).powf(-time),
            };
            flow * factor
        })
        .collect();

    Ok(PresentValue {
        present_value: discounted_flows.iter().sum(),
        total_undiscounted: cash_flows.iter().sum(),
        discounted_flows,
        effective_rates,
        times,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_two_year_annuity_discrete() {
        let result = present_value(
            &[100.0, 100.0],
            &Rates::Flat(0.05),
            None,
            Discounting::Discrete,
        )
        .unwrap();

        // 100/1.05 + 100/1.05^2
        assert_relative_eq!(result.present_value, 185.941, epsilon = 1e-3);
        assert_relative_eq!(result.total_undiscounted, 200.0);
        assert_eq!(result.times, vec![1.0, 2.0]);
        assert_eq!(result.effective_rates, vec![0.05, 0.05]);
    }

    #[test]
    fn test_continuous_discounting() {
        let result = present_value(
            &[100.0],
            &Rates::Flat(0.05),
            Some(&[2.0]),
            Discounting::Continuous,
        )
        .unwrap();

        assert_relative_eq!(
            result.present_value,
            100.0 * (-0.1f64).exp(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_per_flow_rates() {
        let result = present_value(
            &[100.0, 100.0],
            &Rates::PerFlow(vec![0.04, 0.06]),
            None,
            Discounting::Discrete,
        )
        .unwrap();

        let expected = 100.0 / 1.04 + 100.0 / 1.06f64.powi(2);
        assert_relative_eq!(result.present_value, expected, epsilon = 1e-10);
        assert_eq!(result.effective_rates, vec![0.04, 0.06]);
    }

    #[test]
    fn test_mismatched_lengths_rejected() {
        assert_eq!(
            present_value(
                &[100.0, 100.0],
                &Rates::PerFlow(vec![0.05]),
                None,
                Discounting::Discrete,
            )
            .unwrap_err(),
            AnalyticsError::RateCountMismatch { rates: 1, flows: 2 }
        );

        assert_eq!(
            present_value(
                &[100.0, 100.0],
                &Rates::Flat(0.05),
                Some(&[1.0]),
                Discounting::Discrete,
            )
            .unwrap_err(),
            AnalyticsError::TimeCountMismatch { times: 1, flows: 2 }
        );
    }

    #[test]
    fn test_discrete_rejects_rates_at_minus_one() {
        assert_eq!(
            present_value(&[100.0], &Rates::Flat(-1.0), None, Discounting::Discrete).unwrap_err(),
            AnalyticsError::RateTooLow
        );

        // Continuous discounting is defined for any rate.
        assert!(present_value(
            &[100.0],
            &Rates::Flat(-1.5),
            None,
            Discounting::Continuous
        )
        .is_ok());
    }

    #[test]
    fn test_empty_flows_rejected() {
        assert_eq!(
            present_value(&[], &Rates::Flat(0.05), None, Discounting::Discrete).unwrap_err(),
            AnalyticsError::EmptyCashFlows
        );
    }

    #[test]
    fn test_rates_serde_untagged() {
        let flat: Rates = serde_json::from_str("0.05").unwrap();
        assert_eq!(flat, Rates::Flat(0.05));

        let list: Rates = serde_json::from_str("[0.04, 0.06]").unwrap();
        assert_eq!(list, Rates::PerFlow(vec![0.04, 0.06]));
    }
}
