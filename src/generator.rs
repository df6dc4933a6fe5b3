//! Exponential service-demand generator.
//!
//! Demands are drawn by inverse-CDF sampling: for `u` uniform in [0, 1),
//! `-ln(1 - u) / λ` is exponentially distributed with mean `1 / λ` seconds.
//! The result is rounded to the nearest microsecond.
//!
//! # Reference
//! Devroye (1986), "Non-Uniform Random Variate Generation", Ch. 2.1

use rand::Rng;

use crate::error::SimulationError;
use crate::models::{Job, Micros, MICROS_PER_SEC};

/// Produces jobs with exponentially distributed service demands.
#[derive(Debug, Clone, Copy)]
pub struct JobGenerator {
    lambda: f64,
}

impl JobGenerator {
    /// Creates a generator with rate `lambda` (per second).
    ///
    /// Fails with [`SimulationError::DegenerateRate`] unless `lambda` is
    /// positive and finite.
    pub fn new(lambda: f64) -> Result<Self, SimulationError> {
        if lambda.is_finite() && lambda > 0.0 {
            Ok(Self { lambda })
        } else {
            Err(SimulationError::DegenerateRate { rate: lambda })
        }
    }

    /// Mean demand in microseconds.
    pub fn mean_demand_us(&self) -> f64 {
        MICROS_PER_SEC / self.lambda
    }

    /// Draws one service demand. Consumes exactly one uniform variate.
    pub fn sample_demand<R: Rng + ?Sized>(&self, rng: &mut R) -> Micros {
        let u: f64 = rng.random();
        demand_for_quantile(u, self.lambda)
    }

    /// Generates a job arriving at `arrival_us`.
    pub fn generate<R: Rng + ?Sized>(&self, arrival_us: Micros, rng: &mut R) -> Job {
        Job::new(arrival_us, self.sample_demand(rng))
    }
}

/// Inverse exponential CDF at quantile `u`, in whole microseconds.
pub fn demand_for_quantile(u: f64, lambda: f64) -> Micros {
    let seconds = -(1.0 - u).ln() / lambda;
    // `as` saturates; the largest finite draw is ~36.7/λ seconds.
    (seconds * MICROS_PER_SEC).round() as Micros
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_rejects_degenerate_rate() {
        for lambda in [0.0, -2.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                JobGenerator::new(lambda),
                Err(SimulationError::DegenerateRate { .. })
            ));
        }
    }

    #[test]
    fn test_inverse_cdf_points() {
        assert_eq!(demand_for_quantile(0.0, 1.0), 0);
        // u = 1 - e^-1 is the quantile at exactly one mean.
        let u = 1.0 - (-1.0f64).exp();
        assert_eq!(demand_for_quantile(u, 1.0), 1_000_000);
        assert_eq!(demand_for_quantile(u, 4.0), 250_000);
        // Median: ln 2 / λ.
        assert_eq!(demand_for_quantile(0.5, 1.0), 693_147);
    }

    #[test]
    fn test_sample_mean_close_to_inverse_rate() {
        let generator = JobGenerator::new(2.0).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let n = 20_000;
        let total: u64 = (0..n).map(|_| generator.sample_demand(&mut rng)).sum();
        let mean = total as f64 / n as f64;

        let expected = generator.mean_demand_us();
        assert!(
            (mean - expected).abs() < expected * 0.05,
            "mean {mean} too far from {expected}"
        );
    }

    #[test]
    fn test_generate_sets_arrival() {
        let generator = JobGenerator::new(1.0).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let job = generator.generate(12_345, &mut rng);
        assert_eq!(job.arrival_us, 12_345);
        assert_eq!(job.remaining_us(), job.demand_us);
    }

    #[test]
    fn test_same_seed_same_demands() {
        let generator = JobGenerator::new(1.0).unwrap();
        let mut a = StdRng::seed_from_u64(99);
        let mut b = StdRng::seed_from_u64(99);
        for _ in 0..16 {
            assert_eq!(generator.sample_demand(&mut a), generator.sample_demand(&mut b));
        }
    }
}
