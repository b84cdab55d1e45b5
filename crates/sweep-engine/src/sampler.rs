//! Per-parameter sampling from the run's single random stream.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use sweep_types::{DomainError, ParameterSpec, SamplingMethod};

/// Random source used for a run. ChaCha keeps the stream stable across
/// platforms and crate versions, so a seed reproduces a run.
pub type SweepRng = ChaCha8Rng;

pub fn seeded_rng(seed: u64) -> SweepRng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Draw one value for `spec`.
///
/// Exactly one uniform `[0, 1)` variate is consumed per call, including for
/// fixed (`min == max`) parameters, so the stream position only depends on
/// the number of parameters and trials.
pub fn sample<R: Rng>(spec: &ParameterSpec, rng: &mut R) -> Result<f64, DomainError> {
    spec.check_domain()?;

    let u: f64 = rng.random();
    if spec.is_fixed() {
        return Ok(spec.min);
    }

    let value = match spec.method {
        // Weighted form: `max - min` can overflow for finite bounds.
        SamplingMethod::Linear => ((1.0 - u) * spec.min + u * spec.max).clamp(spec.min, spec.max),
        SamplingMethod::Log => {
            let ln_min = spec.min.ln();
            let ln_max = spec.max.ln();
            // exp/ln rounding can land an ulp outside the domain
            (ln_min + u * (ln_max - ln_min)).exp().clamp(spec.min, spec.max)
        }
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_stays_in_bounds() {
        let spec = ParameterSpec::linear("k", 0.01, 0.02);
        let mut rng = seeded_rng(7);
        for _ in 0..10_000 {
            let v = sample(&spec, &mut rng).unwrap();
            assert!((0.01..=0.02).contains(&v), "k out of bounds: {v}");
        }
    }

    #[test]
    fn linear_spanning_whole_f64_range_stays_finite() {
        let spec = ParameterSpec::linear("x", -f64::MAX, f64::MAX);
        assert!(spec.check_bounds().is_ok());
        let mut rng = seeded_rng(1);
        for _ in 0..1_000 {
            let v = sample(&spec, &mut rng).unwrap();
            assert!(v.is_finite(), "non-finite sample {v}");
            assert!((-f64::MAX..=f64::MAX).contains(&v));
        }
    }

    #[test]
    fn log_stays_in_bounds() {
        let spec = ParameterSpec::log("C1", 1e-9, 47e-9);
        let mut rng = seeded_rng(11);
        for _ in 0..10_000 {
            let v = sample(&spec, &mut rng).unwrap();
            assert!(v > 0.0);
            assert!(v.ln() >= 1e-9f64.ln() && v.ln() <= 47e-9f64.ln(), "C1 out of bounds: {v}");
        }
    }

    #[test]
    fn log_sampling_is_uniform_per_decade() {
        let spec = ParameterSpec::log("f", 1.0, 100.0);
        let mut rng = seeded_rng(2024);
        let n = 10_000;
        let mut bins = [0usize; 4];
        for _ in 0..n {
            let v = sample(&spec, &mut rng).unwrap();
            let l = v.log10();
            assert!((0.0..=2.0).contains(&l));
            let idx = ((l / 0.5) as usize).min(3);
            bins[idx] += 1;
        }
        // Each half-decade should hold roughly a quarter of the draws.
        for count in bins {
            assert!((2_200..=2_800).contains(&count), "bins: {bins:?}");
        }
    }

    #[test]
    fn linear_sampling_is_not_log_sampling() {
        // Same domain, linear method: most mass sits in the top decade.
        let spec = ParameterSpec::linear("f", 1.0, 100.0);
        let mut rng = seeded_rng(2024);
        let top = (0..10_000)
            .filter(|_| sample(&spec, &mut rng).unwrap() >= 10.0)
            .count();
        assert!(top > 8_500, "top decade count {top}");
    }

    #[test]
    fn fixed_parameter_returns_constant_and_consumes_draw() {
        let fixed = ParameterSpec::log("L1", 140e-6, 140e-6);
        let free = ParameterSpec::linear("x", 0.0, 1.0);

        let mut a = seeded_rng(5);
        assert_eq!(sample(&fixed, &mut a).unwrap(), 140e-6);
        let after_fixed = sample(&free, &mut a).unwrap();

        let mut b = seeded_rng(5);
        let _ = sample(&free, &mut b).unwrap();
        let second = sample(&free, &mut b).unwrap();

        assert_eq!(after_fixed, second);
    }

    #[test]
    fn same_seed_same_stream() {
        let spec = ParameterSpec::log("f", 1e4, 1e5);
        let mut a = seeded_rng(99);
        let mut b = seeded_rng(99);
        for _ in 0..100 {
            assert_eq!(
                sample(&spec, &mut a).unwrap().to_bits(),
                sample(&spec, &mut b).unwrap().to_bits()
            );
        }
    }

    #[test]
    fn zero_log_bound_is_domain_error() {
        let spec = ParameterSpec::log("C2", 0.0, 1e-9);
        let mut rng = seeded_rng(1);
        let err = sample(&spec, &mut rng).unwrap_err();
        assert!(matches!(err, DomainError::NonPositiveLogBound { ref key, .. } if key == "C2"));
    }

    #[test]
    fn inverted_bounds_is_domain_error() {
        let spec = ParameterSpec::linear("k", 1.0, 0.0);
        let mut rng = seeded_rng(1);
        assert!(matches!(
            sample(&spec, &mut rng),
            Err(DomainError::InvertedBounds { .. })
        ));
    }
}
