//! Shannon entropy over categorical samples, in bits.

use std::collections::BTreeMap;

/// Occurrence count of each distinct value.
///
/// A `BTreeMap` keeps summation order fixed, so repeated runs over the same
/// samples produce bit-identical entropies.
pub fn frequencies<T: Ord>(samples: impl IntoIterator<Item = T>) -> BTreeMap<T, usize> {
    let mut counts = BTreeMap::new();
    for sample in samples {
        *counts.entry(sample).or_insert(0) += 1;
    }
    counts
}

/// Entropy of a count distribution: `Σ p·log2(1/p)`.
///
/// An empty or single-outcome distribution yields `0.0`.
pub fn entropy_of_counts<'a>(counts: impl IntoIterator<Item = &'a usize>) -> f64 {
    let counts: Vec<usize> = counts.into_iter().copied().filter(|&c| c > 0).collect();
    let total: usize = counts.iter().sum();
    counts
        .into_iter()
        .map(|count| {
            let p = count as f64 / total as f64;
            p * surprisal(count, total)
        })
        .fold(0.0, |acc, term| acc + term)
}

/// Entropy of the empirical distribution of `samples`.
///
/// # Examples
///
/// ```
/// # use uavplex::analysis::entropy;
/// assert_eq!(entropy(["Motor", "Motor"]), 0.0);
/// assert_eq!(entropy(["Hub", "Motor"]), 1.0);
/// ```
pub fn entropy<T: Ord>(samples: impl IntoIterator<Item = T>) -> f64 {
    entropy_of_counts(frequencies(samples).values())
}

/// Information content `log2(total / count)` of an outcome seen `count`
/// times out of `total`. Zero when either is zero.
pub fn surprisal(count: usize, total: usize) -> f64 {
    if count == 0 || total == 0 {
        return 0.0;
    }
    (total as f64 / count as f64).log2()
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(entropy(Vec::<u8>::new()), 0.0);
    }

    #[test]
    fn test_single_outcome_is_positive_zero() {
        let h = entropy(["Arm"; 5]);
        assert_eq!(h, 0.0);
        assert!(h.is_sign_positive());
    }

    #[test]
    fn test_mixed_distribution() {
        // p = (1/2, 1/4, 1/4)
        assert_approx_eq!(f64, entropy(["Motor", "Motor", "Hub", "Sensor"]), 1.5);
    }

    #[test]
    fn test_surprisal() {
        assert_approx_eq!(f64, surprisal(1, 8), 3.0);
        assert_eq!(surprisal(4, 4), 0.0);
        assert_eq!(surprisal(0, 4), 0.0);
    }

    fn check_uniform_entropy(n: usize) -> Result<(), TestCaseError> {
        let h = entropy(0..n);
        prop_assert!((h - (n as f64).log2()).abs() < 1e-9);
        Ok(())
    }

    fn check_entropy_bounds(samples: Vec<u8>) -> Result<(), TestCaseError> {
        let h = entropy(samples.iter().copied());
        let distinct = frequencies(samples.iter().copied()).len();
        prop_assert!(h >= 0.0);
        if distinct > 0 {
            prop_assert!(h <= (distinct as f64).log2() + 1e-9);
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn uniform_entropy_is_log2_n(n in 1usize..64) {
            check_uniform_entropy(n)?;
        }

        #[test]
        fn entropy_is_bounded(samples in prop::collection::vec(0u8..6, 0..40)) {
            check_entropy_bounds(samples)?;
        }
    }
}
