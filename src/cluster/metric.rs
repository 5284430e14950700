// Released under MIT License.
// Copyright (c) 2024-2026 Ladislav Bartos

//! The distance metric used for the clustering.

use crate::PANIC_MESSAGE;

/// Calculate the root-mean-square deviation between the landmark coordinates
/// of two frames.
///
/// The metric is a pure function of the two coordinate vectors: it is
/// symmetric, non-negative, and zero exactly when the vectors are equal.
/// Accumulation runs in ascending index order and in `f64` so that the result
/// is bit-identical no matter which worker performs the computation or in
/// which order the distances are requested. Parallel reductions must never
/// change the summation order here; the determinism of the whole clustering
/// rests on it.
pub(crate) fn distance(a: &[f32], b: &[f32]) -> f64 {
    assert_eq!(
        a.len(),
        b.len(),
        "FATAL CLUSTERLP ERROR | metric::distance | Frames have inconsistent dimensionality. {}",
        PANIC_MESSAGE
    );
    assert!(
        !a.is_empty() && a.len() % 3 == 0,
        "FATAL CLUSTERLP ERROR | metric::distance | Invalid coordinate vector length '{}'. {}",
        a.len(),
        PANIC_MESSAGE
    );

    let mut sum = 0.0f64;
    for (&x, &y) in a.iter().zip(b.iter()) {
        let diff = x as f64 - y as f64;
        sum += diff * diff;
    }

    (sum / (a.len() / 3) as f64).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identity() {
        let a = vec![1.5, -2.0, 0.25, 4.0, 0.0, -1.125];
        assert_eq!(distance(&a, &a), 0.0);
    }

    #[test]
    fn test_symmetry() {
        let a = vec![0.1, 0.2, 0.3, 1.0, 2.0, 3.0, -0.5, 0.0, 0.5];
        let b = vec![0.4, 0.1, 0.0, -1.0, 2.5, 3.5, 0.5, 0.25, -0.5];

        // bitwise equality, not approximate
        assert_eq!(distance(&a, &b), distance(&b, &a));
        assert!(distance(&a, &b) > 0.0);
    }

    #[test]
    fn test_known_value() {
        // two atoms, each displaced by (1, 2, 2) => per-atom deviation 3
        let a = vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0];
        let b = vec![1.0, 2.0, 2.0, 2.0, 3.0, 3.0];

        assert_relative_eq!(distance(&a, &b), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_determinism() {
        let a: Vec<f32> = (0..66).map(|i| (i as f32 * 0.371).sin()).collect();
        let b: Vec<f32> = (0..66).map(|i| (i as f32 * 0.137).cos()).collect();

        let first = distance(&a, &b);
        for _ in 0..10 {
            assert_eq!(distance(&a, &b), first);
        }
    }

    #[test]
    #[should_panic]
    fn test_inconsistent_dimensionality() {
        distance(&[0.0, 0.0, 0.0], &[0.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
    }
}
