//! Descriptor distance metric

/// Cosine distance, `1 - cos(a, b)`, in [0, 2].
///
/// Zero-norm vectors sit at distance 1 from everything.
#[inline]
pub fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a < 1e-10 || norm_b < 1e-10 {
        return 1.0;
    }
    1.0 - (dot / (norm_a * norm_b)).clamp(-1.0, 1.0)
}

/// Edge weight for a pair at `distance`.
///
/// Weighted edges grow without bound as the distance shrinks, so near
/// duplicates dominate; a distance of exactly 0 yields infinity.
#[inline]
pub fn edge_weight(distance: f32, weighted: bool) -> f32 {
    if weighted {
        1.0 / (distance * distance) + 1.0
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_distance_basic() {
        assert!(cosine_distance(&[1.0, 0.0], &[2.0, 0.0]).abs() < 1e-6);
        assert!((cosine_distance(&[1.0, 0.0], &[0.0, 1.0]) - 1.0).abs() < 1e-6);
        assert!((cosine_distance(&[1.0, 0.0], &[-1.0, 0.0]) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_distance_zero_vector() {
        assert_eq!(cosine_distance(&[0.0, 0.0], &[1.0, 0.0]), 1.0);
    }

    #[test]
    fn test_cosine_distance_symmetric() {
        let a = [0.3, -1.2, 4.0];
        let b = [2.0, 0.5, -0.7];
        assert_eq!(cosine_distance(&a, &b), cosine_distance(&b, &a));
    }

    #[test]
    fn test_edge_weight() {
        assert_eq!(edge_weight(0.5, false), 1.0);
        assert!((edge_weight(0.5, true) - 5.0).abs() < 1e-6);
        assert!(edge_weight(0.1, true) > edge_weight(0.2, true));
        assert!(edge_weight(0.0, true).is_infinite());
    }
}
