// ── Vector math utilities ──────────────────────────────────────────────

/// Cosine similarity between two vectors. Returns 0.0 if the lengths differ,
/// either is empty, or either has zero norm.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (x, y) in a.iter().zip(b.iter()) {
        let x = *x as f64;
        let y = *y as f64;
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom < 1e-12 {
        0.0
    } else {
        dot / denom
    }
}

/// Index and score of the most similar candidate. Ties keep the earliest.
pub fn best_match(query: &[f32], candidates: &[Vec<f32>]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, candidate) in candidates.iter().enumerate() {
        let sim = cosine_similarity(query, candidate);
        match best {
            Some((_, score)) if sim <= score => {}
            _ => best = Some((idx, sim)),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cosine_identical_vectors() {
        let v = vec![1.0f32, 2.0, 3.0];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn cosine_orthogonal_vectors() {
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
    }

    #[test]
    fn cosine_zero_vector() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
    }

    #[test]
    fn cosine_length_mismatch() {
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 2.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }

    #[test]
    fn best_match_keeps_first_on_tie() {
        let candidates = vec![vec![1.0f32, 0.0], vec![2.0, 0.0], vec![0.0, 1.0]];
        let (idx, score) = best_match(&[1.0, 0.0], &candidates).unwrap();
        assert_eq!(idx, 0);
        assert!((score - 1.0).abs() < 1e-6);
    }

    #[test]
    fn best_match_empty() {
        assert!(best_match(&[1.0], &[]).is_none());
    }
}
