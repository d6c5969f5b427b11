//! Embedding comparison and ranking helpers used by identity matching.

/// Euclidean distance from `face` to each known embedding.
pub fn face_distance(known: &[Vec<f32>], face: &[f32]) -> Vec<f64> {
    known.iter().map(|k| euclidean(k, face)).collect()
}

/// Score of one face against an identity: its distance to the farthest
/// reference embedding. `None` when the identity has no embeddings.
pub fn identity_score(known: &[Vec<f32>], face: &[f32]) -> Option<f64> {
    face_distance(known, face)
        .into_iter()
        .fold(None, |acc, d| Some(acc.map_or(d, |m: f64| m.max(d))))
}

/// Rank of each score when sorted ascending (0 = best).
///
/// Ties keep input order, so exactly one element receives rank 0.
pub fn ranks(scores: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| {
        scores[a]
            .partial_cmp(&scores[b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut ranks = vec![0; scores.len()];
    for (rank, idx) in order.into_iter().enumerate() {
        ranks[idx] = rank;
    }
    ranks
}

fn euclidean(a: &[f32], b: &[f32]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = *x as f64 - *y as f64;
            d * d
        })
        .sum::<f64>()
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_face_distance_per_known_embedding() {
        let known = vec![vec![0.0, 0.0], vec![3.0, 4.0]];
        let d = face_distance(&known, &[0.0, 0.0]);
        assert_eq!(d.len(), 2);
        assert_relative_eq!(d[0], 0.0);
        assert_relative_eq!(d[1], 5.0);
    }

    #[test]
    fn test_face_distance_empty_known() {
        assert!(face_distance(&[], &[1.0]).is_empty());
    }

    #[test]
    fn test_identity_score_takes_maximum() {
        let known = vec![vec![1.0, 0.0], vec![0.0, 2.0], vec![0.0, 0.5]];
        let score = identity_score(&known, &[0.0, 0.0]).unwrap();
        assert_relative_eq!(score, 2.0);
    }

    #[test]
    fn test_identity_score_none_without_references() {
        assert!(identity_score(&[], &[0.0, 1.0]).is_none());
    }

    #[test]
    fn test_ranks_ascending() {
        assert_eq!(ranks(&[0.7, 0.2, 0.9, 0.4]), vec![2, 0, 3, 1]);
    }

    #[test]
    fn test_ranks_ties_prefer_earlier_index() {
        let r = ranks(&[0.5, 0.5, 0.1, 0.1]);
        assert_eq!(r, vec![2, 3, 0, 1]);
        assert_eq!(r.iter().filter(|&&x| x == 0).count(), 1);
    }

    #[test]
    fn test_ranks_empty_and_single() {
        assert!(ranks(&[]).is_empty());
        assert_eq!(ranks(&[3.0]), vec![0]);
    }
}
