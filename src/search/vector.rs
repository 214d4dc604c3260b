use std::cmp::Ordering;

use crate::models::{Page, RankedPage};

/// Component-wise arithmetic mean of equal-length vectors.
///
/// A single vector is returned unchanged. Returns `None` for an empty slice
/// or when the vectors disagree on dimensionality.
pub fn average_vectors(vectors: &[Vec<f32>]) -> Option<Vec<f32>> {
    let first = vectors.first()?;
    if vectors.len() == 1 {
        return Some(first.clone());
    }
    if vectors.iter().any(|v| v.len() != first.len()) {
        return None;
    }

    let mut sum = vec![0.0f32; first.len()];
    for v in vectors {
        for (acc, x) in sum.iter_mut().zip(v) {
            *acc += x;
        }
    }
    let n = vectors.len() as f32;
    for acc in &mut sum {
        *acc /= n;
    }
    Some(sum)
}

/// `dot(a, b) / (||a|| * ||b||)`.
///
/// Mismatched lengths, empty vectors and zero norms have no defined angle
/// and yield `NaN`; [`rank_pages`] sorts those below every real score.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return f32::NAN;
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;

    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 {
        f32::NAN
    } else {
        dot / denom
    }
}

/// Score every page against `query` and keep the best `limit`, highest first.
///
/// The sort is stable, so equal scores keep their stored order.
pub fn rank_pages(query: &[f32], pages: &[Page], limit: usize) -> Vec<RankedPage> {
    let mut scored: Vec<(f32, &Page)> = pages
        .iter()
        .map(|p| (cosine_similarity(query, &p.embedding), p))
        .collect();

    scored.sort_by(|a, b| descending_nan_last(a.0, b.0));
    scored.truncate(limit);

    scored
        .into_iter()
        .map(|(score, page)| RankedPage {
            page: page.clone(),
            score,
        })
        .collect()
}

fn descending_nan_last(a: f32, b: f32) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(n: u32, embedding: Vec<f32>) -> Page {
        Page {
            page_number: n,
            text: format!("page {n}"),
            embedding,
        }
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_average_single_vector_is_unchanged() {
        let v = vec![0.3, -1.0, 2.5];
        assert_eq!(average_vectors(&[v.clone()]), Some(v));
    }

    #[test]
    fn test_average_equal_vectors() {
        let v = vec![0.25, 0.5, -0.75];
        let avg = average_vectors(&[v.clone(), v.clone(), v.clone()]).unwrap();
        assert_eq!(avg.len(), v.len());
        assert!(avg.iter().zip(&v).all(|(a, b)| approx(*a, *b)));
    }

    #[test]
    fn test_average_componentwise() {
        let avg = average_vectors(&[vec![1.0, 0.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(avg, vec![2.0, 2.0]);
    }

    #[test]
    fn test_average_empty_and_mismatched() {
        assert!(average_vectors(&[]).is_none());
        assert!(average_vectors(&[vec![1.0], vec![1.0, 2.0]]).is_none());
    }

    #[test]
    fn test_cosine_identity_opposite_symmetric() {
        let v = [0.2, -0.4, 0.9];
        let neg: Vec<f32> = v.iter().map(|x| -x).collect();
        let w = [1.0, 0.5, 0.0];
        assert!(approx(cosine_similarity(&v, &v), 1.0));
        assert!(approx(cosine_similarity(&v, &neg), -1.0));
        assert!(approx(cosine_similarity(&v, &w), cosine_similarity(&w, &v)));
    }

    #[test]
    fn test_cosine_degenerate_is_nan() {
        assert!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]).is_nan());
        assert!(cosine_similarity(&[1.0], &[1.0, 0.0]).is_nan());
        assert!(cosine_similarity(&[], &[]).is_nan());
    }

    #[test]
    fn test_rank_orders_descending_and_truncates() {
        let pages = vec![
            page(1, vec![0.0, 1.0]),
            page(2, vec![1.0, 0.0]),
            page(3, vec![1.0, 1.0]),
            page(4, vec![-1.0, 0.0]),
            page(5, vec![0.9, 0.1]),
        ];
        let ranked = rank_pages(&[1.0, 0.0], &pages, 4);
        let order: Vec<u32> = ranked.iter().map(|r| r.page.page_number).collect();
        assert_eq!(order, vec![2, 5, 3, 1]);
        assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_rank_fewer_pages_than_limit() {
        let pages = vec![page(1, vec![1.0]), page(2, vec![-1.0])];
        assert_eq!(rank_pages(&[1.0], &pages, 4).len(), 2);
    }

    #[test]
    fn test_rank_ties_keep_stored_order() {
        let pages = vec![
            page(7, vec![1.0, 0.0]),
            page(3, vec![2.0, 0.0]),
            page(5, vec![0.5, 0.0]),
        ];
        let ranked = rank_pages(&[1.0, 0.0], &pages, 4);
        let order: Vec<u32> = ranked.iter().map(|r| r.page.page_number).collect();
        assert_eq!(order, vec![7, 3, 5]);
    }

    #[test]
    fn test_rank_puts_degenerate_scores_last() {
        let pages = vec![
            page(1, vec![0.0, 0.0]),
            page(2, vec![-1.0, 0.0]),
            page(3, vec![1.0, 0.0]),
        ];
        let ranked = rank_pages(&[1.0, 0.0], &pages, 4);
        let order: Vec<u32> = ranked.iter().map(|r| r.page.page_number).collect();
        assert_eq!(order, vec![3, 2, 1]);
        assert!(ranked[2].score.is_nan());
    }
}
