//! Ordinal ranking helpers.

use ndarray::Array1;

/// Ranks scores so that the highest score gets rank 1.
///
/// Ranks are ordinal: equal scores receive distinct ranks in the order they
/// appear in the input. Non-finite values sort with [`f64::total_cmp`].
pub fn descending_ranks(scores: &Array1<f64>) -> Array1<f64> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    // `sort_by` is stable, so tied scores keep input order.
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));

    let mut ranks = Array1::zeros(scores.len());
    for (position, &index) in order.iter().enumerate() {
        ranks[index] = (position + 1) as f64;
    }
    ranks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highest_score_ranks_first() {
        let ranks = descending_ranks(&Array1::from_vec(vec![3.0, 1.0, 2.0]));
        assert_eq!(ranks.to_vec(), vec![1.0, 3.0, 2.0]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let ranks = descending_ranks(&Array1::from_vec(vec![5.0, 7.0, 5.0, 5.0]));
        assert_eq!(ranks.to_vec(), vec![2.0, 1.0, 3.0, 4.0]);
    }

    #[test]
    fn test_negative_and_empty() {
        let ranks = descending_ranks(&Array1::from_vec(vec![-0.5, -2.0]));
        assert_eq!(ranks.to_vec(), vec![1.0, 2.0]);
        assert!(descending_ranks(&Array1::zeros(0)).is_empty());
    }
}
