use crate::models::RankedMatch;

/// Number of donors returned when the caller does not ask for a count
pub const DEFAULT_TOP_N: usize = 3;

/// Pair names with scores, sort by descending score and keep the first `top_n`
///
/// The sort is stable: donors with equal scores keep their input order.
/// NaN scores sort after every real score.
pub fn rank_donors<S: AsRef<str>>(names: &[S], scores: &[f64], top_n: usize) -> Vec<RankedMatch> {
    let mut ranked: Vec<RankedMatch> = names
        .iter()
        .zip(scores)
        .map(|(name, score)| RankedMatch::new(name.as_ref(), *score))
        .collect();

    ranked.sort_by(|a, b| sort_key(b.score).total_cmp(&sort_key(a.score)));

    ranked.truncate(top_n);
    ranked
}

#[inline]
fn sort_key(score: f64) -> f64 {
    if score.is_nan() {
        f64::NEG_INFINITY
    } else {
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_two() {
        let ranked = rank_donors(&["Alice", "Bob", "Cara"], &[0.9, 0.95, 0.2], 2);

        assert_eq!(
            ranked,
            vec![RankedMatch::new("Bob", 0.95), RankedMatch::new("Alice", 0.9)]
        );
    }

    #[test]
    fn test_fewer_than_n() {
        let ranked = rank_donors(&["Alice"], &[0.4], DEFAULT_TOP_N);
        assert_eq!(ranked.len(), 1);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let ranked = rank_donors(&["A", "B", "C", "D"], &[0.5, 0.7, 0.5, 0.5], 4);
        let names: Vec<&str> = ranked.iter().map(|m| m.donor_name.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "C", "D"]);
    }

    #[test]
    fn test_non_increasing_and_length() {
        let names: Vec<String> = (0..20).map(|i| format!("donor-{}", i)).collect();
        let scores: Vec<f64> = (0..20).map(|i| ((i * 37) % 11) as f64 / 10.0).collect();

        for n in [0, 1, 3, 20, 50] {
            let ranked = rank_donors(&names, &scores, n);
            assert_eq!(ranked.len(), n.min(names.len()));
            assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
        }
    }

    #[test]
    fn test_nan_sorts_last() {
        let ranked = rank_donors(&["A", "B", "C"], &[f64::NAN, 0.1, 0.3], 3);
        assert_eq!(ranked[0].donor_name, "C");
        assert_eq!(ranked[1].donor_name, "B");
        assert!(ranked[2].score.is_nan());
    }

    #[test]
    fn test_empty() {
        let names: [&str; 0] = [];
        assert!(rank_donors(&names, &[], 3).is_empty());
    }
}
