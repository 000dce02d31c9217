//! Quiz question selection.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::store::Question;

/// Category id meaning "draw from every category"
pub const ALL_CATEGORIES: i64 = 0;

/// Pick one question uniformly at random, skipping ids already asked.
///
/// Returns `None` when every candidate has been asked.
pub fn pick_question<R: Rng + ?Sized>(
    candidates: Vec<Question>,
    previous: &[i64],
    rng: &mut R,
) -> Option<Question> {
    let asked: HashSet<i64> = previous.iter().copied().collect();
    let remaining: Vec<Question> = candidates
        .into_iter()
        .filter(|q| !asked.contains(&q.id))
        .collect();
    remaining.choose(rng).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn questions(ids: &[i64]) -> Vec<Question> {
        ids.iter()
            .map(|&id| Question {
                id,
                question: format!("q{}", id),
                answer: "a".to_string(),
                category: 1,
                difficulty: 1,
            })
            .collect()
    }

    #[test]
    fn test_skips_previous_questions() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let picked = pick_question(questions(&[1, 5, 9]), &[5, 9], &mut rng).unwrap();
            assert_eq!(picked.id, 1);
        }
    }

    #[test]
    fn test_exhausted_pool() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(pick_question(questions(&[2, 3]), &[3, 2], &mut rng).is_none());
        assert!(pick_question(Vec::new(), &[], &mut rng).is_none());
    }

    #[test]
    fn test_draws_vary() {
        let mut rng = StdRng::seed_from_u64(42);
        let seen: HashSet<i64> = (0..200)
            .filter_map(|_| pick_question(questions(&[1, 2, 3, 4]), &[], &mut rng))
            .map(|q| q.id)
            .collect();
        assert_eq!(seen.len(), 4);
    }
}
