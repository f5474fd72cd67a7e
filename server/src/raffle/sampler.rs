//! Uniform without-replacement winner sampling.

use rand::Rng;
use rand::rngs::OsRng;
use rand::seq::SliceRandom;
use twitch_client::api::Chatter;

/// Select `count` distinct entries uniformly at random.
pub fn sample_winners(rows: &[Chatter], count: usize) -> Vec<Chatter> {
    let mut rng = OsRng;
    sample_winners_with_rng(rows, count, &mut rng)
}

/// Partial Fisher-Yates: shuffle a prefix of length `min(count, len)`
/// and take it. Every subset and ordering is equally likely to the
/// extent the RNG is uniform.
pub fn sample_winners_with_rng<R: Rng + ?Sized>(
    rows: &[Chatter],
    count: usize,
    rng: &mut R,
) -> Vec<Chatter> {
    let mut pool = rows.to_vec();
    let take = count.min(pool.len());
    let (picked, _rest) = pool.partial_shuffle(rng, take);
    picked.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn chatter(login: &str) -> Chatter {
        Chatter {
            user_id: String::new(),
            user_login: login.to_string(),
            user_name: login.to_string(),
        }
    }

    fn pool(n: usize) -> Vec<Chatter> {
        (0..n).map(|i| chatter(&format!("user{i}"))).collect()
    }

    #[test]
    fn sample_is_capped_at_the_pool_size() {
        let mut rng = StdRng::seed_from_u64(1);
        let rows = pool(2);

        assert_eq!(sample_winners_with_rng(&rows, 3, &mut rng).len(), 2);
        assert_eq!(sample_winners_with_rng(&rows, 2, &mut rng).len(), 2);
        assert_eq!(sample_winners_with_rng(&rows, 1, &mut rng).len(), 1);
        assert_eq!(sample_winners_with_rng(&rows, 0, &mut rng).len(), 0);
    }

    #[test]
    fn empty_pool_yields_empty_sample() {
        let mut rng = StdRng::seed_from_u64(2);
        assert!(sample_winners_with_rng(&[], 3, &mut rng).is_empty());
    }

    #[test]
    fn sample_never_repeats_an_entry() {
        let rows = pool(10);
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..200 {
            let winners = sample_winners_with_rng(&rows, 5, &mut rng);
            let distinct: HashSet<&str> =
                winners.iter().map(|c| c.user_login.as_str()).collect();
            assert_eq!(distinct.len(), winners.len());
        }
    }

    #[test]
    fn oversized_request_returns_a_permutation_of_the_pool() {
        let rows = pool(4);
        let mut rng = StdRng::seed_from_u64(4);

        let winners = sample_winners_with_rng(&rows, 10, &mut rng);
        let got: HashSet<&str> = winners.iter().map(|c| c.user_login.as_str()).collect();
        let want: HashSet<&str> = rows.iter().map(|c| c.user_login.as_str()).collect();
        assert_eq!(got, want);
    }

    #[test]
    fn single_draws_are_roughly_uniform() {
        let rows = pool(3);
        let mut rng = StdRng::seed_from_u64(42);
        let mut counts = [0u32; 3];

        for _ in 0..3000 {
            let winner = &sample_winners_with_rng(&rows, 1, &mut rng)[0];
            let idx: usize = winner.user_login["user".len()..].parse().unwrap();
            counts[idx] += 1;
        }

        // Expected ~1000 each; a skewed comparator-style shuffle would
        // push one bucket far outside this band.
        for count in counts {
            assert!((800..=1200).contains(&count), "skewed counts: {counts:?}");
        }
    }
}
