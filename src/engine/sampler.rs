use rand::Rng;

/// Pick one outcome with probability proportional to its weight.
///
/// Draws a value in `[0, total)` and walks the candidates in order until the
/// running weight reaches it. Returns `None` for an empty candidate list.
pub fn weighted_sample<T, R>(choices: &[(T, f64)], rng: &mut R) -> Option<T>
where
    T: Clone,
    R: Rng + ?Sized,
{
    let total: f64 = choices.iter().map(|(_, weight)| weight).sum();
    let draw = total * rng.random::<f64>();
    pick(choices, draw)
}

fn pick<T: Clone>(choices: &[(T, f64)], draw: f64) -> Option<T> {
    let mut running = 0.0;
    for (outcome, weight) in choices.iter().filter(|(_, weight)| *weight > 0.0) {
        running += weight;
        if running >= draw {
            return Some(outcome.clone());
        }
    }

    // Rounding can leave the draw just above the final running total
    choices
        .iter()
        .rev()
        .find(|(_, weight)| *weight > 0.0)
        .or(choices.first())
        .map(|(outcome, _)| outcome.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    #[test]
    fn test_pick_walks_cumulative_weights() {
        let choices = [('a', 1.0), ('b', 2.0), ('c', 1.0)];
        assert_eq!(pick(&choices, 0.0), Some('a'));
        assert_eq!(pick(&choices, 1.0), Some('a'));
        assert_eq!(pick(&choices, 1.5), Some('b'));
        assert_eq!(pick(&choices, 3.0), Some('b'));
        assert_eq!(pick(&choices, 3.9), Some('c'));
    }

    #[test]
    fn test_empty_choices() {
        let mut rng = StdRng::seed_from_u64(7);
        let choices: [(char, f64); 0] = [];
        assert_eq!(weighted_sample(&choices, &mut rng), None);
    }

    #[test]
    fn test_zero_weight_never_chosen() {
        let mut rng = StdRng::seed_from_u64(11);
        let choices = [("never", 0.0), ("always", 1.0)];
        for _ in 0..500 {
            assert_eq!(weighted_sample(&choices, &mut rng), Some("always"));
        }
    }

    #[test]
    fn test_frequencies_follow_weights() {
        let mut rng = StdRng::seed_from_u64(42);
        let choices = [('x', 3.0), ('y', 1.0)];
        let mut counts: HashMap<char, usize> = HashMap::new();
        for _ in 0..4000 {
            let outcome = weighted_sample(&choices, &mut rng).unwrap();
            *counts.entry(outcome).or_default() += 1;
        }
        let x = counts[&'x'] as f64 / 4000.0;
        assert!((0.70..0.80).contains(&x), "x frequency {}", x);
    }
}
