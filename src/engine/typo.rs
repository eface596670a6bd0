use crate::config::TypoConfig;
use crate::engine::keyboard::neighbor_of;
use rand::Rng;

/// Punctuation marks that may trade places with each other.
const SWAPPABLE_PUNCTUATION: &str = "!@#$%^&*()_-+=[]{}\\|;:'\",.<>/?`~";

/// Whether two neighbouring characters may be transposed: both lowercase,
/// both uppercase, both digits or both punctuation.
pub fn can_swap(a: char, b: char) -> bool {
    (a.is_lowercase() && b.is_lowercase())
        || (a.is_uppercase() && b.is_uppercase())
        || (a.is_ascii_digit() && b.is_ascii_digit())
        || (SWAPPABLE_PUNCTUATION.contains(a) && SWAPPABLE_PUNCTUATION.contains(b))
}

/// Keyboard-driven mistyping.
#[derive(Debug, Clone, Copy)]
pub struct TypoRewriter {
    config: TypoConfig,
}

impl TypoRewriter {
    pub fn new(config: TypoConfig) -> Self {
        Self { config }
    }

    /// Delete, double up or mistype individual characters of a word.
    pub fn rewrite_word<R: Rng + ?Sized>(&self, word: &str, rng: &mut R) -> String {
        let delete = self.config.delete_char;
        let insert = delete + self.config.insert;
        let replace = insert + self.config.replace;

        let mut out = String::with_capacity(word.len() + 2);
        for c in word.chars() {
            let roll = rng.random::<f64>();
            if roll < delete {
                continue;
            } else if roll < insert {
                let extra = neighbor_of(c, rng);
                if rng.random::<f64>() < 0.5 {
                    out.push(extra);
                    out.push(c);
                } else {
                    out.push(c);
                    out.push(extra);
                }
            } else if roll < replace {
                out.push(neighbor_of(c, rng));
            } else {
                out.push(c);
            }
        }
        out
    }

    /// Drop individual whitespace characters.
    pub fn rewrite_whitespace<R: Rng + ?Sized>(&self, space: &str, rng: &mut R) -> String {
        space
            .chars()
            .filter(|_| rng.random::<f64>() >= self.config.delete_space)
            .collect()
    }

    /// One left-to-right transposition pass over a finished line.
    ///
    /// Eligibility is judged on the line as it was before the pass, and a
    /// swapped pair is never revisited.
    pub fn swap_pass<R: Rng + ?Sized>(&self, line: &str, rng: &mut R) -> String {
        let mut chars: Vec<char> = line.chars().collect();
        let mut i = 0;

        while i + 1 < chars.len() {
            if can_swap(chars[i], chars[i + 1]) && rng.random::<f64>() < self.config.swap {
                chars.swap(i, i + 1);
                i += 2;
            } else {
                i += 1;
            }
        }

        chars.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn only(config: TypoConfig) -> TypoRewriter {
        TypoRewriter::new(config)
    }

    #[test]
    fn test_can_swap() {
        assert!(can_swap('a', 'b'));
        assert!(!can_swap('a', '1'));
        assert!(!can_swap('A', 'a'));
        assert!(can_swap('1', '2'));
        assert!(can_swap('!', '?'));
        assert!(can_swap('Q', 'Z'));
        assert!(!can_swap(' ', ' '));
        assert!(!can_swap(',', 'a'));
    }

    #[test]
    fn test_disabled_is_identity() {
        let mut rng = StdRng::seed_from_u64(1);
        let typo = only(TypoConfig::disabled());
        assert_eq!(typo.rewrite_word("Hello,", &mut rng), "Hello,");
        assert_eq!(typo.rewrite_whitespace(" \t ", &mut rng), " \t ");
        assert_eq!(typo.swap_pass("Hello, World!", &mut rng), "Hello, World!");
    }

    #[test]
    fn test_always_delete() {
        let mut rng = StdRng::seed_from_u64(2);
        let typo = only(TypoConfig {
            delete_char: 1.0,
            ..TypoConfig::disabled()
        });
        assert_eq!(typo.rewrite_word("gone", &mut rng), "");

        let typo = only(TypoConfig {
            delete_space: 1.0,
            ..TypoConfig::disabled()
        });
        assert_eq!(typo.rewrite_whitespace("   ", &mut rng), "");
    }

    #[test]
    fn test_always_replace_uses_neighbours() {
        let mut rng = StdRng::seed_from_u64(5);
        let typo = only(TypoConfig {
            replace: 1.0,
            ..TypoConfig::disabled()
        });
        for _ in 0..100 {
            let out = typo.rewrite_word("q", &mut rng);
            assert!(["1", "2", "w", "a", "s"].contains(&out.as_str()), "got {}", out);
        }
        // characters off the keyboard come back unchanged
        assert_eq!(typo.rewrite_word("ü", &mut rng), "ü");
    }

    #[test]
    fn test_always_insert_keeps_original() {
        let mut rng = StdRng::seed_from_u64(8);
        let typo = only(TypoConfig {
            insert: 1.0,
            ..TypoConfig::disabled()
        });
        for _ in 0..100 {
            let out: Vec<char> = typo.rewrite_word("g", &mut rng).chars().collect();
            assert_eq!(out.len(), 2);
            assert!(out.contains(&'g'));
        }
    }

    #[test]
    fn test_swap_pass_does_not_cascade() {
        let mut rng = StdRng::seed_from_u64(13);
        let typo = only(TypoConfig {
            swap: 1.0,
            ..TypoConfig::disabled()
        });
        assert_eq!(typo.swap_pass("abc", &mut rng), "bac");
        assert_eq!(typo.swap_pass("Hello, World!", &mut rng), "Hleol, Wrodl!");
        assert_eq!(typo.swap_pass("a1b2cd", &mut rng), "a1b2dc");
    }
}
