use crate::config::PhonoConfig;
use crate::engine::casing::CapitalizationPattern;
use crate::engine::segment::{is_vowel, segment, Category, LetterKind, CONSONANTS, VOWELS};
use crate::rules::RuleSet;
use rand::Rng;
use tracing::trace;

/// Attempts per unit before it is left alone.
pub const MAX_TRIES: usize = 10;

/// Characters at the edges of a block that must not be edited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Preserve {
    pub first: bool,
    pub last: bool,
}

struct PendingBlock {
    text: String,
    category: Category,
    case: CapitalizationPattern,
    preserve: Preserve,
}

/// Sound-preserving misspelling constrained by a [`RuleSet`].
#[derive(Debug, Clone)]
pub struct PhonoRewriter {
    config: PhonoConfig,
    rules: RuleSet,
    vowel_pool: Vec<Vec<char>>,
    consonant_pool: Vec<Vec<char>>,
}

impl PhonoRewriter {
    pub fn new(config: PhonoConfig, rules: RuleSet) -> Self {
        let vowel_pool = build_pool(VOWELS, &rules, LetterKind::Vowel);
        let consonant_pool = build_pool(CONSONANTS, &rules, LetterKind::Consonant);
        Self {
            config,
            rules,
            vowel_pool,
            consonant_pool,
        }
    }

    pub fn rewrite_word<R: Rng + ?Sized>(&self, word: &str, rng: &mut R) -> String {
        let mut pending: Vec<PendingBlock> = segment(word)
            .into_iter()
            .map(|block| PendingBlock {
                case: CapitalizationPattern::detect(&block.text),
                text: block.text,
                category: block.category,
                preserve: Preserve::default(),
            })
            .collect();

        // A letter group straddling two blocks is kept intact on both sides
        for i in 1..pending.len() {
            if !pending[i - 1].category.is_letter() || !pending[i].category.is_letter() {
                continue;
            }
            let (Some(last), Some(first)) = (
                pending[i - 1].text.chars().last(),
                pending[i].text.chars().next(),
            ) else {
                continue;
            };
            if self
                .rules
                .is_group(last.to_ascii_lowercase(), first.to_ascii_lowercase())
                && rng.random::<f64>() < self.config.group
            {
                pending[i - 1].preserve.last = true;
                pending[i].preserve.first = true;
            }
        }

        let mut out = String::with_capacity(word.len() + 4);
        for block in &pending {
            if !block.category.is_letter() {
                out.push_str(&block.text);
                continue;
            }

            let lowered = block.text.to_ascii_lowercase();
            let rewritten = self.rewrite_block(&lowered, block.category, block.preserve, rng);
            if rewritten == lowered {
                out.push_str(&block.text);
            } else {
                out.push_str(&block.case.apply(&rewritten));
            }
        }

        match CapitalizationPattern::detect(word) {
            CapitalizationPattern::Mixed => out,
            case => case.apply(&out),
        }
    }

    /// Edit a lowercase block one unit at a time.
    ///
    /// Each unit gets up to [`MAX_TRIES`] draws to find an edit that keeps at
    /// least one vowel if the block had one and creates no forbidden
    /// substring; otherwise it is left as it was.
    pub fn rewrite_block<R: Rng + ?Sized>(
        &self,
        block: &str,
        category: Category,
        preserve: Preserve,
        rng: &mut R,
    ) -> String {
        let mut chars: Vec<char> = block.chars().collect();
        let mut idx = 0;

        while idx < chars.len() {
            let len = chars.len();
            let last = len - 1;
            if (idx == 0 && preserve.first) || (idx == last && preserve.last) {
                idx += 1;
                continue;
            }

            let pair_allowed = idx + 1 < len && !(idx + 1 == last && preserve.last);
            let unit = if pair_allowed
                && self.rules.is_group(chars[idx], chars[idx + 1])
                && rng.random::<f64>() < self.config.group
            {
                2
            } else {
                1
            };

            match self.mutate(&chars, idx, unit, category, rng) {
                Some(candidate) => {
                    idx = idx + unit + candidate.len() - len;
                    chars = candidate;
                }
                None => idx += unit,
            }
        }

        chars.into_iter().collect()
    }

    fn mutate<R: Rng + ?Sized>(
        &self,
        chars: &[char],
        idx: usize,
        unit: usize,
        category: Category,
        rng: &mut R,
    ) -> Option<Vec<char>> {
        let delete = self.config.delete;
        let insert = delete + self.config.insert;
        let replace = insert + self.config.replace;
        let had_vowel = chars.iter().any(|&c| is_vowel(c));

        for _ in 0..MAX_TRIES {
            let roll = rng.random::<f64>();
            let candidate = if roll < delete {
                splice(chars, idx, unit, &[])
            } else if roll < insert {
                if rng.random::<f64>() < 0.5 {
                    let fresh = self.synthesize(LetterKind::of(chars[idx]), rng);
                    splice(chars, idx, 0, fresh)
                } else {
                    let fresh = self.synthesize(LetterKind::of(chars[idx + unit - 1]), rng);
                    splice(chars, idx + unit, 0, fresh)
                }
            } else if roll < replace {
                let fresh = self.synthesize(LetterKind::of(chars[idx]), rng);
                splice(chars, idx, unit, fresh)
            } else {
                return None;
            };

            if self.is_acceptable(&candidate, category, had_vowel) {
                return Some(candidate);
            }
        }

        trace!(
            target: "misspell::phono",
            block = %chars.iter().collect::<String>(),
            category = %category,
            idx,
            "No acceptable edit found"
        );
        None
    }

    fn synthesize<R: Rng + ?Sized>(&self, kind: LetterKind, rng: &mut R) -> &[char] {
        let pool = match kind {
            LetterKind::Vowel => &self.vowel_pool,
            LetterKind::Consonant | LetterKind::Other => &self.consonant_pool,
        };
        &pool[rng.random_range(0..pool.len())]
    }

    fn is_acceptable(&self, candidate: &[char], category: Category, had_vowel: bool) -> bool {
        if had_vowel && !candidate.iter().any(|&c| is_vowel(c)) {
            return false;
        }
        let text: String = candidate.iter().collect();
        !self.rules.violates(category, &text)
    }
}

/// Single letters of one kind plus every letter group made only of that kind.
fn build_pool(letters: &str, rules: &RuleSet, kind: LetterKind) -> Vec<Vec<char>> {
    let mut pool: Vec<Vec<char>> = letters.chars().map(|c| vec![c]).collect();
    for group in &rules.groups {
        if group.chars().all(|c| LetterKind::of(c) == kind) {
            pool.push(group.chars().collect());
        }
    }
    pool
}

fn splice(chars: &[char], at: usize, remove: usize, insert: &[char]) -> Vec<char> {
    let mut out = Vec::with_capacity(chars.len() + insert.len());
    out.extend_from_slice(&chars[..at]);
    out.extend_from_slice(insert);
    out.extend_from_slice(&chars[at + remove..]);
    out
}
