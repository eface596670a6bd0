pub mod blacklist;
pub mod casing;
pub mod keyboard;
pub mod phono;
pub mod sampler;
pub mod segment;
pub mod tokenizer;
pub mod typo;

use crate::rules::RuleSet;
use crate::{Config, Mode};
use blacklist::Blacklist;
use phono::PhonoRewriter;
use rand::Rng;
use tokenizer::{tokenize, Token};
use tracing::debug;
use typo::TypoRewriter;

/// Runs the phonological and typographical passes over words, lines and text.
///
/// Holds no mutable state, so one instance can serve any number of
/// independent calls.
#[derive(Debug, Clone)]
pub struct Misspeller {
    mode: Mode,
    phono: PhonoRewriter,
    typo: TypoRewriter,
    blacklist: Blacklist,
}

impl Misspeller {
    pub fn new(config: &Config, rules: RuleSet, mode: Mode) -> Self {
        Self {
            mode,
            phono: PhonoRewriter::new(config.phono, rules),
            typo: TypoRewriter::new(config.typo),
            blacklist: Blacklist::new(&config.blacklist),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Misspell a single token. Whitespace tokens can only lose characters.
    pub fn misspell_word<R: Rng + ?Sized>(&self, word: &str, rng: &mut R) -> String {
        if word.chars().all(char::is_whitespace) {
            return if self.mode.typographical() {
                self.typo.rewrite_whitespace(word, rng)
            } else {
                word.to_string()
            };
        }

        let word = if self.mode.phonological() {
            self.phono.rewrite_word(word, rng)
        } else {
            word.to_string()
        };

        if self.mode.typographical() {
            self.typo.rewrite_word(&word, rng)
        } else {
            word
        }
    }

    /// Misspell every token of a line, then run the transposition pass.
    pub fn misspell_line<R: Rng + ?Sized>(&self, line: &str, rng: &mut R) -> String {
        let mut out = String::with_capacity(line.len() + 8);
        for token in tokenize(line) {
            match token {
                Token::Whitespace(space) => {
                    if self.mode.typographical() {
                        out.push_str(&self.typo.rewrite_whitespace(space, rng));
                    } else {
                        out.push_str(space);
                    }
                }
                Token::Word(word) => out.push_str(&self.misspell_word(word, rng)),
            }
        }

        if self.mode.typographical() {
            self.typo.swap_pass(&out, rng)
        } else {
            out
        }
    }

    /// Misspell multi-line text and scrub blacklisted words from the result.
    pub fn misspell_text<R: Rng + ?Sized>(&self, text: &str, rng: &mut R) -> String {
        self.misspell_text_with_progress(text, rng, |_| {})
    }

    /// Like [`Misspeller::misspell_text`], reporting each finished line number.
    pub fn misspell_text_with_progress<R, F>(
        &self,
        text: &str,
        rng: &mut R,
        mut progress: F,
    ) -> String
    where
        R: Rng + ?Sized,
        F: FnMut(usize),
    {
        let lines: Vec<String> = text
            .split('\n')
            .enumerate()
            .map(|(number, line)| {
                let out = self.misspell_line(line, rng);
                progress(number + 1);
                out
            })
            .collect();

        debug!(
            target: "misspell::engine",
            lines = lines.len(),
            mode = %self.mode,
            "Misspelled text"
        );
        self.scrub(&lines.join("\n"))
    }

    /// Remove blacklisted words from finished output.
    pub fn scrub(&self, text: &str) -> String {
        if self.blacklist.is_empty() {
            text.to_string()
        } else {
            self.blacklist.scrub(text)
        }
    }
}
