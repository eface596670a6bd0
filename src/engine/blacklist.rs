use regex::{Regex, RegexBuilder};
use tracing::{trace, warn};

/// Case-insensitive words that must not survive in the output.
#[derive(Debug, Clone, Default)]
pub struct Blacklist {
    patterns: Vec<Regex>,
}

impl Blacklist {
    pub fn new<S: AsRef<str>>(words: &[S]) -> Self {
        let mut patterns = Vec::new();
        for word in words.iter().map(AsRef::as_ref).filter(|w| !w.is_empty()) {
            match RegexBuilder::new(&regex::escape(word))
                .case_insensitive(true)
                .build()
            {
                Ok(re) => patterns.push(re),
                Err(e) => warn!(
                    target: "misspell::blacklist",
                    word,
                    error = %e,
                    "Skipping blacklist entry"
                ),
            }
        }
        Self { patterns }
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Break every occurrence of every entry by deleting its final character,
    /// re-scanning after each deletion.
    pub fn scrub(&self, text: &str) -> String {
        let mut out = text.to_string();

        // Breaking one entry can assemble another, so repeat until a full pass is clean
        loop {
            let mut changed = false;
            for pattern in &self.patterns {
                while let Some(pos) = last_char_of_match(pattern, &out) {
                    trace!(
                        target: "misspell::blacklist",
                        pattern = pattern.as_str(),
                        pos,
                        "Breaking blacklisted word"
                    );
                    out.remove(pos);
                    changed = true;
                }
            }
            if !changed {
                return out;
            }
        }
    }
}

fn last_char_of_match(pattern: &Regex, text: &str) -> Option<usize> {
    let found = pattern.find(text)?;
    let (offset, _) = found.as_str().char_indices().last()?;
    Some(found.start() + offset)
}
