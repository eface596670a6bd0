/// Capitalization of a block or word, judged over its ASCII letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapitalizationPattern {
    Lower,
    Upper,
    /// First letter uppercase, the rest lowercase
    Initial,
    Mixed,
}

impl CapitalizationPattern {
    pub fn detect(text: &str) -> Self {
        let letters: Vec<char> = text.chars().filter(|c| c.is_ascii_alphabetic()).collect();

        if letters.iter().all(|c| c.is_ascii_lowercase()) {
            CapitalizationPattern::Lower
        } else if letters.iter().all(|c| c.is_ascii_uppercase()) {
            CapitalizationPattern::Upper
        } else if letters[0].is_ascii_uppercase()
            && letters[1..].iter().all(|c| c.is_ascii_lowercase())
        {
            CapitalizationPattern::Initial
        } else {
            CapitalizationPattern::Mixed
        }
    }

    /// Re-impose this pattern on `text`. `Mixed` leaves it untouched.
    pub fn apply(self, text: &str) -> String {
        match self {
            CapitalizationPattern::Lower => text.to_ascii_lowercase(),
            CapitalizationPattern::Upper => text.to_ascii_uppercase(),
            CapitalizationPattern::Initial => {
                let mut seen_letter = false;
                text.chars()
                    .map(|c| {
                        if !c.is_ascii_alphabetic() {
                            c
                        } else if seen_letter {
                            c.to_ascii_lowercase()
                        } else {
                            seen_letter = true;
                            c.to_ascii_uppercase()
                        }
                    })
                    .collect()
            }
            CapitalizationPattern::Mixed => text.to_string(),
        }
    }
}
