use crate::engine::segment::Category;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

const EMBEDDED_RULES: &str = include_str!("../data/rules.toml");

/// Forbidden substrings, one list per block kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForbiddenSubstrings {
    pub consonant: BTreeSet<String>,
    pub vowel: BTreeSet<String>,
    pub vowel_consonant: BTreeSet<String>,
    pub initial_consonant: BTreeSet<String>,
    pub whole_word_vowel: BTreeSet<String>,
    pub whole_word_consonant_vowel: BTreeSet<String>,
}

/// Phonological rule data: letter groups plus forbidden substrings.
///
/// The default value carries no groups and no constraints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    pub groups: BTreeSet<String>,
    pub forbidden: ForbiddenSubstrings,
}

impl RuleSet {
    /// The English rules shipped with the crate.
    pub fn english() -> Self {
        match Self::from_toml(EMBEDDED_RULES) {
            Ok(rules) => rules,
            Err(e) => {
                warn!(target: "misspell::rules", error = %e, "Embedded rules are invalid");
                Self::default()
            }
        }
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let rules: Self = toml::from_str(contents).context("Failed to parse rule data")?;
        Ok(rules.normalized())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read rule file: {}", path.display()))?;
        Self::from_toml(&contents)
            .with_context(|| format!("Invalid rule file: {}", path.display()))
    }

    /// Load a custom rule file, or the embedded rules when none is given or it
    /// cannot be used.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::english();
        };

        match Self::from_file(path) {
            Ok(rules) => {
                debug!(
                    target: "misspell::rules",
                    path = %path.display(),
                    groups = rules.groups.len(),
                    "Loaded phonological rules"
                );
                rules
            }
            Err(e) => {
                warn!(
                    target: "misspell::rules",
                    error = %format!("{:#}", e),
                    "Falling back to embedded rules"
                );
                Self::english()
            }
        }
    }

    fn normalized(self) -> Self {
        let lower = |set: BTreeSet<String>| -> BTreeSet<String> {
            set.into_iter()
                .map(|s| s.to_lowercase())
                .filter(|s| !s.is_empty())
                .collect()
        };

        let mut groups = BTreeSet::new();
        for group in lower(self.groups) {
            if group.chars().count() < 2 {
                warn!(
                    target: "misspell::rules",
                    group = %group,
                    "Ignoring letter group shorter than two letters"
                );
                continue;
            }
            groups.insert(group);
        }

        let f = self.forbidden;
        Self {
            groups,
            forbidden: ForbiddenSubstrings {
                consonant: lower(f.consonant),
                vowel: lower(f.vowel),
                vowel_consonant: lower(f.vowel_consonant),
                initial_consonant: lower(f.initial_consonant),
                whole_word_vowel: lower(f.whole_word_vowel),
                whole_word_consonant_vowel: lower(f.whole_word_consonant_vowel),
            },
        }
    }

    /// Whether the two characters form a recognised letter group.
    pub fn is_group(&self, first: char, second: char) -> bool {
        let pair: String = [first, second].iter().collect();
        self.groups.contains(&pair)
    }

    /// Every forbidden-substring list that applies to a block of `category`.
    pub fn forbidden_for(&self, category: Category) -> Vec<&BTreeSet<String>> {
        let f = &self.forbidden;
        match category {
            Category::Consonant => vec![&f.consonant],
            Category::Vowel => vec![&f.vowel],
            Category::VowelConsonant => vec![&f.consonant, &f.vowel, &f.vowel_consonant],
            Category::InitialConsonant => vec![&f.consonant, &f.initial_consonant],
            Category::WholeWordVowel => vec![&f.vowel, &f.whole_word_vowel],
            Category::WholeWordConsonantVowel => {
                vec![&f.consonant, &f.vowel, &f.whole_word_consonant_vowel]
            }
            Category::NonLetter => Vec::new(),
        }
    }

    /// Whether `candidate` contains a substring forbidden for `category`.
    pub fn violates(&self, category: Category, candidate: &str) -> bool {
        self.forbidden_for(category)
            .into_iter()
            .flatten()
            .any(|bad| candidate.contains(bad.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_embedded_rules_parse() {
        let rules = RuleSet::english();
        assert!(rules.is_group('t', 'h'));
        assert!(rules.is_group('q', 'u'));
        assert!(!rules.is_group('t', 'q'));
        assert!(!rules.forbidden.consonant.is_empty());
    }

    #[test]
    fn test_missing_sections_are_empty() {
        let rules = RuleSet::from_toml("groups = [\"TH\", \"x\"]").unwrap();
        assert_eq!(rules.groups.len(), 1);
        assert!(rules.is_group('t', 'h'));
        assert!(rules.forbidden.vowel.is_empty());
        assert!(!rules.violates(Category::Vowel, "aaaa"));
    }

    #[test]
    fn test_category_lists() {
        let rules = RuleSet::from_toml(
            "[forbidden]\nconsonant = [\"qq\"]\nvowel = [\"uu\"]\ninitial_consonant = [\"ng\"]\n",
        )
        .unwrap();

        assert!(rules.violates(Category::Consonant, "aqq"));
        assert!(!rules.violates(Category::Consonant, "uu"));
        assert!(rules.violates(Category::VowelConsonant, "uut"));
        assert!(rules.violates(Category::InitialConsonant, "ngr"));
        assert!(!rules.violates(Category::Consonant, "ngr"));
        assert!(!rules.violates(Category::NonLetter, "qq"));
    }

    #[test]
    fn test_unreadable_file_falls_back_to_embedded() {
        let dir = tempdir().unwrap();
        let rules = RuleSet::load(Some(&dir.path().join("missing.toml")));
        assert_eq!(rules, RuleSet::english());
    }
}
