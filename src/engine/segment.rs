use std::fmt;

pub const VOWELS: &str = "aeiou";
pub const CONSONANTS: &str = "bcdfghjklmnpqrstvwxyz";

/// Structural kind of a block within a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Consonant run inside a word
    Consonant,
    /// Vowel run not followed by consonants
    Vowel,
    /// Vowel run merged with the consonant run after it
    VowelConsonant,
    /// Consonant run at the start of a word
    InitialConsonant,
    /// Word that is one vowel run
    WholeWordVowel,
    /// Word that is one consonant run followed by one vowel run
    WholeWordConsonantVowel,
    NonLetter,
}

impl Category {
    pub fn is_letter(self) -> bool {
        self != Category::NonLetter
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Consonant => "c",
            Category::Vowel => "v",
            Category::VowelConsonant => "vc",
            Category::InitialConsonant => "c_b",
            Category::WholeWordVowel => "v_w",
            Category::WholeWordConsonantVowel => "cv_w",
            Category::NonLetter => "n",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterKind {
    Vowel,
    Consonant,
    Other,
}

impl LetterKind {
    pub fn of(ch: char) -> Self {
        let lower = ch.to_ascii_lowercase();
        if VOWELS.contains(lower) {
            LetterKind::Vowel
        } else if CONSONANTS.contains(lower) {
            LetterKind::Consonant
        } else {
            LetterKind::Other
        }
    }
}

pub fn is_vowel(ch: char) -> bool {
    LetterKind::of(ch) == LetterKind::Vowel
}

/// A contiguous slice of a word tagged with its category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub text: String,
    pub category: Category,
}

impl Block {
    fn new(text: &str, category: Category) -> Self {
        Self {
            text: text.to_string(),
            category,
        }
    }
}

/// Split a word into maximal runs of vowels, consonants and other characters.
fn runs(word: &str) -> Vec<(&str, LetterKind)> {
    let mut result = Vec::new();
    let mut start = 0;
    let mut current: Option<LetterKind> = None;

    for (pos, ch) in word.char_indices() {
        let kind = LetterKind::of(ch);
        match current {
            Some(k) if k == kind => {}
            Some(k) => {
                result.push((&word[start..pos], k));
                start = pos;
                current = Some(kind);
            }
            None => current = Some(kind),
        }
    }

    if let Some(k) = current {
        result.push((&word[start..], k));
    }

    result
}

/// Partition a word into categorised blocks that approximate its syllables.
///
/// Concatenating the returned blocks in order always reproduces `word`.
pub fn segment(word: &str) -> Vec<Block> {
    let runs = runs(word);

    match runs.as_slice() {
        [] => return Vec::new(),
        [(_, LetterKind::Vowel)] => return vec![Block::new(word, Category::WholeWordVowel)],
        [(_, LetterKind::Consonant), (_, LetterKind::Vowel)] => {
            return vec![Block::new(word, Category::WholeWordConsonantVowel)]
        }
        _ => {}
    }

    let mut blocks = Vec::with_capacity(runs.len());
    let mut i = 0;

    while i < runs.len() {
        let (text, kind) = runs[i];
        let after_break = i == 0 || runs[i - 1].1 == LetterKind::Other;

        match kind {
            LetterKind::Consonant if after_break => {
                blocks.push(Block::new(text, Category::InitialConsonant));
            }
            LetterKind::Consonant => blocks.push(Block::new(text, Category::Consonant)),
            LetterKind::Vowel => match runs.get(i + 1) {
                Some(&(next, LetterKind::Consonant)) => {
                    let merged = format!("{}{}", text, next);
                    blocks.push(Block {
                        text: merged,
                        category: Category::VowelConsonant,
                    });
                    i += 1;
                }
                _ => blocks.push(Block::new(text, Category::Vowel)),
            },
            LetterKind::Other => blocks.push(Block::new(text, Category::NonLetter)),
        }

        i += 1;
    }

    blocks
}
