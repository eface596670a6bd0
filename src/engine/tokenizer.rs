/// A maximal whitespace or non-whitespace run of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Whitespace(&'a str),
    Word(&'a str),
}

impl<'a> Token<'a> {
    pub fn as_str(&self) -> &'a str {
        match self {
            Token::Whitespace(s) | Token::Word(s) => s,
        }
    }
}

/// Split a line on whitespace boundaries, keeping the whitespace runs.
pub fn tokenize(line: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut in_space: Option<bool> = None;

    for (pos, ch) in line.char_indices() {
        let space = ch.is_whitespace();
        match in_space {
            Some(prev) if prev != space => {
                tokens.push(make_token(&line[start..pos], prev));
                start = pos;
            }
            _ => {}
        }
        in_space = Some(space);
    }

    if let Some(space) = in_space {
        tokens.push(make_token(&line[start..], space));
    }

    tokens
}

fn make_token(text: &str, space: bool) -> Token<'_> {
    if space {
        Token::Whitespace(text)
    } else {
        Token::Word(text)
    }
}
