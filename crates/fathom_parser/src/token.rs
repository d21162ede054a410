//! Input tokenization.
//!
//! Words are lower-cased runs of letters, digits, hyphens, and
//! apostrophes; any other non-whitespace character becomes a one-char
//! punctuation token. Every token keeps its byte range in the original
//! input so the `text` frontend can return exact substrings.

/// A token from player input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    /// The token text; words are lower-cased.
    pub text: String,
    /// Byte offset of the first character in the input.
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
}

impl Token {
    /// True if this token is a word rather than punctuation.
    #[must_use]
    pub fn is_word(&self) -> bool {
        self.text
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '\'')
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '\''
}

/// Splits input into word and punctuation tokens.
#[must_use]
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut iter = input.char_indices().peekable();

    while let Some(&(start, c)) = iter.peek() {
        if c.is_whitespace() {
            iter.next();
        } else if is_word_char(c) {
            let mut end = start;
            while let Some(&(i, c)) = iter.peek() {
                if is_word_char(c) {
                    end = i + c.len_utf8();
                    iter.next();
                } else {
                    break;
                }
            }
            tokens.push(Token {
                text: input[start..end].to_lowercase(),
                start,
                end,
            });
        } else {
            iter.next();
            tokens.push(Token {
                text: c.to_string(),
                start,
                end: start + c.len_utf8(),
            });
        }
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(input: &str) -> Vec<String> {
        tokenize(input).into_iter().map(|t| t.text).collect()
    }

    #[test]
    fn splits_on_whitespace() {
        assert_eq!(words("take ball"), vec!["take", "ball"]);
    }

    #[test]
    fn lowercases_words() {
        assert_eq!(words("Take BALL"), vec!["take", "ball"]);
    }

    #[test]
    fn punctuation_is_its_own_token() {
        assert_eq!(words("look."), vec!["look", "."]);
        assert_eq!(words("take ball, please"), vec!["take", "ball", ",", "please"]);
    }

    #[test]
    fn hyphens_and_apostrophes_stay_in_words() {
        assert_eq!(words("don't pick the red-ball"), vec!["don't", "pick", "the", "red-ball"]);
    }

    #[test]
    fn byte_ranges_recover_input() {
        let input = "Take the RED ball";
        let tokens = tokenize(input);
        assert_eq!(&input[tokens[2].start..tokens[3].end], "RED ball");
    }

    #[test]
    fn empty_input_no_tokens() {
        assert!(tokenize("   ").is_empty());
    }
}
