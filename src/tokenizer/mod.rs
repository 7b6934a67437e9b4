//! SQL tokenizer.
//!
//! Lexes a raw SQL fragment into typed [`Token`]s so that user-supplied
//! expressions can be inspected before they are embedded in a statement.
//!
//! Rules are tried in a fixed priority order at the current position and the
//! first one that matches wins, regardless of how much a later rule would
//! have consumed:
//!
//! ```text
//! whitespace → comment → hexadecimal → real → integer → literal
//!            → delimited identifier → parameter → word → operator → punctuation
//! ```
//!
//! The hexadecimal rule only accepts decimal digits after `0x`, so `0x1A`
//! lexes as `0x1` followed by the identifier `A`.

mod token;

pub use token::{Token, TokenType};

use nom::{
    branch::alt,
    bytes::complete::{tag, take_until, take_while},
    character::complete::{char, digit1, multispace1, not_line_ending, one_of, satisfy},
    combinator::{cut, opt, recognize},
    error::{Error, ErrorKind},
    sequence::{pair, preceded, tuple},
    IResult,
};
use std::collections::HashSet;

use crate::dialect::keywords;
use crate::error::{QuillError, QuillResult};

/// Dialect-dependent lexing knobs.
#[derive(Clone, Copy)]
pub struct Lexicon {
    /// Words classified as [`TokenType::Keyword`].
    pub keywords: &'static HashSet<&'static str>,
    /// Whether `\` escapes the next character inside string literals.
    pub backslash_escapes: bool,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            keywords: keywords::standard(),
            backslash_escapes: false,
        }
    }
}

type Rule = for<'a> fn(&'a str, &Lexicon) -> IResult<&'a str, &'a str>;

const RULES: &[(TokenType, Rule)] = &[
    (TokenType::Whitespace, whitespace),
    (TokenType::Comment, comment),
    (TokenType::Hexadecimal, hexadecimal),
    (TokenType::Real, real),
    (TokenType::Integer, integer),
    (TokenType::Literal, literal),
    (TokenType::Identifier, delimited_identifier),
    (TokenType::Parameter, parameter),
    (TokenType::Identifier, word),
    (TokenType::Operator, operator),
    (TokenType::Parenthesis, parenthesis),
    (TokenType::Dot, dot),
    (TokenType::Comma, comma),
    (TokenType::Terminal, terminal),
];

/// Lazily lex `expression` with the standard keyword table.
///
/// Calling this again on the same input restarts the scan from the beginning.
///
/// # Example
///
/// ```
/// use quill::tokenizer::{tokenize, TokenType};
///
/// let kinds: Vec<TokenType> = tokenize("SELECT 1")
///     .map(|t| t.unwrap().kind)
///     .collect();
/// assert_eq!(kinds, vec![TokenType::Keyword, TokenType::Whitespace, TokenType::Integer]);
/// ```
pub fn tokenize(expression: &str) -> Tokenizer<'_> {
    Tokenizer::new(expression)
}

/// A position-based scanner yielding one token per call to `next`.
pub struct Tokenizer<'a> {
    input: &'a str,
    position: usize,
    lexicon: Lexicon,
    failed: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::with_lexicon(input, Lexicon::default())
    }

    pub fn with_lexicon(input: &'a str, lexicon: Lexicon) -> Self {
        Self {
            input,
            position: 0,
            lexicon,
            failed: false,
        }
    }

    /// Byte offset of the next token.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Collect every token, stopping at the first error.
    pub fn collect_tokens(self) -> QuillResult<Vec<Token>> {
        self.collect()
    }

    /// Collect the tokens that are neither whitespace nor comments.
    pub fn significant(self) -> QuillResult<Vec<Token>> {
        let mut tokens = Vec::new();
        for token in self {
            let token = token?;
            if !token.kind.is_trivia() {
                tokens.push(token);
            }
        }
        Ok(tokens)
    }

    fn scan(&mut self) -> QuillResult<Token> {
        let input = self.input;
        let rest = &input[self.position..];
        for (kind, rule) in RULES {
            match rule(rest, &self.lexicon) {
                Ok((remaining, text)) => {
                    let kind = match kind {
                        TokenType::Identifier if self.is_keyword(text) => TokenType::Keyword,
                        other => *other,
                    };
                    let token = Token::new(kind, text, self.position);
                    self.position += rest.len() - remaining.len();
                    return Ok(token);
                }
                Err(nom::Err::Error(_)) => continue,
                Err(nom::Err::Failure(_)) | Err(nom::Err::Incomplete(_)) => {
                    return Err(QuillError::parse(
                        self.position,
                        format!("malformed {} token", kind),
                    ));
                }
            }
        }
        let unexpected = rest.chars().next().unwrap_or_default();
        Err(QuillError::parse(
            self.position,
            format!("unexpected character '{}'", unexpected),
        ))
    }

    fn is_keyword(&self, word: &str) -> bool {
        // Delimited names are never keywords
        word.chars().next().is_some_and(|c| c.is_alphabetic() || c == '_')
            && self.lexicon.keywords.contains(word.to_uppercase().as_str())
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = QuillResult<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.position >= self.input.len() {
            return None;
        }
        let token = self.scan();
        if token.is_err() {
            self.failed = true;
        }
        Some(token)
    }
}

fn whitespace<'a>(input: &'a str, _: &Lexicon) -> IResult<&'a str, &'a str> {
    multispace1(input)
}

fn comment<'a>(input: &'a str, _: &Lexicon) -> IResult<&'a str, &'a str> {
    alt((
        recognize(pair(tag("--"), not_line_ending)),
        recognize(tuple((tag("/*"), cut(take_until("*/")), tag("*/")))),
    ))(input)
}

fn hexadecimal<'a>(input: &'a str, _: &Lexicon) -> IResult<&'a str, &'a str> {
    recognize(tuple((char('0'), one_of("xX"), cut(digit1))))(input)
}

fn real<'a>(input: &'a str, _: &Lexicon) -> IResult<&'a str, &'a str> {
    let exponent = || tuple((one_of("eE"), opt(one_of("+-")), digit1));
    alt((
        recognize(tuple((digit1, char('.'), digit1, opt(exponent())))),
        recognize(pair(digit1, exponent())),
    ))(input)
}

fn integer<'a>(input: &'a str, _: &Lexicon) -> IResult<&'a str, &'a str> {
    digit1(input)
}

fn literal<'a>(input: &'a str, lexicon: &Lexicon) -> IResult<&'a str, &'a str> {
    enclosed(input, '\'', '\'', lexicon.backslash_escapes)
}

fn delimited_identifier<'a>(input: &'a str, _: &Lexicon) -> IResult<&'a str, &'a str> {
    match input.chars().next() {
        Some('"') => enclosed(input, '"', '"', false),
        Some('`') => enclosed(input, '`', '`', false),
        Some('[') => enclosed(input, '[', ']', false),
        _ => Err(nom::Err::Error(Error::new(input, ErrorKind::Char))),
    }
}

fn parameter<'a>(input: &'a str, _: &Lexicon) -> IResult<&'a str, &'a str> {
    let name = || {
        pair(
            satisfy(|c: char| c.is_alphabetic() || c == '_'),
            take_while(|c: char| c.is_alphanumeric() || c == '_'),
        )
    };
    alt((
        tag("?"),
        recognize(preceded(char(':'), name())),
        recognize(preceded(char('@'), name())),
        recognize(preceded(char('$'), digit1)),
    ))(input)
}

fn word<'a>(input: &'a str, _: &Lexicon) -> IResult<&'a str, &'a str> {
    recognize(pair(
        satisfy(|c: char| c.is_alphabetic() || c == '_'),
        take_while(|c: char| c.is_alphanumeric() || c == '_' || c == '$'),
    ))(input)
}

fn operator<'a>(input: &'a str, _: &Lexicon) -> IResult<&'a str, &'a str> {
    alt((
        alt((
            tag("<=>"),
            tag("->>"),
            tag("<>"),
            tag("!="),
            tag("<="),
            tag(">="),
            tag("||"),
            tag("::"),
            tag("->"),
            tag("<<"),
            tag(">>"),
        )),
        recognize(one_of("=<>+-*/%&|^~!")),
    ))(input)
}

fn parenthesis<'a>(input: &'a str, _: &Lexicon) -> IResult<&'a str, &'a str> {
    recognize(one_of("()"))(input)
}

fn dot<'a>(input: &'a str, _: &Lexicon) -> IResult<&'a str, &'a str> {
    tag(".")(input)
}

fn comma<'a>(input: &'a str, _: &Lexicon) -> IResult<&'a str, &'a str> {
    tag(",")(input)
}

fn terminal<'a>(input: &'a str, _: &Lexicon) -> IResult<&'a str, &'a str> {
    tag(";")(input)
}

/// Match text between `open` and `close`, where a doubled `close` stands for
/// itself. Fails hard when the closing delimiter never appears.
fn enclosed(input: &str, open: char, close: char, backslash_escapes: bool) -> IResult<&str, &str> {
    let (mut rest, _) = char(open)(input)?;
    loop {
        let mut chars = rest.chars();
        match chars.next() {
            None => return Err(nom::Err::Failure(Error::new(rest, ErrorKind::Char))),
            Some('\\') if backslash_escapes => {
                let escaped = chars.next().map_or(0, char::len_utf8);
                if escaped == 0 {
                    return Err(nom::Err::Failure(Error::new(rest, ErrorKind::Escaped)));
                }
                rest = &rest[1 + escaped..];
            }
            Some(c) if c == close => {
                let after = &rest[c.len_utf8()..];
                if after.starts_with(close) {
                    rest = &after[close.len_utf8()..];
                    continue;
                }
                let consumed = input.len() - after.len();
                return Ok((after, &input[..consumed]));
            }
            Some(c) => rest = &rest[c.len_utf8()..],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lex(input: &str) -> Vec<(TokenType, String)> {
        tokenize(input)
            .map(|t| {
                let t = t.unwrap();
                (t.kind, t.text)
            })
            .collect()
    }

    fn significant(input: &str) -> Vec<(TokenType, String)> {
        tokenize(input)
            .significant()
            .unwrap()
            .into_iter()
            .map(|t| (t.kind, t.text))
            .collect()
    }

    #[test]
    fn test_hexadecimal_stops_at_letters() {
        assert_eq!(
            lex("0x1A"),
            vec![
                (TokenType::Hexadecimal, "0x1".to_string()),
                (TokenType::Identifier, "A".to_string()),
            ]
        );
    }

    #[test]
    fn test_hexadecimal_without_digits_fails() {
        let mut tokens = tokenize("0xZZ");
        let err = tokens.next().unwrap().unwrap_err();
        assert!(matches!(err, QuillError::Parse { position: 0, .. }));
        assert!(tokens.next().is_none());
    }

    #[test]
    fn test_simple_select() {
        assert_eq!(
            significant("SELECT name FROM users WHERE age >= 18;"),
            vec![
                (TokenType::Keyword, "SELECT".to_string()),
                (TokenType::Identifier, "name".to_string()),
                (TokenType::Keyword, "FROM".to_string()),
                (TokenType::Identifier, "users".to_string()),
                (TokenType::Keyword, "WHERE".to_string()),
                (TokenType::Identifier, "age".to_string()),
                (TokenType::Operator, ">=".to_string()),
                (TokenType::Integer, "18".to_string()),
                (TokenType::Terminal, ";".to_string()),
            ]
        );
    }

    #[test]
    fn test_quoted_identifier_path() {
        assert_eq!(
            significant("\"a\".\"b\".\"c\""),
            vec![
                (TokenType::Identifier, "\"a\"".to_string()),
                (TokenType::Dot, ".".to_string()),
                (TokenType::Identifier, "\"b\"".to_string()),
                (TokenType::Dot, ".".to_string()),
                (TokenType::Identifier, "\"c\"".to_string()),
            ]
        );
        assert_eq!(significant("`t`.[c]").len(), 3);
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            significant("1.5 2 3e10 4.0E-2"),
            vec![
                (TokenType::Real, "1.5".to_string()),
                (TokenType::Integer, "2".to_string()),
                (TokenType::Real, "3e10".to_string()),
                (TokenType::Real, "4.0E-2".to_string()),
            ]
        );
    }

    #[test]
    fn test_literal_with_doubled_quote() {
        assert_eq!(
            significant("'it''s' || 'x'"),
            vec![
                (TokenType::Literal, "'it''s'".to_string()),
                (TokenType::Operator, "||".to_string()),
                (TokenType::Literal, "'x'".to_string()),
            ]
        );
    }

    #[test]
    fn test_backslash_escapes_follow_lexicon() {
        let lexicon = Lexicon {
            backslash_escapes: true,
            ..Lexicon::default()
        };
        let tokens = Tokenizer::with_lexicon(r"'it\'s'", lexicon)
            .collect_tokens()
            .unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenType::Literal);

        // Without backslash escapes the quote closes the literal early
        assert!(tokenize(r"'it\'s'").collect_tokens().is_err());
    }

    #[test]
    fn test_unterminated_literal() {
        let err = tokenize("name = 'bob").collect_tokens().unwrap_err();
        assert!(matches!(err, QuillError::Parse { position: 7, .. }));
    }

    #[test]
    fn test_parameters() {
        assert_eq!(
            significant("? :name @p1 $2 x::int"),
            vec![
                (TokenType::Parameter, "?".to_string()),
                (TokenType::Parameter, ":name".to_string()),
                (TokenType::Parameter, "@p1".to_string()),
                (TokenType::Parameter, "$2".to_string()),
                (TokenType::Identifier, "x".to_string()),
                (TokenType::Operator, "::".to_string()),
                (TokenType::Identifier, "int".to_string()),
            ]
        );
    }

    #[test]
    fn test_comments() {
        assert_eq!(
            lex("-- note\n/* block */1"),
            vec![
                (TokenType::Comment, "-- note".to_string()),
                (TokenType::Whitespace, "\n".to_string()),
                (TokenType::Comment, "/* block */".to_string()),
                (TokenType::Integer, "1".to_string()),
            ]
        );
        assert!(tokenize("/* open").collect_tokens().is_err());
    }

    #[test]
    fn test_unexpected_character() {
        let err = tokenize("a # b").collect_tokens().unwrap_err();
        assert_eq!(err.to_string(), "Parse error at position 2: unexpected character '#'");
    }

    #[test]
    fn test_restartable() {
        let first: Vec<Token> = tokenize("a, b").collect_tokens().unwrap();
        let second: Vec<Token> = tokenize("a, b").collect_tokens().unwrap();
        assert_eq!(first, second);
        assert_eq!(first[2].position, 2);
    }
}
