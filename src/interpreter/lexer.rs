use logos::Logos;

use crate::error::ParseError;

/// Number of spaces that make up one indentation level.
const INDENT_STEP: usize = 2;

/// Represents a lexical token of a Mython program.
///
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// Blocks are not bracketed in the source; the lexer closes and opens them
/// with the synthetic [`Token::Indent`] and [`Token::Dedent`] markers so the
/// parser can treat the stream as fully delimited.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Integer literal tokens, such as `57`.
    Number(i32),
    /// Identifier tokens: variable, field, class, or method names.
    Id(String),
    /// String literal tokens, quoted with `'` or `"` in the source.
    String(String),
    /// A single punctuation character, one of `: ( ) , . + - * / ! > < =`.
    Char(char),
    /// `class`
    Class,
    /// `return`
    Return,
    /// `if`
    If,
    /// `else`
    Else,
    /// `def`
    Def,
    /// `print`
    Print,
    /// `and`
    And,
    /// `or`
    Or,
    /// `not`
    Not,
    /// `None`
    None,
    /// `True`
    True,
    /// `False`
    False,
    /// End of a logical line. Blank lines produce no `Newline` of their own.
    Newline,
    /// Start of an indented block, one step of two spaces.
    Indent,
    /// End of an indented block.
    Dedent,
    /// End of input. Every token stream ends with exactly one `Eof`.
    Eof,
    /// `==`
    Eq,
    /// `!=`
    NotEq,
    /// `<=`
    LessOrEq,
    /// `>=`
    GreaterOrEq,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(value) => write!(f, "Number{{{value}}}"),
            Self::Id(name) => write!(f, "Id{{{name}}}"),
            Self::String(text) => write!(f, "String{{{text}}}"),
            Self::Char(sign) => write!(f, "Char{{{sign}}}"),
            unvalued => {
                let name = match unvalued {
                    Self::Class => "Class",
                    Self::Return => "Return",
                    Self::If => "If",
                    Self::Else => "Else",
                    Self::Def => "Def",
                    Self::Print => "Print",
                    Self::And => "And",
                    Self::Or => "Or",
                    Self::Not => "Not",
                    Self::None => "None",
                    Self::True => "True",
                    Self::False => "False",
                    Self::Newline => "Newline",
                    Self::Indent => "Indent",
                    Self::Dedent => "Dedent",
                    Self::Eof => "Eof",
                    Self::Eq => "Eq",
                    Self::NotEq => "NotEq",
                    Self::LessOrEq => "LessOrEq",
                    Self::GreaterOrEq => "GreaterOrEq",
                    _ => "Unknown",
                };
                write!(f, "{name}")
            },
        }
    }
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting and diagnostics.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

/// Leading whitespace measured immediately after a line break.
#[derive(Debug, Clone, Copy, PartialEq)]
enum LineStart {
    /// The following line holds no tokens: only spaces, a comment, or the end
    /// of input. Blank lines never touch the indentation level.
    Blank,
    /// The following line starts with this many spaces before its first token.
    Spaces(usize),
}

/// Raw tokens produced by the scanning stage.
///
/// Keywords are still plain words here and indentation is still a measured
/// space count attached to its line break; [`normalize`] turns both into the
/// public [`Token`] stream and never lets a `LineBreak` escape.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(extras = LexerExtras)]
enum RawToken {
    #[regex(r"[0-9]+", lex_number)]
    Number(i32),
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", lex_word)]
    Word(String),
    #[regex(r"'[^'\n]*'", lex_quoted)]
    #[regex(r#""[^"\n]*""#, lex_quoted)]
    Quoted(String),
    #[token("==")]
    Eq,
    #[token("!=")]
    NotEq,
    #[token("<=")]
    LessOrEq,
    #[token(">=")]
    GreaterOrEq,
    #[regex(r"[:(),.+\-*/!><=]", lex_sign)]
    Sign(char),
    #[regex(r"\n[ ]*", lex_line_break)]
    LineBreak(LineStart),
    #[regex(r"#[^\n]*", logos::skip)]
    Comment,
    #[regex(r"[ ]+", logos::skip)]
    Whitespace,
}

/// Parses an integer literal from the current token slice.
fn lex_number(lex: &logos::Lexer<RawToken>) -> Option<i32> {
    lex.slice().parse().ok()
}

/// Copies an identifier or keyword word out of the current token slice.
fn lex_word(lex: &logos::Lexer<RawToken>) -> String {
    lex.slice().to_string()
}

/// Strips the enclosing quotes from a string literal slice.
fn lex_quoted(lex: &logos::Lexer<RawToken>) -> String {
    let slice = lex.slice();
    slice[1..slice.len() - 1].to_string()
}

/// Extracts the single punctuation character from the current token slice.
fn lex_sign(lex: &logos::Lexer<RawToken>) -> Option<char> {
    lex.slice().chars().next()
}

/// Measures the line that follows a newline and its trailing spaces.
///
/// The match covers the `\n` plus the new line's leading spaces, so the
/// number of spaces is the slice length minus one. A line whose first
/// significant character is another newline, a comment, or the end of input
/// carries no tokens and is reported as [`LineStart::Blank`].
fn lex_line_break(lex: &mut logos::Lexer<RawToken>) -> LineStart {
    lex.extras.line += 1;
    let rest = lex.remainder();
    if rest.is_empty() || rest.starts_with('\n') || rest.starts_with('#') {
        LineStart::Blank
    } else {
        LineStart::Spaces(lex.slice().len() - 1)
    }
}

/// Classifies the reserved words of the language, or falls back to an
/// identifier token.
fn keyword_or_id(word: String) -> Token {
    match word.as_str() {
        "class" => Token::Class,
        "return" => Token::Return,
        "if" => Token::If,
        "else" => Token::Else,
        "def" => Token::Def,
        "print" => Token::Print,
        "and" => Token::And,
        "or" => Token::Or,
        "not" => Token::Not,
        "None" => Token::None,
        "True" => Token::True,
        "False" => Token::False,
        _ => Token::Id(word),
    }
}

/// Measures the first line of the source, which no line-break match covers.
fn first_line_start(source: &str) -> LineStart {
    let rest = source.trim_start_matches(' ');
    if rest.is_empty() || rest.starts_with('\n') || rest.starts_with('#') {
        LineStart::Blank
    } else {
        LineStart::Spaces(source.len() - rest.len())
    }
}

/// Maps a rejected input slice to the matching lexical error.
fn scan_error(slice: &str, line: usize) -> ParseError {
    if slice.starts_with('\'') || slice.starts_with('"') {
        ParseError::UnterminatedString { line }
    } else if slice.starts_with(|c: char| c.is_ascii_digit()) {
        ParseError::InvalidNumber { text: slice.to_string(),
                                    line }
    } else {
        ParseError::UnexpectedCharacter { text: slice.to_string(),
                                          line }
    }
}

/// Tokenizes a complete Mython source text.
///
/// Produces the normalized token stream the parser consumes linearly: each
/// token is paired with its 1-based source line. The stream never starts
/// with a `Newline`, blank lines leave no trace, every logical line of
/// content ends with exactly one `Newline`, open blocks are closed with
/// `Dedent` markers, and the stream ends with exactly one `Eof`.
///
/// # Errors
/// Returns a [`ParseError`] when the input contains indentation that is not
/// a multiple of two spaces, an unterminated string literal, an integer
/// literal out of range, or a character outside the language's alphabet.
///
/// # Examples
/// ```
/// use mython::interpreter::lexer::{tokenize, Token};
///
/// let tokens = tokenize("x = 57").unwrap();
/// let kinds: Vec<Token> = tokens.into_iter().map(|(token, _)| token).collect();
/// assert_eq!(kinds,
///            vec![Token::Id("x".to_string()),
///                 Token::Char('='),
///                 Token::Number(57),
///                 Token::Newline,
///                 Token::Eof]);
/// ```
pub fn tokenize(source: &str) -> Result<Vec<(Token, usize)>, ParseError> {
    let mut raw = vec![(RawToken::LineBreak(first_line_start(source)), 1)];
    let mut lexer = RawToken::lexer_with_extras(source, LexerExtras { line: 1 });

    while let Some(scanned) = lexer.next() {
        match scanned {
            Ok(token) => raw.push((token, lexer.extras.line)),
            Err(()) => return Err(scan_error(lexer.slice(), lexer.extras.line)),
        }
    }

    normalize(raw)
}

/// Turns the raw token sequence into the stream contract described on
/// [`tokenize`].
///
/// This is where the indentation state machine lives: the running indent
/// level only changes on line breaks that lead into a line with content,
/// and every change is emitted as a run of `Indent` or `Dedent` markers.
fn normalize(raw: Vec<(RawToken, usize)>) -> Result<Vec<(Token, usize)>, ParseError> {
    let mut tokens: Vec<(Token, usize)> = Vec::new();
    let mut indent = 0usize;
    let mut last_line = 1;

    for (token, line) in raw {
        last_line = line;
        match token {
            RawToken::LineBreak(LineStart::Blank) => push_newline(&mut tokens, line),
            RawToken::LineBreak(LineStart::Spaces(width)) => {
                push_newline(&mut tokens, line);
                if width.abs_diff(indent) % INDENT_STEP != 0 {
                    return Err(ParseError::MalformedIndentation { width, line });
                }
                let structural = if width > indent { Token::Indent } else { Token::Dedent };
                for _ in 0..width.abs_diff(indent) / INDENT_STEP {
                    tokens.push((structural.clone(), line));
                }
                indent = width;
            },
            RawToken::Number(value) => tokens.push((Token::Number(value), line)),
            RawToken::Word(word) => tokens.push((keyword_or_id(word), line)),
            RawToken::Quoted(text) => tokens.push((Token::String(text), line)),
            RawToken::Eq => tokens.push((Token::Eq, line)),
            RawToken::NotEq => tokens.push((Token::NotEq, line)),
            RawToken::LessOrEq => tokens.push((Token::LessOrEq, line)),
            RawToken::GreaterOrEq => tokens.push((Token::GreaterOrEq, line)),
            RawToken::Sign(sign) => tokens.push((Token::Char(sign), line)),
            RawToken::Comment | RawToken::Whitespace => {},
        }
    }

    push_newline(&mut tokens, last_line);
    for _ in 0..indent / INDENT_STEP {
        tokens.push((Token::Dedent, last_line));
    }
    tokens.push((Token::Eof, last_line));
    Ok(tokens)
}

/// Appends a `Newline`, unless the stream is empty or already ends with one.
///
/// The suppression keeps leading blank lines out of the stream and collapses
/// the line ends around blank lines into a single marker.
fn push_newline(tokens: &mut Vec<(Token, usize)>, line: usize) {
    if matches!(tokens.last(), Some((token, _)) if *token != Token::Newline) {
        tokens.push((Token::Newline, line));
    }
}
