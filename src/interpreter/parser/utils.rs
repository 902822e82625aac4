use std::iter::Peekable;

use crate::{
    error::ParseError,
    interpreter::{lexer::Token, parser::core::ParseResult},
};

/// Returns the source line of the upcoming token, or 0 at the end of input.
pub fn current_line<'a, I>(tokens: &mut Peekable<I>) -> usize
    where I: Iterator<Item = &'a (Token, usize)>
{
    tokens.peek().map_or(0, |(_, line)| *line)
}

/// Consumes the next token, requiring it to be the given punctuation
/// character.
pub fn expect_char<'a, I>(tokens: &mut Peekable<I>, expected: char) -> ParseResult<()>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((Token::Char(c), _)) if *c == expected => Ok(()),
        Some((token, line)) => {
            Err(ParseError::UnexpectedToken { token: format!("expected '{expected}', found {token}"),
                                              line:  *line, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}

/// Consumes the next token, requiring it to equal the given one.
pub fn expect_token<'a, I>(tokens: &mut Peekable<I>, expected: &Token) -> ParseResult<()>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((token, _)) if token == expected => Ok(()),
        Some((token, line)) => {
            Err(ParseError::UnexpectedToken { token: format!("expected {expected}, found {token}"),
                                              line:  *line, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}

/// Consumes the next token, requiring an identifier, and returns its name.
pub fn expect_identifier<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<String>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((Token::Id(name), _)) => Ok(name.clone()),
        Some((token, line)) => {
            Err(ParseError::UnexpectedToken { token:
                                                  format!("expected an identifier, found {token}"),
                                              line:  *line, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}

/// Terminates a simple statement.
///
/// Consumes a `Newline`; the end of input is also accepted, without being
/// consumed, so the caller's loop can see it.
pub fn expect_statement_end<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<()>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.peek() {
        Some((Token::Newline, _)) => {
            tokens.next();
            Ok(())
        },
        Some((Token::Eof, _)) | None => Ok(()),
        Some((token, line)) => {
            Err(ParseError::UnexpectedToken { token:
                                                  format!("expected end of line, found {token}"),
                                              line:  *line, })
        },
    }
}
