use std::{collections::HashMap, iter::Peekable, rc::Rc};

use crate::{
    ast::{ArithmeticOp, ComparisonOp, Statement},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::utils::{current_line, expect_char, expect_identifier},
        runtime::Class,
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Shared state threaded through the parser.
///
/// Classes are resolved at parse time: `Name(args)` only reads as an
/// instantiation when `Name` was defined earlier, and a class head naming a
/// parent looks the parent up here. The method depth lets the parser reject
/// a `return` that appears outside any method body.
#[derive(Default)]
pub struct ParserState {
    /// Classes defined so far, by name.
    pub classes:      HashMap<String, Rc<Class>>,
    /// Depth of nested method bodies currently being parsed.
    pub method_depth: usize,
}

impl ParserState {
    /// Creates an empty parser state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It begins at the
/// lowest-precedence level, logical `or`, and descends through the
/// precedence hierarchy:
///
/// ```text
/// expression := or
/// or         := and ("or" and)*
/// and        := not ("and" not)*
/// not        := "not" not | comparison
/// comparison := sum (("==" | "!=" | "<" | ">" | "<=" | ">=") sum)?
/// sum        := term (("+" | "-") term)*
/// term       := unary (("*" | "/") unary)*
/// unary      := ("-" | "+") unary | postfix
/// postfix    := atom ("." id | "." id "(" args ")")*
/// ```
///
/// # Errors
/// Propagates any error from sub-expression parsing.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>, state: &mut ParserState)
                               -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)>
{
    parse_or(tokens, state)
}

fn parse_or<'a, I>(tokens: &mut Peekable<I>, state: &mut ParserState) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)>
{
    let mut lhs = parse_and(tokens, state)?;
    while matches!(tokens.peek(), Some((Token::Or, _))) {
        tokens.next();
        let rhs = parse_and(tokens, state)?;
        lhs = Statement::Or { lhs: Box::new(lhs),
                              rhs: Box::new(rhs), };
    }
    Ok(lhs)
}

fn parse_and<'a, I>(tokens: &mut Peekable<I>, state: &mut ParserState) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)>
{
    let mut lhs = parse_not(tokens, state)?;
    while matches!(tokens.peek(), Some((Token::And, _))) {
        tokens.next();
        let rhs = parse_not(tokens, state)?;
        lhs = Statement::And { lhs: Box::new(lhs),
                               rhs: Box::new(rhs), };
    }
    Ok(lhs)
}

fn parse_not<'a, I>(tokens: &mut Peekable<I>, state: &mut ParserState) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)>
{
    if matches!(tokens.peek(), Some((Token::Not, _))) {
        tokens.next();
        let arg = parse_not(tokens, state)?;
        return Ok(Statement::Not { arg: Box::new(arg) });
    }
    parse_comparison(tokens, state)
}

/// Parses an optional, non-chaining comparison.
fn parse_comparison<'a, I>(tokens: &mut Peekable<I>, state: &mut ParserState)
                           -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)>
{
    let lhs = parse_sum(tokens, state)?;
    let op = match tokens.peek() {
        Some((Token::Eq, _)) => ComparisonOp::Eq,
        Some((Token::NotEq, _)) => ComparisonOp::NotEq,
        Some((Token::LessOrEq, _)) => ComparisonOp::LessOrEq,
        Some((Token::GreaterOrEq, _)) => ComparisonOp::GreaterOrEq,
        Some((Token::Char('<'), _)) => ComparisonOp::Less,
        Some((Token::Char('>'), _)) => ComparisonOp::Greater,
        _ => return Ok(lhs),
    };
    tokens.next();
    let rhs = parse_sum(tokens, state)?;
    Ok(Statement::Comparison { op,
                               lhs: Box::new(lhs),
                               rhs: Box::new(rhs), })
}

fn parse_sum<'a, I>(tokens: &mut Peekable<I>, state: &mut ParserState) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)>
{
    let mut lhs = parse_term(tokens, state)?;
    loop {
        let op = match tokens.peek() {
            Some((Token::Char('+'), _)) => ArithmeticOp::Add,
            Some((Token::Char('-'), _)) => ArithmeticOp::Sub,
            _ => return Ok(lhs),
        };
        tokens.next();
        let rhs = parse_term(tokens, state)?;
        lhs = Statement::Arithmetic { op,
                                      lhs: Box::new(lhs),
                                      rhs: Box::new(rhs), };
    }
}

fn parse_term<'a, I>(tokens: &mut Peekable<I>, state: &mut ParserState) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)>
{
    let mut lhs = parse_unary(tokens, state)?;
    loop {
        let op = match tokens.peek() {
            Some((Token::Char('*'), _)) => ArithmeticOp::Mult,
            Some((Token::Char('/'), _)) => ArithmeticOp::Div,
            _ => return Ok(lhs),
        };
        tokens.next();
        let rhs = parse_unary(tokens, state)?;
        lhs = Statement::Arithmetic { op,
                                      lhs: Box::new(lhs),
                                      rhs: Box::new(rhs), };
    }
}

/// Parses unary plus and minus.
///
/// A minus in front of a numeric literal folds into the literal; in front
/// of anything else it desugars to a subtraction from zero.
fn parse_unary<'a, I>(tokens: &mut Peekable<I>, state: &mut ParserState) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)>
{
    if matches!(tokens.peek(), Some((Token::Char('-'), _))) {
        tokens.next();
        let operand = parse_unary(tokens, state)?;
        if let Statement::NumericConst(value) = operand {
            return Ok(Statement::NumericConst(-value));
        }
        return Ok(Statement::Arithmetic { op:  ArithmeticOp::Sub,
                                          lhs: Box::new(Statement::NumericConst(0)),
                                          rhs: Box::new(operand), });
    }
    if matches!(tokens.peek(), Some((Token::Char('+'), _))) {
        tokens.next();
        return parse_unary(tokens, state);
    }
    parse_postfix(tokens, state)
}

/// Parses dotted field reads and method calls after an atom.
fn parse_postfix<'a, I>(tokens: &mut Peekable<I>, state: &mut ParserState)
                        -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)>
{
    let mut expr = parse_atom(tokens, state)?;
    while matches!(tokens.peek(), Some((Token::Char('.'), _))) {
        tokens.next();
        let line = current_line(tokens);
        let name = expect_identifier(tokens)?;
        if matches!(tokens.peek(), Some((Token::Char('('), _))) {
            let args = parse_call_args(tokens, state)?;
            expr = Statement::MethodCall { object: Box::new(expr),
                                           method: name,
                                           args };
        } else {
            expr = match expr {
                Statement::VariableValue { mut dotted_ids } => {
                    dotted_ids.push(name);
                    Statement::VariableValue { dotted_ids }
                },
                _ => {
                    return Err(ParseError::UnexpectedToken {
                        token: format!("field '{name}' read on something that is not a variable"),
                        line,
                    });
                },
            };
        }
    }
    Ok(expr)
}

/// Parses the leaves of the expression grammar.
///
/// A called identifier is either the `str(...)` builtin or the
/// instantiation of a previously defined class; anything else called like a
/// function is rejected, since the language has no free functions.
fn parse_atom<'a, I>(tokens: &mut Peekable<I>, state: &mut ParserState) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((Token::Number(value), _)) => Ok(Statement::NumericConst(*value)),
        Some((Token::String(text), _)) => Ok(Statement::StringConst(text.clone())),
        Some((Token::True, _)) => Ok(Statement::BoolConst(true)),
        Some((Token::False, _)) => Ok(Statement::BoolConst(false)),
        Some((Token::None, _)) => Ok(Statement::None),
        Some((Token::Char('('), _)) => {
            let expr = parse_expression(tokens, state)?;
            expect_char(tokens, ')')?;
            Ok(expr)
        },
        Some((Token::Id(name), line)) => {
            if !matches!(tokens.peek(), Some((Token::Char('('), _))) {
                return Ok(Statement::VariableValue { dotted_ids: vec![name.clone()] });
            }
            if name == "str" {
                return parse_stringify(tokens, state, *line);
            }
            match state.classes.get(name).map(Rc::clone) {
                Some(class) => {
                    let args = parse_call_args(tokens, state)?;
                    Ok(Statement::NewInstance { class, args })
                },
                _ => Err(ParseError::UnknownClass { name: name.clone(),
                                                    line: *line, }),
            }
        },
        Some((token, line)) => {
            Err(ParseError::UnexpectedToken { token: format!("expected a value, found {token}"),
                                              line:  *line, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}

/// Parses the single-argument `str(...)` builtin.
fn parse_stringify<'a, I>(tokens: &mut Peekable<I>, state: &mut ParserState, line: usize)
                          -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)>
{
    let mut args = parse_call_args(tokens, state)?;
    match (args.pop(), args.is_empty()) {
        (Some(arg), true) => Ok(Statement::Stringify { arg: Box::new(arg) }),
        _ => Err(ParseError::UnexpectedToken { token: "str takes exactly one argument".to_string(),
                                               line }),
    }
}

/// Parses a parenthesized, comma-separated argument list.
pub fn parse_call_args<'a, I>(tokens: &mut Peekable<I>, state: &mut ParserState)
                              -> ParseResult<Vec<Statement>>
    where I: Iterator<Item = &'a (Token, usize)>
{
    expect_char(tokens, '(')?;
    let mut args = Vec::new();
    if matches!(tokens.peek(), Some((Token::Char(')'), _))) {
        tokens.next();
        return Ok(args);
    }
    loop {
        args.push(parse_expression(tokens, state)?);
        match tokens.next() {
            Some((Token::Char(','), _)) => {},
            Some((Token::Char(')'), _)) => return Ok(args),
            Some((token, line)) => {
                return Err(ParseError::UnexpectedToken { token:
                                                             format!("expected ',' or ')', found {token}"),
                                                         line:  *line, });
            },
            None => return Err(ParseError::UnexpectedEndOfInput { line: 0 }),
        }
    }
}
