use std::{iter::Peekable, rc::Rc};

use crate::{
    ast::Statement,
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{parse_expression, ParseResult, ParserState},
            utils::{
                current_line, expect_char, expect_identifier, expect_statement_end, expect_token,
            },
        },
        runtime::{Class, Method},
    },
};

/// Parses a complete program into its `Compound` root.
///
/// Statements are separated by line ends; stray `Newline` tokens between
/// them are skipped, and the single trailing `Eof` terminates the loop.
///
/// # Errors
/// Propagates any parse error from the statements.
///
/// # Examples
/// ```
/// use mython::interpreter::{lexer::tokenize, parser::statement::parse_program};
///
/// let tokens = tokenize("x = 2 + 3\nprint x").unwrap();
/// let program = parse_program(&mut tokens.iter().peekable()).unwrap();
/// assert!(matches!(program, mython::ast::Statement::Compound { .. }));
/// ```
pub fn parse_program<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)>
{
    let mut state = ParserState::new();
    let mut statements = Vec::new();
    loop {
        match tokens.peek() {
            Some((Token::Newline, _)) => {
                tokens.next();
            },
            Some((Token::Eof, _)) | None => break,
            _ => statements.push(parse_statement(tokens, &mut state)?),
        }
    }
    Ok(Statement::Compound { statements })
}

/// Parses a single statement.
///
/// A statement is a class definition, an `if`/`else` conditional, a
/// `return`, a `print`, an assignment, a field assignment, or an expression
/// standing alone for its effect. Assignments are recognized by parsing an
/// expression and finding `=` after it, which restricts assignment targets
/// to plain and dotted names.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>, state: &mut ParserState)
                              -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.peek() {
        Some((Token::Class, _)) => parse_class_definition(tokens, state),
        Some((Token::If, _)) => parse_if(tokens, state),
        Some((Token::Return, _)) => parse_return(tokens, state),
        Some((Token::Print, _)) => parse_print(tokens, state),
        _ => parse_assignment_or_expression(tokens, state),
    }
}

/// Parses `class Name:` or `class Name(Parent):` with its indented block of
/// method definitions.
///
/// The parent must have been defined earlier; the finished class is
/// recorded in the parser state so later code can instantiate it.
fn parse_class_definition<'a, I>(tokens: &mut Peekable<I>, state: &mut ParserState)
                                 -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)>
{
    tokens.next();
    let name = expect_identifier(tokens)?;

    let parent = if matches!(tokens.peek(), Some((Token::Char('('), _))) {
        tokens.next();
        let line = current_line(tokens);
        let parent_name = expect_identifier(tokens)?;
        let parent = match state.classes.get(&parent_name).map(Rc::clone) {
            Some(class) => class,
            _ => return Err(ParseError::UnknownClass { name: parent_name,
                                                       line }),
        };
        expect_char(tokens, ')')?;
        Some(parent)
    } else {
        None
    };

    expect_char(tokens, ':')?;
    expect_token(tokens, &Token::Newline)?;
    expect_token(tokens, &Token::Indent)?;

    let mut methods = Vec::new();
    loop {
        match tokens.peek() {
            Some((Token::Def, _)) => methods.push(parse_method(tokens, state)?),
            Some((Token::Newline, _)) => {
                tokens.next();
            },
            Some((Token::Dedent, _)) => {
                tokens.next();
                break;
            },
            Some((token, line)) => {
                return Err(ParseError::UnexpectedToken {
                    token: format!("expected a method definition, found {token}"),
                    line: *line,
                });
            },
            None => return Err(ParseError::UnexpectedEndOfInput { line: 0 }),
        }
    }

    let class = Rc::new(Class::new(name.clone(), methods, parent));
    state.classes.insert(name, Rc::clone(&class));
    Ok(Statement::ClassDefinition { class })
}

/// Parses `def name(params):` with its indented body.
///
/// The body is wrapped in a method-body node here, at construction time, so
/// a `return` inside it can never unwind past its own call.
fn parse_method<'a, I>(tokens: &mut Peekable<I>, state: &mut ParserState) -> ParseResult<Method>
    where I: Iterator<Item = &'a (Token, usize)>
{
    tokens.next();
    let name = expect_identifier(tokens)?;
    expect_char(tokens, '(')?;

    let mut formal_params = Vec::new();
    if !matches!(tokens.peek(), Some((Token::Char(')'), _))) {
        loop {
            formal_params.push(expect_identifier(tokens)?);
            if matches!(tokens.peek(), Some((Token::Char(','), _))) {
                tokens.next();
            } else {
                break;
            }
        }
    }
    expect_char(tokens, ')')?;
    expect_char(tokens, ':')?;

    state.method_depth += 1;
    let body = parse_suite(tokens, state);
    state.method_depth -= 1;

    Ok(Method { name,
                formal_params,
                body: Statement::MethodBody { body: Box::new(body?) }, })
}

/// Parses an indented block: a `Newline`, an `Indent`, statements, and the
/// closing `Dedent`.
fn parse_suite<'a, I>(tokens: &mut Peekable<I>, state: &mut ParserState) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)>
{
    expect_token(tokens, &Token::Newline)?;
    expect_token(tokens, &Token::Indent)?;

    let mut statements = Vec::new();
    loop {
        match tokens.peek() {
            Some((Token::Dedent, _)) => {
                tokens.next();
                break;
            },
            Some((Token::Newline, _)) => {
                tokens.next();
            },
            Some((Token::Eof, line)) => {
                return Err(ParseError::UnexpectedEndOfInput { line: *line });
            },
            None => return Err(ParseError::UnexpectedEndOfInput { line: 0 }),
            _ => statements.push(parse_statement(tokens, state)?),
        }
    }
    Ok(Statement::Compound { statements })
}

/// Parses `if condition:` with its block and an optional `else:` block.
fn parse_if<'a, I>(tokens: &mut Peekable<I>, state: &mut ParserState) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)>
{
    tokens.next();
    let condition = parse_expression(tokens, state)?;
    expect_char(tokens, ':')?;
    let if_body = parse_suite(tokens, state)?;

    let else_body = if matches!(tokens.peek(), Some((Token::Else, _))) {
        tokens.next();
        expect_char(tokens, ':')?;
        Some(Box::new(parse_suite(tokens, state)?))
    } else {
        None
    };

    Ok(Statement::IfElse { condition: Box::new(condition),
                           if_body: Box::new(if_body),
                           else_body })
}

/// Parses `return expression`, rejected outside of a method body.
fn parse_return<'a, I>(tokens: &mut Peekable<I>, state: &mut ParserState)
                       -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)>
{
    let line = current_line(tokens);
    tokens.next();
    if state.method_depth == 0 {
        return Err(ParseError::ReturnOutsideMethod { line });
    }
    let value = parse_expression(tokens, state)?;
    expect_statement_end(tokens)?;
    Ok(Statement::Return { value: Box::new(value) })
}

/// Parses `print` with its comma-separated arguments, possibly none.
fn parse_print<'a, I>(tokens: &mut Peekable<I>, state: &mut ParserState)
                      -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)>
{
    tokens.next();
    let mut args = Vec::new();
    if !matches!(tokens.peek(), Some((Token::Newline | Token::Eof, _)) | None) {
        loop {
            args.push(parse_expression(tokens, state)?);
            if matches!(tokens.peek(), Some((Token::Char(','), _))) {
                tokens.next();
            } else {
                break;
            }
        }
    }
    expect_statement_end(tokens)?;
    Ok(Statement::Print { args })
}

/// Parses an assignment, a field assignment, or an expression statement.
fn parse_assignment_or_expression<'a, I>(tokens: &mut Peekable<I>, state: &mut ParserState)
                                         -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)>
{
    let line = current_line(tokens);
    let expr = parse_expression(tokens, state)?;

    if !matches!(tokens.peek(), Some((Token::Char('='), _))) {
        expect_statement_end(tokens)?;
        return Ok(expr);
    }

    tokens.next();
    let value = Box::new(parse_expression(tokens, state)?);
    expect_statement_end(tokens)?;

    match expr {
        Statement::VariableValue { mut dotted_ids } => match dotted_ids.pop() {
            Some(field) if dotted_ids.is_empty() => Ok(Statement::Assignment { var: field,
                                                                               value }),
            Some(field) => Ok(Statement::FieldAssignment { object: dotted_ids,
                                                           field,
                                                           value }),
            None => Err(ParseError::UnexpectedToken { token: "assignment without a target".to_string(),
                                                      line }),
        },
        _ => Err(ParseError::UnexpectedToken { token:
                                                   "cannot assign to this expression".to_string(),
                                               line }),
    }
}
