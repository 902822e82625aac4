//! # mython
//!
//! mython is a tree-walking interpreter for Mython, a small
//! indentation-structured scripting language with user-defined classes,
//! single inheritance, and dynamically dispatched special methods such as
//! `__init__`, `__str__`, `__eq__`, `__lt__`, and `__add__`.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

use std::io::Write;

use crate::interpreter::{
    context::SimpleContext,
    evaluator::core::Interrupt,
    lexer::tokenize,
    parser::statement::parse_program,
    runtime::Closure,
};

/// Defines the structure of parsed code.
///
/// This module declares the `Statement` enum and the operator types that
/// represent the syntactic structure of source code as a tree. The AST is
/// built by the parser and executed by the evaluator.
///
/// # Responsibilities
/// - Defines one node variant for every language construct.
/// - Unifies statements and expressions under a single execution contract.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised while lexing, parsing,
/// or executing code. It standardizes error reporting and carries the
/// offending identifier, operator, or source line for user feedback.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Supports integration with standard error handling traits.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, the runtime
/// object model, and the output context to provide a complete runtime for
/// Mython programs.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, runtime, evaluator.
/// - Provides entry points for tokenizing and executing user code.
pub mod interpreter;

/// Executes a complete Mython program.
///
/// The source is tokenized, parsed into its `Compound` root, and executed
/// against a fresh top-level closure; everything the program prints goes to
/// `output`.
///
/// # Errors
/// Returns an error when the source fails to tokenize or parse, or when
/// execution raises a runtime failure such as an undefined name, a bad
/// operand, or division by zero.
///
/// # Examples
/// ```
/// let mut output = Vec::new();
/// mython::run("print 2 + 3, 'ok'", &mut output).unwrap();
/// assert_eq!(output, b"5 ok\n");
///
/// // An undefined name surfaces as an error.
/// assert!(mython::run("print x", &mut Vec::new()).is_err());
/// ```
pub fn run(source: &str, output: &mut dyn Write) -> Result<(), Box<dyn std::error::Error>> {
    let tokens = tokenize(source)?;
    let program = parse_program(&mut tokens.iter().peekable())?;

    let mut context = SimpleContext::new(output);
    let mut closure = Closure::new();
    match program.execute(&mut closure, &mut context) {
        // The parser rejects `return` outside of a method body, so an
        // unwind reaching the top level carries nothing to do.
        Ok(_) | Err(Interrupt::Return(_)) => Ok(()),
        Err(Interrupt::Failure(error)) => Err(Box::new(error)),
    }
}
