/// Expression parsing.
///
/// Implements the precedence ladder from logical `or` down to atoms,
/// postfix field reads and method calls, the `str(...)` builtin, and class
/// instantiation. Also defines the parser state shared across the grammar.
pub mod core;
/// Statement parsing.
///
/// Implements programs, class definitions with their method blocks,
/// conditionals, `return`, `print`, and assignment recognition, all over
/// the indentation-delimited block structure the lexer emits.
pub mod statement;
/// Small token-stream helpers shared by the parser modules.
pub mod utils;
