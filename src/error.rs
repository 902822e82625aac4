/// Lexing and parsing errors.
///
/// Defines all error types that can occur while turning source text into a
/// token stream or an AST: malformed indentation, unterminated string
/// literals, unexpected tokens, and any other issue detected before
/// evaluation.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation: undefined
/// names, dispatch misses, incompatible operands, division by zero, and
/// failed comparisons.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
