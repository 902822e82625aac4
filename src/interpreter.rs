/// The context module defines where program output goes.
///
/// Every statement executes against a context, an abstraction over the
/// output stream that `print` writes to. The dummy implementation captures
/// into memory for tests and string conversion; the simple one wraps a
/// caller-provided stream.
///
/// # Responsibilities
/// - Defines the `Context` trait with its single output-stream accessor.
/// - Provides the in-memory and stream-wrapping implementations.
pub mod context;
/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator traverses the AST depth first, resolves names through
/// closures, dispatches methods through the object model, performs
/// arithmetic and logical operations, and writes program output through the
/// context. It is the core execution engine of the interpreter.
///
/// # Responsibilities
/// - Executes every AST node, threading the closure and output context.
/// - Contains the non-local `return` to its enclosing method body.
/// - Reports runtime errors such as division by zero or undefined names.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads raw source text and produces a stream of tokens paired
/// with source lines. Because blocks are indentation-delimited, the lexer
/// also runs the indentation state machine, bracketing blocks with
/// synthetic `Indent` and `Dedent` markers so the parser sees a fully
/// delimited stream.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with source lines.
/// - Normalizes line structure: blank lines vanish, blocks are bracketed,
///   the stream ends with a final `Newline` and exactly one `Eof`.
/// - Reports lexical errors for malformed indentation or invalid input.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer and
/// constructs the `Compound` root the evaluator executes. Classes are
/// resolved at parse time, so instantiation and inheritance refer to
/// already-built class descriptors.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes.
/// - Validates grammar and block structure, reporting errors with lines.
/// - Tracks defined classes and rejects `return` outside method bodies.
pub mod parser;
/// The runtime module defines the object model of the language.
///
/// This module declares the runtime value types, the empty/owning/sharing
/// object handle, user-defined classes with single inheritance and method
/// dispatch, instances with mutable fields, truthiness, and the comparison
/// rules with their special-method overrides.
///
/// # Responsibilities
/// - Defines `Object`, `ObjectHolder`, `Class`, `ClassInstance`, `Closure`.
/// - Resolves and dispatches methods through the inheritance chain.
/// - Implements value printing and the equality and ordering relations.
pub mod runtime;
