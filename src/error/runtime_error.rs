#[derive(Debug)]
/// Represents all errors that can be raised during evaluation.
pub enum RuntimeError {
    /// Tried to read a name that is bound neither in the closure nor in the
    /// fields of the instance being dereferenced.
    UndefinedName {
        /// The name that failed to resolve.
        name: String,
    },
    /// Called a method that no class in the inheritance chain declares.
    UnknownMethod {
        /// The name of the method.
        method: String,
    },
    /// Called a method that exists, but only with a different parameter count.
    ArityMismatch {
        /// The name of the method.
        method:   String,
        /// The parameter count the method is declared with.
        expected: usize,
        /// The argument count the call supplied.
        found:    usize,
    },
    /// An arithmetic or concatenation operator was applied to values it does
    /// not support.
    IncompatibleOperands {
        /// The operator that failed.
        operation: char,
    },
    /// Attempted division by zero.
    DivisionByZero,
    /// Two values admit none of the comparison rules.
    IncomparableValues,
    /// Integer arithmetic overflowed.
    Overflow {
        /// The operator that overflowed.
        operation: char,
    },
    /// Writing to the output stream failed.
    OutputFailed {
        /// The underlying I/O error description.
        message: String,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UndefinedName { name } => write!(f, "Undefined name '{name}'."),
            Self::UnknownMethod { method } => write!(f, "Unknown method '{method}'."),
            Self::ArityMismatch { method, expected, found } => {
                write!(f,
                       "Method '{method}' takes {expected} argument(s), but {found} were given.")
            },
            Self::IncompatibleOperands { operation } => {
                write!(f, "Incompatible operands for '{operation}'.")
            },
            Self::DivisionByZero => write!(f, "Division by zero."),
            Self::IncomparableValues => write!(f, "Cannot compare these values."),
            Self::Overflow { operation } => {
                write!(f, "Integer overflow while computing '{operation}'.")
            },
            Self::OutputFailed { message } => write!(f, "Failed to write output: {message}."),
        }
    }
}

impl std::error::Error for RuntimeError {}
