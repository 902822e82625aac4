use std::rc::Rc;

use crate::interpreter::runtime::Class;

/// An abstract syntax tree (AST) node of a Mython program.
///
/// The language draws no structural line between statements and expressions:
/// every node executes against a closure and an output context and produces
/// a handle, which is empty for the nodes that exist only for their effect.
/// The variants cover all language constructs, from literals and variable
/// reads to class definitions, conditionals, and the non-local `return`.
#[derive(Debug)]
pub enum Statement {
    /// A numeric literal.
    NumericConst(i32),
    /// A string literal.
    StringConst(String),
    /// A boolean literal, `True` or `False`.
    BoolConst(bool),
    /// The `None` literal, which evaluates to the empty handle.
    None,
    /// A read of a possibly dotted name such as `x` or `self.counter.value`.
    ///
    /// The first identifier is looked up in the closure; every further
    /// identifier descends into the fields of the instance resolved so far.
    VariableValue {
        /// The chain of identifiers, outermost first. Never empty.
        dotted_ids: Vec<String>,
    },
    /// Binds the value of an expression to a name in the closure.
    Assignment {
        /// The name being bound.
        var:   String,
        /// The expression producing the bound value.
        value: Box<Statement>,
    },
    /// Stores the value of an expression into a field of an instance.
    FieldAssignment {
        /// The dotted path resolving to the target instance.
        object: Vec<String>,
        /// The field written on that instance.
        field:  String,
        /// The expression producing the stored value.
        value:  Box<Statement>,
    },
    /// Creates a fresh instance of a class, running `__init__` when the
    /// class declares it with a matching parameter count.
    NewInstance {
        /// The class being instantiated.
        class: Rc<Class>,
        /// Constructor argument expressions, evaluated left to right.
        args:  Vec<Statement>,
    },
    /// Calls a method on the value of an expression.
    ///
    /// Calling anything that is not a class instance quietly produces an
    /// empty handle.
    MethodCall {
        /// The expression producing the receiver.
        object: Box<Statement>,
        /// The name of the method to dispatch.
        method: String,
        /// Argument expressions, evaluated left to right.
        args:   Vec<Statement>,
    },
    /// Converts a value to its string form, the `str(...)` builtin.
    Stringify {
        /// The expression producing the value to render.
        arg: Box<Statement>,
    },
    /// An arithmetic operation on two operands.
    Arithmetic {
        /// The operator to apply.
        op:  ArithmeticOp,
        /// Left operand.
        lhs: Box<Statement>,
        /// Right operand.
        rhs: Box<Statement>,
    },
    /// Short-circuit logical `or`, producing a boolean.
    Or {
        /// Left operand, always evaluated.
        lhs: Box<Statement>,
        /// Right operand, evaluated only when the left one is falsey.
        rhs: Box<Statement>,
    },
    /// Short-circuit logical `and`, producing a boolean.
    And {
        /// Left operand, always evaluated.
        lhs: Box<Statement>,
        /// Right operand, evaluated only when the left one is truthy.
        rhs: Box<Statement>,
    },
    /// Logical negation, producing a boolean.
    Not {
        /// The negated operand.
        arg: Box<Statement>,
    },
    /// A comparison of two operands, producing a boolean.
    Comparison {
        /// The comparison to apply.
        op:  ComparisonOp,
        /// Left operand.
        lhs: Box<Statement>,
        /// Right operand.
        rhs: Box<Statement>,
    },
    /// Prints its arguments separated by single spaces, then a newline.
    Print {
        /// Argument expressions, evaluated and printed left to right.
        args: Vec<Statement>,
    },
    /// Binds a class object to its name in the closure, replacing any
    /// previous binding of that name.
    ClassDefinition {
        /// The class being defined.
        class: Rc<Class>,
    },
    /// Conditional execution of one of two branches.
    IfElse {
        /// The condition, coerced with truthiness rules.
        condition: Box<Statement>,
        /// Executed when the condition is truthy.
        if_body:   Box<Statement>,
        /// Executed when the condition is falsey, if present.
        else_body: Option<Box<Statement>>,
    },
    /// A sequence of statements executed in order.
    Compound {
        /// The statements of the block.
        statements: Vec<Statement>,
    },
    /// The boundary of a method: the only node that observes a `return`
    /// raised inside its body and turns it into the call's result.
    MethodBody {
        /// The method's statements.
        body: Box<Statement>,
    },
    /// Evaluates an expression and unwinds to the nearest enclosing
    /// [`Statement::MethodBody`] carrying the result.
    Return {
        /// The expression producing the returned value.
        value: Box<Statement>,
    },
}

/// Represents an arithmetic operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ArithmeticOp {
    /// Addition (`+`): numbers, string concatenation, or `__add__` dispatch.
    Add,
    /// Subtraction (`-`), numbers only.
    Sub,
    /// Multiplication (`*`), numbers only.
    Mult,
    /// Integer division (`/`), numbers only.
    Div,
}

/// Represents a comparison operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ComparisonOp {
    /// Equal to (`==`)
    Eq,
    /// Not equal to (`!=`)
    NotEq,
    /// Less than (`<`)
    Less,
    /// Greater than (`>`)
    Greater,
    /// Less than or equal (`<=`)
    LessOrEq,
    /// Greater than or equal (`>=`)
    GreaterOrEq,
}

impl std::fmt::Display for ArithmeticOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let operator = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mult => "*",
            Self::Div => "/",
        };
        write!(f, "{operator}")
    }
}

impl std::fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let operator = match self {
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::LessOrEq => "<=",
            Self::GreaterOrEq => ">=",
        };
        write!(f, "{operator}")
    }
}
