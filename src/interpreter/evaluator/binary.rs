use crate::{
    ast::ArithmeticOp,
    error::RuntimeError,
    interpreter::{
        context::Context,
        evaluator::core::ExecResult,
        runtime::{holder::ObjectHolder, object::Object},
    },
};

/// Applies an arithmetic operator to two evaluated operands.
///
/// Addition covers numbers, string concatenation, and `__add__` dispatch on
/// a left-hand instance; the other operators accept numbers only. All
/// arithmetic is checked: overflow and division by zero are runtime
/// failures, never wrapped results.
///
/// # Errors
/// Fails with [`RuntimeError::IncompatibleOperands`] when the operand types
/// admit no rule, and propagates failures from an `__add__` body.
pub fn arithmetic(op: ArithmeticOp, lhs: &ObjectHolder, rhs: &ObjectHolder,
                  context: &mut dyn Context)
                  -> ExecResult {
    match op {
        ArithmeticOp::Add => add(lhs, rhs, context),
        ArithmeticOp::Sub => numeric(lhs, rhs, '-', i32::checked_sub),
        ArithmeticOp::Mult => numeric(lhs, rhs, '*', i32::checked_mul),
        ArithmeticOp::Div => divide(lhs, rhs),
    }
}

/// Addition: numbers, strings, or `__add__` on a left-hand instance.
fn add(lhs: &ObjectHolder, rhs: &ObjectHolder, context: &mut dyn Context) -> ExecResult {
    if let (Some(left), Some(right)) = (lhs.object(), rhs.object()) {
        match (&*left, &*right) {
            (Object::Number(a), Object::Number(b)) => {
                return a.checked_add(*b)
                        .map(|sum| ObjectHolder::own(Object::Number(sum)))
                        .ok_or_else(|| RuntimeError::Overflow { operation: '+' }.into());
            },
            (Object::String(a), Object::String(b)) => {
                return Ok(ObjectHolder::own(Object::String(format!("{a}{b}"))));
            },
            (Object::Instance(instance), _) => {
                if instance.has_method("__add__", 1) {
                    return instance.call(lhs, "__add__", &[rhs.clone()], context);
                }
            },
            _ => {},
        }
    }
    Err(RuntimeError::IncompatibleOperands { operation: '+' }.into())
}

/// A numbers-only operator with overflow checking.
fn numeric(lhs: &ObjectHolder, rhs: &ObjectHolder, operation: char,
           apply: impl Fn(i32, i32) -> Option<i32>)
           -> ExecResult {
    match (numeric_operand(lhs), numeric_operand(rhs)) {
        (Some(a), Some(b)) => {
            apply(a, b).map(|value| ObjectHolder::own(Object::Number(value)))
                       .ok_or_else(|| RuntimeError::Overflow { operation }.into())
        },
        _ => Err(RuntimeError::IncompatibleOperands { operation }.into()),
    }
}

/// Integer division, rejecting a zero divisor before dividing.
fn divide(lhs: &ObjectHolder, rhs: &ObjectHolder) -> ExecResult {
    match (numeric_operand(lhs), numeric_operand(rhs)) {
        (Some(_), Some(0)) => Err(RuntimeError::DivisionByZero.into()),
        (Some(a), Some(b)) => {
            a.checked_div(b)
             .map(|value| ObjectHolder::own(Object::Number(value)))
             .ok_or_else(|| RuntimeError::Overflow { operation: '/' }.into())
        },
        _ => Err(RuntimeError::IncompatibleOperands { operation: '/' }.into()),
    }
}

/// Extracts a number from an operand, if it holds one.
fn numeric_operand(value: &ObjectHolder) -> Option<i32> {
    value.object().and_then(|object| object.as_number())
}
