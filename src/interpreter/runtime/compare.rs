use crate::{
    error::RuntimeError,
    interpreter::{
        context::Context,
        evaluator::core::ExecResult,
        runtime::{
            holder::ObjectHolder,
            object::{is_true, Object},
        },
    },
};

/// Tests two values for equality.
///
/// Two empty handles are equal; one empty handle against anything else is a
/// failure. A class instance on the left that resolves `__eq__` with one
/// parameter decides the outcome itself, with its result coerced through
/// truthiness. Otherwise two numbers, two strings, or two booleans compare
/// by value, and every remaining pairing fails as incomparable.
///
/// # Errors
/// Fails with [`RuntimeError::IncomparableValues`] on fallthrough and
/// propagates failures raised by an `__eq__` body.
pub fn equal(lhs: &ObjectHolder, rhs: &ObjectHolder, context: &mut dyn Context)
             -> ExecResult<bool> {
    if lhs.is_empty() && rhs.is_empty() {
        return Ok(true);
    }
    if lhs.is_empty() || rhs.is_empty() {
        return Err(RuntimeError::IncomparableValues.into());
    }
    if let Some(decided) = instance_compare(lhs, rhs, context, "__eq__") {
        return decided;
    }
    primitive_compare(lhs, rhs, |a, b| a == b, |a, b| a == b, |a, b| a == b)
}

/// Tests whether the left value orders before the right one.
///
/// Mirrors [`equal`] with `__lt__` and `<`, except that empty handles are
/// never accepted, not even two of them.
///
/// # Errors
/// Fails with [`RuntimeError::IncomparableValues`] on fallthrough and
/// propagates failures raised by a `__lt__` body.
pub fn less(lhs: &ObjectHolder, rhs: &ObjectHolder, context: &mut dyn Context)
            -> ExecResult<bool> {
    if let Some(decided) = instance_compare(lhs, rhs, context, "__lt__") {
        return decided;
    }
    primitive_compare(lhs, rhs, |a, b| a < b, |a, b| a < b, |a, b| a < b)
}

/// The negation of [`equal`].
///
/// # Errors
/// Propagates any failure of [`equal`].
pub fn not_equal(lhs: &ObjectHolder, rhs: &ObjectHolder, context: &mut dyn Context)
                 -> ExecResult<bool> {
    Ok(!equal(lhs, rhs, context)?)
}

/// Tests `lhs > rhs`, derived as neither less nor equal.
///
/// # Errors
/// Propagates any failure of [`less`] or [`equal`].
pub fn greater(lhs: &ObjectHolder, rhs: &ObjectHolder, context: &mut dyn Context)
               -> ExecResult<bool> {
    Ok(!less(lhs, rhs, context)? && !equal(lhs, rhs, context)?)
}

/// Tests `lhs <= rhs`, the negation of [`greater`].
///
/// # Errors
/// Propagates any failure of [`greater`].
pub fn less_or_equal(lhs: &ObjectHolder, rhs: &ObjectHolder, context: &mut dyn Context)
                     -> ExecResult<bool> {
    Ok(!greater(lhs, rhs, context)?)
}

/// Tests `lhs >= rhs`, the negation of [`less`].
///
/// # Errors
/// Propagates any failure of [`less`].
pub fn greater_or_equal(lhs: &ObjectHolder, rhs: &ObjectHolder, context: &mut dyn Context)
                        -> ExecResult<bool> {
    Ok(!less(lhs, rhs, context)?)
}

/// Dispatches a comparison special method on the left operand.
///
/// Returns `None` when the left operand is not an instance or its class
/// does not resolve the method with one parameter, letting the caller fall
/// through to the primitive rules.
fn instance_compare(lhs: &ObjectHolder, rhs: &ObjectHolder, context: &mut dyn Context,
                    method: &str)
                    -> Option<ExecResult<bool>> {
    let object = lhs.object()?;
    let instance = object.as_instance()?;
    if !instance.has_method(method, 1) {
        return None;
    }
    let outcome = instance.call(lhs, method, &[rhs.clone()], context)
                          .map(|result| is_true(&result));
    Some(outcome)
}

/// Applies a comparison to two operands of the same primitive type.
fn primitive_compare(lhs: &ObjectHolder, rhs: &ObjectHolder,
                     numbers: impl Fn(i32, i32) -> bool, texts: impl Fn(&str, &str) -> bool,
                     bools: impl Fn(bool, bool) -> bool)
                     -> ExecResult<bool> {
    match (lhs.object(), rhs.object()) {
        (Some(left), Some(right)) => match (&*left, &*right) {
            (Object::Number(a), Object::Number(b)) => Ok(numbers(*a, *b)),
            (Object::String(a), Object::String(b)) => Ok(texts(a, b)),
            (Object::Bool(a), Object::Bool(b)) => Ok(bools(*a, *b)),
            _ => Err(RuntimeError::IncomparableValues.into()),
        },
        _ => Err(RuntimeError::IncomparableValues.into()),
    }
}
