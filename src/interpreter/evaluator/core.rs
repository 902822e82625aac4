use std::rc::Rc;

use crate::{
    ast::{ComparisonOp, Statement},
    error::RuntimeError,
    interpreter::{
        context::{Context, DummyContext},
        evaluator::binary,
        runtime::{
            class::{Class, ClassInstance},
            compare,
            holder::{write_output, ObjectHolder},
            object::{is_true, Closure, Object},
        },
    },
};

/// Why execution of a statement stopped before producing a value.
///
/// Both variants ride the error channel so `?` threads them through every
/// evaluator frame, but only one of them is an error: a
/// [`Interrupt::Return`] is the non-local control transfer raised by a
/// `return` statement, and [`Statement::MethodBody`] is the only node that
/// intercepts it. Failures pass through everything and surface at the
/// driver.
#[derive(Debug)]
pub enum Interrupt {
    /// A `return` unwinding to the nearest enclosing method body, carrying
    /// the returned handle.
    Return(ObjectHolder),
    /// A runtime failure propagating to the driver.
    Failure(RuntimeError),
}

impl From<RuntimeError> for Interrupt {
    fn from(error: RuntimeError) -> Self {
        Self::Failure(error)
    }
}

/// Result type used by the evaluator.
pub type ExecResult<T = ObjectHolder> = Result<T, Interrupt>;

impl Statement {
    /// Executes the node against a closure and an output context.
    ///
    /// Evaluation is a strict left-to-right, depth-first walk; only `or` and
    /// `and` leave an operand unevaluated. Nodes that exist for their effect
    /// produce an empty handle.
    ///
    /// # Errors
    /// Any node may raise a runtime failure; a `return` inside a method body
    /// travels the same channel until the enclosing
    /// [`Statement::MethodBody`] absorbs it.
    pub fn execute(&self, closure: &mut Closure, context: &mut dyn Context) -> ExecResult {
        match self {
            Self::NumericConst(value) => Ok(ObjectHolder::own(Object::Number(*value))),
            Self::StringConst(text) => Ok(ObjectHolder::own(Object::String(text.clone()))),
            Self::BoolConst(value) => Ok(bool_value(*value)),
            Self::None => Ok(ObjectHolder::none()),
            Self::VariableValue { dotted_ids } => resolve_path(dotted_ids, closure),
            Self::Assignment { var, value } => {
                let value = value.execute(closure, context)?;
                closure.insert(var.clone(), value.clone());
                Ok(value)
            },
            Self::FieldAssignment { object, field, value } => {
                execute_field_assignment(object, field, value, closure, context)
            },
            Self::NewInstance { class, args } => {
                execute_new_instance(class, args, closure, context)
            },
            Self::MethodCall { object, method, args } => {
                execute_method_call(object, method, args, closure, context)
            },
            Self::Stringify { arg } => execute_stringify(arg, closure, context),
            Self::Arithmetic { op, lhs, rhs } => {
                let lhs = lhs.execute(closure, context)?;
                let rhs = rhs.execute(closure, context)?;
                binary::arithmetic(*op, &lhs, &rhs, context)
            },
            Self::Or { lhs, rhs } => {
                let lhs = lhs.execute(closure, context)?;
                if is_true(&lhs) {
                    Ok(bool_value(true))
                } else {
                    let rhs = rhs.execute(closure, context)?;
                    Ok(bool_value(is_true(&rhs)))
                }
            },
            Self::And { lhs, rhs } => {
                let lhs = lhs.execute(closure, context)?;
                if is_true(&lhs) {
                    let rhs = rhs.execute(closure, context)?;
                    Ok(bool_value(is_true(&rhs)))
                } else {
                    Ok(bool_value(false))
                }
            },
            Self::Not { arg } => {
                let value = arg.execute(closure, context)?;
                Ok(bool_value(!is_true(&value)))
            },
            Self::Comparison { op, lhs, rhs } => {
                let lhs = lhs.execute(closure, context)?;
                let rhs = rhs.execute(closure, context)?;
                let outcome = compare_with(*op, &lhs, &rhs, context)?;
                Ok(bool_value(outcome))
            },
            Self::Print { args } => execute_print(args, closure, context),
            Self::ClassDefinition { class } => {
                let object = ObjectHolder::own(Object::Class(Rc::clone(class)));
                closure.insert(class.name().to_string(), object);
                Ok(ObjectHolder::none())
            },
            Self::IfElse { condition, if_body, else_body } => {
                let condition = condition.execute(closure, context)?;
                if is_true(&condition) {
                    if_body.execute(closure, context)
                } else if let Some(else_body) = else_body {
                    else_body.execute(closure, context)
                } else {
                    Ok(ObjectHolder::none())
                }
            },
            Self::Compound { statements } => {
                for statement in statements {
                    statement.execute(closure, context)?;
                }
                Ok(ObjectHolder::none())
            },
            Self::MethodBody { body } => match body.execute(closure, context) {
                Err(Interrupt::Return(value)) => Ok(value),
                Err(failure) => Err(failure),
                Ok(_) => Ok(ObjectHolder::none()),
            },
            Self::Return { value } => {
                let value = value.execute(closure, context)?;
                Err(Interrupt::Return(value))
            },
        }
    }
}

/// Wraps a boolean in an owning handle.
fn bool_value(value: bool) -> ObjectHolder {
    ObjectHolder::own(Object::Bool(value))
}

/// Builds the failure for a name that did not resolve.
fn undefined(name: &str) -> Interrupt {
    RuntimeError::UndefinedName { name: name.to_string() }.into()
}

/// Resolves a dotted name against the closure.
///
/// The first identifier is read from the closure; each further identifier
/// requires the value resolved so far to be a class instance and descends
/// into its fields.
fn resolve_path(dotted_ids: &[String], closure: &Closure) -> ExecResult {
    let (first, rest) = match dotted_ids.split_first() {
        Some(parts) => parts,
        _ => return Ok(ObjectHolder::none()),
    };
    let mut value = match closure.get(first) {
        Some(found) => found.clone(),
        _ => return Err(undefined(first)),
    };
    for id in rest {
        let object = value.object().ok_or_else(|| undefined(id))?;
        let instance = object.as_instance().ok_or_else(|| undefined(id))?;
        let field = match instance.fields().get(id) {
            Some(found) => found.clone(),
            _ => return Err(undefined(id)),
        };
        value = field;
    }
    Ok(value)
}

/// Stores a value into a field of the instance a dotted path resolves to.
///
/// A path that resolves to something other than an instance makes the whole
/// statement a quiet no-op with an empty result; the right-hand side is not
/// evaluated in that case.
fn execute_field_assignment(object: &[String], field: &str, value: &Statement,
                            closure: &mut Closure, context: &mut dyn Context)
                            -> ExecResult {
    let target = resolve_path(object, closure)?;
    let resolved = match target.object() {
        Some(resolved) => resolved,
        _ => return Ok(ObjectHolder::none()),
    };
    let instance = match resolved.as_instance() {
        Some(instance) => instance,
        _ => return Ok(ObjectHolder::none()),
    };
    let stored = value.execute(closure, context)?;
    instance.fields_mut().insert(field.to_string(), stored.clone());
    Ok(stored)
}

/// Creates an instance, running `__init__` when declared at the call arity.
///
/// The returned handle owns the fresh instance; whatever closure slot the
/// result is assigned to takes the ownership over from there. During
/// `__init__` the constructor's `self` shares the instance with the handle
/// being returned.
fn execute_new_instance(class: &Rc<Class>, args: &[Statement], closure: &mut Closure,
                        context: &mut dyn Context)
                        -> ExecResult {
    let instance = ObjectHolder::own(Object::Instance(ClassInstance::new(Rc::clone(class))));
    if class.find_method("__init__", args.len()).is_some() {
        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(arg.execute(closure, context)?);
        }
        if let Some(object) = instance.object() {
            if let Some(created) = object.as_instance() {
                created.call(&instance, "__init__", &values, context)?;
            }
        }
    }
    Ok(instance)
}

/// Dispatches a method call, quietly yielding an empty handle when the
/// receiver is not a class instance.
fn execute_method_call(object: &Statement, method: &str, args: &[Statement],
                       closure: &mut Closure, context: &mut dyn Context)
                       -> ExecResult {
    let receiver = object.execute(closure, context)?;
    let resolved = match receiver.object() {
        Some(resolved) => resolved,
        _ => return Ok(ObjectHolder::none()),
    };
    let instance = match resolved.as_instance() {
        Some(instance) => instance,
        _ => return Ok(ObjectHolder::none()),
    };
    let mut values = Vec::with_capacity(args.len());
    for arg in args {
        values.push(arg.execute(closure, context)?);
    }
    instance.call(&receiver, method, &values, context)
}

/// Renders a value into a string object.
///
/// An instance with `__str__/0` is first converted by its own method, run
/// against the real context; the conversion result is then printed into an
/// in-memory context, so nothing reaches the program's output stream. An
/// empty handle renders as the literal `None`.
fn execute_stringify(arg: &Statement, closure: &mut Closure, context: &mut dyn Context)
                     -> ExecResult {
    let value = arg.execute(closure, context)?;
    let value = match stringify_dispatch(&value, context)? {
        Some(converted) => converted,
        _ => value,
    };
    let mut buffer = DummyContext::new();
    value.print(&mut buffer)?;
    Ok(ObjectHolder::own(Object::String(buffer.contents())))
}

/// Runs `__str__` on an instance that declares it, if the value is one.
fn stringify_dispatch(value: &ObjectHolder, context: &mut dyn Context)
                      -> ExecResult<Option<ObjectHolder>> {
    let object = match value.object() {
        Some(object) => object,
        _ => return Ok(None),
    };
    let instance = match object.as_instance() {
        Some(instance) => instance,
        _ => return Ok(None),
    };
    if instance.has_method("__str__", 0) {
        instance.call(value, "__str__", &[], context).map(Some)
    } else {
        Ok(None)
    }
}

/// Prints the arguments separated by single spaces, then a newline.
///
/// Evaluation and printing interleave left to right, so output produced by
/// evaluating a later argument lands after the printed form of an earlier
/// one.
fn execute_print(args: &[Statement], closure: &mut Closure, context: &mut dyn Context)
                 -> ExecResult {
    for (index, arg) in args.iter().enumerate() {
        if index > 0 {
            write_output(context, " ")?;
        }
        let value = arg.execute(closure, context)?;
        value.print(context)?;
    }
    write_output(context, "\n")?;
    Ok(ObjectHolder::none())
}

/// Applies the comparison selected by the operator.
fn compare_with(op: ComparisonOp, lhs: &ObjectHolder, rhs: &ObjectHolder,
                context: &mut dyn Context)
                -> ExecResult<bool> {
    match op {
        ComparisonOp::Eq => compare::equal(lhs, rhs, context),
        ComparisonOp::NotEq => compare::not_equal(lhs, rhs, context),
        ComparisonOp::Less => compare::less(lhs, rhs, context),
        ComparisonOp::Greater => compare::greater(lhs, rhs, context),
        ComparisonOp::LessOrEq => compare::less_or_equal(lhs, rhs, context),
        ComparisonOp::GreaterOrEq => compare::greater_or_equal(lhs, rhs, context),
    }
}
