use std::{
    io::Write,
    rc::{Rc, Weak},
};

use crate::{
    error::RuntimeError,
    interpreter::{
        context::Context,
        evaluator::core::ExecResult,
        runtime::{class::ClassInstance, object::Object},
    },
};

/// A polymorphic reference to a runtime [`Object`].
///
/// Holders are what closures, instance fields, and evaluation results store.
/// A holder is in one of three states:
///
/// - *empty*: the `None` of the language. Falsey, prints as `None`, and
///   short-circuits every dispatch that needs an object.
/// - *owning*: keeps the object alive. An object is released when its last
///   owning holder is dropped.
/// - *sharing*: refers to an object it does not own. The object's owner must
///   outlive the sharing holder; once the owner is gone the holder reads as
///   empty.
///
/// Cloning a holder never copies the object, so any number of holders can
/// alias one instance and observe each other's field mutations.
///
/// # Examples
/// ```
/// use mython::interpreter::runtime::{Object, ObjectHolder};
///
/// let owner = ObjectHolder::own(Object::Number(312));
/// let shared = owner.share();
/// assert!(shared.object().is_some());
///
/// drop(owner);
/// assert!(shared.object().is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub enum ObjectHolder {
    /// The empty holder, the `None` value of the language.
    #[default]
    Empty,
    /// A holder that keeps its object alive.
    Owned(Rc<Object>),
    /// A holder that observes an object owned elsewhere.
    Shared(Weak<Object>),
}

impl ObjectHolder {
    /// Moves an object onto the heap and returns the holder that owns it.
    #[must_use]
    pub fn own(object: Object) -> Self {
        Self::Owned(Rc::new(object))
    }

    /// Creates an empty holder, the `None` value.
    #[must_use]
    pub const fn none() -> Self {
        Self::Empty
    }

    /// Derives a non-owning holder referring to the same object.
    #[must_use]
    pub fn share(&self) -> Self {
        match self {
            Self::Empty => Self::Empty,
            Self::Owned(object) => Self::Shared(Rc::downgrade(object)),
            Self::Shared(object) => Self::Shared(Weak::clone(object)),
        }
    }

    /// Returns the referenced object, or `None` for an empty holder and for
    /// a sharing holder whose owner has been dropped.
    #[must_use]
    pub fn object(&self) -> Option<Rc<Object>> {
        match self {
            Self::Empty => None,
            Self::Owned(object) => Some(Rc::clone(object)),
            Self::Shared(object) => object.upgrade(),
        }
    }

    /// Returns `true` when the holder refers to no object.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.object().is_none()
    }

    /// Returns `true` when the holder refers to a class instance.
    #[must_use]
    pub fn is_instance(&self) -> bool {
        self.object().is_some_and(|object| object.as_instance().is_some())
    }

    /// Writes the value's printed form to the context's output stream.
    ///
    /// Empty holders and a wrapped `None` print as `None`, booleans as
    /// `True`/`False`, classes as `Class ` followed by their name. An
    /// instance whose class resolves `__str__` with no parameters prints
    /// whatever that method returns, recursively; without `__str__` an
    /// instance prints an address-like identity token.
    ///
    /// # Errors
    /// Propagates failures from a `__str__` body and from the output stream.
    pub fn print(&self, context: &mut dyn Context) -> ExecResult<()> {
        let object = match self.object() {
            Some(object) => object,
            _ => return write_output(context, "None"),
        };
        match &*object {
            Object::None => write_output(context, "None"),
            Object::Number(value) => write_output(context, &value.to_string()),
            Object::String(text) => write_output(context, text),
            Object::Bool(true) => write_output(context, "True"),
            Object::Bool(false) => write_output(context, "False"),
            Object::Class(class) => write_output(context, &format!("Class {}", class.name())),
            Object::Instance(instance) => self.print_instance(instance, context),
        }
    }

    /// Prints an instance, dispatching `__str__` when the class declares it.
    fn print_instance(&self, instance: &ClassInstance, context: &mut dyn Context)
                      -> ExecResult<()> {
        if instance.has_method("__str__", 0) {
            let rendered = instance.call(self, "__str__", &[], context)?;
            rendered.print(context)
        } else {
            write_output(context, &format!("{:p}", std::ptr::from_ref(instance)))
        }
    }
}

/// Writes a chunk of program output, mapping stream failures to the runtime
/// error model.
pub(crate) fn write_output(context: &mut dyn Context, text: &str) -> ExecResult<()> {
    context.output_stream()
           .write_all(text.as_bytes())
           .map_err(|error| RuntimeError::OutputFailed { message: error.to_string() }.into())
}
