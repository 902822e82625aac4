use std::{
    cell::{Ref, RefCell, RefMut},
    rc::Rc,
};

use crate::{
    ast::Statement,
    error::RuntimeError,
    interpreter::{
        context::Context,
        evaluator::core::ExecResult,
        runtime::{holder::ObjectHolder, object::Closure},
    },
};

/// A method of a user-defined class.
#[derive(Debug)]
pub struct Method {
    /// The method's name.
    pub name:          String,
    /// The names of the method's formal parameters, in declaration order.
    pub formal_params: Vec<String>,
    /// The method's body, wrapped so that a `return` inside it completes
    /// the call.
    pub body:          Statement,
}

/// A user-defined class: a name, an ordered method table, and an optional
/// base class.
///
/// Classes are immutable once built. Method resolution walks the chain of
/// base classes, so a class shares the methods it does not override.
#[derive(Debug)]
pub struct Class {
    name:    String,
    methods: Vec<Method>,
    parent:  Option<Rc<Class>>,
}

impl Class {
    /// Creates a class with the given name, methods, and base class.
    #[must_use]
    pub fn new(name: String, methods: Vec<Method>, parent: Option<Rc<Class>>) -> Self {
        Self { name,
               methods,
               parent }
    }

    /// Returns the name of the class.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolves a method by name and parameter count.
    ///
    /// A class that declares the name only at a different parameter count
    /// does not shadow a matching declaration further up the chain.
    #[must_use]
    pub fn find_method(&self, method: &str, argument_count: usize) -> Option<&Method> {
        self.methods
            .iter()
            .find(|m| m.name == method && m.formal_params.len() == argument_count)
            .or_else(|| {
                self.parent
                    .as_ref()
                    .and_then(|parent| parent.find_method(method, argument_count))
            })
    }

    /// Resolves a method by name alone, taking the closest declaration.
    #[must_use]
    pub fn find_method_named(&self, method: &str) -> Option<&Method> {
        self.methods
            .iter()
            .find(|m| m.name == method)
            .or_else(|| {
                self.parent
                    .as_ref()
                    .and_then(|parent| parent.find_method_named(method))
            })
    }
}

/// An instance of a user-defined class.
///
/// An instance pairs a reference to its class with its own field table.
/// The fields are the only mutable part of the object model, which is what
/// lets any number of aliasing handles observe a mutation made through one
/// of them.
#[derive(Debug)]
pub struct ClassInstance {
    class:  Rc<Class>,
    fields: RefCell<Closure>,
}

impl ClassInstance {
    /// Creates an instance of the given class with no fields.
    #[must_use]
    pub fn new(class: Rc<Class>) -> Self {
        Self { class,
               fields: RefCell::new(Closure::new()), }
    }

    /// Returns the class the instance belongs to.
    #[must_use]
    pub fn class(&self) -> &Rc<Class> {
        &self.class
    }

    /// Returns a read borrow of the instance's fields.
    #[must_use]
    pub fn fields(&self) -> Ref<'_, Closure> {
        self.fields.borrow()
    }

    /// Returns a write borrow of the instance's fields.
    #[must_use]
    pub fn fields_mut(&self) -> RefMut<'_, Closure> {
        self.fields.borrow_mut()
    }

    /// Returns `true` when the instance resolves a method with the given
    /// name and parameter count.
    #[must_use]
    pub fn has_method(&self, method: &str, argument_count: usize) -> bool {
        self.class.find_method(method, argument_count).is_some()
    }

    /// Resolves a method for a call, classifying the failure.
    ///
    /// A name declared somewhere in the chain but never at the requested
    /// parameter count is an arity mismatch; a name declared nowhere is an
    /// unknown method.
    fn resolve_method(&self, method: &str, argument_count: usize)
                      -> Result<&Method, RuntimeError> {
        if let Some(found) = self.class.find_method(method, argument_count) {
            return Ok(found);
        }
        match self.class.find_method_named(method) {
            Some(found) => Err(RuntimeError::ArityMismatch { method:   method.to_string(),
                                                             expected: found.formal_params.len(),
                                                             found:    argument_count, }),
            _ => Err(RuntimeError::UnknownMethod { method: method.to_string() }),
        }
    }

    /// Calls a method on the instance.
    ///
    /// The receiver handle is the holder through which the instance is being
    /// used; it is re-shared as the `self` binding of the call's local
    /// closure, followed by one binding per formal parameter in order. The
    /// body executes against that closure and the given context, and its
    /// result is the call's result.
    ///
    /// # Errors
    /// Fails when no method with the name and parameter count resolves, and
    /// propagates any failure raised by the body.
    pub fn call(&self, receiver: &ObjectHolder, method: &str, actual_args: &[ObjectHolder],
                context: &mut dyn Context)
                -> ExecResult<ObjectHolder> {
        let method = self.resolve_method(method, actual_args.len())?;
        let mut local_closure = Closure::new();
        local_closure.insert("self".to_string(), receiver.share());
        for (param, arg) in method.formal_params.iter().zip(actual_args) {
            local_closure.insert(param.clone(), arg.clone());
        }
        method.body.execute(&mut local_closure, context)
    }
}
