/// User-defined classes, methods, and instances.
///
/// Defines the class descriptor (name, method table, optional base class),
/// the method type, and the class instance with its mutable field table.
/// Method resolution and dispatch through the single-inheritance chain live
/// here.
pub mod class;
/// Cross-type equality and ordering.
///
/// Implements the two primary comparisons, `equal` and `less`, with their
/// special-method dispatch (`__eq__`, `__lt__`) and primitive value rules,
/// plus the four relations derived from them.
pub mod compare;
/// The polymorphic object handle.
///
/// Defines `ObjectHolder`, the empty/owning/sharing reference type that
/// closures, fields, and evaluation results store, together with value
/// printing.
pub mod holder;
/// Runtime values and symbol tables.
///
/// Declares the `Object` enum covering every value a program can produce,
/// the `Closure` symbol table, and the truthiness rules.
pub mod object;

pub use class::{Class, ClassInstance, Method};
pub use holder::ObjectHolder;
pub use object::{is_true, Closure, Object};
