/// Arithmetic over evaluated operands.
///
/// Implements the four arithmetic operators with their type rules: numeric
/// math with overflow checking, string concatenation, `__add__` dispatch,
/// and division-by-zero detection.
pub mod binary;
/// Statement execution.
///
/// Implements `Statement::execute`, the depth-first walk that drives the
/// whole interpreter, along with the interrupt type that carries both
/// runtime failures and the non-local `return`.
pub mod core;
