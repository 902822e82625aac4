use std::rc::Rc;

use mython::{
    ast::Statement,
    error::RuntimeError,
    interpreter::{
        context::DummyContext,
        evaluator::core::Interrupt,
        runtime::{compare, is_true, Class, ClassInstance, Method, Object, ObjectHolder},
    },
};

fn number(value: i32) -> ObjectHolder {
    ObjectHolder::own(Object::Number(value))
}

fn text(value: &str) -> ObjectHolder {
    ObjectHolder::own(Object::String(value.to_string()))
}

fn boolean(value: bool) -> ObjectHolder {
    ObjectHolder::own(Object::Bool(value))
}

fn method(name: &str, params: &[&str], body: Statement) -> Method {
    Method { name:          name.to_string(),
             formal_params: params.iter().map(ToString::to_string).collect(),
             body }
}

fn class(name: &str, methods: Vec<Method>, parent: Option<&Rc<Class>>) -> Rc<Class> {
    Rc::new(Class::new(name.to_string(), methods, parent.map(Rc::clone)))
}

fn instance_of(class: &Rc<Class>) -> ObjectHolder {
    ObjectHolder::own(Object::Instance(ClassInstance::new(Rc::clone(class))))
}

#[test]
fn owning_handles_keep_objects_alive() {
    let owner = ObjectHolder::own(Object::Number(312));
    assert!(!owner.is_empty());

    let second = owner.clone();
    drop(owner);
    assert_eq!(second.object().unwrap().as_number(), Some(312));
}

#[test]
fn sharing_handles_do_not_extend_lifetime() {
    let owner = ObjectHolder::own(Object::Number(784));
    let shared = owner.share();

    let from_owner = owner.object().unwrap();
    let from_shared = shared.object().unwrap();
    assert!(Rc::ptr_eq(&from_owner, &from_shared));
    drop(from_owner);
    drop(from_shared);

    drop(owner);
    assert!(shared.object().is_none());
    assert!(shared.is_empty());
}

#[test]
fn empty_handles_hold_nothing() {
    let empty = ObjectHolder::none();
    assert!(empty.is_empty());
    assert!(empty.object().is_none());
    assert!(empty.share().is_empty());
    assert!(ObjectHolder::default().is_empty());
}

#[test]
fn truthiness_rules() {
    assert!(is_true(&number(10)));
    assert!(is_true(&number(-1)));
    assert!(!is_true(&number(0)));

    assert!(is_true(&boolean(true)));
    assert!(!is_true(&boolean(false)));

    assert!(is_true(&text("Yup")));
    assert!(!is_true(&text("")));

    assert!(!is_true(&ObjectHolder::none()));
    assert!(!is_true(&ObjectHolder::own(Object::None)));

    let base = class("Base", Vec::new(), None);
    assert!(!is_true(&ObjectHolder::own(Object::Class(Rc::clone(&base)))));
    assert!(!is_true(&instance_of(&base)));
}

#[test]
fn equality_of_primitives() {
    let mut context = DummyContext::new();

    assert!(compare::equal(&number(1), &number(1), &mut context).unwrap());
    assert!(!compare::equal(&number(1), &number(2), &mut context).unwrap());
    assert!(compare::equal(&text(""), &text(""), &mut context).unwrap());
    assert!(compare::equal(&text("Yuppy"), &text("Yuppy"), &mut context).unwrap());
    assert!(!compare::equal(&text("Yuppy"), &text("Crappy"), &mut context).unwrap());
    assert!(compare::equal(&boolean(true), &boolean(true), &mut context).unwrap());
    assert!(!compare::equal(&boolean(true), &boolean(false), &mut context).unwrap());

    // Mixed primitive types admit no rule.
    assert!(compare::equal(&number(3), &boolean(true), &mut context).is_err());

    // Two empty handles are equal; a single one compares with nothing.
    assert!(compare::equal(&ObjectHolder::none(), &ObjectHolder::none(), &mut context).unwrap());
    assert!(compare::equal(&ObjectHolder::none(), &number(3), &mut context).is_err());
    assert!(compare::equal(&number(3), &ObjectHolder::none(), &mut context).is_err());
}

#[test]
fn ordering_of_primitives() {
    let mut context = DummyContext::new();

    assert!(compare::less(&number(1), &number(15), &mut context).unwrap());
    assert!(compare::less_or_equal(&number(1), &number(15), &mut context).unwrap());
    assert!(compare::less_or_equal(&number(15), &number(15), &mut context).unwrap());
    assert!(compare::greater(&number(15), &number(1), &mut context).unwrap());
    assert!(compare::greater_or_equal(&number(15), &number(1), &mut context).unwrap());
    assert!(compare::greater_or_equal(&number(15), &number(15), &mut context).unwrap());
    assert!(compare::not_equal(&number(1), &number(15), &mut context).unwrap());

    assert!(compare::less(&text("a"), &text("b"), &mut context).unwrap());
    assert!(compare::greater(&text("b"), &text("a"), &mut context).unwrap());

    assert!(compare::less(&boolean(false), &boolean(true), &mut context).unwrap());
    assert!(!compare::less(&boolean(true), &boolean(true), &mut context).unwrap());

    // Ordering never accepts empty handles, not even two of them.
    let none = ObjectHolder::none();
    assert!(compare::less(&none, &none, &mut context).is_err());
    assert!(compare::greater(&none, &none, &mut context).is_err());
    assert!(compare::less_or_equal(&none, &none, &mut context).is_err());
    assert!(compare::greater_or_equal(&none, &none, &mut context).is_err());
    assert!(compare::less(&none, &number(3), &mut context).is_err());
}

/// Builds a class whose `__eq__` and `__lt__` always answer the given
/// booleans, mirroring how the derived relations are defined.
fn comparable(eq: bool, lt: bool) -> Rc<Class> {
    class("Comparable",
          vec![method("__eq__", &["other"], Statement::BoolConst(eq)),
               method("__lt__", &["other"], Statement::BoolConst(lt))],
          None)
}

#[test]
fn derived_relations_follow_eq_and_lt() {
    let mut context = DummyContext::new();
    let table = [
        // (eq, lt, not_equal, greater, less_or_equal, greater_or_equal)
        (true, false, false, false, true, true),
        (false, true, true, false, true, false),
        (false, false, true, true, false, true),
    ];

    for (eq, lt, ne, gt, le, ge) in table {
        let lhs = instance_of(&comparable(eq, lt));
        let rhs = number(3);
        assert_eq!(compare::equal(&lhs, &rhs, &mut context).unwrap(), eq);
        assert_eq!(compare::less(&lhs, &rhs, &mut context).unwrap(), lt);
        assert_eq!(compare::not_equal(&lhs, &rhs, &mut context).unwrap(), ne);
        assert_eq!(compare::greater(&lhs, &rhs, &mut context).unwrap(), gt);
        assert_eq!(compare::less_or_equal(&lhs, &rhs, &mut context).unwrap(), le);
        assert_eq!(compare::greater_or_equal(&lhs, &rhs, &mut context).unwrap(), ge);
    }
}

#[test]
fn instances_without_comparison_methods_are_incomparable() {
    let mut context = DummyContext::new();
    let plain = class("Plain", Vec::new(), None);
    let lhs = instance_of(&plain);
    let rhs = lhs.share();

    assert!(compare::equal(&lhs, &rhs, &mut context).is_err());
    assert!(compare::not_equal(&lhs, &rhs, &mut context).is_err());
    assert!(compare::less(&lhs, &rhs, &mut context).is_err());
    assert!(compare::greater(&lhs, &rhs, &mut context).is_err());
    assert!(compare::less_or_equal(&lhs, &rhs, &mut context).is_err());
    assert!(compare::greater_or_equal(&lhs, &rhs, &mut context).is_err());
}

#[test]
fn method_resolution_walks_the_inheritance_chain() {
    let mut context = DummyContext::new();

    let base = class("Base",
                     vec![method("test", &["arg1", "arg2"], Statement::NumericConst(123)),
                          method("test_2", &["arg1"], Statement::NumericConst(456))],
                     None);
    let child = class("Child",
                      vec![method("test",
                                  &["arg1_child", "arg2_child"],
                                  Statement::StringConst("child".to_string()))],
                      Some(&base));

    let holder = instance_of(&child);
    let object = holder.object().unwrap();
    let instance = object.as_instance().unwrap();

    // The override wins at its own arity.
    assert!(instance.has_method("test", 2));
    let result = instance.call(&holder, "test", &[text("a"), text("b")], &mut context).unwrap();
    assert_eq!(result.object().unwrap().as_str(), Some("child"));

    // Methods the child does not declare come from the base.
    assert!(instance.has_method("test_2", 1));
    let result = instance.call(&holder, "test_2", &[text(":)")], &mut context).unwrap();
    assert_eq!(result.object().unwrap().as_number(), Some(456));

    // A known name at the wrong arity is an arity mismatch, not an
    // unknown method.
    assert!(!instance.has_method("test", 1));
    let result = instance.call(&holder, "test", &[ObjectHolder::none()], &mut context);
    assert!(matches!(result,
                     Err(Interrupt::Failure(RuntimeError::ArityMismatch { found: 1, .. }))));

    // An unknown name is reported as such.
    assert!(!instance.has_method("missing", 0));
    let result = instance.call(&holder, "missing", &[], &mut context);
    assert!(matches!(result, Err(Interrupt::Failure(RuntimeError::UnknownMethod { .. }))));
}

#[test]
fn method_calls_bind_self_and_parameters() {
    let mut context = DummyContext::new();

    let getter = class("Getter",
                       vec![method("get",
                                   &[],
                                   Statement::MethodBody {
                                       body: Box::new(Statement::Return {
                                           value: Box::new(Statement::VariableValue {
                                               dotted_ids: vec!["self".to_string(),
                                                                "x".to_string()],
                                           }),
                                       }),
                                   }),
                            method("echo",
                                   &["value"],
                                   Statement::MethodBody {
                                       body: Box::new(Statement::Return {
                                           value: Box::new(Statement::VariableValue {
                                               dotted_ids: vec!["value".to_string()],
                                           }),
                                       }),
                                   })],
                       None);

    let holder = instance_of(&getter);
    let object = holder.object().unwrap();
    let instance = object.as_instance().unwrap();
    instance.fields_mut().insert("x".to_string(), number(42));

    let result = instance.call(&holder, "get", &[], &mut context).unwrap();
    assert_eq!(result.object().unwrap().as_number(), Some(42));

    let result = instance.call(&holder, "echo", &[text("abc")], &mut context).unwrap();
    assert_eq!(result.object().unwrap().as_str(), Some("abc"));
}

#[test]
fn aliasing_handles_observe_field_mutations() {
    let plain = class("Plain", Vec::new(), None);
    let owner = instance_of(&plain);
    let alias = owner.share();

    {
        let object = alias.object().unwrap();
        object.as_instance().unwrap().fields_mut().insert("value".to_string(), number(1));
    }

    let object = owner.object().unwrap();
    let field = object.as_instance().unwrap().fields().get("value").cloned().unwrap();
    assert_eq!(field.object().unwrap().as_number(), Some(1));
}

#[test]
fn printing_values() {
    fn printed(value: &ObjectHolder) -> String {
        let mut context = DummyContext::new();
        value.print(&mut context).unwrap();
        context.contents()
    }

    assert_eq!(printed(&number(127)), "127");
    assert_eq!(printed(&text("hello!")), "hello!");
    assert_eq!(printed(&boolean(true)), "True");
    assert_eq!(printed(&boolean(false)), "False");
    assert_eq!(printed(&ObjectHolder::none()), "None");
    assert_eq!(printed(&ObjectHolder::own(Object::None)), "None");

    let base = class("Base", Vec::new(), None);
    assert_eq!(printed(&ObjectHolder::own(Object::Class(Rc::clone(&base)))), "Class Base");

    // An instance without __str__ prints an identity token.
    assert!(!printed(&instance_of(&base)).is_empty());

    // An instance with __str__ prints whatever the method returns.
    let pretty = class("Pretty",
                       vec![method("__str__", &[], Statement::StringConst("pretty".to_string()))],
                       None);
    assert_eq!(printed(&instance_of(&pretty)), "pretty");
}
