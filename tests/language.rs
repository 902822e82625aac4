fn run_program(source: &str) -> String {
    let mut output = Vec::new();
    if let Err(error) = mython::run(source, &mut output) {
        panic!("Script failed:\n{source}\nError: {error}");
    }
    String::from_utf8(output).expect("program output is not UTF-8")
}

fn assert_output(source: &str, expected: &str) {
    assert_eq!(run_program(source), expected, "source:\n{source}");
}

fn assert_failure(source: &str) {
    if mython::run(source, &mut Vec::new()).is_ok() {
        panic!("Script succeeded but was expected to fail:\n{source}");
    }
}

#[test]
fn simple_prints() {
    let source = "
print 57
print 10, 24, -8
print 'hello'
print \"world\"
print True, False
print
print None
";
    assert_output(source, "57\n10 24 -8\nhello\nworld\nTrue False\n\nNone\n");
}

#[test]
fn assignments_rebind_names() {
    let source = "
x = 57
print x
x = 'abc'
print x
y = False
x = y
print x
x = None
print x, y
";
    assert_output(source, "57\nabc\nFalse\nNone False\n");
}

#[test]
fn arithmetics() {
    assert_output("print 1+2+3+4+5, 1*2*3*4*5, 1-2-3-4-5, 36/4/3, 2*5+10/2",
                  "15 120 -13 3 15\n");
    assert_output("print 7/2, 0-7/2", "3 -3\n");
    assert_output("print 'ab' + 'cd'", "abcd\n");
}

#[test]
fn variables_are_pointers() {
    let source = "
class Counter:
  def __init__():
    self.value = 0

  def add():
    self.value = self.value + 1

class Dummy:
  def do_add(counter):
    counter.add()

x = Counter()
y = x

x.add()
y.add()

print x.value

d = Dummy()
d.do_add(x)

print y.value
";
    assert_output(source, "2\n3\n");
}

#[test]
fn comparisons_with_inheritance_and_overloads() {
    let source = "
class Point:
  def __init__(px, py):
    self.px = px
    self.py = py

  def __eq__(other):
    px_bool = (self.px == other.px)
    py_bool = (self.py == other.py)
    return px_bool and py_bool

  def __lt__(other):
    pxy_self = self.px * self.py
    pxy_other = other.px * other.py
    return pxy_self < pxy_other

  def TestOr(value):
    return self.px == value or self.py == value

  def TestAnd(value):
    return self.px == value and self.py == value

  def TestNot(value):
    return not (self.px == value) and not (self.py == value)

class Point2(Point):
  def __init__(px, py):
    self.px = px
    self.py = py

class Point3(Point2):
  def __init__(px, py):
    self.px = px
    self.py = py

p1 = Point(1, 1)
p2 = Point2(2, 2)
p3 = Point3(2, 2)

p4 = None
p5 = None

print (p1 == p2), (p1 != p2), (p2 == p3), (p2 != p3)

print (p1 < p2), (p1 >= p2), (p2 <= p3), (p3 > p1), (p4 == p5)

p5 = Point(1, 2)

print p5.TestOr(0), p5.TestOr(1), p5.TestAnd(1), p5.TestAnd(2), p5.TestNot(6)
";
    assert_output(source,
                  "False True True False\nTrue False True True True\nFalse True False False True\n");
}

#[test]
fn logical_operators_short_circuit() {
    let source = "
class Loud:
  def hit():
    print 'hit'
    return True

t = Loud()
x = False and t.hit()
print x
y = True or t.hit()
print y
z = False or t.hit()
print z
";
    assert_output(source, "False\nTrue\nhit\nTrue\n");
}

#[test]
fn if_else_branches() {
    let source = "
x = 7
if x > 5:
  print 'big'
else:
  print 'small'
if x < 5:
  print 'yes'
else:
  print 'no'
if x:
  print 'truthy'
";
    assert_output(source, "big\nno\ntruthy\n");
}

#[test]
fn return_unwinds_to_its_own_method() {
    let source = "
class Math:
  def magnitude(n):
    if n < 0:
      return 0 - n
    return n

m = Math()
print m.magnitude(-5), m.magnitude(7)
";
    assert_output(source, "5 7\n");
}

#[test]
fn str_builtin_and_str_dispatch() {
    let source = "
class Greeting:
  def __str__():
    return 'hello'

g = Greeting()
print g
print 'say ' + str(g)
x = None
print str(5) + '/' + str(True) + '/' + str(x)
";
    assert_output(source, "hello\nsay hello\n5/True/None\n");
}

#[test]
fn str_dispatch_is_inherited() {
    let source = "
class Base:
  def __str__():
    return 'base'

class Derived(Base):
  def nothing():
    return None

d = Derived()
print d
";
    assert_output(source, "base\n");
}

#[test]
fn add_dispatches_to_special_method() {
    let source = "
class Vec:
  def __init__(x):
    self.x = x

  def __add__(other):
    return self.x + other.x

a = Vec(1)
b = Vec(2)
print a + b
";
    assert_output(source, "3\n");
}

#[test]
fn nested_instances_resolve_dotted_names() {
    let source = "
class Box:
  def __init__(v):
    self.v = v

inner = Box(7)
b = Box(inner)
print b.v.v
";
    assert_output(source, "7\n");
}

#[test]
fn class_redefinition_replaces_the_binding() {
    let source = "
class A:
  def tag():
    return 1

class A:
  def tag():
    return 2

a = A()
print a.tag()
";
    assert_output(source, "2\n");
}

#[test]
fn runtime_failures() {
    assert_failure("print x");
    assert_failure("print 1/0");
    assert_failure("print 1 + 'a'");
    assert_failure("print None + 1");
    assert_failure("print 1 < 'a'");
    assert_failure("print 2000000000 + 2000000000");
    assert_failure("x = 5\nprint x.y");
}

#[test]
fn dispatch_failures() {
    let wrong_arity = "
class P:
  def f(x):
    return x

p = P()
print p.f()
";
    assert_failure(wrong_arity);

    let unknown_method = "
class P:
  def f(x):
    return x

p = P()
print p.g()
";
    assert_failure(unknown_method);
}

#[test]
fn parse_failures() {
    assert_failure("return 5");
    assert_failure("x = ");
    assert_failure("x = 'abc");
    assert_failure("if x:\n   y = 1");
    assert_failure("Missing()");
    assert_failure("class B(Missing):\n  def m():\n    return 1");
}
