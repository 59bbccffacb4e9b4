//! Contract tests for the Yarn operator set

use builtins::StandardLibrary;
use core_types::Value;

fn call(name: &str, args: &[Value]) -> Value {
    StandardLibrary::yarn().call(name, args).unwrap()
}

fn num(n: f64) -> Value {
    Value::Number(n)
}

#[test]
fn test_number_arithmetic() {
    assert_eq!(call("Number.Add", &[num(2.0), num(3.0)]), num(5.0));
    assert_eq!(call("Number.Minus", &[num(2.0), num(3.0)]), num(-1.0));
    assert_eq!(call("Number.Multiply", &[num(2.0), num(3.5)]), num(7.0));
    assert_eq!(call("Number.Divide", &[num(7.0), num(2.0)]), num(3.5));
    assert_eq!(call("Number.Modulo", &[num(7.0), num(3.0)]), num(1.0));
    assert_eq!(call("Number.UnaryMinus", &[num(4.0)]), num(-4.0));
}

#[test]
fn test_number_comparison() {
    let t = Value::Boolean(true);
    let f = Value::Boolean(false);
    assert_eq!(call("Number.EqualTo", &[num(1.0), num(1.0)]), t);
    assert_eq!(call("Number.NotEqualTo", &[num(1.0), num(1.0)]), f);
    assert_eq!(call("Number.GreaterThan", &[num(3.0), num(1.0)]), t);
    assert_eq!(call("Number.GreaterThanOrEqualTo", &[num(1.0), num(1.0)]), t);
    assert_eq!(call("Number.LessThan", &[num(3.0), num(1.0)]), f);
    assert_eq!(call("Number.LessThanOrEqualTo", &[num(3.0), num(1.0)]), f);
}

#[test]
fn test_bool_logic() {
    let t = Value::Boolean(true);
    let f = Value::Boolean(false);
    assert_eq!(call("Bool.And", &[t.clone(), f.clone()]), f);
    assert_eq!(call("Bool.Or", &[t.clone(), f.clone()]), t);
    assert_eq!(call("Bool.Xor", &[t.clone(), t.clone()]), f);
    assert_eq!(call("Bool.Not", &[f.clone()]), t);
    assert_eq!(call("Bool.EqualTo", &[f.clone(), f.clone()]), t);
    assert_eq!(call("Bool.NotEqualTo", &[t.clone(), f.clone()]), t);
}

#[test]
fn test_string_operators() {
    assert_eq!(
        call("String.Add", &[Value::from("foo"), Value::from("bar")]),
        Value::from("foobar")
    );
    assert_eq!(
        call("String.EqualTo", &[Value::from("a"), Value::from("a")]),
        Value::Boolean(true)
    );
    assert_eq!(
        call("String.NotEqualTo", &[Value::from("a"), Value::from("a")]),
        Value::Boolean(false)
    );
}
