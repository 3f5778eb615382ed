use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_define_lookup() {
    let mut env = Environment::new();
    env.define("x", Value::number(42.0));
    assert_eq!(env.lookup("x"), Some(&Value::number(42.0)));
    assert_eq!(env.lookup("y"), None);
}

#[test]
fn test_reassignment_overwrites() {
    let mut env = Environment::new();
    env.define("x", Value::number(1.0));
    let previous = env.define("x", Value::string("two"));
    assert_eq!(previous, Some(Value::number(1.0)));
    assert_eq!(env.lookup("x"), Some(&Value::string("two")));
    assert_eq!(env.len(), 1);
}

#[test]
fn test_names_are_case_sensitive() {
    let mut env = Environment::new();
    env.define("Score", Value::number(1.0));
    assert!(env.contains("Score"));
    assert!(!env.contains("score"));
}

#[test]
fn test_locals_and_globals_split_on_prefix() {
    let mut env = Environment::new();
    env.define("__name__", Value::string("__main__"));
    env.define("hp", Value::number(10.0));
    env.define("_private", Value::Bool(true));

    let locals: Vec<_> = env.locals().map(|(name, _)| name).collect();
    let globals: Vec<_> = env.globals().map(|(name, _)| name).collect();
    assert_eq!(locals, vec!["hp", "_private"]);
    assert_eq!(globals, vec!["__name__"]);
}

#[test]
fn test_remove_keeps_order() {
    let mut env = Environment::new();
    env.define("a", Value::Null);
    env.define("b", Value::Null);
    env.define("c", Value::Null);
    env.remove("b");
    let names: Vec<_> = env.iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["a", "c"]);
}
