//! End-to-end scenarios for the GameLang interpreter.
//!
//! Each test runs a whole program through `Interpreter::execute` against a
//! capturing `BufferSink` and checks the observable output and environment.

use std::sync::Arc;

use gamelang_eval::{evaluate, BufferSink, Environment, Interpreter, Value};
use pretty_assertions::assert_eq;

fn run(source: &str) -> (Interpreter, Arc<BufferSink>) {
    let sink = Arc::new(BufferSink::new());
    let mut interpreter = Interpreter::new(sink.clone());
    interpreter.execute(source);
    (interpreter, sink)
}

// =============================================================================
// Expression Evaluation
// =============================================================================

mod expressions {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_plus_concatenates() {
        assert_eq!(evaluate("1+2", &Environment::new()), Value::string("12"));
    }

    #[test]
    fn test_quoted_commas_stay_together() {
        assert_eq!(
            evaluate(r#"["a,b", "c"]"#, &Environment::new()),
            Value::array(vec![Value::string("a,b"), Value::string("c")])
        );
    }

    #[test]
    fn test_unbound_name_passes_through() {
        assert_eq!(
            evaluate("undefinedName", &Environment::new()),
            Value::string("undefinedName")
        );
    }
}

// =============================================================================
// Programs
// =============================================================================

mod programs {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_print_hello_world() {
        let (_, sink) = run(r#"print("Hello","World")"#);
        assert_eq!(sink.lines(), vec!["Hello World"]);
    }

    #[test]
    fn test_chinese_print_alias() {
        let (_, sink) = run(r#"打印("Hello", "World")"#);
        assert_eq!(sink.lines(), vec!["Hello World"]);
    }

    #[test]
    fn test_variables_concatenate() {
        let (interp, _) = run("x = 1\ny = 2\nz = x+y");
        assert_eq!(interp.variable("z"), Some(&Value::string("12")));
    }

    #[test]
    fn test_try_catch_finally_order() {
        let source = r#"
print("before")
try {
    throw("boom")
    print("unreachable")
} catch {
    print("caught: " + error)
} finally {
    print("cleanup")
}
print("after")
"#;
        let (_, sink) = run(source);
        assert_eq!(
            sink.lines(),
            vec!["before", "caught: boom", "cleanup", "after"]
        );
    }

    #[test]
    fn test_chinese_block_keywords() {
        let source = "尝试 {\n    抛出(\"失败\")\n} 捕获 {\n    打印(错误)\n} 最终 {\n    打印(\"完成\")\n}";
        let (_, sink) = run(source);
        assert_eq!(sink.lines(), vec!["失败", "完成"]);
    }

    #[test]
    fn test_errors_never_abort_the_run() {
        let source = r#"
safe_divide(1, 0)
nope()
import nowhere
print("end")
"#;
        let (_, sink) = run(source);
        assert_eq!(
            sink.lines(),
            vec![
                "[error] line 2: division by zero",
                "[warn] undefined function: nope",
                "[warn] module not found: nowhere",
                "end",
            ]
        );
    }

    #[test]
    fn test_small_game() {
        let source = r#"
# a tiny game session
import game
hero = spawn_player("Ada")
hp = get(hero, "hp")
inventory = ["sword", "potion"]
inventory = push(inventory, "shield")
count = len(inventory)
assert(has(inventory, "potion"), "potion missing")
print("items:", count)
"#;
        let (interp, sink) = run(source);
        assert_eq!(interp.variable("hp"), Some(&Value::number(100.0)));
        assert_eq!(interp.variable("count"), Some(&Value::number(3.0)));
        assert_eq!(sink.lines().last().map(String::as_str), Some("items: 3"));
    }
}
