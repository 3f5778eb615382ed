use super::*;
use crate::sink::BufferSink;
use pretty_assertions::assert_eq;

fn run(source: &str) -> (Interpreter, Arc<BufferSink>, RunReport) {
    run_with(BufferSink::new(), source)
}

fn run_with(sink: BufferSink, source: &str) -> (Interpreter, Arc<BufferSink>, RunReport) {
    let sink = Arc::new(sink);
    let mut interpreter = Interpreter::new(sink.clone());
    let report = interpreter.execute(source);
    (interpreter, sink, report)
}

#[test]
fn blank_and_comment_lines_are_skipped() {
    let (_, sink, report) = run("\n# a comment\n   \n   # indented comment\n");
    assert!(sink.lines().is_empty());
    assert_eq!(report.executed, 0);
    assert!(report.is_clean());
}

#[test]
fn assignment_traces_and_binds() {
    let (interp, sink, _) = run("hp = 100\nname = \"Ada\"");
    assert_eq!(interp.variable("hp"), Some(&Value::number(100.0)));
    assert_eq!(sink.lines(), vec!["[var] hp = 100", "[var] name = Ada"]);
}

#[test]
fn assignment_reads_current_environment() {
    let (interp, _, _) = run("x = 1\nx = x + 1");
    assert_eq!(interp.variable("x"), Some(&Value::string("11")));
}

#[test]
fn var_and_let_prefixes() {
    let (interp, _, _) = run("var a = 1\nlet b = [1, 2]");
    assert_eq!(interp.variable("a"), Some(&Value::number(1.0)));
    assert_eq!(
        interp.variable("b"),
        Some(&Value::array(vec![Value::number(1.0), Value::number(2.0)]))
    );
}

#[test]
fn right_hand_side_calls_are_invoked() {
    let (interp, sink, _) = run("xs = [3, 1, 2]\nn = len(xs)\nsorted = sort(xs)");
    assert_eq!(interp.variable("n"), Some(&Value::number(3.0)));
    assert_eq!(sink.lines().last().map(String::as_str), Some("[var] sorted = [1, 2, 3]"));
}

#[test]
fn mutator_statement_updates_the_variable() {
    let (interp, sink, _) = run("xs = [1, 2]\npush(xs, 3)\nlast = pop(xs)\npop(xs)");
    assert_eq!(interp.variable("last"), Some(&Value::number(3.0)));
    assert_eq!(interp.variable("xs"), Some(&Value::array(vec![Value::number(1.0)])));
    assert_eq!(sink.lines()[1], "[call] push([1, 2], 3) = [1, 2, 3]");
}

#[test]
fn map_mutators_update_the_variable() {
    let (interp, _, _) = run("p = map(\"hp\", 10)\nset(p, \"mp\", 5)\ndelete(p, \"hp\")\nks = keys(p)");
    assert_eq!(interp.variable("ks"), Some(&Value::array(vec![Value::string("mp")])));
}

#[test]
fn nested_mutator_updates_the_variable() {
    let (interp, sink, _) = run("xs = [1, 2]\nprint(pop(xs))\nn = len(xs)");
    assert_eq!(sink.lines()[1], "2");
    assert_eq!(interp.variable("n"), Some(&Value::number(1.0)));
}

#[test]
fn literal_receivers_are_not_rebound() {
    let (interp, _, report) = run("ys = push([1], 2)\nzs = [5]\nsorted = sort(zs)\npush(unbound, 1)");
    assert_eq!(
        interp.variable("ys"),
        Some(&Value::array(vec![Value::number(1.0), Value::number(2.0)]))
    );
    assert_eq!(interp.variable("zs"), Some(&Value::array(vec![Value::number(5.0)])));
    assert_eq!(interp.variable("unbound"), None);
    assert!(report.is_clean());
}

#[test]
fn nested_call_arguments_are_invoked() {
    let (_, sink, _) = run("print(len([1, 2]), max(3, 9))");
    assert_eq!(sink.lines(), vec!["2 9"]);
}

#[test]
fn call_trace_shows_arguments_and_result() {
    let (_, sink, _) = run("abs(-3)");
    assert_eq!(sink.lines(), vec!["[call] abs(-3) = 3"]);
}

#[test]
fn undefined_function_is_a_warning() {
    let (_, sink, report) = run("fly(\"high\")\nprint(\"still running\")");
    assert_eq!(
        sink.lines(),
        vec!["[warn] undefined function: fly", "still running"]
    );
    assert!(report.is_clean());
}

#[test]
fn input_uses_the_sink_prompt() {
    let (interp, _, _) = run_with(BufferSink::with_inputs(["Ada"]), "name = input(\"Name: \")");
    assert_eq!(interp.variable("name"), Some(&Value::string("Ada")));
}

#[test]
fn thrown_error_outside_try_is_reported_per_line() {
    let (_, sink, report) = run("throw(\"bad\")\nprint(\"next\")");
    assert_eq!(sink.lines(), vec!["[error] line 1: bad", "next"]);
    assert_eq!(report.errors, vec![LineError::new(1, crate::errors::thrown("bad"))]);
}

#[test]
fn import_merges_module_functions() {
    let (interp, sink, _) = run("spawn_player(\"Ada\")\nimport game\nhero = spawn_player(\"Ada\")");
    assert_eq!(sink.lines()[0], "[warn] undefined function: spawn_player");
    assert_eq!(sink.lines()[1], "[import] game (5 functions)");
    assert!(interp.state().imported.contains("game"));
    assert!(matches!(interp.variable("hero"), Some(Value::Map(_))));
}

#[test]
fn missing_module_is_a_warning() {
    let (interp, sink, report) = run("import physics");
    assert_eq!(sink.lines(), vec!["[warn] module not found: physics"]);
    assert!(interp.state().imported.is_empty());
    assert!(report.is_clean());
}

#[test]
fn declarations_are_acknowledged_and_skipped() {
    let source = "fn greet(name) {\n    print(\"inside\")\n}\nprint(\"outside\")";
    let (_, sink, _) = run(source);
    assert_eq!(sink.lines(), vec!["[decl] fn greet(name)", "outside"]);
}

#[test]
fn expression_lines_echo_non_empty_values() {
    let (_, sink, _) = run("x = 5\nx\n\"\"\n[1, 2]");
    assert_eq!(sink.lines(), vec!["[var] x = 5", "[eval] 5", "[eval] [1, 2]"]);
}

#[test]
fn catch_binding_receives_the_message() {
    let source = "try {\n  throw(\"oops\")\n} catch (e) {\n  print(e, error, 错误)\n}";
    let (interp, sink, report) = run(source);
    assert_eq!(sink.lines(), vec!["oops oops oops"]);
    assert_eq!(interp.variable("e"), Some(&Value::string("oops")));
    assert!(report.is_clean());
}

#[test]
fn try_without_error_skips_catch() {
    let source = "try {\n  print(\"fine\")\n} catch {\n  print(\"never\")\n} finally {\n  print(\"done\")\n}";
    let (_, sink, _) = run(source);
    assert_eq!(sink.lines(), vec!["fine", "done"]);
}

#[test]
fn try_stops_at_first_error() {
    let source = "try {\n  throw(\"first\")\n  print(\"skipped\")\n} catch {\n  print(error)\n}";
    let (_, sink, _) = run(source);
    assert_eq!(sink.lines(), vec!["first"]);
}

#[test]
fn try_finally_without_catch_reraises() {
    let source = "try {\n  throw(\"boom\")\n} finally {\n  print(\"cleanup\")\n}\nprint(\"after\")";
    let (_, sink, report) = run(source);
    assert_eq!(sink.lines(), vec!["cleanup", "[error] line 2: boom", "after"]);
    assert_eq!(report.errors.len(), 1);
}

#[test]
fn error_in_catch_escapes_after_finally() {
    let source = "try {\n  throw(\"a\")\n} catch {\n  assert(false, \"b\")\n} finally {\n  print(\"f\")\n}";
    let (_, sink, _) = run(source);
    assert_eq!(sink.lines(), vec!["f", "[error] line 4: assertion failed: b"]);
}

#[test]
fn one_line_try_runs_its_body_and_the_lines_after() {
    let (interp, sink, report) = run("try { x = 1 }\nprint(\"after\")\nprint(\"later\")");
    assert_eq!(interp.variable("x"), Some(&Value::number(1.0)));
    assert_eq!(sink.lines(), vec!["[var] x = 1", "after", "later"]);
    assert!(report.is_clean());
}

#[test]
fn one_line_catch_handles_the_error() {
    let source = "try {\n  throw(\"boom\")\n} catch { print(error) }\nprint(\"after\")";
    let (_, sink, report) = run(source);
    assert_eq!(sink.lines(), vec!["boom", "after"]);
    assert!(report.is_clean());
}

#[test]
fn one_line_try_error_keeps_its_line_number() {
    let source = "print(\"start\")\ntry { throw(\"bad\") }\nfinally { print(\"f\") }\nprint(\"end\")";
    let (_, sink, report) = run(source);
    assert_eq!(sink.lines(), vec!["start", "f", "[error] line 2: bad", "end"]);
    assert_eq!(report.errors.len(), 1);
}

#[test]
fn nested_try_rejects_the_whole_construct() {
    let source = "try {\n  try {\n    print(\"inner\")\n  } catch {\n  }\n  print(\"outer\")\n} catch {\n  print(\"caught\")\n}\nprint(\"after\")";
    let (_, sink, report) = run(source);
    assert_eq!(
        sink.lines(),
        vec![
            "[error] line 2: nested try block at line 2 is not supported",
            "after"
        ]
    );
    assert_eq!(report.errors.len(), 1);
}

#[test]
fn orphan_catch_is_skipped_with_a_warning() {
    let (_, sink, _) = run("catch {\n  print(\"x\")\n}\nprint(\"y\")");
    assert_eq!(sink.lines(), vec!["[warn] line 1: catch without try", "y"]);
}

#[test]
fn evaluate_invokes_registered_functions() {
    let mut interp = Interpreter::new(crate::sink::silent_sink());
    interp.execute("xs = [1, 2, 3]");
    assert_eq!(interp.evaluate("len(xs)"), Ok(Value::number(3.0)));
    assert_eq!(interp.evaluate("unknown_fn(1)"), Ok(Value::string("unknown_fn(1)")));
    assert_eq!(
        interp.evaluate("safe_divide(1, 0)"),
        Err(crate::errors::division_by_zero())
    );
}

#[test]
fn state_persists_across_executions() {
    let sink = Arc::new(BufferSink::new());
    let mut interp = Interpreter::new(sink.clone());
    interp.execute("import text\nscore = 1");
    interp.execute("shout = upper(\"hi\")\nscore = score + 0");
    assert_eq!(interp.variable("shout"), Some(&Value::string("HI")));
    assert_eq!(interp.variable("score"), Some(&Value::string("10")));
}
