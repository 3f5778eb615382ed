use super::*;
use pretty_assertions::assert_eq;

#[test]
fn buffer_sink_captures_lines_in_order() {
    let sink = BufferSink::new();
    sink.write_line("hello");
    sink.write_line("world");
    assert_eq!(sink.lines(), vec!["hello", "world"]);
    assert_eq!(sink.output(), "hello\nworld\n");
}

#[test]
fn buffer_sink_clear_empties_buffer() {
    let sink = BufferSink::new();
    sink.write_line("hello");
    assert!(!sink.output().is_empty());
    sink.clear();
    assert!(sink.output().is_empty());
}

#[test]
fn buffer_sink_show_is_recorded() {
    let sink = BufferSink::new();
    assert!(!sink.was_shown());
    sink.show();
    assert!(sink.was_shown());
}

#[test]
fn buffer_sink_answers_prompts_from_queue() {
    let sink = BufferSink::with_inputs(["Ada", "42"]);
    assert_eq!(sink.prompt_input("Name: "), Some("Ada".to_string()));
    assert_eq!(sink.prompt_input("Age: "), Some("42".to_string()));
    assert_eq!(sink.prompt_input("More: "), None);
    assert_eq!(sink.prompts(), vec!["Name: ", "Age: ", "More: "]);
}

#[test]
fn silent_sink_discards_output() {
    let sink = silent_sink();
    sink.write_line("hello");
    sink.clear();
    sink.show();
    assert_eq!(sink.prompt_input("anything"), None);
}

#[test]
fn stdout_sink_clear_is_noop() {
    let sink = StdoutSink;
    // Should not panic
    sink.clear();
}

#[test]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
fn buffer_sink_is_thread_safe() {
    use std::thread;

    let sink = Arc::new(BufferSink::new());
    let sink2 = Arc::clone(&sink);

    let t1 = thread::spawn(move || {
        for _ in 0..100 {
            sink2.write_line("a");
        }
    });

    for _ in 0..100 {
        sink.write_line("b");
    }

    t1.join().unwrap();

    assert_eq!(sink.lines().len(), 200);
}
