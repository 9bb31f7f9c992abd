// tests/trace.rs

mod common;

use common::step;

fn line(op: &str, args: &str) -> String {
    format!("[{op:<16} {args}]")
}

#[test]
fn every_hooked_operator_writes_one_trace_line() {
    let (mut s, fx) = step("trace");
    s.set("name", "x").and("next");
    let _ = s.sexpand("{{var.name}}");

    assert_eq!(
        fx.sink.traces(),
        vec![
            line("Set", "name x"),
            line("AND", "next"),
            line("Sexpand", "{{var.name}}"),
        ]
    );
}

#[test]
fn lines_are_cut_to_trace_length() {
    let (mut s, fx) = step("short");
    s.set("trace_length", 20);
    fx.sink.clear();

    s.bash("echo hello world");

    let full = line("Bash", "echo hello world");
    assert_eq!(fx.sink.traces(), vec![format!("{}...", &full[..20])]);
}

#[test]
fn width_counts_characters_not_bytes() {
    let (mut s, fx) = step("unicode");
    s.set("trace_length", 22);
    fx.sink.clear();

    s.set("greeting", "héllo wörld ñ");

    let full = line("Set", "greeting héllo wörld ñ");
    let expected: String = full.chars().take(22).collect::<String>() + "...";
    assert_eq!(fx.sink.traces(), vec![expected]);
}

#[test]
fn short_lines_are_left_alone() {
    let (mut s, fx) = step("fits");
    s.set("trace_length", 200);
    fx.sink.clear();

    s.and("ok");

    assert_eq!(fx.sink.traces(), vec![line("AND", "ok")]);
}

#[test]
fn disabling_trace_silences_later_operators() {
    let (mut s, fx) = step("quiet");
    s.set("trace", false);
    fx.sink.clear();

    s.set("a", "1").and("b").recover("c");

    assert!(fx.sink.traces().is_empty());
}

#[test]
fn non_integer_trace_length_falls_back_to_the_default() {
    let (mut s, fx) = step("fallback");
    s.set("trace_length", "wide");
    fx.sink.clear();

    let long = "x".repeat(100);
    s.bash(&long);

    let traces = fx.sink.traces();
    assert_eq!(traces.len(), 1);
    assert_eq!(traces[0].chars().count(), 80 + 3);
}
