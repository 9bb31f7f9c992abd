// tests/script_runner.rs

mod common;

use std::io::Write;
use std::path::PathBuf;

use common::{step, step_with_shell};
use serde_json::json;
use stepwise::config::{StepConfig, load_and_validate};
use stepwise::errors::StepError;
use stepwise::runner;
use stepwise_test_utils::FakeShell;
use stepwise_test_utils::builders::ScriptBuilder;
use tempfile::NamedTempFile;

fn script_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn script_steps_map_onto_operators() {
    let shell = FakeShell::new().with_output("git rev-parse --short HEAD", "abc123\n");
    let (mut s, fx) = step_with_shell("release", shell);
    let script = ScriptBuilder::new()
        .continue_on_error(true)
        .set("app", "api")
        .step(StepConfig::Sbash {
            cmd: "git rev-parse --short HEAD".to_string(),
            into: Some("rev".to_string()),
        })
        .step(StepConfig::Sexpand {
            template: "{{var.app}}:{{var.rev}}".to_string(),
            into: "image".to_string(),
        })
        .and("push")
        .bash("docker push {{var.image}}")
        .step(StepConfig::Expand {
            template: "image={{var.image}}".to_string(),
            file: PathBuf::from("release.env"),
        })
        .build();

    runner::configure(&mut s, script.config());
    runner::play(&mut s, script.steps());

    assert!(!s.is_failed(), "{:?}", s.cause());
    assert_eq!(s.description(), "push");
    assert_eq!(s.get_string_var("image"), "api:abc123");
    assert_eq!(
        fx.shell.commands(),
        vec!["git rev-parse --short HEAD", "docker push api:abc123"]
    );
    assert_eq!(fx.fs.contents("release.env"), Some(b"image=api:abc123".to_vec()));
}

#[test]
fn captured_output_is_stored_verbatim() {
    let shell = FakeShell::new().with_output("cat template.hbs", "Hi {{name}}\n");
    let (mut s, fx) = step_with_shell("capture", shell);
    let script = ScriptBuilder::new()
        .step(StepConfig::Sbash {
            cmd: "cat template.hbs".to_string(),
            into: Some("body".to_string()),
        })
        .step(StepConfig::Sexpand {
            template: "{{{{raw}}}}{{var.kept}}{{{{/raw}}}}".to_string(),
            into: "literal".to_string(),
        })
        .build();

    runner::configure(&mut s, script.config());
    runner::play(&mut s, script.steps());

    assert!(!s.is_failed(), "{:?}", s.cause());
    assert_eq!(s.vars().get("body"), Some(&json!("Hi {{name}}")));
    assert_eq!(s.vars().get("literal"), Some(&json!("{{var.kept}}")));
    assert!(fx.sink.contains("[Capture"));
}

#[test]
fn fail_fast_script_halts_at_the_failing_entry() {
    let shell = FakeShell::new().failing_on("make test", 2);
    let (mut s, fx) = step_with_shell("ci", shell);
    let script = ScriptBuilder::new()
        .bash("make build")
        .bash("make test")
        .bash("make deploy")
        .build();

    runner::configure(&mut s, script.config());
    runner::play(&mut s, script.steps());

    assert!(!s.continues_on_error());
    assert_eq!(fx.shell.commands(), vec!["make build", "make test"]);
    assert_eq!(fx.halt_count(), 1);
}

#[test]
fn recover_entry_resumes_a_lenient_script() {
    let (mut s, fx) = step("lenient");
    let script = ScriptBuilder::new()
        .continue_on_error(true)
        .fail("first half broke")
        .bash("echo skipped")
        .recover("second half")
        .bash("echo runs")
        .build();

    runner::configure(&mut s, script.config());
    runner::play(&mut s, script.steps());

    assert!(!s.is_failed());
    assert_eq!(fx.shell.commands(), vec!["echo runs"]);
    assert!(fx.sink.contains("ignoring failure of 'lenient' (status 1, first half broke)"));
}

#[test]
fn config_applies_trace_settings() {
    let (mut s, _fx) = step("traced");
    let script = ScriptBuilder::new().trace_length(12).bash("true").build();

    runner::configure(&mut s, script.config());

    assert_eq!(s.vars().get("trace_length"), Some(&json!(12)));
    assert_eq!(s.vars().get("trace"), Some(&json!(true)));
}

#[test]
fn distinct_entry_stores_sorted_values() {
    let (mut s, fx) = step("distinct");
    fx.fs
        .add_file("hosts.csv", "host,region\na,us\nb,eu\nc,us\nd,\n");
    let script = ScriptBuilder::new()
        .step(StepConfig::Distinct {
            file: PathBuf::from("hosts.csv"),
            column: "region".to_string(),
            into: "regions".to_string(),
        })
        .bash("deploy {{#each var.regions}}{{this}} {{/each}}")
        .build();

    runner::configure(&mut s, script.config());
    runner::play(&mut s, script.steps());

    assert!(!s.is_failed(), "{:?}", s.cause());
    assert_eq!(s.vars().get("regions"), Some(&json!(["eu", "us"])));
    assert_eq!(fx.shell.commands(), vec!["deploy eu us "]);
}

#[test]
fn distinct_on_an_unknown_column_fails() {
    let (mut s, fx) = step("distinct");
    fx.fs.add_file("hosts.csv", "host\na\n");
    let script = ScriptBuilder::new()
        .continue_on_error(true)
        .step(StepConfig::Distinct {
            file: PathBuf::from("hosts.csv"),
            column: "zone".to_string(),
            into: "zones".to_string(),
        })
        .build();

    runner::configure(&mut s, script.config());
    runner::play(&mut s, script.steps());

    assert!(matches!(s.cause(), Some(StepError::Table(_))));
    assert!(s.vars().get("zones").is_none());
}

#[test]
fn loads_a_script_file_from_disk() {
    let file = script_file(
        r#"
[config]
description = "nightly"
continue_on_error = true
timeout = "2m"

[[step]]
set = { name = "when", value = "tonight" }

[[step]]
bash = "echo {{var.when}}"
"#,
    );

    let script = load_and_validate(file.path()).unwrap();

    assert_eq!(script.config().description, "nightly");
    assert!(script.config().continue_on_error);
    assert_eq!(script.timeout(), Some(std::time::Duration::from_secs(120)));
    assert_eq!(script.steps().len(), 2);
    assert_eq!(runner::shell_for(&script).timeout(), script.timeout());
}

#[test]
fn invalid_scripts_return_configuration_errors() {
    let cases = [
        ("no steps", "[config]\ntrace = true\n", "at least one [[step]]"),
        (
            "bad name",
            "[[step]]\nsbash = { cmd = \"date\", into = \"1st\" }\n",
            "invalid variable name '1st'",
        ),
        (
            "bad timeout",
            "[config]\ntimeout = \"fast\"\n[[step]]\nbash = \"true\"\n",
            "invalid [config].timeout",
        ),
    ];

    for (name, contents, expected) in cases {
        let file = script_file(contents);
        match load_and_validate(file.path()) {
            Err(StepError::ConfigError(msg)) => {
                assert!(msg.contains(expected), "case '{name}': got {msg}")
            }
            other => panic!("case '{name}': expected ConfigError, got {other:?}"),
        }
    }
}

#[test]
fn toml_syntax_errors_are_reported_as_such() {
    let file = script_file("[[step]\nbash = 1\n");
    let result = load_and_validate(file.path());
    assert!(matches!(result, Err(StepError::TomlError(_))), "{result:?}");
}
