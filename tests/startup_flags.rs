// tests/startup_flags.rs

//! Steps capture the process startup state. Runs in its own test binary
//! because the state can only be installed once per process.

use clap::Parser;
use serde_json::json;
use stepwise::cli::CliArgs;
use stepwise::{Step, startup};
use stepwise_test_utils::{MemorySink, RecordingHooks};

#[test]
fn begin_and_init_capture_the_installed_invocation() {
    let args = CliArgs::try_parse_from([
        "stepwise",
        "--script",
        "ci.toml",
        "--flag",
        "is_it_cricket=true",
        "--flag",
        "team=blue",
        "zero",
        "one",
    ])
    .unwrap();
    assert!(startup::install(args.invocation()));
    assert!(!startup::install(Default::default()), "first install wins");

    let mut s = Step::begin("startup").with_logger(MemorySink::new()).on_halt(|_| {});
    assert_eq!(s.flags().get("is_it_cricket"), Some(&json!(true)));
    assert_eq!(s.flags().get("script"), Some(&json!("ci.toml")));
    assert_eq!(s.args(), ["zero", "one"]);
    assert_eq!(s.sexpand("{{flag.team}}-{{arg.[1]}}"), "blue-one");

    s.set("temp", "x").init(RecordingHooks::new(), "reinit");
    assert!(s.vars().get("temp").is_none());
    assert_eq!(s.flags().get("team"), Some(&json!("blue")));
    assert_eq!(s.args().len(), 2);

    let hooked = Step::with_hooks("hooked", RecordingHooks::new()).on_halt(|_| {});
    assert_eq!(hooked.description(), "hooked");
    assert_eq!(hooked.args(), ["zero", "one"]);
}
