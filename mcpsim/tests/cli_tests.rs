use std::io::Write;
use std::process::{Command, Output, Stdio};

fn run_mcpsim(args: &[&str], input: &str) -> Output {
    let mcpsim = env!("CARGO_BIN_EXE_mcpsim");
    let mut child = Command::new(mcpsim)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn mcpsim");
    child
        .stdin
        .take()
        .expect("child stdin")
        .write_all(input.as_bytes())
        .expect("write stdin");
    child.wait_with_output().expect("wait for mcpsim")
}

fn instant_args() -> Vec<&'static str> {
    vec![
        "--delay-min",
        "0",
        "--delay-max",
        "0",
        "--error-rate",
        "0",
    ]
}

#[test]
fn answers_each_line_and_exits_cleanly_on_eof() {
    let input = concat!(
        r#"{"jsonrpc":"2.0","id":1,"method":"initialize"}"#,
        "\n",
        r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
        "\n",
    );
    let output = run_mcpsim(&instant_args(), input);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    let responses: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).expect("response json"))
        .collect();
    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["id"], 1);
    assert_eq!(responses[0]["result"]["protocolVersion"], "2024-11-05");
    assert_eq!(responses[1]["id"], 2);
    assert_eq!(
        responses[1]["result"]["tools"]
            .as_array()
            .expect("tools")
            .len(),
        5
    );
}

#[test]
fn malformed_line_is_answered_and_does_not_stop_the_process() {
    let input = concat!(
        "not valid json\n",
        r#"{"jsonrpc":"2.0","id":3,"method":"prompts/list"}"#,
        "\n",
    );
    let output = run_mcpsim(&instant_args(), input);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let responses: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).expect("response json"))
        .collect();
    assert_eq!(responses.len(), 2);
    assert!(responses[0]["id"].is_null());
    assert_eq!(responses[0]["error"]["code"], -32700);
    assert_eq!(responses[1]["id"], 3);
}

#[test]
fn diagnostics_go_to_stderr_not_stdout() {
    let input = concat!(r#"{"jsonrpc":"2.0","id":1,"method":"initialize"}"#, "\n");
    let output = run_mcpsim(&instant_args(), input);
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("simulator ready"), "stderr: {stderr}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    for line in stdout.lines() {
        serde_json::from_str::<serde_json::Value>(line).expect("stdout carries only responses");
    }
}

#[test]
fn fast_preset_is_accepted() {
    let input = concat!(r#"{"jsonrpc":"2.0","id":7,"method":"resources/list"}"#, "\n");
    let output = run_mcpsim(&["--fast"], input);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let response: serde_json::Value =
        serde_json::from_str(stdout.lines().next().expect("one response")).expect("json");
    assert_eq!(response["id"], 7);
    assert_eq!(
        response["result"]["resources"]
            .as_array()
            .expect("resources")
            .len(),
        4
    );
}

#[test]
fn invalid_configuration_exits_with_usage_error() {
    let output = run_mcpsim(&["--error-rate", "1.5"], "");
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error-rate"));

    let output = run_mcpsim(&["--delay-min", "5", "--delay-max", "1"], "");
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn conflicting_presets_are_rejected_by_the_parser() {
    let output = run_mcpsim(&["--fast", "--slow"], "");
    assert_eq!(output.status.code(), Some(2));
}
