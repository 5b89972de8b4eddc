use std::process::{Command, Output};

fn run_report(args: &[&str]) -> Output {
    let output = Command::new(env!("CARGO_BIN_EXE_kernel_report"))
        .args(["--shape", "grid", "--size", "12", "--team-size", "2"])
        .args(args)
        .output()
        .expect("failed to execute kernel_report");
    assert!(
        output.status.success(),
        "kernel_report failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    output
}

fn report_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout is not a JSON report")
}

#[test]
fn verbose_run_prints_kernel_events_to_stderr() {
    let output = run_report(&["--verbose", "--algorithms", "vb_bit"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(stderr.contains("speculative round"), "stderr: {stderr}");
    assert!(stderr.contains("distance-2 coloring complete"), "stderr: {stderr}");

    let report = report_json(&output);
    assert_eq!(report["coloring"][0]["algorithm"], "vb_bit");
    assert_eq!(report["coloring"][0]["valid"], true);
}

#[test]
fn quiet_run_keeps_stderr_free_of_kernel_events() {
    let output = run_report(&[]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("speculative round"), "stderr: {stderr}");

    let report = report_json(&output);
    assert_eq!(report["graph"]["vertices"], 144);
    assert_eq!(report["coloring"].as_array().map(Vec::len), Some(3));
    assert!(report["rcm"]["bandwidth_after"].as_u64() <= report["rcm"]["bandwidth_before"].as_u64());
}

#[test]
fn unknown_algorithm_is_rejected() {
    let output = Command::new(env!("CARGO_BIN_EXE_kernel_report"))
        .args(["--algorithms", "greedy"])
        .output()
        .expect("failed to execute kernel_report");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("greedy"));
}
