use assert_cmd::Command;
use predicates::prelude::*;
use std::time::Duration;

#[test]
fn missing_name_is_a_usage_error() {
    Command::cargo_bin("connection_counter")
        .unwrap()
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("<NAME>"));
}

#[test]
fn invalid_name_fails_with_diagnostic() {
    Command::cargo_bin("connection_counter")
        .unwrap()
        .arg("9lives")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid node name '9lives'"));
}

#[test]
fn malformed_parameter_is_rejected() {
    Command::cargo_bin("connection_counter")
        .unwrap()
        .args(["talker", "-p", "qos_depth=5"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("KEY:=VALUE"));
}

#[test]
fn wrong_parameter_type_fails() {
    Command::cargo_bin("connection_counter")
        .unwrap()
        .args(["talker", "-p", "report_period_millis:=fast"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("report_period_millis has invalid type"));
}

#[test]
fn running_node_reports_and_receives() {
    Command::cargo_bin("connection_counter")
        .unwrap()
        .arg("talker")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .timeout(Duration::from_secs(3))
        .assert()
        .interrupted()
        .stdout(predicate::str::contains("Publisher connections: '1'"))
        .stdout(predicate::str::contains("Subscriber connections: '1'"))
        .stdout(predicate::str::contains("Timer connections: '0'"))
        .stdout(predicate::str::contains("Received: 'Hello from talker #1'"));
}
