use assert_cmd::Command;
use predicates::str::contains;

fn check() -> Command {
    Command::cargo_bin("check-datapipeline").unwrap()
}

#[test]
fn missing_required_flags_is_a_usage_error() {
    check()
        .assert()
        .failure()
        .stderr(contains("--pipeline-name"))
        .stderr(contains("--status"))
        .stderr(contains("--health"));
}

#[test]
fn help_lists_the_check_flags() {
    check()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("--aws-access-key"))
        .stdout(contains("--aws-region"))
        .stdout(contains("--pipeline-name"));
}

// An invalid pattern is rejected before any remote call, so this runs without
// network access or credentials.
#[test]
fn invalid_status_pattern_exits_unknown() {
    check()
        .args([
            "--pipeline-name",
            "mypipeline",
            "--status",
            "RUNNING(",
            "--health",
            "HEALTHY",
            "-a",
            "AKIAEXAMPLE",
            "-k",
            "secret",
        ])
        .assert()
        .code(3)
        .stdout(contains("Pipeline 'mypipeline' - "))
        .stdout(contains("invalid status pattern"));
}
