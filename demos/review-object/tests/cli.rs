use std::path::PathBuf;
use std::process::{Command, Output};

use serde_json::Value;

const UID: &str = "6f4b2a8e-5a0d-4c1e-9b2f-3d7c8e9a0b1c";

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn review(args: &[&str], object: &str) -> Output {
    Command::new(env!("CARGO_BIN_EXE_review-object"))
        .args(args)
        .arg(fixture(object))
        .env("RUST_LOG", "info")
        .env_remove("SPEC_REQUIREMENTS_ACTOR_MARKER")
        .output()
        .expect("spawn review-object")
}

fn report(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap_or_else(|err| {
        panic!(
            "stdout is not a JSON report ({err}):\n{}",
            String::from_utf8_lossy(&output.stdout)
        )
    })
}

#[test]
fn denied_deployment_prints_only_the_report() {
    let output = review(
        &["--operation", "update", "--uid", UID, "--namespace", "shop"],
        "deployment.json",
    );
    assert_eq!(output.status.code(), Some(1));

    let report = report(&output);
    assert_eq!(report["decision"]["kind"], "deny");
    assert_eq!(report["decision"]["contact_propagated"], true);
    assert_eq!(
        report["object"]["spec"]["template"]["metadata"]["labels"]["contact"],
        "hodor"
    );

    let logs = String::from_utf8_lossy(&output.stderr);
    assert!(logs.contains("reviewing object"), "{logs}");
    assert!(logs.contains(UID), "{logs}");
    assert!(logs.contains("shop"), "{logs}");
}

#[test]
fn unmodelled_kind_without_contact_is_denied() {
    let output = review(&[], "secret.json");
    assert_eq!(output.status.code(), Some(1));

    let report = report(&output);
    assert_eq!(report["decision"]["denial"], "missing_contact_label");
    assert_eq!(
        report["decision"]["reason"],
        "Cannot create this resource. It does not have a valid contact label. \
         Please add one and try again."
    );
    assert_eq!(report["object"]["kind"], "Secret");
    assert_eq!(report["object"]["data"]["token"], "c2VjcmV0");
}

#[test]
fn automated_actor_is_allowed() {
    let output = review(&["--user", "kubelet"], "secret.json");
    assert!(output.status.success());
    assert_eq!(report(&output)["decision"]["kind"], "allow");
}

#[test]
fn malformed_uid_is_rejected() {
    let output = review(&["--uid", "not-a-uid"], "secret.json");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid request uid"), "{stderr}");
}
