//! CLI integration tests using assert_cmd
//!
//! End-to-end runs use stand-in `puppet` and `rpm` shell scripts that share
//! a package list file, so the agent "installs" a package between the two
//! snapshots.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get a command instance for the pupctl binary, isolated from the caller's
/// environment and config directory
fn pupctl_cmd(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("pupctl").expect("Failed to find pupctl binary");
    cmd.env_remove("PUPCTL_AGENT_BIN")
        .env_remove("PUPCTL_RPM_BIN")
        .env_remove("PUPCTL_CONFIG")
        .env_remove("RUST_LOG")
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"));
    cmd
}

#[test]
fn test_help_command() {
    let home = TempDir::new().expect("Failed to create temp dir");
    pupctl_cmd(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "pupctl - run the puppet agent and report the package delta",
        ));
}

#[test]
fn test_version_command() {
    let home = TempDir::new().expect("Failed to create temp dir");
    pupctl_cmd(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pupctl"));
}

#[test]
fn test_invalid_state_rejected() {
    let home = TempDir::new().expect("Failed to create temp dir");
    pupctl_cmd(&home)
        .arg("restart")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "value of state must be one of: enabled, disabled, run",
        ));
}

#[test]
fn test_missing_agent_binary_fails() {
    let home = TempDir::new().expect("Failed to create temp dir");
    pupctl_cmd(&home)
        .args(["enable", "--agent-bin", "/nonexistent/pupctl-test/puppet"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to enable the agent"));
}

#[test]
fn test_missing_agent_binary_json_failure() {
    let home = TempDir::new().expect("Failed to create temp dir");
    pupctl_cmd(&home)
        .args(["disable", "--json", "--agent-bin", "/nonexistent/pupctl-test/puppet"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"failed\": true"));
}

#[test]
fn test_explicit_missing_config_fails() {
    let home = TempDir::new().expect("Failed to create temp dir");
    pupctl_cmd(&home)
        .args(["run", "--config"])
        .arg(home.path().join("absent.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}

#[cfg(unix)]
mod scripted {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};

    const PUPPET_SCRIPT: &str = r#"#!/bin/sh
case "$*" in
  *--test*)
    echo "Info: Using configured environment 'production'"
    echo "Notice: Ignoring --listen on onetime run"
    echo "Notice: /Stage[main]/Web/Package[httpd]/ensure: created"
    echo "Notice: db password => hunter2"
    printf 'httpd\t2.4.57\t5.el9\n' >> "@DIR@/packages"
    exit @RC@
    ;;
  *)
    echo "Notice: $*"
    exit 0
    ;;
esac
"#;

    const RPM_SCRIPT: &str = r#"#!/bin/sh
cat "@DIR@/packages"
"#;

    struct Fixture {
        dir: TempDir,
        puppet: PathBuf,
        rpm: PathBuf,
    }

    fn write_script(path: &Path, content: &str) {
        fs::write(path, content).expect("Failed to write script");
        fs::set_permissions(path, fs::Permissions::from_mode(0o755))
            .expect("Failed to chmod script");
    }

    fn fixture(run_rc: i32) -> Fixture {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let base = dir.path().display().to_string();
        fs::write(dir.path().join("packages"), "bash\t5.1.8\t6.el9\n")
            .expect("Failed to write package list");

        let puppet = dir.path().join("puppet");
        write_script(
            &puppet,
            &PUPPET_SCRIPT
                .replace("@DIR@", &base)
                .replace("@RC@", &run_rc.to_string()),
        );
        let rpm = dir.path().join("rpm");
        write_script(&rpm, &RPM_SCRIPT.replace("@DIR@", &base));

        Fixture { dir, puppet, rpm }
    }

    fn scripted_cmd(fx: &Fixture) -> Command {
        let mut cmd = pupctl_cmd(&fx.dir);
        cmd.arg("--agent-bin")
            .arg(&fx.puppet)
            .arg("--rpm-bin")
            .arg(&fx.rpm);
        cmd
    }

    #[test]
    fn test_run_prints_sanitized_output_and_delta() {
        let fx = fixture(2);
        scripted_cmd(&fx)
            .arg("run")
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "Notice: /Stage[main]/Web/Package[httpd]/ensure: created",
            ))
            .stdout(predicate::str::contains("************Password filtered out************"))
            .stdout(predicate::str::contains("This is the RPM delta\n+httpd-2.4.57-5.el9\n"))
            .stdout(predicate::str::contains("Info:").not())
            .stdout(predicate::str::contains("hunter2").not())
            .stdout(predicate::str::contains("Ignoring --listen").not());
    }

    #[test]
    fn test_run_without_package_diff() {
        let fx = fixture(2);
        scripted_cmd(&fx)
            .args(["run", "--package-diff", "no"])
            .assert()
            .success()
            .stdout(predicate::str::contains("RPM delta").not());
    }

    #[test]
    fn test_run_json_report() {
        let fx = fixture(2);
        let output = scripted_cmd(&fx)
            .args(["run", "--json"])
            .output()
            .expect("Failed to run pupctl");
        assert!(output.status.success());

        let report: serde_json::Value =
            serde_json::from_slice(&output.stdout).expect("stdout is not JSON");
        assert_eq!(report["changed"], true);
        assert_eq!(report["failed"], false);
        assert_eq!(report["rc"], 0);
        assert_eq!(report["outcome"], "changed");
        let lines = report["stdout_lines"].as_array().expect("stdout_lines");
        assert!(lines.iter().any(|l| l == "+httpd-2.4.57-5.el9"));
    }

    #[test]
    fn test_run_with_errors_exits_nonzero() {
        let fx = fixture(6);
        scripted_cmd(&fx)
            .arg("run")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Puppet encountered errors (rc 6)"));
    }

    #[test]
    fn test_disabled_alias() {
        let fx = fixture(2);
        scripted_cmd(&fx)
            .arg("disabled")
            .assert()
            .success()
            .stdout(predicate::str::diff("Notice: agent --disable\n"));
    }

    #[test]
    fn test_config_file_exit_codes() {
        let fx = fixture(3);
        let config = fx.dir.path().join("pupctl.json");
        fs::write(&config, r#"{"package_diff": false, "exit_codes": {"changed": 3}}"#)
            .expect("Failed to write config");

        scripted_cmd(&fx)
            .args(["run", "--json", "--config"])
            .arg(&config)
            .assert()
            .success()
            .stdout(predicate::str::contains("\"outcome\": \"changed\""))
            .stdout(predicate::str::contains("RPM delta").not());
    }
}
