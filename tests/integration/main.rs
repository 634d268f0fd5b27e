//! Integration tests for dedupstore

mod scenarios;

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::fs;
    use tempfile::TempDir;

    /// Binary pointed at a config file that does not exist, so defaults apply
    fn dedupstore(dir: &TempDir) -> Command {
        let mut cmd = cargo_bin_cmd!("dedupstore");
        cmd.env("DEDUPSTORE_CONFIG", dir.path().join("config.toml"))
            .env_remove("RUST_LOG");
        cmd
    }

    #[test]
    fn help_displays() {
        let dir = TempDir::new().unwrap();
        dedupstore(&dir)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("write-deduplicating"));
    }

    #[test]
    fn version_displays() {
        let dir = TempDir::new().unwrap();
        dedupstore(&dir)
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("dedupstore"));
    }

    #[test]
    fn write_then_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("idp.xml");

        dedupstore(&dir)
            .args(["write", path.to_str().unwrap(), "--data", "<EntityDescriptor/>"])
            .assert()
            .success()
            .stdout(predicate::str::contains("written"));

        dedupstore(&dir)
            .args(["read", path.to_str().unwrap()])
            .assert()
            .success()
            .stdout("<EntityDescriptor/>");
    }

    #[test]
    fn write_from_stdin() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sp.xml");

        dedupstore(&dir)
            .args(["write", path.to_str().unwrap()])
            .write_stdin("from stdin")
            .assert()
            .success();

        assert_eq!(fs::read_to_string(&path).unwrap(), "from stdin");
    }

    #[test]
    fn missing_input_file_is_not_a_missing_resource() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("idp.xml");
        let input = dir.path().join("no-such-input.xml");

        dedupstore(&dir)
            .args(["write", path.to_str().unwrap(), "--from", input.to_str().unwrap()])
            .assert()
            .failure()
            .stderr(predicate::str::contains("reading input file"))
            .stderr(predicate::str::contains("Resource not found").not())
            .stderr(predicate::str::contains("Write the resource first").not());

        assert!(!path.exists());
    }

    #[test]
    fn cached_repeat_deduplicates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("idp.xml");

        dedupstore(&dir)
            .args(["--cache", "write", path.to_str().unwrap(), "--data", "data", "--repeat", "2"])
            .assert()
            .success()
            .stdout(predicate::str::contains("written").and(predicate::str::contains("unchanged")));
    }

    #[test]
    fn disk_repeat_always_writes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("idp.xml");

        dedupstore(&dir)
            .args(["--no-cache", "write", path.to_str().unwrap(), "--data", "data", "--repeat", "2"])
            .assert()
            .success()
            .stdout(predicate::str::contains("unchanged").not());
    }

    #[test]
    fn config_enables_cache() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.toml"), "[cache]\nenabled = true\n").unwrap();
        let path = dir.path().join("idp.xml");

        dedupstore(&dir)
            .args(["write", path.to_str().unwrap(), "--data", "data", "--repeat", "2"])
            .assert()
            .success()
            .stdout(predicate::str::contains("unchanged"));
    }

    #[test]
    fn read_missing_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.xml");

        for flag in ["--cache", "--no-cache"] {
            dedupstore(&dir)
                .args([flag, "read", path.to_str().unwrap()])
                .assert()
                .failure()
                .stderr(predicate::str::contains("Resource not found"));
        }
    }

    #[test]
    fn stat_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("idp.xml");
        fs::write(&path, "data").unwrap();

        let output = dedupstore(&dir)
            .args(["--cache", "stat", path.to_str().unwrap(), "--format", "json"])
            .output()
            .unwrap();
        assert!(output.status.success());

        let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(report["backend"], "cached");
        assert_eq!(report["exists"], true);
        assert_eq!(report["size"], 4);
        assert!(report["uri"].as_str().unwrap().starts_with("file://"));
    }

    #[test]
    fn stat_missing_reports_absent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.xml");

        dedupstore(&dir)
            .args(["stat", path.to_str().unwrap()])
            .assert()
            .success()
            .stdout(predicate::str::contains("Exists:").and(predicate::str::contains("false")));
    }

    #[test]
    fn invalid_config_reports_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.toml"), "[cache]\nenabled = 3\n").unwrap();

        dedupstore(&dir)
            .args(["config", "show"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid configuration"));
    }

    #[test]
    fn config_path() {
        let dir = TempDir::new().unwrap();
        dedupstore(&dir)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_init_then_show() {
        let dir = TempDir::new().unwrap();

        dedupstore(&dir).args(["config", "init"]).assert().success();
        assert!(dir.path().join("config.toml").exists());

        dedupstore(&dir)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[cache]"));
    }
}
