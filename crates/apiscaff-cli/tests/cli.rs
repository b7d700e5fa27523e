//! End-to-end tests for the `apiscaff` binary.

use std::fs;
use std::io::Write;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Binary isolated from the developer's own configuration and repository.
fn apiscaff(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("apiscaff").unwrap();
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env("XDG_CACHE_HOME", home.path().join(".cache"))
        .env("APISCAFF_REPOSITORY_SETTINGS", home.path().join("repository.toml"))
        .env_remove("RUST_LOG")
        .env_remove("APISCAFF_CONFIG")
        .env_remove("APISCAFF_ENGINE__PROGRAM")
        .env_remove("APISCAFF_ENGINE__ARGS");
    cmd
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn help_lists_commands() {
    let home = TempDir::new().unwrap();
    apiscaff(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("resolve"))
        .stdout(predicate::str::contains("extract"));
}

#[test]
fn version_flag() {
    let home = TempDir::new().unwrap();
    apiscaff(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn partial_coordinate_is_a_configuration_error() {
    let home = TempDir::new().unwrap();
    apiscaff(&home)
        .args(["create", "--group-id", "com.acme", "--api-version", "1.0.0"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Incomplete coordinate"))
        .stderr(predicate::str::contains("artifact"));
}

#[test]
fn unknown_runtime_edition_is_a_user_error() {
    let home = TempDir::new().unwrap();
    apiscaff(&home)
        .args(["create", "--runtime-edition", "XE"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("XE"));
}

#[test]
fn invalid_scaffolding_configuration_is_a_configuration_error() {
    let home = TempDir::new().unwrap();
    write(
        home.path(),
        "scaffolding.json",
        r#"{"externalCommonFile": "common.txt"}"#,
    );

    apiscaff(&home)
        .args(["create", "--scaffolding-config", "scaffolding.json"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("externalCommonFile"));
}

#[test]
fn missing_scaffolding_configuration_is_a_configuration_error() {
    let home = TempDir::new().unwrap();
    apiscaff(&home)
        .args(["create", "--scaffolding-config", "absent.json"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn create_without_engine_is_a_configuration_error() {
    let home = TempDir::new().unwrap();
    apiscaff(&home)
        .arg("create")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("No generation engine configured"));
}

#[test]
fn missing_repository_settings_are_a_configuration_error() {
    let home = TempDir::new().unwrap();
    apiscaff(&home)
        .args(["resolve", "resource::com.acme:orders:1.0.0:fat-raml:zip"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Repository settings not found"));
}

#[test]
fn malformed_descriptor_is_a_user_error() {
    let home = TempDir::new().unwrap();
    apiscaff(&home)
        .args(["resolve", "resource::com.acme:orders"])
        .assert()
        .code(2);
}

#[test]
fn extract_renames_the_api_description() {
    let home = TempDir::new().unwrap();
    let archive = home.path().join("orders-1.0.0-fat-raml.zip");
    let mut writer = zip::ZipWriter::new(fs::File::create(&archive).unwrap());
    let options = zip::write::SimpleFileOptions::default();
    writer.start_file("exchange.json", options).unwrap();
    writer.write_all(br#"{"main": "orders.raml"}"#).unwrap();
    writer.start_file("orders.raml", options).unwrap();
    writer.write_all(b"#%RAML 1.0\ntitle: Orders\n").unwrap();
    writer.finish().unwrap();

    apiscaff(&home)
        .args(["extract", "orders-1.0.0-fat-raml.zip", "--output", "out"])
        .assert()
        .success()
        .stdout(predicate::str::contains("api.raml"));

    assert_eq!(
        fs::read_to_string(home.path().join("out/api.raml")).unwrap(),
        "#%RAML 1.0\ntitle: Orders\n"
    );
    assert!(home.path().join("out/exchange.json").is_file());
}

#[cfg(unix)]
mod engine {
    use super::*;

    /// Engine that ignores its input and answers with one unnamed config.
    const ENGINE: &str = r#"cat > /dev/null; printf '{"configs":[{"name":"","content":"<mule/>"}],"resources":[]}'"#;

    fn create(home: &TempDir) -> Command {
        let mut cmd = apiscaff(home);
        cmd.args(["create", "--engine", "sh", "--engine-arg", "-c", "--engine-arg", ENGINE]);
        cmd
    }

    #[test]
    fn blank_artifact_name_is_written_as_api_xml() {
        let home = TempDir::new().unwrap();
        write(home.path(), "src/main/resources/api/hello.raml", "#%RAML 1.0\ntitle: Hello\n");

        create(&home)
            .assert()
            .success()
            .stdout(predicate::str::contains("api.xml"));

        assert_eq!(
            fs::read_to_string(home.path().join("src/main/mule/api.xml")).unwrap(),
            "<mule/>"
        );
    }

    #[test]
    fn no_specifications_is_not_an_error() {
        let home = TempDir::new().unwrap();
        create(&home)
            .assert()
            .success()
            .stdout(predicate::str::contains("No API specification found"));
        assert!(!home.path().join("src/main/mule").exists());
    }

    #[test]
    fn json_summary() {
        let home = TempDir::new().unwrap();
        write(home.path(), "src/main/resources/api/hello.raml", "#%RAML 1.0\ntitle: Hello\n");
        write(home.path(), "src/main/resources/api/broken.yml", "title: [unclosed\n");

        let out = create(&home)
            .args(["--output-format", "json"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        let summary: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(summary["specifications"], 1);
        assert_eq!(summary["skipped"], 1);
        assert_eq!(summary["written"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn engine_failure_is_an_internal_error() {
        let home = TempDir::new().unwrap();
        write(home.path(), "src/main/resources/api/hello.raml", "#%RAML 1.0\ntitle: Hello\n");

        apiscaff(&home)
            .args([
                "create",
                "--engine",
                "sh",
                "--engine-arg",
                "-c",
                "--engine-arg",
                r#"cat > /dev/null; printf '{"success":false,"errors":["unsupported type"]}'"#,
            ])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("unsupported type"));
    }

    #[test]
    fn engine_from_environment() {
        let home = TempDir::new().unwrap();
        write(home.path(), "src/main/resources/api/hello.raml", "#%RAML 1.0\ntitle: Hello\n");

        apiscaff(&home)
            .arg("create")
            .env("APISCAFF_ENGINE__PROGRAM", "sh")
            .args(["--engine-arg", "-c", "--engine-arg", ENGINE])
            .assert()
            .success();
        assert!(home.path().join("src/main/mule/api.xml").is_file());
    }
}
