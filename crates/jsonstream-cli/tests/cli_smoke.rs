use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn help_works() -> Result<(), Box<dyn std::error::Error>> {
    Command::new(assert_cmd::cargo::cargo_bin!("jsonstream-cli"))
        .arg("--help")
        .assert()
        .success();
    Ok(())
}

#[test]
fn reencodes_file_without_whitespace() -> Result<(), Box<dyn std::error::Error>> {
    let input = "{\n  \"a\": [1, 2, {\"b\": true}],\n  \"p\": \"x/y\"\n}\n";
    let mut tmp = NamedTempFile::new()?;
    write!(tmp, "{}", input)?;

    Command::new(assert_cmd::cargo::cargo_bin!("jsonstream-cli"))
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(r#"{"a":[1,2,{"b":true}],"p":"x\/y"}"#);
    Ok(())
}

#[test]
fn echo_mode_and_newline() -> Result<(), Box<dyn std::error::Error>> {
    Command::new(assert_cmd::cargo::cargo_bin!("jsonstream-cli"))
        .args(["--echo", "--newline"])
        .write_stdin("[1, 2.50, null]")
        .assert()
        .success()
        .stdout("[1,2.5,null]\n");
    Ok(())
}

#[test]
fn writes_to_output_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let out = dir.path().join("out.json");
    Command::new(assert_cmd::cargo::cargo_bin!("jsonstream-cli"))
        .arg("--output")
        .arg(&out)
        .write_stdin("{}")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    assert_eq!(std::fs::read_to_string(&out)?, "{}");
    Ok(())
}

#[test]
fn invalid_json_fails() -> Result<(), Box<dyn std::error::Error>> {
    Command::new(assert_cmd::cargo::cargo_bin!("jsonstream-cli"))
        .write_stdin("{not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("parsing JSON input"));
    Ok(())
}

#[test]
fn integers_beyond_i64_are_rejected() -> Result<(), Box<dyn std::error::Error>> {
    Command::new(assert_cmd::cargo::cargo_bin!("jsonstream-cli"))
        .write_stdin("[18446744073709551615]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("converting JSON input"))
        .stderr(predicate::str::contains("does not fit in i64"));
    Ok(())
}
