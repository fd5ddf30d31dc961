// tests/cli_test.rs
mod common;

use std::process::{Command, Output};

use common::{TestRepo, AUTHOR_EMAIL, AUTHOR_NAME};
use git_changelog::exit_codes;
use tempfile::{NamedTempFile, TempDir};

/// Run the binary with an empty configuration file, so no user or
/// working-directory configuration leaks in.
fn git_changelog(args: &[&str]) -> Output {
    let config = NamedTempFile::new().unwrap();
    Command::new(env!("CARGO_BIN_EXE_git-changelog"))
        .arg("--config")
        .arg(config.path())
        .args(args)
        .output()
        .expect("Failed to execute git-changelog")
}

fn exit_code(args: &[&str]) -> Option<i32> {
    git_changelog(args).status.code()
}

#[test]
fn test_help() {
    let output = git_changelog(&["--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("git-changelog"));
    assert!(stdout.contains("--output-format"));
}

#[test]
fn test_unknown_argument() {
    assert_eq!(
        exit_code(&["--no-such-flag"]),
        Some(exit_codes::ARGPARSE_FAILURE)
    );
    assert_eq!(
        exit_code(&["-O", "tarball"]),
        Some(exit_codes::ARGPARSE_FAILURE)
    );
}

#[test]
fn test_missing_output_format() {
    let repo = TestRepo::with_messages(&["First"]);
    let path = repo.path().to_str().unwrap();
    assert_eq!(exit_code(&["-p", path]), Some(exit_codes::INVALID_INPUT));
}

#[test]
fn test_deb_requires_package_and_distribution() {
    assert_eq!(exit_code(&["-O", "deb"]), Some(exit_codes::INVALID_INPUT));
    assert_eq!(
        exit_code(&["-O", "deb", "-n", "pkgname"]),
        Some(exit_codes::INVALID_INPUT)
    );
}

#[test]
fn test_invalid_patterns() {
    let repo = TestRepo::with_messages(&["First"]);
    let path = repo.path().to_str().unwrap();
    assert_eq!(
        exit_code(&["-p", path, "-O", "rpm", "-T", "v("]),
        Some(exit_codes::INVALID_INPUT)
    );
    assert_eq!(
        exit_code(&["-p", path, "-O", "rpm", "-b", "-B", "[unclosed"]),
        Some(exit_codes::INVALID_INPUT)
    );
}

#[test]
fn test_unreadable_config_file() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nonexistent.toml");
    let output = Command::new(env!("CARGO_BIN_EXE_git-changelog"))
        .arg("--config")
        .arg(&missing)
        .args(["-O", "rpm"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(exit_codes::INVALID_INPUT));

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("nonexistent.toml"), "got: {}", stderr);
    assert!(output.stdout.is_empty());
}

#[test]
fn test_repo_invalid_path() {
    assert_eq!(
        exit_code(&["-p", "/doesNot3xist", "-O", "rpm"]),
        Some(exit_codes::REPO_PATH_INVALID)
    );
}

#[test]
fn test_path_is_not_repo() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().to_str().unwrap();
    assert_eq!(
        exit_code(&["-p", path, "-O", "rpm"]),
        Some(exit_codes::REPO_PATH_NOT_REPO)
    );
}

#[test]
fn test_invalid_limits() {
    let repo = TestRepo::with_messages(&["First"]);
    let path = repo.path().to_str().unwrap();

    for limit in ["--until", "--since"] {
        for reference in ["NonExistantTag", "a1a2a2a3a4a5a6a"] {
            let output = git_changelog(&["-p", path, "-O", "rpm", limit, reference]);
            assert_eq!(output.status.code(), Some(exit_codes::INVALID_VCS_LIMITS));

            let stderr = String::from_utf8(output.stderr).unwrap();
            assert!(stderr.contains(&format!("{} ('{}')", limit, reference)), "got: {}", stderr);
        }
    }
}

#[test]
fn test_rpm_to_stdout() {
    let repo = TestRepo::with_messages(&["Initial commit", "Second commit"]);
    let output = git_changelog(&["-p", repo.path().to_str().unwrap(), "-O", "rpm"]);
    assert_eq!(output.status.code(), Some(exit_codes::SUCCESS));

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert!(lines[0].ends_with(&format!("{} <{}> - current", AUTHOR_NAME, AUTHOR_EMAIL)));
    assert_eq!(lines[1], "- Second commit");
    assert_eq!(lines[2], "- Initial commit");
}

#[test]
fn test_deb_to_file() {
    let repo = TestRepo::with_messages(&["First", "Second"]);
    let out_dir = TempDir::new().unwrap();
    let out_file = out_dir.path().join("outfile");

    let output = git_changelog(&[
        "-p",
        repo.path().to_str().unwrap(),
        "-O",
        "deb",
        "-o",
        out_file.to_str().unwrap(),
        "-n",
        "foopkg",
        "-D",
        "xenial",
        "-U",
        "high",
    ]);
    assert_eq!(output.status.code(), Some(exit_codes::SUCCESS));
    assert!(output.stdout.is_empty());

    let written = std::fs::read_to_string(&out_file).unwrap();
    let lines: Vec<&str> = written.lines().filter(|line| !line.is_empty()).collect();
    assert_eq!(lines[0], "foopkg (current) xenial; urgency=high");
    assert_eq!(lines[1], "  * Second");
    assert_eq!(lines[2], "  * First");
}

#[test]
fn test_config_file_supplies_defaults() {
    let repo = TestRepo::with_messages(&["First"]);
    let mut config = NamedTempFile::new().unwrap();
    std::io::Write::write_all(
        &mut config,
        br#"
[output]
format = "deb"

[release]
package_name = "configured"
distribution = "bookworm"
urgency = "medium"
"#,
    )
    .unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_git-changelog"))
        .arg("--config")
        .arg(config.path())
        .args(["-p", repo.path().to_str().unwrap(), "-D", "trixie"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(exit_codes::SUCCESS));

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("configured (current) trixie; urgency=medium\n"));
}
