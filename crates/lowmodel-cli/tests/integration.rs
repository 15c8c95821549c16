//! Integration tests for CLI commands.

use lowmodel_canonical::Digest;
use serde_json::Value;
use std::process::Command;
use tempfile::TempDir;

const SCOPES: &str = "read: Read access\nwrite: Write access\nx-tier: gold\n";

const RESPONSES: &str = "\
components:
  responses:
    table:
      '200':
        description: ok
      default:
        $ref: '#/components/responses/fallback'
      x-owner: platform
    fallback:
      description: something else
";

fn write_file(dir: &TempDir, name: &str, contents: &str) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path.to_string_lossy().to_string()
}

fn run_cli(args: &[&str]) -> (bool, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_lowmodel"))
        .args(args)
        .output()
        .expect("Failed to execute CLI");

    let stdout = String::from_utf8(output.stdout).unwrap();
    let stderr = String::from_utf8(output.stderr).unwrap();
    let success = output.status.success();

    (success, stdout, stderr)
}

#[test]
fn test_hash_prints_hex_digest() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "scopes.yaml", SCOPES);

    let (success, stdout, _) = run_cli(&["hash", &path, "--kind", "v2-scopes"]);
    assert!(success);
    let digest = stdout.trim();
    assert_eq!(digest.len(), 64);
    assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn test_hash_ignores_scope_order() {
    let dir = TempDir::new().unwrap();
    let a = write_file(&dir, "a.yaml", SCOPES);
    let b = write_file(
        &dir,
        "b.json",
        r#"{"write": "Write access", "read": "Read access", "x-tier": "gold"}"#,
    );

    let (_, first, _) = run_cli(&["hash", &a, "--kind", "v2-scopes"]);
    let (_, second, _) = run_cli(&["hash", &b, "--kind", "v2-scopes"]);
    assert_eq!(first, second);
}

#[test]
fn test_hash_with_pointer_and_json() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "api.yaml", RESPONSES);

    let (success, stdout, stderr) = run_cli(&[
        "hash",
        &path,
        "--kind",
        "v2-responses",
        "--pointer",
        "#/components/responses/table",
        "--json",
    ]);
    assert!(success, "stderr: {}", stderr);
    let output: Value = serde_json::from_str(&stdout).expect("Invalid JSON");
    assert_eq!(output["kind"], "v2-responses");
    assert_eq!(output["digest"]["alg"], "sha-256");
    let digest: Digest = serde_json::from_value(output["digest"].clone()).unwrap();
    assert_eq!(output["hex"], digest.to_hex());
    assert_eq!(output["object"]["200"]["description"], "ok");
    assert_eq!(output["object"]["default"]["description"], "something else");
    assert_eq!(output["object"]["x-owner"], "platform");
}

#[test]
fn test_extensions_command() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "tag.yaml", "name: pets\nx-b: 2\nx-a: [1]\n");

    let (success, stdout, _) = run_cli(&["extensions", &path, "--kind", "tag"]);
    assert!(success);
    assert!(stdout.find("\"x-b\"").unwrap() < stdout.find("\"x-a\"").unwrap());
    assert!(!stdout.contains("pets"));
}

#[test]
fn test_extension_pattern_flag() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "tag.yaml", "name: pets\nx-b: 2\next-a: 1\n");

    let (success, stdout, _) = run_cli(&[
        "extensions",
        &path,
        "--kind",
        "tag",
        "--extension-pattern",
        "^ext-",
    ]);
    assert!(success);
    assert!(stdout.contains("ext-a"));
    assert!(!stdout.contains("x-b"));
}

#[test]
fn test_pairs_preserves_order() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "doc.yaml", "b: 1\na: [2]\n");

    let (success, stdout, _) = run_cli(&["pairs", &path]);
    assert!(success);
    assert!(stdout.find("\"b\"").unwrap() < stdout.find("\"a\"").unwrap());

    let (success, stdout, _) = run_cli(&["pairs", &path, "--yaml"]);
    assert!(success);
    assert_eq!(stdout, "b: 1\na:\n- 2\n");
}

#[test]
fn test_pairs_rejects_sequence() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "list.yaml", "- a\n- b\n");

    let (success, _, stderr) = run_cli(&["pairs", &path]);
    assert!(!success);
    assert!(stderr.contains("Error:"));
    assert!(stderr.contains("line 1"));
}

#[test]
fn test_merge_keys_reject() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "merge.yaml",
        "base: &b\n  name: pets\ntag:\n  <<: *b\n  description: d\n",
    );

    let (success, _, _) = run_cli(&["hash", &path, "--kind", "tag", "--pointer", "#/tag"]);
    assert!(success);

    let (success, _, stderr) = run_cli(&[
        "hash",
        &path,
        "--kind",
        "tag",
        "--pointer",
        "#/tag",
        "--merge-keys",
        "reject",
    ]);
    assert!(!success);
    assert!(stderr.contains("merge keys"));
}

#[test]
fn test_unknown_kind_and_missing_file() {
    let (success, _, _) = run_cli(&["hash", "missing.yaml", "--kind", "schema"]);
    assert!(!success);

    let (success, _, stderr) = run_cli(&["hash", "/nonexistent/doc.yaml", "--kind", "tag"]);
    assert!(!success);
    assert!(stderr.contains("Error:"));
}

#[test]
fn test_bad_pointer() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "api.yaml", RESPONSES);

    let (success, _, stderr) = run_cli(&[
        "hash",
        &path,
        "--kind",
        "v2-responses",
        "--pointer",
        "#/components/nothing",
    ]);
    assert!(!success);
    assert!(stderr.contains("does not resolve"));
}

#[test]
fn test_hash_expect() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "scopes.yaml", SCOPES);

    let (_, stdout, _) = run_cli(&["hash", &path, "--kind", "v2-scopes"]);
    let hex = stdout.trim().to_string();
    let b64 = hex.parse::<Digest>().unwrap().to_b64();

    let (success, _, _) = run_cli(&["hash", &path, "--kind", "v2-scopes", "--expect", &hex]);
    assert!(success);
    let (success, _, _) = run_cli(&["hash", &path, "--kind", "v2-scopes", "--expect", &b64]);
    assert!(success);

    let other = "0".repeat(64);
    let (success, _, stderr) =
        run_cli(&["hash", &path, "--kind", "v2-scopes", "--expect", &other]);
    assert!(!success);
    assert!(stderr.contains("digest mismatch"));
    assert!(stderr.contains(&hex));

    let (success, _, _) = run_cli(&["hash", &path, "--kind", "v2-scopes", "--expect", "abcd"]);
    assert!(!success);
}
