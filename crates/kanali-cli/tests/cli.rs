//! End-to-end tests driving the kanalictl binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use rand::rngs::OsRng;
use rsa::pkcs1::EncodeRsaPrivateKey;
use rsa::pkcs8::{EncodePublicKey, LineEnding};
use rsa::RsaPrivateKey;

/// Writes a PKCS#1 private PEM and PKIX public PEM pair under `dir`.
fn write_keypair(dir: &Path, stem: &str) -> (std::path::PathBuf, std::path::PathBuf) {
    let key = RsaPrivateKey::new(&mut OsRng, 2048).expect("generate keypair");

    let private_path = dir.join(format!("{stem}.pem"));
    let private_pem = key.to_pkcs1_pem(LineEnding::LF).expect("encode private");
    fs::write(&private_path, private_pem.as_bytes()).expect("write private");

    let public_path = dir.join(format!("{stem}.pub"));
    let public_pem = key
        .to_public_key()
        .to_public_key_pem(LineEnding::LF)
        .expect("encode public");
    fs::write(&public_path, public_pem).expect("write public");

    (private_path, public_path)
}

fn kanalictl() -> Command {
    Command::cargo_bin("kanalictl").expect("binary builds")
}

#[test]
fn generate_rotate_decrypt_lifecycle() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (old_private, old_public) = write_keypair(dir.path(), "old");
    let (new_private, new_public) = write_keypair(dir.path(), "new");

    let configs = dir.path().join("configs");
    fs::create_dir(&configs).expect("mkdir");
    let out_file = configs.join("team.yaml");

    // Generate a key and write its config document.
    let output = kanalictl()
        .args(["generate", "apikey", "--name", "team-key"])
        .arg("--key")
        .arg(&old_public)
        .arg("--out-file")
        .arg(&out_file)
        .assert()
        .success()
        .stdout(predicate::str::contains("you will only see this once"))
        .get_output()
        .clone();

    let stdout = String::from_utf8(output.stdout).expect("utf8");
    let plaintext = stdout
        .lines()
        .find_map(|line| line.rsplit_once(": ").map(|(_, key)| key.trim()))
        .expect("plaintext in output")
        .to_string();
    assert_eq!(plaintext.len(), 32);

    let written = fs::read_to_string(&out_file).expect("read out file");
    assert!(written.contains("kind: ApiKey"));
    assert!(!written.contains(&plaintext));

    // The old private key recovers the plaintext.
    kanalictl()
        .arg("decrypt")
        .arg("--key")
        .arg(&old_private)
        .arg(&configs)
        .assert()
        .success()
        .stdout(predicate::str::contains("team-key"))
        .stdout(predicate::str::contains(&plaintext));

    // Rotate to the new keypair.
    kanalictl()
        .arg("rotate")
        .arg("--old-key")
        .arg(&old_private)
        .arg("--new-key")
        .arg(&new_public)
        .arg(&configs)
        .assert()
        .success()
        .stdout(predicate::str::contains("team-key"))
        .stdout(predicate::str::contains("true"));
    assert!(!configs.join("team.yaml_staged").exists());

    // The same plaintext now lives under the new keypair.
    kanalictl()
        .arg("decrypt")
        .arg("--key")
        .arg(&new_private)
        .arg(&configs)
        .assert()
        .success()
        .stdout(predicate::str::contains(&plaintext));

    // The old key no longer decrypts it.
    kanalictl()
        .arg("decrypt")
        .arg("--key")
        .arg(&old_private)
        .arg(&configs)
        .assert()
        .success()
        .stdout(predicate::str::contains("decryption failed"));
}

#[test]
fn generate_refuses_to_overwrite_without_force() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (_, public) = write_keypair(dir.path(), "only");
    let out_file = dir.path().join("key.yaml");
    fs::write(&out_file, "precious operator notes\n").expect("write");

    kanalictl()
        .args(["generate", "apikey", "--name", "k"])
        .arg("--key")
        .arg(&public)
        .arg("--out-file")
        .arg(&out_file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    assert_eq!(
        fs::read_to_string(&out_file).expect("read"),
        "precious operator notes\n"
    );
}

#[test]
fn setup_errors_exit_non_zero() {
    kanalictl()
        .args(["decrypt", "--key", "/nonexistent/key.pem", "/tmp"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn decrypting_an_empty_tree_succeeds() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (private, _) = write_keypair(dir.path(), "only");
    let configs = dir.path().join("configs");
    fs::create_dir(&configs).expect("mkdir");

    kanalictl()
        .arg("decrypt")
        .arg("--key")
        .arg(&private)
        .arg(&configs)
        .assert()
        .success()
        .stdout(predicate::str::contains("no API keys found"));
}

#[test]
fn json_format_emits_machine_readable_reports() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (private, _) = write_keypair(dir.path(), "only");
    let configs = dir.path().join("configs");
    fs::create_dir(&configs).expect("mkdir");

    let output = kanalictl()
        .args(["--format", "json", "decrypt"])
        .arg("--key")
        .arg(&private)
        .arg(&configs)
        .assert()
        .success()
        .get_output()
        .clone();

    let parsed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("valid json");
    assert!(parsed["rows"].as_array().expect("rows array").is_empty());
}
