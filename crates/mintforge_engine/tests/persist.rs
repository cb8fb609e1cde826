use std::fs;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use mintforge_engine::{ensure_output_dir, mint_filename, save_image, MintArtifact, SaveError};
use tempfile::TempDir;

fn artifact(image: &str, edition: &str, rarity: &str) -> MintArtifact {
    MintArtifact {
        id: format!("{edition}-1700000000000"),
        image: image.to_string(),
        rarity: rarity.to_string(),
        edition: edition.to_string(),
    }
}

#[test]
fn creates_missing_output_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("out");
    assert!(!new_dir.exists());
    ensure_output_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn saves_decoded_payload_under_edition_rarity_name() {
    let temp = TempDir::new().unwrap();
    let payload = STANDARD.encode(b"png-bytes");
    let image = format!("data:image/png;base64,{payload}");

    let path = save_image(temp.path(), &artifact(&image, "ed01", "Epic")).unwrap();

    assert_eq!(path.file_name().unwrap(), "ed01_Epic.png");
    assert_eq!(fs::read(&path).unwrap(), b"png-bytes");
}

#[test]
fn save_replaces_existing_file() {
    let temp = TempDir::new().unwrap();
    let first = format!("data:image/png;base64,{}", STANDARD.encode(b"one"));
    let second = format!("data:image/png;base64,{}", STANDARD.encode(b"two"));

    let path_a = save_image(temp.path(), &artifact(&first, "ed01", "Rare")).unwrap();
    let path_b = save_image(temp.path(), &artifact(&second, "ed01", "Rare")).unwrap();

    assert_eq!(path_a, path_b);
    assert_eq!(fs::read(&path_b).unwrap(), b"two");
}

#[test]
fn rejects_plain_url_payload() {
    let temp = TempDir::new().unwrap();

    let err = save_image(
        temp.path(),
        &artifact("https://cdn.example.com/art.png", "ed01", "Common"),
    )
    .unwrap_err();

    assert!(matches!(err, SaveError::NotInlineData));
    assert!(fs::read_dir(temp.path()).unwrap().next().is_none());
}

#[test]
fn rejects_undecodable_base64() {
    let temp = TempDir::new().unwrap();

    let err = save_image(
        temp.path(),
        &artifact("data:image/png;base64,@@not base64@@", "ed01", "Common"),
    )
    .unwrap_err();

    assert!(matches!(err, SaveError::InvalidBase64(_)));
}

#[test]
fn filename_components_are_sanitized() {
    assert_eq!(mint_filename("ed/01", "Epic"), "ed_01_Epic.png");
    assert_eq!(mint_filename("a:b*c", "R?are"), "a_b_c_R_are.png");
    assert_eq!(mint_filename("", ""), "unknown_unknown.png");
    assert_eq!(mint_filename("CON", "Common"), "CON__Common.png");
}
