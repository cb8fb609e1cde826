use mintforge_engine::{normalize_response, WebhookFailureKind};
use serde_json::json;

const NOW: &str = "1700000000000";

#[test]
fn images_list_takes_priority_over_singular_field() {
    let value = json!({ "images": ["FIRST"], "image": "SECOND" });

    let artifact = normalize_response(&value, NOW).expect("normalize ok");
    assert_eq!(artifact.image, "data:image/png;base64,FIRST");
}

#[test]
fn falls_back_to_singular_image_field() {
    let value = json!({ "image": "RAW" });

    let artifact = normalize_response(&value, NOW).expect("normalize ok");
    assert_eq!(artifact.image, "data:image/png;base64,RAW");
}

#[test]
fn empty_list_entry_falls_through_to_singular_field() {
    let value = json!({ "images": [""], "image": "RAW" });

    let artifact = normalize_response(&value, NOW).expect("normalize ok");
    assert_eq!(artifact.image, "data:image/png;base64,RAW");
}

#[test]
fn existing_data_uri_is_kept_verbatim() {
    let value = json!({ "images": ["data:image/jpeg;base64,JPEG"] });

    let artifact = normalize_response(&value, NOW).expect("normalize ok");
    assert_eq!(artifact.image, "data:image/jpeg;base64,JPEG");
}

#[test]
fn missing_image_is_an_error() {
    let value = json!({ "rarity": "Epic", "edition": "7" });

    let err = normalize_response(&value, NOW).unwrap_err();
    assert_eq!(err.kind, WebhookFailureKind::MissingImage);
}

#[test]
fn rarity_defaults_to_common() {
    let artifact = normalize_response(&json!({ "images": ["AAAA"] }), NOW).expect("normalize ok");
    assert_eq!(artifact.rarity, "Common");

    let artifact = normalize_response(&json!({ "images": ["AAAA"], "rarity": "" }), NOW)
        .expect("normalize ok");
    assert_eq!(artifact.rarity, "Common");

    let artifact = normalize_response(&json!({ "images": ["AAAA"], "rarity": "Mythic" }), NOW)
        .expect("normalize ok");
    assert_eq!(artifact.rarity, "Mythic");
}

#[test]
fn edition_defaults_to_timestamp() {
    let artifact = normalize_response(&json!({ "images": ["AAAA"] }), NOW).expect("normalize ok");
    assert_eq!(artifact.edition, NOW);
    assert_eq!(artifact.id, format!("{NOW}-{NOW}"));
}

#[test]
fn id_combines_edition_and_timestamp() {
    let value = json!({ "images": ["AAAA"], "edition": "genesis" });

    let artifact = normalize_response(&value, NOW).expect("normalize ok");
    assert_eq!(artifact.edition, "genesis");
    assert_eq!(artifact.id, "genesis-1700000000000");
}
