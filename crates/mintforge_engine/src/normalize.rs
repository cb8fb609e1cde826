use serde_json::Value;

use crate::{MintArtifact, WebhookError, WebhookFailureKind};

/// Rarity assumed when the response carries none.
const DEFAULT_RARITY: &str = "Common";

/// Builds a mint artifact from a parsed webhook response.
///
/// Expected shape: `{ "images": [string] | "image": string, "rarity":
/// string, "edition": string }` where only the image is required.
/// `minted_at` is the current timestamp rendered as a string; it backs
/// both the default edition and the id suffix.
pub fn normalize_response(value: &Value, minted_at: &str) -> Result<MintArtifact, WebhookError> {
    let image = extract_image(value).ok_or_else(|| {
        WebhookError::new(
            WebhookFailureKind::MissingImage,
            "response carries neither `images` nor `image`",
        )
    })?;

    let rarity = non_empty_str(value.get("rarity")).unwrap_or(DEFAULT_RARITY);
    let edition = non_empty_str(value.get("edition")).unwrap_or(minted_at);

    Ok(MintArtifact {
        id: format!("{edition}-{minted_at}"),
        image: wrap_as_data_uri(image),
        rarity: rarity.to_owned(),
        edition: edition.to_owned(),
    })
}

/// Extraction order: first element of `images`, else the singular `image`.
/// Empty strings count as absent, at every step.
fn extract_image(value: &Value) -> Option<&str> {
    let from_list = value
        .get("images")
        .and_then(Value::as_array)
        .and_then(|images| images.first())
        .and_then(Value::as_str)
        .filter(|image| !image.is_empty());

    from_list.or_else(|| non_empty_str(value.get("image")))
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
}

/// A raw payload that is not already an embedded-data reference is assumed
/// to be base64-encoded PNG content.
fn wrap_as_data_uri(image: &str) -> String {
    if image.starts_with("data:") {
        image.to_owned()
    } else {
        format!("data:image/png;base64,{image}")
    }
}
