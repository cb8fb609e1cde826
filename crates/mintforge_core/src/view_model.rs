use crate::state::{short_edition, SessionState};
use crate::{Phase, Toast, CANONICAL_RARITIES};

/// Everything the presentation layer needs, derived from [`SessionState`].
#[derive(Debug, Clone, PartialEq)]
pub struct SessionViewModel {
    pub phase: Phase,
    pub webhook_url: String,
    /// Advisory URL-shape hint; never blocks submission.
    pub url_looks_valid: bool,
    pub current: Option<MintCardView>,
    /// Newest first (presentation order; storage stays oldest first).
    pub gallery: Vec<GalleryItemView>,
    /// The five canonical tiers in fixed order, then any extra buckets.
    pub rarity_rows: Vec<RarityRowView>,
    pub total_minted: u32,
    pub error: Option<String>,
    pub toast: Option<Toast>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintCardView {
    pub edition_short: String,
    pub rarity: String,
    /// Length of the image reference string, shown in lieu of pixels.
    pub payload_bytes: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryItemView {
    pub id: String,
    pub edition_short: String,
    pub rarity: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RarityRowView {
    pub rarity: String,
    pub count: u32,
    pub percent: f64,
}

pub(crate) fn build_view(state: &SessionState) -> SessionViewModel {
    let total_minted: u32 = state.counts().values().sum();

    let mut rarity_rows: Vec<RarityRowView> = CANONICAL_RARITIES
        .iter()
        .map(|rarity| build_row(state, rarity, total_minted))
        .collect();
    // BTreeMap iteration keeps unrecognized buckets in lexical order.
    for rarity in state.counts().keys() {
        if !CANONICAL_RARITIES.contains(&rarity.as_str()) {
            rarity_rows.push(build_row(state, rarity, total_minted));
        }
    }

    let gallery = state
        .history()
        .iter()
        .rev()
        .map(|record| GalleryItemView {
            id: record.id.clone(),
            edition_short: short_edition(&record.edition).to_owned(),
            rarity: record.rarity.clone(),
        })
        .collect();

    SessionViewModel {
        phase: state.phase(),
        webhook_url: state.webhook_url().to_owned(),
        url_looks_valid: url::Url::parse(state.webhook_url()).is_ok(),
        current: state.current().map(|record| MintCardView {
            edition_short: short_edition(&record.edition).to_owned(),
            rarity: record.rarity.clone(),
            payload_bytes: record.image.len(),
        }),
        gallery,
        rarity_rows,
        total_minted,
        error: state.error().map(ToOwned::to_owned),
        toast: state.toast().cloned(),
        dirty: state.dirty_flag(),
    }
}

fn build_row(state: &SessionState, rarity: &str, total: u32) -> RarityRowView {
    let count = state.counts().get(rarity).copied().unwrap_or(0);
    let percent = if total > 0 {
        f64::from(count) / f64::from(total) * 100.0
    } else {
        0.0
    };
    RarityRowView {
        rarity: rarity.to_owned(),
        count,
        percent,
    }
}
