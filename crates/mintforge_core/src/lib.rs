//! MintForge core: pure mint-session state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{
    MintFailure, MintRecord, Phase, SessionState, Toast, ToastKind, CANONICAL_RARITIES,
    TOAST_TICKS,
};
pub use update::update;
pub use view_model::{GalleryItemView, MintCardView, RarityRowView, SessionViewModel};
