//! Policy Reference Store — the static scheme database the whole service
//! reasons over. Loaded once at startup from a bundled asset; immutable
//! thereafter.

mod store;

pub use store::{PolicyRecord, PolicyStore, NATIONWIDE_REGION};
