//! Session records and the shared session store

pub mod record;
pub mod store;

pub use record::{SessionKey, SessionRecord};
pub use store::{Resolution, SessionStore, StoreStats};
