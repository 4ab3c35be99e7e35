//! Plain data shared by the engine, the HTTP layer and the CLI.
//!
//! Nothing in here knows about randomness, locking or rules; it only fixes
//! the shapes that travel across crate boundaries and over the wire.

pub mod data;

pub use data::cell::{Cell, EntityKind};
pub use data::census::Census;
pub use data::request::StartRequest;
pub use data::snapshot::GridSnapshot;
