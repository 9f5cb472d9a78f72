//! BrandFlow Storage - File-backed session persistence
//!
//! One JSON document per session under a storage root directory. Every
//! mutation rewrites the whole document; there are no partial writes and no
//! cross-process locking. This is deliberate: the store serves a
//! single-user, single-process assistant and a last-writer-wins rewrite is
//! the documented behavior for concurrent writers.
//!
//! # Layout
//!
//! ```text
//! ~/.brandflow/
//! ├── sessions/
//! │   ├── <session-id>.json
//! │   └── ...
//! └── logs/
//! ```

pub mod error;
pub mod paths;
pub mod session_store;

pub use error::StoreError;
pub use session_store::SessionStore;
