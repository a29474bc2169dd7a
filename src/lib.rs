//! # GrantKit
//!
//! Utilities for walking a mobile application through runtime permission
//! requests: check current grants, show a rationale dialog when the
//! platform asks for one, issue the native prompt, and collect every
//! outcome into a single aggregated callback.
//!
//! ## Features
//!
//! GrantKit is modular; enable only what you need.
//!
//! - `permission`: The sequential permission flow (pulls in `dialog`).
//! - `dialog`: Rationale dialog content types.
//!
//! Use the `full` feature to enable everything.
//!
//! ## Example
//!
//! ```toml
//! [dependencies]
//! grantkit = { version = "0.1", features = ["permission"] }
//! ```
//!
//! ```ignore
//! use grantkit::permission::{PermissionRequest, PermissionSequencer, RationalePrompt};
//!
//! let mut sequencer = PermissionSequencer::from_host(&host);
//! sequencer.request_batch(
//!     vec![PermissionRequest::new(
//!         "android.permission.READ_CONTACTS",
//!         RationalePrompt::new("Permission required", "Contacts power the invite list."),
//!     )],
//!     |outcome| println!("all granted: {}", outcome.all_granted),
//! )?;
//! ```

#[cfg(feature = "dialog")]
pub use grantkit_dialog as dialog;

#[cfg(feature = "permission")]
pub use grantkit_permission as permission;
