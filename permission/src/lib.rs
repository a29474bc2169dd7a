//! Sequential runtime permission request handling.
//!
//! Mobile platforms answer permission prompts one at a time, through
//! asynchronous callbacks, and expect the application to explain itself
//! before re-asking for something the user already declined. This crate
//! walks a whole batch of permissions through that dance and reports a
//! single aggregated result:
//!
//! - already-granted permissions are skipped,
//! - a rationale dialog is shown when the platform says the user should
//!   be told why,
//! - the native prompt is issued and its result collected,
//! - once every request is resolved, one completion callback fires with
//!   the per-permission outcomes.
//!
//! The platform itself stays behind two small capability traits,
//! [`PermissionHost`] and [`RationaleDialog`], so the flow logic runs
//! unchanged on any host that can answer a grant check and put a prompt
//! on screen.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use grantkit_permission::{
//!     PermissionHost, PermissionRequest, PermissionSequencer, PromptToken,
//!     RationaleDialog, RationalePrompt,
//! };
//!
//! struct Host;
//!
//! impl PermissionHost for Host {
//!     fn runtime_prompts_supported(&self) -> bool {
//!         true
//!     }
//!     fn is_granted(&self, _permission: &str) -> bool {
//!         true
//!     }
//!     fn should_show_rationale(&self, _permission: &str) -> bool {
//!         false
//!     }
//!     fn request_prompt(&self, _permission: &str, _token: PromptToken) {}
//! }
//!
//! impl RationaleDialog for Host {
//!     fn present(&self, _token: PromptToken, _prompt: &RationalePrompt) {}
//! }
//!
//! let host = Arc::new(Host);
//! let mut sequencer = PermissionSequencer::from_host(&host);
//!
//! let contacts = PermissionRequest::new(
//!     "android.permission.READ_CONTACTS",
//!     RationalePrompt::new("Permission required", "Contacts power the invite list."),
//! );
//! sequencer.request_batch(vec![contacts], |outcome| {
//!     assert!(outcome.all_granted);
//! })?;
//! # Ok::<(), grantkit_permission::SequenceError>(())
//! ```

#![warn(missing_docs)]

mod error;
mod host;
mod sequencer;

pub use error::{Result, SequenceError};
pub use grantkit_dialog::{DialogChoice, RationalePrompt};
pub use host::{PermissionHost, PromptToken, RationaleDialog};
pub use sequencer::PermissionSequencer;

/// A single permission to ask for, together with the rationale dialog
/// content shown when the platform reports the user should be told why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionRequest {
    /// Platform permission identifier (e.g. `android.permission.READ_SMS`).
    pub permission: String,
    /// Dialog content used when a rationale is warranted.
    pub rationale: RationalePrompt,
}

impl PermissionRequest {
    /// Create a request for `permission` with the given rationale content.
    pub fn new(permission: impl Into<String>, rationale: RationalePrompt) -> Self {
        Self {
            permission: permission.into(),
            rationale,
        }
    }
}

/// The resolved state of one requested permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PermissionState {
    /// Permission has been granted.
    Granted,
    /// Permission was denied, but the user can be asked again later.
    Denied,
    /// Permission was denied and the platform will not prompt again,
    /// either via the legacy "never ask again" checkbox or the newer
    /// repeated-denial lockout.
    DeniedPermanently,
}

/// The outcome of one requested permission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionOutcome {
    /// Platform permission identifier.
    pub permission: String,
    /// Resolved state.
    pub state: PermissionState,
}

/// Aggregated result of one permission batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Whether every requested permission resolved as [`PermissionState::Granted`].
    pub all_granted: bool,
    /// One outcome per requested permission, ordered granted first, then
    /// denied, then permanently denied.
    pub outcomes: Vec<PermissionOutcome>,
}
