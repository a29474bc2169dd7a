//! Capability traits the sequencer consumes from its host environment.

use grantkit_dialog::RationalePrompt;

/// Identifies one pending prompt or rationale dialog within one batch.
///
/// A token is handed to the host alongside each prompt and must be
/// echoed back verbatim through the sequencer's event entry points.
/// Tokens from a superseded batch no longer match anything and their
/// events are silently dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PromptToken {
    pub(crate) batch: u64,
    pub(crate) index: usize,
}

/// Host-environment capabilities needed to drive a permission flow.
///
/// Implemented by the activity, window or app shell that owns the actual
/// platform APIs. All methods are called on the UI thread; none of them
/// may call back into the sequencer synchronously.
pub trait PermissionHost {
    /// Whether the platform uses runtime permission prompts at all.
    ///
    /// Returning `false` marks a legacy platform where permissions were
    /// granted at install time; every request then resolves as granted
    /// without prompting.
    fn runtime_prompts_supported(&self) -> bool;

    /// Whether `permission` is currently granted.
    fn is_granted(&self, permission: &str) -> bool;

    /// Whether the user should see a rationale before (re-)prompting.
    ///
    /// Platforms report `true` after a denial that left re-asking
    /// possible, and `false` both for a first-time ask and once the user
    /// has locked the permission out.
    fn should_show_rationale(&self, permission: &str) -> bool;

    /// Put the native permission prompt for `permission` on screen.
    ///
    /// Fire-and-forget: the result is delivered later through
    /// [`PermissionSequencer::handle_prompt_result`] carrying the same
    /// `token`.
    ///
    /// [`PermissionSequencer::handle_prompt_result`]: crate::PermissionSequencer::handle_prompt_result
    fn request_prompt(&self, permission: &str, token: PromptToken);
}

/// Presents a rationale dialog on behalf of the sequencer.
///
/// Fire-and-forget like [`PermissionHost::request_prompt`]: the button
/// choice is delivered later through
/// [`PermissionSequencer::handle_dialog_choice`] carrying the same
/// `token`.
///
/// [`PermissionSequencer::handle_dialog_choice`]: crate::PermissionSequencer::handle_dialog_choice
pub trait RationaleDialog {
    /// Display `prompt` and remember `token` for the choice callback.
    fn present(&self, token: PromptToken, prompt: &RationalePrompt);
}
