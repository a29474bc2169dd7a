//! The sequential permission flow state machine.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Weak};

use grantkit_dialog::DialogChoice;
use log::debug;

use crate::error::{Result, SequenceError};
use crate::host::{PermissionHost, PromptToken, RationaleDialog};
use crate::{BatchOutcome, PermissionOutcome, PermissionRequest, PermissionState};

/// What the sequencer is currently waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Waiting {
    Idle,
    DialogChoice(PromptToken),
    PromptResult(PromptToken),
}

type CompletionCallback = Box<dyn FnOnce(BatchOutcome)>;

/// Walks a batch of permission requests through check, rationale and
/// prompt, one request at a time, and fires a single completion callback
/// once every request has been resolved.
///
/// The sequencer is single-threaded and event-driven: it issues prompts
/// and dialogs through its collaborators without blocking, then waits
/// for the caller to feed the host's asynchronous answers back in via
/// [`handle_prompt_result`](Self::handle_prompt_result) and
/// [`handle_dialog_choice`](Self::handle_dialog_choice). At most one
/// batch is in flight at a time; a new batch replaces the bookkeeping of
/// any batch still running.
///
/// Collaborators are held as weak references so a sequencer never keeps
/// a destroyed host alive; once the host is gone, entry points fail with
/// [`SequenceError::HostGone`].
pub struct PermissionSequencer {
    host: Weak<dyn PermissionHost>,
    dialog: Weak<dyn RationaleDialog>,
    requests: Vec<PermissionRequest>,
    pending: VecDeque<usize>,
    granted: Vec<String>,
    denied: Vec<String>,
    denied_permanently: Vec<String>,
    on_complete: Option<CompletionCallback>,
    batch: u64,
    waiting: Waiting,
}

impl PermissionSequencer {
    /// Create a sequencer backed by separate host and dialog collaborators.
    pub fn new<H, D>(host: &Arc<H>, dialog: &Arc<D>) -> Self
    where
        H: PermissionHost + 'static,
        D: RationaleDialog + 'static,
    {
        let host: Arc<dyn PermissionHost> = host.clone();
        let dialog: Arc<dyn RationaleDialog> = dialog.clone();
        Self::from_refs(Arc::downgrade(&host), Arc::downgrade(&dialog))
    }

    /// Create a sequencer from a host that also presents its own dialogs.
    pub fn from_host<H>(host: &Arc<H>) -> Self
    where
        H: PermissionHost + RationaleDialog + 'static,
    {
        let host_dyn: Arc<dyn PermissionHost> = host.clone();
        let dialog_dyn: Arc<dyn RationaleDialog> = host.clone();
        Self::from_refs(Arc::downgrade(&host_dyn), Arc::downgrade(&dialog_dyn))
    }

    fn from_refs(host: Weak<dyn PermissionHost>, dialog: Weak<dyn RationaleDialog>) -> Self {
        Self {
            host,
            dialog,
            requests: Vec::new(),
            pending: VecDeque::new(),
            granted: Vec::new(),
            denied: Vec::new(),
            denied_permanently: Vec::new(),
            on_complete: None,
            batch: 0,
            waiting: Waiting::Idle,
        }
    }

    /// Request every permission in `requests`, invoking `on_complete`
    /// exactly once when all of them have been resolved.
    ///
    /// A new batch replaces any batch still in flight: the old batch's
    /// bookkeeping is dropped and its late events are ignored, though a
    /// dialog or prompt the host already put on screen is not withdrawn.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::EmptyBatch`] for an empty `requests`
    /// (the callback is never invoked, and a batch already in flight is
    /// left undisturbed), and [`SequenceError::HostGone`] if the host
    /// has been dropped.
    pub fn request_batch(
        &mut self,
        requests: Vec<PermissionRequest>,
        on_complete: impl FnOnce(BatchOutcome) + 'static,
    ) -> Result<()> {
        if requests.is_empty() {
            return Err(SequenceError::EmptyBatch);
        }

        self.batch = self.batch.wrapping_add(1);
        self.pending = (0..requests.len()).collect();
        self.requests = requests;
        self.granted.clear();
        self.denied.clear();
        self.denied_permanently.clear();
        self.on_complete = Some(Box::new(on_complete));
        self.waiting = Waiting::Idle;

        debug!(
            "starting permission batch {} with {} request(s)",
            self.batch,
            self.requests.len()
        );
        self.resolve_front()
    }

    /// Like [`request_batch`](Self::request_batch), but delivers the
    /// [`BatchOutcome`] over a channel instead of a closure.
    ///
    /// The returned receiver yields exactly one value; receive it with
    /// `recv().await` from async code or `recv_blocking()` elsewhere.
    ///
    /// # Errors
    ///
    /// Same as [`request_batch`](Self::request_batch).
    pub fn request_batch_channel(
        &mut self,
        requests: Vec<PermissionRequest>,
    ) -> Result<async_channel::Receiver<BatchOutcome>> {
        let (sender, receiver) = async_channel::bounded(1);
        self.request_batch(requests, move |outcome| {
            let _ = sender.try_send(outcome);
        })?;
        Ok(receiver)
    }

    /// Whether a batch is currently being sequenced.
    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.on_complete.is_some()
    }

    /// Feed a native prompt result back into the flow.
    ///
    /// `token` must be the token handed to
    /// [`PermissionHost::request_prompt`]. A result carrying a token the
    /// sequencer is not waiting on — late, duplicated, or from a
    /// superseded batch — is dropped without complaint, since hosts may
    /// echo unrelated prompt results.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::HostGone`] if the host has been dropped.
    pub fn handle_prompt_result(&mut self, token: PromptToken, granted: bool) -> Result<()> {
        if self.waiting != Waiting::PromptResult(token) {
            debug!("ignoring prompt result for stale token {token:?}");
            return Ok(());
        }
        self.waiting = Waiting::Idle;

        if granted {
            self.record(token.index, PermissionState::Granted);
        } else {
            let host = self.host()?;
            let permission = &self.requests[token.index].permission;
            // Rationale still available means the user can be asked again;
            // no rationale after a denial means the platform locked it out.
            let state = if host.should_show_rationale(permission) {
                PermissionState::Denied
            } else {
                PermissionState::DeniedPermanently
            };
            self.record(token.index, state);
        }
        self.resolve_front()
    }

    /// Feed a raw platform grant-result array back into the flow.
    ///
    /// Convenience over [`handle_prompt_result`](Self::handle_prompt_result)
    /// for hosts that surface the platform callback unchanged: the
    /// request counts as granted iff the first element is `true`, and an
    /// empty array (the prompt was interrupted before the user answered)
    /// counts as a denial.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::HostGone`] if the host has been dropped.
    pub fn handle_raw_prompt_results(
        &mut self,
        token: PromptToken,
        results: &[bool],
    ) -> Result<()> {
        let granted = results.first().copied().unwrap_or(false);
        self.handle_prompt_result(token, granted)
    }

    /// Feed the user's rationale dialog choice back into the flow.
    ///
    /// An affirmative choice issues the native prompt for the same
    /// request; a negative choice records the permission as denied
    /// without ever prompting. Choices carrying a stale token are
    /// dropped without complaint.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::HostGone`] if the host has been dropped.
    pub fn handle_dialog_choice(&mut self, token: PromptToken, choice: DialogChoice) -> Result<()> {
        if self.waiting != Waiting::DialogChoice(token) {
            debug!("ignoring dialog choice for stale token {token:?}");
            return Ok(());
        }
        self.waiting = Waiting::Idle;

        match choice {
            DialogChoice::Affirmative => {
                let host = self.host()?;
                host.request_prompt(&self.requests[token.index].permission, token);
                self.waiting = Waiting::PromptResult(token);
                Ok(())
            }
            DialogChoice::Negative => {
                self.record(token.index, PermissionState::Denied);
                self.resolve_front()
            }
        }
    }

    /// Resolve requests from the queue front until one needs the user.
    fn resolve_front(&mut self) -> Result<()> {
        while let Some(&index) = self.pending.front() {
            let host = self.host()?;

            if !host.runtime_prompts_supported() {
                // Install-time grant model: nothing to ask.
                self.record(index, PermissionState::Granted);
                continue;
            }

            let permission = &self.requests[index].permission;
            if host.is_granted(permission) {
                self.record(index, PermissionState::Granted);
                continue;
            }

            let token = PromptToken {
                batch: self.batch,
                index,
            };
            if host.should_show_rationale(permission) {
                let dialog = self.dialog()?;
                dialog.present(token, &self.requests[index].rationale);
                self.waiting = Waiting::DialogChoice(token);
            } else {
                host.request_prompt(permission, token);
                self.waiting = Waiting::PromptResult(token);
            }
            return Ok(());
        }

        self.finish();
        Ok(())
    }

    fn record(&mut self, index: usize, state: PermissionState) {
        let permission = self.requests[index].permission.clone();
        debug!("permission {permission:?} resolved as {state:?}");
        match state {
            PermissionState::Granted => self.granted.push(permission),
            PermissionState::Denied => self.denied.push(permission),
            PermissionState::DeniedPermanently => self.denied_permanently.push(permission),
        }
        self.pending.pop_front();
    }

    fn finish(&mut self) {
        let mut outcomes = Vec::with_capacity(self.requests.len());
        for permission in self.granted.drain(..) {
            outcomes.push(PermissionOutcome {
                permission,
                state: PermissionState::Granted,
            });
        }
        for permission in self.denied.drain(..) {
            outcomes.push(PermissionOutcome {
                permission,
                state: PermissionState::Denied,
            });
        }
        for permission in self.denied_permanently.drain(..) {
            outcomes.push(PermissionOutcome {
                permission,
                state: PermissionState::DeniedPermanently,
            });
        }

        let all_granted = outcomes
            .iter()
            .all(|outcome| outcome.state == PermissionState::Granted);

        self.requests.clear();
        self.pending.clear();
        self.waiting = Waiting::Idle;

        debug!(
            "permission batch {} complete, all granted: {all_granted}",
            self.batch
        );
        if let Some(on_complete) = self.on_complete.take() {
            on_complete(BatchOutcome {
                all_granted,
                outcomes,
            });
        }
    }

    fn host(&self) -> Result<Arc<dyn PermissionHost>> {
        self.host.upgrade().ok_or(SequenceError::HostGone)
    }

    fn dialog(&self) -> Result<Arc<dyn RationaleDialog>> {
        self.dialog.upgrade().ok_or(SequenceError::HostGone)
    }
}

impl fmt::Debug for PermissionSequencer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PermissionSequencer")
            .field("batch", &self.batch)
            .field("pending", &self.pending)
            .field("waiting", &self.waiting)
            .finish_non_exhaustive()
    }
}
