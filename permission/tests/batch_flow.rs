//! End-to-end permission batches driven through the public API only.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

use grantkit_permission::{
    DialogChoice, PermissionHost, PermissionRequest, PermissionSequencer, PermissionState,
    PromptToken, RationaleDialog, RationalePrompt,
};

/// Grant lifecycle of one permission on the simulated platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GrantState {
    NotAsked,
    DeniedOnce,
    LockedOut,
    Granted,
}

/// In-memory platform with Android-style rationale reporting: a
/// rationale is warranted only after a denial that left re-asking
/// possible, and a second denial locks the permission out.
struct SimulatedPlatform {
    grants: RefCell<HashMap<String, GrantState>>,
    shown_dialogs: RefCell<VecDeque<PromptToken>>,
    shown_prompts: RefCell<VecDeque<(String, PromptToken)>>,
}

impl SimulatedPlatform {
    fn new() -> Self {
        Self {
            grants: RefCell::new(HashMap::new()),
            shown_dialogs: RefCell::new(VecDeque::new()),
            shown_prompts: RefCell::new(VecDeque::new()),
        }
    }

    fn with_state(self, permission: &str, state: GrantState) -> Self {
        self.grants.borrow_mut().insert(permission.into(), state);
        self
    }

    fn state(&self, permission: &str) -> GrantState {
        self.grants
            .borrow()
            .get(permission)
            .copied()
            .unwrap_or(GrantState::NotAsked)
    }

    /// Answer the prompt currently on screen, updating the platform's
    /// own grant state before echoing the raw result array back.
    fn answer_prompt(&self, sequencer: &mut PermissionSequencer, grants: bool) {
        let (permission, token) = self
            .shown_prompts
            .borrow_mut()
            .pop_front()
            .expect("a prompt on screen");

        let next = if grants {
            GrantState::Granted
        } else {
            match self.state(&permission) {
                GrantState::DeniedOnce | GrantState::LockedOut => GrantState::LockedOut,
                _ => GrantState::DeniedOnce,
            }
        };
        self.grants.borrow_mut().insert(permission, next);

        sequencer
            .handle_raw_prompt_results(token, &[grants])
            .unwrap();
    }

    fn answer_dialog(&self, sequencer: &mut PermissionSequencer, choice: DialogChoice) {
        let token = self
            .shown_dialogs
            .borrow_mut()
            .pop_front()
            .expect("a dialog on screen");
        sequencer.handle_dialog_choice(token, choice).unwrap();
    }
}

impl PermissionHost for SimulatedPlatform {
    fn runtime_prompts_supported(&self) -> bool {
        true
    }

    fn is_granted(&self, permission: &str) -> bool {
        self.state(permission) == GrantState::Granted
    }

    fn should_show_rationale(&self, permission: &str) -> bool {
        self.state(permission) == GrantState::DeniedOnce
    }

    fn request_prompt(&self, permission: &str, token: PromptToken) {
        self.shown_prompts
            .borrow_mut()
            .push_back((permission.into(), token));
    }
}

impl RationaleDialog for SimulatedPlatform {
    fn present(&self, token: PromptToken, _prompt: &RationalePrompt) {
        self.shown_dialogs.borrow_mut().push_back(token);
    }
}

fn request(permission: &str) -> PermissionRequest {
    PermissionRequest::new(
        permission,
        RationalePrompt::new(
            "Permission required",
            format!("The app needs {permission} to work."),
        ),
    )
}

#[test]
fn mixed_batch_against_a_live_platform() {
    let platform = Arc::new(
        SimulatedPlatform::new()
            .with_state("contacts", GrantState::Granted)
            .with_state("sms", GrantState::DeniedOnce),
    );
    let mut sequencer = PermissionSequencer::from_host(&platform);

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    sequencer
        .request_batch(
            vec![request("sms"), request("contacts"), request("storage")],
            move |outcome| sink.borrow_mut().push(outcome),
        )
        .unwrap();

    // sms was denied before, so its rationale dialog comes up first.
    platform.answer_dialog(&mut sequencer, DialogChoice::Affirmative);
    platform.answer_prompt(&mut sequencer, true);
    // contacts is already granted and is skipped; storage prompts directly.
    platform.answer_prompt(&mut sequencer, false);

    let seen = seen.borrow();
    assert_eq!(seen.len(), 1);
    assert!(!seen[0].all_granted);

    let outcomes = &seen[0].outcomes;
    assert_eq!(outcomes.len(), 3);
    assert_eq!(outcomes[0].permission, "sms");
    assert_eq!(outcomes[0].state, PermissionState::Granted);
    assert_eq!(outcomes[1].permission, "contacts");
    assert_eq!(outcomes[1].state, PermissionState::Granted);
    // First denial leaves storage re-askable.
    assert_eq!(outcomes[2].permission, "storage");
    assert_eq!(outcomes[2].state, PermissionState::Denied);
}

#[test]
fn second_denial_locks_out_and_a_later_batch_sees_it() {
    let platform = Arc::new(SimulatedPlatform::new().with_state("storage", GrantState::DeniedOnce));
    let mut sequencer = PermissionSequencer::from_host(&platform);

    let receiver = sequencer
        .request_batch_channel(vec![request("storage")])
        .unwrap();

    platform.answer_dialog(&mut sequencer, DialogChoice::Affirmative);
    platform.answer_prompt(&mut sequencer, false);

    let outcome = receiver.recv_blocking().unwrap();
    assert_eq!(outcome.outcomes[0].state, PermissionState::DeniedPermanently);

    // Asking again finds the lockout: no rationale, prompt denied again.
    let receiver = sequencer
        .request_batch_channel(vec![request("storage")])
        .unwrap();
    assert!(platform.shown_dialogs.borrow().is_empty());
    platform.answer_prompt(&mut sequencer, false);

    let outcome = receiver.recv_blocking().unwrap();
    assert_eq!(outcome.outcomes[0].state, PermissionState::DeniedPermanently);
}
