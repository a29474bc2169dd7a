use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use grantkit_permission::{
    DialogChoice, PermissionHost, PermissionRequest, PermissionSequencer, PromptToken,
    RationaleDialog, RationalePrompt,
};

/// A stand-in for the platform: contacts is already granted, everything
/// else goes through the prompt. UI events queue up here and the main
/// loop below answers them the way a user would.
struct DemoHost {
    granted: HashSet<&'static str>,
    dialogs: RefCell<VecDeque<(PromptToken, String)>>,
    prompts: RefCell<VecDeque<(PromptToken, String)>>,
}

impl PermissionHost for DemoHost {
    fn runtime_prompts_supported(&self) -> bool {
        true
    }

    fn is_granted(&self, permission: &str) -> bool {
        self.granted.contains(permission)
    }

    fn should_show_rationale(&self, permission: &str) -> bool {
        permission == "android.permission.READ_SMS"
    }

    fn request_prompt(&self, permission: &str, token: PromptToken) {
        self.prompts
            .borrow_mut()
            .push_back((token, permission.into()));
    }
}

impl RationaleDialog for DemoHost {
    fn present(&self, token: PromptToken, prompt: &RationalePrompt) {
        self.dialogs
            .borrow_mut()
            .push_back((token, prompt.message.clone()));
    }
}

fn main() {
    let host = Arc::new(DemoHost {
        granted: HashSet::from(["android.permission.READ_CONTACTS"]),
        dialogs: RefCell::new(VecDeque::new()),
        prompts: RefCell::new(VecDeque::new()),
    });
    let mut sequencer = PermissionSequencer::from_host(&host);

    let requests = vec![
        PermissionRequest::new(
            "android.permission.READ_SMS",
            RationalePrompt::new(
                "Permission required",
                "SMS access lets the app read verification codes for you.",
            ),
        ),
        PermissionRequest::new(
            "android.permission.READ_CONTACTS",
            RationalePrompt::new(
                "Permission required",
                "Contacts power the invite suggestions.",
            ),
        ),
        PermissionRequest::new(
            "android.permission.WRITE_EXTERNAL_STORAGE",
            RationalePrompt::new(
                "Permission required",
                "Storage access is used to export your backups.",
            ),
        ),
    ];

    println!("Requesting {} permissions...", requests.len());
    let receiver = sequencer
        .request_batch_channel(requests)
        .expect("batch is not empty");

    // Answer the queued UI the way a user would: accept the SMS
    // rationale, grant the SMS prompt, decline the storage prompt.
    while !host.dialogs.borrow().is_empty() || !host.prompts.borrow().is_empty() {
        let dialog = host.dialogs.borrow_mut().pop_front();
        if let Some((token, message)) = dialog {
            println!("[dialog] {message} -> OK");
            sequencer
                .handle_dialog_choice(token, DialogChoice::Affirmative)
                .expect("host is alive");
            continue;
        }

        let (token, permission) = host.prompts.borrow_mut().pop_front().expect("a prompt");
        let grants = permission != "android.permission.WRITE_EXTERNAL_STORAGE";
        println!("[prompt] {permission} -> {}", if grants { "allow" } else { "deny" });
        sequencer
            .handle_raw_prompt_results(token, &[grants])
            .expect("host is alive");
    }

    let outcome = receiver.recv_blocking().expect("batch completed");
    println!("\nAll granted: {}", outcome.all_granted);
    for resolved in &outcome.outcomes {
        println!("  {}: {:?}", resolved.permission, resolved.state);
    }
}
