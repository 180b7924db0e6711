//! Chat loop: read a line, run a turn, print the reply.

use deepdesk_core::{Conversation, TurnOutcome};
use deepdesk_interfaces::{is_exit_phrase, Interface};

pub const REPLY_PREFIX: &str = "deepdesk";

pub struct ReplAgent<I: Interface> {
    conversation: Conversation,
    interface: I,
}

impl<I: Interface> ReplAgent<I> {
    pub fn new(conversation: Conversation, interface: I) -> Self {
        Self {
            conversation,
            interface,
        }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub async fn run(&mut self) {
        self.interface
            .show_status("DeepSeek chat (type 'exit' to quit)\n")
            .await;

        loop {
            let Some(input) = self.interface.receive_input().await else {
                self.interface.show_status("\nExiting.").await;
                break;
            };

            if input.trim().is_empty() {
                continue;
            }
            if is_exit_phrase(&input) {
                self.interface.show_status("Bye!").await;
                break;
            }

            let outcome = self.conversation.handle_turn(&input).await;
            if let Some(notice) = outcome.planner_notice() {
                self.interface.show_status(notice).await;
            }
            match &outcome {
                TurnOutcome::Reply { text, .. } => {
                    self.interface
                        .send_output(&format!("{REPLY_PREFIX}: {text}"))
                        .await;
                }
                TurnOutcome::Failed { message, .. } => {
                    self.interface.send_output(message).await;
                }
                TurnOutcome::Skipped => {}
            }
        }
    }
}
