//! One user turn, end to end.
//!
//! Both tracks get the user's text, the planner picks a capability, the dispatcher runs it,
//! and the reply (or the failure) is recorded on both tracks before the next turn starts.

use crate::dispatcher::{select_reply, Dispatcher};
use crate::planner::Planner;
use crate::planning::Plan;
use deepdesk_memory::ConversationBuffer;
use deepdesk_tools::CapabilityContext;

const PLANNER_USER_PREFIX: &str = "User: ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    Reply {
        capability: String,
        text: String,
        planner_notice: Option<String>,
    },
    Failed {
        capability: String,
        message: String,
        planner_notice: Option<String>,
    },
    Skipped,
}

impl TurnOutcome {
    /// Text to display for this turn, if any.
    pub fn display_text(&self) -> Option<&str> {
        match self {
            TurnOutcome::Reply { text, .. } => Some(text),
            TurnOutcome::Failed { message, .. } => Some(message),
            TurnOutcome::Skipped => None,
        }
    }

    pub fn planner_notice(&self) -> Option<&str> {
        match self {
            TurnOutcome::Reply { planner_notice, .. }
            | TurnOutcome::Failed { planner_notice, .. } => planner_notice.as_deref(),
            TurnOutcome::Skipped => None,
        }
    }
}

pub struct Conversation {
    answer_track: ConversationBuffer,
    planning_track: ConversationBuffer,
    planner: Planner,
    dispatcher: Dispatcher,
}

impl Conversation {
    pub fn new(
        answer_track: ConversationBuffer,
        planning_track: ConversationBuffer,
        planner: Planner,
        dispatcher: Dispatcher,
    ) -> Self {
        Self {
            answer_track,
            planning_track,
            planner,
            dispatcher,
        }
    }

    pub fn answer_track(&self) -> &ConversationBuffer {
        &self.answer_track
    }

    pub fn planning_track(&self) -> &ConversationBuffer {
        &self.planning_track
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub async fn handle_turn(&mut self, input: &str) -> TurnOutcome {
        let input = input.trim();
        if input.is_empty() {
            return TurnOutcome::Skipped;
        }

        self.answer_track.add_user(input);
        self.planning_track
            .add_user(format!("{PLANNER_USER_PREFIX}{input}"));

        let (plan, planner_notice) = match self.planner.plan(&self.planning_track).await {
            Ok(plan) => (plan, None),
            Err(e) => {
                tracing::warn!("Planning failed, falling back to qa: {}", e);
                (
                    Plan::fallback(),
                    Some(format!("[planner] {}; switching to qa mode", e)),
                )
            }
        };

        let answer_history = self.answer_track.snapshot();
        let ctx = CapabilityContext::new(&answer_history);

        match self.dispatcher.dispatch(&plan, &ctx).await {
            Ok(dispatched) => {
                let text = select_reply(&plan, &dispatched.capability, dispatched.output);
                self.answer_track.add_assistant(text.clone());
                self.planning_track.add_assistant(format!(
                    "Capability '{}' finished. Reply: {}",
                    dispatched.capability, text
                ));
                TurnOutcome::Reply {
                    capability: dispatched.capability,
                    text,
                    planner_notice,
                }
            }
            Err(e) => {
                let message = format!("[capability {} error] {}", plan.capability, e);
                tracing::error!("{}", message);
                self.answer_track.add_assistant(message.clone());
                self.planning_track.add_assistant(message.clone());
                TurnOutcome::Failed {
                    capability: plan.capability,
                    message,
                    planner_notice,
                }
            }
        }
    }
}
