pub mod conversation;
pub mod dispatcher;
pub mod planner;
pub mod planning;

#[cfg(test)]
mod test_support;

pub use conversation::{Conversation, TurnOutcome};
pub use dispatcher::{select_reply, DispatchError, Dispatched, Dispatcher};
pub use planner::{extract_plan_object, Planner, PlanningError};
pub use planning::Plan;
