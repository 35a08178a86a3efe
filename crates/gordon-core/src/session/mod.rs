mod controller;
pub mod media;
mod state;

pub use controller::{Completion, SendOutcome, SessionController};
pub use state::{Observer, PendingInput, SessionState, StateChange, SubscriptionId};
