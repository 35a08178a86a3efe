use crate::context::Conversation;
use crate::llm::Message;

/// The composition the user has not sent yet. Empty text counts as no text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingInput {
    text: Option<String>,
    image: Option<Vec<u8>>,
}

impl PendingInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    pub fn with_image(mut self, image: Vec<u8>) -> Self {
        self.set_image(image);
        self
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn image(&self) -> Option<&[u8]> {
        self.image.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.image.is_none()
    }

    fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.text = if text.is_empty() { None } else { Some(text) };
    }

    fn set_image(&mut self, image: Vec<u8>) {
        self.image = if image.is_empty() { None } else { Some(image) };
    }

    fn clear(&mut self) {
        self.text = None;
        self.image = None;
    }
}

/// What changed in a `SessionState`. Delivered to every observer after the
/// change has been made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateChange {
    MessageAppended { index: usize },
    PendingInputChanged,
    BusyChanged(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub type Observer = Box<dyn Fn(&SessionState, &StateChange) + Send>;

/// Observable state of one chat session: transcript, composition, busy flag.
///
/// Reads go through the getters. The composition can be edited freely; the
/// transcript and the busy flag are only changed by the session controller.
#[derive(Default)]
pub struct SessionState {
    conversation: Conversation,
    pending: PendingInput,
    busy: bool,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn pending_input(&self) -> &PendingInput {
        &self.pending
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.pending.set_text(text);
        self.notify(StateChange::PendingInputChanged);
    }

    pub fn set_image(&mut self, image: Vec<u8>) {
        self.pending.set_image(image);
        self.notify(StateChange::PendingInputChanged);
    }

    pub fn clear_image(&mut self) {
        self.pending.image = None;
        self.notify(StateChange::PendingInputChanged);
    }

    /// Register an observer. It is called after every subsequent change.
    pub fn subscribe(
        &mut self,
        observer: impl Fn(&SessionState, &StateChange) + Send + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sid, _)| *sid != id);
        self.observers.len() != before
    }

    pub(crate) fn append(&mut self, message: Message) {
        self.conversation.append(message);
        let index = self.conversation.len() - 1;
        self.notify(StateChange::MessageAppended { index });
    }

    pub(crate) fn set_busy(&mut self, busy: bool) {
        if self.busy != busy {
            self.busy = busy;
            self.notify(StateChange::BusyChanged(busy));
        }
    }

    pub(crate) fn clear_pending(&mut self) {
        self.pending.clear();
        self.notify(StateChange::PendingInputChanged);
    }

    fn notify(&self, change: StateChange) {
        for (_, observer) in &self.observers {
            observer(self, &change);
        }
    }
}

impl std::fmt::Debug for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionState")
            .field("messages", &self.conversation.len())
            .field("pending", &self.pending)
            .field("busy", &self.busy)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_empty_text_counts_as_absent() {
        let input = PendingInput::new().with_text("");
        assert!(input.is_empty());
        assert!(input.text().is_none());
    }

    #[test]
    fn test_observers_see_changes_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut state = SessionState::new();
        let sink = seen.clone();
        state.subscribe(move |_, change| sink.lock().unwrap().push(change.clone()));

        state.set_text("hi");
        state.set_busy(true);
        state.append(Message::user("hi"));
        state.set_busy(false);

        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                StateChange::PendingInputChanged,
                StateChange::BusyChanged(true),
                StateChange::MessageAppended { index: 0 },
                StateChange::BusyChanged(false),
            ]
        );
    }

    #[test]
    fn test_observer_reads_state_after_change() {
        let seen_busy = Arc::new(Mutex::new(None));
        let mut state = SessionState::new();
        let sink = seen_busy.clone();
        state.subscribe(move |state, _| *sink.lock().unwrap() = Some(state.is_busy()));

        state.set_busy(true);
        assert_eq!(*seen_busy.lock().unwrap(), Some(true));
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let count = Arc::new(Mutex::new(0));
        let mut state = SessionState::new();
        let sink = count.clone();
        let id = state.subscribe(move |_, _| *sink.lock().unwrap() += 1);

        state.set_text("a");
        assert!(state.unsubscribe(id));
        state.set_text("b");

        assert_eq!(*count.lock().unwrap(), 1);
        assert!(!state.unsubscribe(id));
    }
}
