use super::media::to_jpeg;
use super::state::{PendingInput, SessionState};
use crate::constants::defaults;
use crate::error::{ClientError, SessionError};
use crate::llm::{GenerativeClient, Message};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::oneshot;

/// Result of one remote send, as delivered back to the controller's owner.
pub type Completion = Result<String, ClientError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// The user turn was appended and a request is in flight.
    Started,
    /// Nothing to send: no text and no image.
    Ignored,
}

enum Request {
    Text(Vec<Message>),
    Image { prompt: String, jpeg: Vec<u8> },
}

/// Turns the pending composition into one request at a time and records the
/// exchange in the transcript.
///
/// The network call runs on the tokio runtime, but its result is only
/// applied by whoever holds `&mut SessionController`, through
/// [`wait_for_completion`](Self::wait_for_completion) or
/// [`try_apply_completion`](Self::try_apply_completion). State is never
/// touched from the spawned task.
pub struct SessionController {
    state: SessionState,
    client: Arc<dyn GenerativeClient>,
    runtime: Option<Handle>,
    in_flight: Option<oneshot::Receiver<Completion>>,
}

impl SessionController {
    pub fn new(client: Arc<dyn GenerativeClient>) -> Self {
        Self {
            state: SessionState::new(),
            client,
            runtime: None,
            in_flight: None,
        }
    }

    /// Spawn requests on `handle` instead of the runtime current at send time.
    pub fn with_runtime(mut self, handle: Handle) -> Self {
        self.runtime = Some(handle);
        self
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Mutable access for editing the composition and managing observers.
    pub fn state_mut(&mut self) -> &mut SessionState {
        &mut self.state
    }

    pub fn is_busy(&self) -> bool {
        self.state.is_busy()
    }

    pub fn pending_input(&self) -> &PendingInput {
        self.state.pending_input()
    }

    pub fn conversation(&self) -> &crate::context::Conversation {
        self.state.conversation()
    }

    /// Send the pending composition.
    ///
    /// With an image, the image is the user turn and the text (if any) goes
    /// along as its caption; no separate text message is recorded.
    pub fn send_message(&mut self) -> Result<SendOutcome, SessionError> {
        if self.state.pending_input().is_empty() {
            tracing::debug!("Nothing to send");
            return Ok(SendOutcome::Ignored);
        }
        if self.state.is_busy() {
            tracing::warn!("Send rejected: a request is already in flight");
            return Err(SessionError::Busy);
        }
        let runtime = match self.runtime.clone() {
            Some(handle) => handle,
            None => Handle::try_current().map_err(|_| SessionError::NoRuntime)?,
        };

        // Busy before anything is appended, so observers of the user turn
        // already see the send as accepted.
        self.state.set_busy(true);
        let pending = self.state.pending_input().clone();
        let (tx, rx) = oneshot::channel();

        match pending.image() {
            Some(raw) => {
                let prompt = pending.text().unwrap_or_default().to_string();
                match to_jpeg(raw) {
                    Ok(jpeg) => {
                        self.state.append(Message::user_image(jpeg.clone()));
                        self.spawn(&runtime, Request::Image { prompt, jpeg }, tx);
                    }
                    Err(e) => {
                        self.state.append(Message::user_image(raw.to_vec()));
                        let _ = tx.send(Err(e));
                    }
                }
            }
            None => {
                let text = pending.text().unwrap_or_default();
                self.state.append(Message::user(text));
                let history = self.state.conversation().snapshot().to_vec();
                self.spawn(&runtime, Request::Text(history), tx);
            }
        }

        self.in_flight = Some(rx);
        Ok(SendOutcome::Started)
    }

    fn spawn(&self, runtime: &Handle, request: Request, tx: oneshot::Sender<Completion>) {
        let client = self.client.clone();
        runtime.spawn(async move {
            let result = match request {
                Request::Text(history) => {
                    tracing::debug!("Sending text turn ({} messages)", history.len());
                    client.send_text(&history).await
                }
                Request::Image { prompt, jpeg } => {
                    tracing::debug!("Sending image turn ({} bytes)", jpeg.len());
                    client.send_image(&prompt, &jpeg).await
                }
            };
            // The receiver is gone only if the controller was dropped.
            let _ = tx.send(result);
        });
    }

    /// Wait for the in-flight send and apply its result. Returns the model
    /// message that was appended.
    ///
    /// Cancel safe: if this future is dropped before the result arrives, the
    /// send stays in flight and a later wait or poll still applies it.
    pub async fn wait_for_completion(&mut self) -> Result<Message, SessionError> {
        let rx = self.in_flight.as_mut().ok_or(SessionError::Idle)?;
        let received = rx.await;
        self.in_flight = None;
        let reply = match received {
            Ok(completion) => self.apply(completion),
            Err(_) => self.finish(error_message(&SessionError::CompletionChannelClosed)),
        };
        Ok(reply)
    }

    /// Apply the in-flight result if it has arrived, without waiting. For
    /// hosts that pump their own event loop.
    pub fn try_apply_completion(&mut self) -> Option<Message> {
        let polled = self.in_flight.as_mut()?.try_recv();
        match polled {
            Ok(completion) => {
                self.in_flight = None;
                Some(self.apply(completion))
            }
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => {
                self.in_flight = None;
                Some(self.finish(error_message(&SessionError::CompletionChannelClosed)))
            }
        }
    }

    /// `send_message` followed by `wait_for_completion`. `None` when there
    /// was nothing to send.
    pub async fn send_and_wait(&mut self) -> Result<Option<Message>, SessionError> {
        match self.send_message()? {
            SendOutcome::Ignored => Ok(None),
            SendOutcome::Started => self.wait_for_completion().await.map(Some),
        }
    }

    fn apply(&mut self, completion: Completion) -> Message {
        let reply = match completion {
            Ok(text) => Message::model(text),
            Err(e) => {
                tracing::warn!("Send failed: {}", e);
                error_message(&e)
            }
        };
        self.finish(reply)
    }

    fn finish(&mut self, reply: Message) -> Message {
        self.state.append(reply.clone());
        self.state.clear_pending();
        self.state.set_busy(false);
        reply
    }
}

fn error_message(error: &dyn std::fmt::Display) -> Message {
    Message::model(format!("{}{}", defaults::ERROR_PREFIX, error))
}
