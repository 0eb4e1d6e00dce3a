//! Panel command dispatch and the per-turn request cycle.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

use sidekick_bridge::{PanelCommand, PanelEvent};
use sidekick_common::Message;

use crate::CompletionClient;

use super::store::ConversationStore;
use super::types::BusyGuard;

/// The single stateful orchestrator of one panel session.
///
/// Owns the conversation store exclusively and mediates between panel
/// commands and the completion client. Each submission runs one cycle:
/// append the user message, emit `loading`, call the endpoint, append
/// the reply (or mapped error text) as the assistant message, emit
/// `response`. Both legs are persisted, so failures survive a restart
/// as ordinary transcript lines.
pub struct SessionController {
    client: Arc<dyn CompletionClient>,
    store: ConversationStore,
    events: UnboundedSender<PanelEvent>,
    /// Whether a completion request is currently in flight.
    busy: AtomicBool,
}

impl SessionController {
    pub fn new(
        client: Arc<dyn CompletionClient>,
        store: ConversationStore,
        events: UnboundedSender<PanelEvent>,
    ) -> Self {
        Self {
            client,
            store,
            events,
            busy: AtomicBool::new(false),
        }
    }

    /// Dispatch one inbound panel command.
    pub async fn handle_command(&mut self, command: PanelCommand) {
        match command {
            PanelCommand::SendMessage { text } => self.handle_send(&text).await,
            PanelCommand::ClearConversation => self.handle_clear(),
            PanelCommand::Unknown => {
                debug!("ignoring unknown panel command");
            }
        }
    }

    async fn handle_send(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }

        // One request in flight at a time: a submission arriving while a
        // turn is pending is dropped, matching the panel's single loading
        // affordance.
        let Some(_guard) = BusyGuard::acquire(&self.busy) else {
            warn!("submission dropped: a completion request is already in flight");
            return;
        };

        self.store.append(Message::user(text));
        self.store.persist();

        self.emit(PanelEvent::Loading);

        let reply = match self.client.complete(self.store.messages()).await {
            Ok(content) => content,
            Err(err) => {
                warn!("completion failed: {err}");
                err.user_message()
            }
        };

        self.store.append(Message::assistant(reply.clone()));
        self.store.persist();

        self.emit(PanelEvent::Response { text: reply });
    }

    fn handle_clear(&mut self) {
        self.store.clear();
        self.store.persist();
        self.emit(PanelEvent::ConversationCleared);
    }

    /// Replay the durable transcript to the panel. The host calls this on
    /// every (re)attachment of the rendering surface, so the UI rebuilds
    /// from durable state instead of transient messages.
    pub fn replay_history(&self) {
        self.emit(PanelEvent::LoadHistory {
            history: self.store.messages().to_vec(),
        });
    }

    /// The current conversation in transcript order.
    pub fn messages(&self) -> &[Message] {
        self.store.messages()
    }

    fn emit(&self, event: PanelEvent) {
        if self.events.send(event).is_err() {
            debug!("panel event dropped: no receiver attached");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::store::MAX_HISTORY_LEN;
    use super::*;
    use crate::AiError;
    use async_trait::async_trait;
    use sidekick_common::{MemoryState, Role};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};

    struct StubClient<F> {
        respond: F,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl<F> CompletionClient for StubClient<F>
    where
        F: Fn(&[Message]) -> Result<String, AiError> + Send + Sync,
    {
        async fn complete(&self, messages: &[Message]) -> Result<String, AiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.respond)(messages)
        }
    }

    fn controller_with<F>(
        respond: F,
    ) -> (
        SessionController,
        UnboundedReceiver<PanelEvent>,
        Arc<StubClient<F>>,
        Arc<MemoryState>,
    )
    where
        F: Fn(&[Message]) -> Result<String, AiError> + Send + Sync + 'static,
    {
        let state = Arc::new(MemoryState::new());
        let client = Arc::new(StubClient {
            respond,
            calls: AtomicUsize::new(0),
        });
        let (tx, rx) = unbounded_channel();
        let controller = SessionController::new(
            client.clone(),
            ConversationStore::load(state.clone()),
            tx,
        );
        (controller, rx, client, state)
    }

    fn drain(rx: &mut UnboundedReceiver<PanelEvent>) -> Vec<PanelEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[tokio::test]
    async fn successful_turn_appends_both_legs_and_notifies() {
        let (mut controller, mut rx, client, _state) =
            controller_with(|_| Ok("hello back".to_string()));

        controller
            .handle_command(PanelCommand::SendMessage { text: "hi".into() })
            .await;

        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            drain(&mut rx),
            vec![
                PanelEvent::Loading,
                PanelEvent::Response {
                    text: "hello back".into()
                }
            ]
        );
        let messages = controller.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0], Message::user("hi"));
        assert_eq!(messages[1], Message::assistant("hello back"));
    }

    #[tokio::test]
    async fn request_carries_full_conversation_including_new_message() {
        let (mut controller, _rx, _client, _state) =
            controller_with(|messages| Ok(format!("saw {} messages", messages.len())));

        controller
            .handle_command(PanelCommand::SendMessage {
                text: "first".into(),
            })
            .await;
        controller
            .handle_command(PanelCommand::SendMessage {
                text: "second".into(),
            })
            .await;

        // first turn: [user]; second turn: [user, assistant, user]
        assert_eq!(controller.messages()[1].content, "saw 1 messages");
        assert_eq!(controller.messages()[3].content, "saw 3 messages");
    }

    #[tokio::test]
    async fn empty_submission_is_a_no_op() {
        let (mut controller, mut rx, client, _state) = controller_with(|_| Ok("unused".into()));

        for text in ["", "   ", "\n\t "] {
            controller
                .handle_command(PanelCommand::SendMessage { text: text.into() })
                .await;
        }

        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
        assert!(drain(&mut rx).is_empty());
        assert!(controller.messages().is_empty());
    }

    #[tokio::test]
    async fn submission_is_trimmed_before_append() {
        let (mut controller, _rx, _client, _state) = controller_with(|_| Ok("ok".into()));

        controller
            .handle_command(PanelCommand::SendMessage {
                text: "  hi  ".into(),
            })
            .await;

        assert_eq!(controller.messages()[0].content, "hi");
    }

    #[tokio::test]
    async fn failure_becomes_durable_transcript_text() {
        let (mut controller, mut rx, _client, state) = controller_with(|_| {
            Err(AiError::Remote {
                status: 500,
                message: "boom".into(),
            })
        });

        controller
            .handle_command(PanelCommand::SendMessage { text: "hi".into() })
            .await;

        let expected = "エラー: 500 - boom";
        assert_eq!(
            drain(&mut rx),
            vec![
                PanelEvent::Loading,
                PanelEvent::Response {
                    text: expected.into()
                }
            ]
        );
        assert_eq!(controller.messages()[1], Message::assistant(expected));

        // The failure text survives a reload from storage.
        let reloaded = ConversationStore::load(state);
        assert_eq!(reloaded.messages()[1].content, expected);
    }

    #[tokio::test]
    async fn missing_credential_turn_appends_instructional_text() {
        let (mut controller, _rx, client, _state) =
            controller_with(|_| Err(AiError::MissingCredential));

        controller
            .handle_command(PanelCommand::SendMessage { text: "hi".into() })
            .await;

        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            controller.messages()[1].content,
            "APIキーが設定されていません。設定からOpenAIのAPIキーを入力してください。"
        );
        assert_eq!(controller.messages()[1].role, Role::Assistant);
    }

    #[tokio::test]
    async fn clear_resets_store_and_storage() {
        let (mut controller, mut rx, _client, state) = controller_with(|_| Ok("reply".into()));

        controller
            .handle_command(PanelCommand::SendMessage { text: "hi".into() })
            .await;
        drain(&mut rx);

        controller
            .handle_command(PanelCommand::ClearConversation)
            .await;

        assert_eq!(drain(&mut rx), vec![PanelEvent::ConversationCleared]);
        assert!(controller.messages().is_empty());
        assert!(ConversationStore::load(state).is_empty());
    }

    #[tokio::test]
    async fn replay_emits_exact_history() {
        let (mut controller, mut rx, _client, _state) = controller_with(|_| Ok("reply".into()));

        controller
            .handle_command(PanelCommand::SendMessage { text: "one".into() })
            .await;
        controller
            .handle_command(PanelCommand::SendMessage { text: "two".into() })
            .await;
        drain(&mut rx);

        controller.replay_history();

        match drain(&mut rx).as_slice() {
            [PanelEvent::LoadHistory { history }] => {
                assert_eq!(history.as_slice(), controller.messages());
                assert_eq!(history.len(), 4);
            }
            other => panic!("unexpected events: {other:?}"),
        }
    }

    #[tokio::test]
    async fn unknown_command_is_ignored() {
        let (mut controller, mut rx, client, _state) = controller_with(|_| Ok("unused".into()));

        controller.handle_command(PanelCommand::Unknown).await;

        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test]
    async fn history_bound_holds_across_many_turns() {
        let (mut controller, _rx, _client, _state) = controller_with(|_| Ok("reply".into()));

        for i in 0..30 {
            controller
                .handle_command(PanelCommand::SendMessage {
                    text: format!("message {i}"),
                })
                .await;
        }

        assert_eq!(controller.messages().len(), MAX_HISTORY_LEN);
    }
}
