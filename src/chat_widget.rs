use crate::api::ChatClient;
use crate::chat_message::ChatMessage;
use crate::errors::ChatError;
use crate::status_indicator::TypingIndicator;
use std::sync::Arc;
use tokio::sync::Mutex;

/// The chat widget: message transcript, input buffer, typing indicator and
/// the sending flag that gates submissions. One instance owns its state
/// outright; construct it with the client it should talk through, so tests
/// can point it at a mock server.
pub struct ChatWidget {
    pub messages: Vec<ChatMessage>,
    pub input: String,
    pub sending: bool,
    pub typing: TypingIndicator,
    pub scroll: u16,
    client: Arc<ChatClient>,
}

impl ChatWidget {
    pub fn new(client: Arc<ChatClient>) -> Self {
        Self {
            messages: Vec::new(),
            input: String::new(),
            sending: false,
            typing: TypingIndicator::new(),
            scroll: 0,
            client,
        }
    }

    pub fn client(&self) -> Arc<ChatClient> {
        self.client.clone()
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }

    /// The view clamps the offset to the rendered height, so saturating the
    /// offset pins the transcript to its newest line.
    pub fn scroll_to_bottom(&mut self) {
        self.scroll = u16::MAX;
    }
}

/// Submits one question through the widget's client. Fire-and-forget: every
/// outcome settles as a bot message in the transcript.
///
/// Rejected without side effects when a request is already outstanding or the
/// trimmed input is empty. Otherwise, in order: append the user message,
/// disable send, show the typing indicator, issue the request. The key
/// handler drains the input buffer when it produces the submission, before
/// this task first runs. On settlement the typing indicator is removed,
/// exactly one bot message is appended, and send is re-enabled, on every
/// path.
pub async fn submit(widget: Arc<Mutex<ChatWidget>>, raw_input: String) {
    let (client, question) = {
        let mut guard = widget.lock().await;
        if guard.sending {
            log::debug!("submit rejected: a request is already outstanding");
            return;
        }
        let question = raw_input.trim().to_string();
        if question.is_empty() {
            return;
        }

        guard.messages.push(ChatMessage::user(question.clone()));
        guard.sending = true;
        guard.typing.set_typing(true);
        guard.scroll_to_bottom();
        (guard.client(), question)
    };

    log::info!("sending question to {}", client.base_url());
    let result = client.ask(&question).await;

    let mut guard = widget.lock().await;
    guard.typing.set_typing(false);
    match result {
        Ok(answer) => {
            log::info!("received answer ({} chars)", answer.len());
            guard.messages.push(ChatMessage::bot(answer));
        }
        Err(err) => {
            log::warn!("request failed: {}", err);
            guard
                .messages
                .push(ChatMessage::bot_error(error_text(&err, client.base_url())));
        }
    }
    guard.sending = false;
    guard.scroll_to_bottom();
}

fn error_text(err: &ChatError, backend_url: &str) -> String {
    match err {
        ChatError::Http { .. } => format!("{}. Make sure the backend is running.", err),
        ChatError::Network(e) => format!(
            "Error: {}. Make sure the backend server is running at {}",
            e, backend_url
        ),
        ChatError::InvalidResponse | ChatError::Config(_) => err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat_message::Sender;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn widget_for(server: &MockServer) -> Arc<Mutex<ChatWidget>> {
        let client = Arc::new(ChatClient::new(server.uri()));
        Arc::new(Mutex::new(ChatWidget::new(client)))
    }

    #[tokio::test]
    async fn successful_submit_appends_user_then_bot() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "answer": "Hi there" })))
            .expect(1)
            .mount(&server)
            .await;

        let widget = widget_for(&server).await;
        submit(widget.clone(), "Hello".to_string()).await;

        let guard = widget.lock().await;
        assert_eq!(guard.messages.len(), 2);
        assert_eq!(guard.messages[0].sender(), Sender::User);
        assert_eq!(guard.messages[0].content(), "Hello");
        assert!(!guard.messages[0].is_error());
        assert_eq!(guard.messages[1].sender(), Sender::Bot);
        assert_eq!(guard.messages[1].content(), "Hi there");
        assert!(!guard.messages[1].is_error());
        assert!(!guard.sending);
        assert!(!guard.typing.is_typing());
    }

    #[tokio::test]
    async fn http_error_settles_as_error_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
            .mount(&server)
            .await;

        let widget = widget_for(&server).await;
        submit(widget.clone(), "Hello".to_string()).await;

        let guard = widget.lock().await;
        assert_eq!(guard.messages.len(), 2);
        let bot = &guard.messages[1];
        assert!(bot.is_error());
        assert!(bot.content().contains("500"));
        assert!(bot.content().contains("oops"));
        assert!(!guard.sending);
        assert!(!guard.typing.is_typing());
    }

    #[tokio::test]
    async fn missing_answer_settles_as_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let widget = widget_for(&server).await;
        submit(widget.clone(), "Hello".to_string()).await;

        let guard = widget.lock().await;
        let bot = guard.messages.last().unwrap();
        assert!(bot.is_error());
        assert_eq!(bot.content(), "Invalid response format from server");
    }

    #[tokio::test]
    async fn whitespace_input_is_a_no_op() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "answer": "unused" })))
            .expect(0)
            .mount(&server)
            .await;

        let widget = widget_for(&server).await;
        submit(widget.clone(), "   ".to_string()).await;

        let guard = widget.lock().await;
        assert!(guard.messages.is_empty());
        assert!(!guard.sending);
        assert!(!guard.typing.is_typing());
        // The mock's expect(0) verifies no request was issued.
    }

    #[tokio::test]
    async fn second_submit_while_pending_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(Duration::from_millis(200))
                    .set_body_json(json!({ "answer": "Hi there" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let widget = widget_for(&server).await;
        let first = tokio::spawn(submit(widget.clone(), "Hello".to_string()));

        // Wait until the first submission is in flight.
        loop {
            if widget.lock().await.sending {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        submit(widget.clone(), "again".to_string()).await;
        first.await.unwrap();

        let guard = widget.lock().await;
        assert_eq!(guard.messages.len(), 2);
        assert_eq!(guard.messages[0].content(), "Hello");
        assert_eq!(guard.messages[1].content(), "Hi there");
    }

    #[tokio::test]
    async fn network_failure_names_the_backend() {
        let client = Arc::new(ChatClient::new("http://127.0.0.1:9"));
        let widget = Arc::new(Mutex::new(ChatWidget::new(client)));
        submit(widget.clone(), "Hello".to_string()).await;

        let guard = widget.lock().await;
        let bot = guard.messages.last().unwrap();
        assert!(bot.is_error());
        assert!(bot.content().contains("http://127.0.0.1:9"));
        assert!(!guard.sending);
        assert!(!guard.typing.is_typing());
    }

    #[tokio::test]
    async fn typing_indicator_tracks_the_outstanding_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(Duration::from_millis(100))
                    .set_body_json(json!({ "answer": "Hi there" })),
            )
            .mount(&server)
            .await;

        let widget = widget_for(&server).await;
        let task = tokio::spawn(submit(widget.clone(), "Hello".to_string()));

        loop {
            let guard = widget.lock().await;
            if guard.sending {
                assert!(guard.typing.is_typing());
                break;
            }
            drop(guard);
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        task.await.unwrap();
        let guard = widget.lock().await;
        assert!(!guard.typing.is_typing());
    }
}
