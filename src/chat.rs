use crate::api::DashboardApi;
use crate::dom::{Element, NodeId};
use crate::messages::{MessageCatalog, MessageKind};
use crate::models::{ChatMessage, ChatReply, Source};
use crate::view::{SharedView, View};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::{debug, info, warn};

const SUGGESTION_FEEDBACK: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SendOutcome {
    /// Blank input; nothing was appended or sent.
    Rejected,
    Answered,
    ServerError,
    NoAnswer,
    ConnectionError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Reply {
    Answer { text: String, sources: Vec<Source> },
    ServerError(String),
    NoAnswer,
}

pub struct ChatSession {
    api: Arc<dyn DashboardApi>,
    view: SharedView,
    messages: Arc<MessageCatalog>,
    in_flight: AtomicUsize,
}

impl ChatSession {
    pub fn new(api: Arc<dyn DashboardApi>, view: SharedView, messages: Arc<MessageCatalog>) -> Self {
        Self {
            api,
            view,
            messages,
            in_flight: AtomicUsize::new(0),
        }
    }

    pub fn pending(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub async fn submit_input(&self) -> SendOutcome {
        let text = {
            let view = self.view.lock().await;
            view.doc.value(view.handles.message_input).to_string()
        };
        self.send(&text).await
    }

    pub async fn send(&self, raw: &str) -> SendOutcome {
        let text = raw.trim();
        if text.is_empty() {
            return SendOutcome::Rejected;
        }

        let placeholder = {
            let mut view = self.view.lock().await;
            append_message(&mut view, &ChatMessage::user(text));
            let input = view.handles.message_input;
            view.doc.set_value(input, "");
            append_entry(
                &mut view,
                Element::new("div")
                    .class("msg bot loading")
                    .text(self.messages.text(MessageKind::ChatLoading)),
            )
        };

        let pending = PendingSend::new(self, placeholder);
        let result = self.api.chat(text).await;

        let mut view = self.view.lock().await;
        if let Some(placeholder) = pending.settle() {
            view.doc.remove(placeholder);
        }

        let (outcome, reply) = match result {
            Ok(reply) => match interpret(&reply) {
                Reply::Answer { text, sources } => (
                    SendOutcome::Answered,
                    ChatMessage::bot(text).with_sources(sources),
                ),
                Reply::ServerError(detail) => (
                    SendOutcome::ServerError,
                    ChatMessage::bot(self.messages.render(MessageKind::ChatServerError, &detail)),
                ),
                Reply::NoAnswer => (
                    SendOutcome::NoAnswer,
                    ChatMessage::bot(self.messages.text(MessageKind::ChatNoAnswer)),
                ),
            },
            Err(err) => {
                warn!(error = %err, "chat request failed");
                (
                    SendOutcome::ConnectionError,
                    ChatMessage::bot(self.messages.text(MessageKind::ChatConnection)),
                )
            }
        };

        append_message(&mut view, &reply);
        info!(?outcome, sources = reply.sources.len(), "chat reply rendered");
        outcome
    }

    /// Copies a suggestion's label into the input and focuses it. The message
    /// is not sent.
    pub async fn use_suggestion(&self, index: usize) -> Option<String> {
        let (button, label) = {
            let mut view = self.view.lock().await;
            let button = *view.handles.suggestions.get(index)?;
            let label = view.doc.text_content(button).trim().to_string();
            let input = view.handles.message_input;
            view.doc.set_value(input, label.clone());
            view.doc.focus(input);
            view.doc.add_class(button, "suggestion-active");
            (button, label)
        };

        let view = self.view.clone();
        tokio::spawn(async move {
            tokio::time::sleep(SUGGESTION_FEEDBACK).await;
            view.lock().await.doc.remove_class(button, "suggestion-active");
        });

        debug!(index, "suggestion copied to input");
        Some(label)
    }
}

/// Tracks a send between its placeholder going in and its reply landing. If
/// the send is dropped first, the placeholder is swapped for the connection
/// error text.
struct PendingSend<'a> {
    session: &'a ChatSession,
    placeholder: Option<NodeId>,
    settled: bool,
}

impl<'a> PendingSend<'a> {
    fn new(session: &'a ChatSession, placeholder: Option<NodeId>) -> Self {
        session.in_flight.fetch_add(1, Ordering::SeqCst);
        Self {
            session,
            placeholder,
            settled: false,
        }
    }

    fn settle(mut self) -> Option<NodeId> {
        self.settled = true;
        self.placeholder
    }
}

impl Drop for PendingSend<'_> {
    fn drop(&mut self) {
        self.session.in_flight.fetch_sub(1, Ordering::SeqCst);
        if self.settled {
            return;
        }

        warn!("chat send dropped before its reply");
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            return;
        };
        let view = self.session.view.clone();
        let placeholder = self.placeholder;
        let notice = ChatMessage::bot(self.session.messages.text(MessageKind::ChatConnection));
        runtime.spawn(async move {
            let mut view = view.lock().await;
            if let Some(placeholder) = placeholder {
                view.doc.remove(placeholder);
            }
            append_message(&mut view, &notice);
        });
    }
}

fn interpret(reply: &ChatReply) -> Reply {
    let body = &reply.body;
    if reply.ok {
        if let Some(answer) = non_empty_str(body.get("answer")) {
            return Reply::Answer {
                text: answer.to_string(),
                sources: sources(body.get("sources")),
            };
        }
    }
    match non_empty_str(body.get("error")) {
        Some(detail) => Reply::ServerError(detail.to_string()),
        None => Reply::NoAnswer,
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|text| !text.is_empty())
}

fn sources(value: Option<&Value>) -> Vec<Source> {
    let Some(entries) = value.and_then(Value::as_array) else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| {
            let Some(link) = non_empty_str(entry.get("link")) else {
                debug!("skipping chat source without link");
                return None;
            };
            Some(Source {
                title: non_empty_str(entry.get("title")).map(str::to_string),
                link: link.to_string(),
            })
        })
        .collect()
}

fn append_message(view: &mut View, message: &ChatMessage) -> Option<NodeId> {
    let node = append_entry(
        view,
        Element::new("div")
            .class("msg")
            .class(message.role.class())
            .text(message.text.clone()),
    );

    if !message.sources.is_empty() {
        let links = message.sources.iter().map(|source| {
            Element::new("a")
                .class("bot-source-link")
                .attr("href", source.link.clone())
                .attr("target", "_blank")
                .attr("rel", "noopener noreferrer")
                .text(source.label())
        });
        append_entry(view, Element::new("div").class("bot-sources").children(links));
    }
    node
}

/// Appends to the log and keeps the newest entry in view.
fn append_entry(view: &mut View, element: Element) -> Option<NodeId> {
    let container = view.handles.messages;
    let node = view.doc.append(container, element);
    view.doc.scroll_to_bottom(container);
    node
}
