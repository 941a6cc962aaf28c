use crate::api::DashboardApi;
use crate::errors::FetchError;
use crate::models::{ChatReply, RankedEntry, Record, StatisticsPayload};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::oneshot;

pub enum Scripted<T> {
    Ready(Result<T, FetchError>),
    Gated(oneshot::Receiver<()>, Result<T, FetchError>),
}

#[derive(Default)]
pub struct MockApi {
    statistics: Mutex<VecDeque<Scripted<StatisticsPayload>>>,
    startups: Mutex<VecDeque<Scripted<Vec<Record>>>>,
    chat: Mutex<VecDeque<Scripted<ChatReply>>>,
    pub statistics_calls: AtomicUsize,
    pub startups_calls: AtomicUsize,
    pub chat_calls: AtomicUsize,
    pub chat_messages: Mutex<Vec<String>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_statistics(&self, result: Result<StatisticsPayload, FetchError>) {
        push(&self.statistics, Scripted::Ready(result));
    }

    pub fn push_gated_statistics(
        &self,
        result: Result<StatisticsPayload, FetchError>,
    ) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        push(&self.statistics, Scripted::Gated(rx, result));
        tx
    }

    pub fn push_startups(&self, result: Result<Vec<Record>, FetchError>) {
        push(&self.startups, Scripted::Ready(result));
    }

    pub fn push_chat(&self, ok: bool, body: Value) {
        push(&self.chat, Scripted::Ready(Ok(ChatReply { ok, body })));
    }

    pub fn push_chat_error(&self, err: FetchError) {
        push(&self.chat, Scripted::Ready(Err(err)));
    }

    pub fn push_gated_chat(&self, ok: bool, body: Value) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        push(&self.chat, Scripted::Gated(rx, Ok(ChatReply { ok, body })));
        tx
    }
}

fn push<T>(queue: &Mutex<VecDeque<Scripted<T>>>, item: Scripted<T>) {
    queue.lock().unwrap().push_back(item);
}

async fn next<T>(queue: &Mutex<VecDeque<Scripted<T>>>) -> Result<T, FetchError> {
    let item = queue.lock().unwrap().pop_front();
    match item {
        Some(Scripted::Ready(result)) => result,
        Some(Scripted::Gated(gate, result)) => {
            let _ = gate.await;
            result
        }
        None => Err(decode_error()),
    }
}

#[async_trait]
impl DashboardApi for MockApi {
    async fn statistics(&self) -> Result<StatisticsPayload, FetchError> {
        self.statistics_calls.fetch_add(1, Ordering::SeqCst);
        next(&self.statistics).await
    }

    async fn startups(&self) -> Result<Vec<Record>, FetchError> {
        self.startups_calls.fetch_add(1, Ordering::SeqCst);
        next(&self.startups).await
    }

    async fn chat(&self, message: &str) -> Result<ChatReply, FetchError> {
        self.chat_calls.fetch_add(1, Ordering::SeqCst);
        self.chat_messages.lock().unwrap().push(message.to_string());
        next(&self.chat).await
    }
}

pub fn decode_error() -> FetchError {
    FetchError::Decode(serde_json::from_str::<Value>("{").unwrap_err())
}

pub fn statistics(total: i64, sectors: &[(&str, i64)]) -> StatisticsPayload {
    StatisticsPayload {
        total_startups: total,
        last_update: "17/10/2026 09:30".to_string(),
        top_sectors: sectors
            .iter()
            .map(|(name, count)| RankedEntry::new(name, *count))
            .collect(),
        top_countries: vec![RankedEntry::new("Brasil", 5), RankedEntry::new("México", 2)],
    }
}

pub fn record(nome: &str) -> Record {
    Record {
        nome: Some(Value::from(nome)),
        investidor: Some(Value::from("Monashees")),
        status: Some(Value::from("Ativa")),
        pais: Some(Value::from("Brasil")),
        tam: Some(Value::from("1.5M")),
        setor: Some(Value::from("Fintech")),
    }
}
