use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    DashboardLoad,
    ChatServerError,
    ChatNoAnswer,
    ChatConnection,
    ChatLoading,
}

impl MessageKind {
    pub const ALL: [MessageKind; 5] = [
        MessageKind::DashboardLoad,
        MessageKind::ChatServerError,
        MessageKind::ChatNoAnswer,
        MessageKind::ChatConnection,
        MessageKind::ChatLoading,
    ];

    pub fn default_template(self) -> &'static str {
        match self {
            MessageKind::DashboardLoad => "Erro ao carregar dados do dashboard",
            MessageKind::ChatServerError => "Erro: {error}",
            MessageKind::ChatNoAnswer => "Desculpe, não consegui obter resposta.",
            MessageKind::ChatConnection => "Erro de conexão ao enviar a mensagem.",
            MessageKind::ChatLoading => "...",
        }
    }
}

/// User-facing texts keyed by kind. `{error}` in a template is replaced by the
/// server-reported detail.
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    templates: HashMap<MessageKind, String>,
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self {
            templates: MessageKind::ALL
                .into_iter()
                .map(|kind| (kind, kind.default_template().to_string()))
                .collect(),
        }
    }
}

impl MessageCatalog {
    pub fn with_overrides(overrides: HashMap<MessageKind, String>) -> Self {
        let mut catalog = Self::default();
        catalog.templates.extend(overrides);
        catalog
    }

    pub fn text(&self, kind: MessageKind) -> &str {
        self.templates
            .get(&kind)
            .map(String::as_str)
            .unwrap_or_else(|| kind.default_template())
    }

    pub fn render(&self, kind: MessageKind, detail: &str) -> String {
        self.text(kind).replace("{error}", detail)
    }

    pub async fn load(path: &Path) -> Self {
        match fs::read(path).await {
            Ok(bytes) => match serde_json::from_slice::<HashMap<MessageKind, String>>(&bytes) {
                Ok(overrides) => {
                    info!(path = %path.display(), count = overrides.len(), "loaded message overrides");
                    Self::with_overrides(overrides)
                }
                Err(err) => {
                    error!("failed to parse messages file: {err}");
                    Self::default()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(err) => {
                error!("failed to read messages file: {err}");
                Self::default()
            }
        }
    }
}
