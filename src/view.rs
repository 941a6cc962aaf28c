use crate::dom::{Document, NodeId};
use crate::errors::MissingElement;
use crate::ui;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Every control the renderers touch, resolved once when the page is mounted.
#[derive(Debug, Clone)]
pub struct Handles {
    pub clock: NodeId,
    pub total_startups: NodeId,
    pub last_update: NodeId,
    pub top_sectors: NodeId,
    pub top_countries: NodeId,
    pub records_body: NodeId,
    pub filter_toggle: NodeId,
    pub messages: NodeId,
    pub message_input: NodeId,
    pub notifications: NodeId,
    pub suggestions: Vec<NodeId>,
}

impl Handles {
    pub fn resolve(doc: &Document) -> Result<Self, MissingElement> {
        let find = |id: &'static str| doc.by_id(id).ok_or(MissingElement(id));
        Ok(Self {
            clock: find("current-datetime")?,
            total_startups: find("total-startups")?,
            last_update: find("last-update")?,
            top_sectors: find("top-sectors")?,
            top_countries: find("top-countries")?,
            records_body: find("startups-table-body")?,
            filter_toggle: find("inception-filter")?,
            messages: find("messages-container")?,
            message_input: find("message-input")?,
            notifications: find("notifications")?,
            suggestions: doc.descendants_with_class(doc.root(), "suggestion-btn"),
        })
    }
}

#[derive(Debug, Clone)]
pub struct View {
    pub doc: Document,
    pub handles: Handles,
}

pub type SharedView = Arc<Mutex<View>>;

impl View {
    pub fn new(doc: Document) -> Result<Self, MissingElement> {
        let handles = Handles::resolve(&doc)?;
        Ok(Self { doc, handles })
    }

    pub fn mount() -> Result<Self, MissingElement> {
        Self::new(ui::mount_document())
    }

    pub fn shared(self) -> SharedView {
        Arc::new(Mutex::new(self))
    }
}
