use crate::chat::ChatSession;
use crate::poller::Poller;
use crate::view::SharedView;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub view: SharedView,
    pub poller: Arc<Poller>,
    pub chat: Arc<ChatSession>,
    pub reload_secs: u64,
}

impl AppState {
    pub fn new(view: SharedView, poller: Arc<Poller>, chat: Arc<ChatSession>, reload_secs: u64) -> Self {
        Self {
            view,
            poller,
            chat,
            reload_secs,
        }
    }
}
