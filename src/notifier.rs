use crate::dom::{Element, NodeId};
use crate::view::SharedView;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_NOTICE_DELAY: Duration = Duration::from_secs(5);

const BANNER_STYLE: &str = "position: fixed; top: 20px; right: 20px; background-color: #ff4444; \
color: white; padding: 12px 20px; border-radius: 8px; z-index: 1000; font-size: 14px;";

/// Transient error banners. Each call stacks its own banner, which removes
/// itself after the configured delay.
#[derive(Clone)]
pub struct Notifier {
    view: SharedView,
    delay: Duration,
}

impl Notifier {
    pub fn new(view: SharedView, delay: Duration) -> Self {
        Self { view, delay }
    }

    pub async fn show(&self, message: &str) -> Option<NodeId> {
        let banner = {
            let mut view = self.view.lock().await;
            let container = view.handles.notifications;
            view.doc.append(
                container,
                Element::new("div")
                    .class("error-banner")
                    .attr("role", "alert")
                    .attr("style", BANNER_STYLE)
                    .text(message),
            )?
        };

        let view = self.view.clone();
        let delay = self.delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            view.lock().await.doc.remove(banner);
            debug!("notice dismissed");
        });

        Some(banner)
    }
}
