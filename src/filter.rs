use crate::view::View;

/// Hook run when the Inception filter toggle changes.
///
/// No filtering criteria are defined for the dashboard yet; implementors get
/// the mounted view and may rewrite the rendered rows however they need.
pub trait FilterStrategy: Send + Sync {
    fn apply(&self, _view: &mut View) {}

    fn remove(&self, _view: &mut View) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopFilter;

impl FilterStrategy for NoopFilter {}
