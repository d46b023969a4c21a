//! Boundaries to the collaborators that paint the buffer and persist it.

/// What the rendering collaborator receives after every state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderFrame {
    pub text: String,
    pub selection_start: usize,
    pub selection_end: usize,
    pub dirty: bool,
}

/// Receives a frame each time the visible snapshot is republished. Painting
/// and syntax highlighting happen on the far side of this trait.
pub trait RenderSink {
    fn publish(&mut self, frame: &RenderFrame);
}

/// Receives the visible text whenever a save performs a real transition.
pub trait PersistenceSink {
    fn on_save(&mut self, text: &str);
}

pub struct NoopRenderSink;

impl RenderSink for NoopRenderSink {
    fn publish(&mut self, _frame: &RenderFrame) {}
}

pub struct NoopPersistence;

impl PersistenceSink for NoopPersistence {
    fn on_save(&mut self, _text: &str) {}
}

impl<F> RenderSink for F
where
    F: FnMut(&RenderFrame),
{
    fn publish(&mut self, frame: &RenderFrame) {
        self(frame)
    }
}

impl<F> PersistenceSink for F
where
    F: FnMut(&str),
{
    fn on_save(&mut self, text: &str) {
        self(text)
    }
}
