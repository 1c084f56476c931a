use std::sync::Arc;

use lumen_core::{Histogram, PixelBuffer};

/// Notifications from an [`EditorSession`](crate::EditorSession) to whatever
/// is drawing it.
#[derive(Clone, Debug)]
pub enum SessionEvent {
    RenderedUpdated(Arc<PixelBuffer>),
    HistogramUpdated(Arc<Histogram>),
    ProcessingStateChanged(bool),
    /// The image was closed; nothing is rendered until the next load.
    ImageClosed,
    /// A run failed; the last good render and histogram are still current.
    ProcessingFailed(String),
}
