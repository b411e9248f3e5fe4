//! Clipboard surface: writes one dual-format entry per export.

use std::sync::{Arc, Mutex};

use futures::future::BoxFuture;

use crate::error::Result;
use crate::ClipboardPayload;

/// Writes a dual-format payload as a single clipboard entry.
pub trait ClipboardWriter: Send + Sync {
    fn write<'a>(&'a self, payload: ClipboardPayload) -> BoxFuture<'a, Result<()>>;
}

/// In-memory clipboard for tests and headless embedding; retains every
/// written entry. Clones share the same buffer, so a handle kept outside an
/// exporter observes what the exporter wrote.
#[derive(Debug, Clone, Default)]
pub struct BufferClipboard {
    entries: Arc<Mutex<Vec<ClipboardPayload>>>,
}

impl BufferClipboard {
    pub fn new() -> Self {
        BufferClipboard::default()
    }

    pub fn entries(&self) -> Vec<ClipboardPayload> {
        self.entries.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<ClipboardPayload> {
        self.entries.lock().unwrap().last().cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }
}

impl ClipboardWriter for BufferClipboard {
    fn write<'a>(&'a self, payload: ClipboardPayload) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            self.entries.lock().unwrap().push(payload);
            Ok(())
        })
    }
}

#[cfg(feature = "clipboard")]
pub use system::SystemClipboard;

#[cfg(feature = "clipboard")]
mod system {
    use arboard::Clipboard;
    use futures::future::BoxFuture;

    use super::ClipboardWriter;
    use crate::error::{Error, Result};
    use crate::ClipboardPayload;

    /// System clipboard writer. The HTML representation is written with the
    /// plain text as its alternate, producing a single entry that pastes as
    /// rich content where supported and as text elsewhere.
    #[derive(Debug, Default)]
    pub struct SystemClipboard;

    impl SystemClipboard {
        pub fn new() -> Self {
            SystemClipboard
        }
    }

    impl ClipboardWriter for SystemClipboard {
        fn write<'a>(&'a self, payload: ClipboardPayload) -> BoxFuture<'a, Result<()>> {
            Box::pin(async move {
                // The platform clipboard API is blocking; keep it off the
                // async executor.
                let task = tokio::task::spawn_blocking(move || -> Result<()> {
                    let mut clipboard = Clipboard::new()
                        .map_err(|err| Error::Clipboard(format!("clipboard unavailable: {err}")))?;
                    clipboard
                        .set_html(payload.html.as_str(), Some(payload.text.as_str()))
                        .map_err(|err| Error::Clipboard(err.to_string()))
                });
                task.await
                    .map_err(|err| Error::Clipboard(format!("clipboard task aborted: {err}")))?
            })
        }
    }
}
