//! Platform surfaces consumed by the export pipeline: the device pixel
//! ratio, the system clipboard, and document sources.
//!
//! Each surface is a small trait with a default implementation, plus an
//! in-memory implementation suitable for tests and headless embedding.

pub mod clipboard;
pub mod device;
pub mod fs;

pub use clipboard::{BufferClipboard, ClipboardWriter};
#[cfg(feature = "clipboard")]
pub use clipboard::SystemClipboard;
pub use device::{effective_scale, DeviceMetrics, PixelRatioSource, StaticDevice};
pub use fs::{FsSource, SourceProvider, StaticSource};
