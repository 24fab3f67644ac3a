//! Ember Render - Sprite batching and text layout
//!
//! Drawing is a strict begin/submit/end protocol per frame. Submissions are
//! queued, stable-sorted by depth at `end()`, and streamed to a
//! `RasterBackend` in batches that break whenever the shader or texture
//! changes. Text is laid out into one glyph quad per character using the
//! submitting font's metrics.
//!
//! The backend trait is the seam to the platform graphics API; this crate
//! ships only the `RecordingBackend`, which captures draw calls for
//! inspection.

mod camera;
mod font;
mod renderer;

pub use camera::Camera;
pub use font::{Font, FontLibrary, Glyph};
pub use renderer::{DrawCall, RasterBackend, RecordingBackend, Renderer, ShaderId, DEFAULT_SHADER};
