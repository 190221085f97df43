//! Rendering adapter: renderer-agnostic interface over draw lists.
//!
//! # Invariants
//! - Renderers cannot mutate world truth; they only see `DrawList`s.
//! - Render output derives entirely from the draw list it is given.
//!
//! No GPU backend lives here. The text and JSON renderers are enough for the
//! CLI and tests, and a GPU backend can implement the same trait.

mod renderer;

pub use renderer::{DebugTextRenderer, JsonRenderer, Renderer};

pub fn crate_info() -> &'static str {
    concat!("worldbox-render v", env!("CARGO_PKG_VERSION"))
}
