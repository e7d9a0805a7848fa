//! HTML rendering of the digest page.
mod render;

pub use render::{PageInput, Renderer};
