#![forbid(unsafe_code)]

mod rendering;

pub use rendering::{init_tracing, render_debris_to_png, CategoryStyle, RenderConfig};
