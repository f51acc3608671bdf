// Adapters layer: concrete renderers for calculation results.

pub mod render;

pub use render::{JsonRenderer, TextRenderer};
