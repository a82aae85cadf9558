// Adapters layer: concrete sources and renderers for the ports in `domain::ports`.

pub mod render;
pub mod source;
