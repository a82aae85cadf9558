// Domain layer: search response model, field absence handling and ports.

pub mod field;
pub mod model;
pub mod ports;
