// Application layer: use cases wiring adapters into the core pipeline.

pub mod import;
pub mod migrate;
