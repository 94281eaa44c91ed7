// Domain layer: race result models, the export's column layout and the ports
// (storage, rendering, pipeline) the rest of the crate plugs into.

pub mod model;
pub mod ports;
pub mod schema;
