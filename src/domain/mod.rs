// Domain layer: wire types, the dashboard view, and the ports the client is used through.

pub mod candidate;
pub mod model;
pub mod ports;
