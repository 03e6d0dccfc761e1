mod init;
mod metrics;

pub use init::init_telemetry;
pub use metrics::*;
