pub mod metrics;
pub mod packet;
pub mod scheduler;
pub mod session;
pub mod transport;
pub mod weather;
