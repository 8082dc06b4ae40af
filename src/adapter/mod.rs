pub mod http;

pub use http::{serve, ScanHandler};
