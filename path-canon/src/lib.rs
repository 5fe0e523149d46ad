pub mod batch;
pub mod config;
pub mod normalizer;
pub mod report;
pub mod request;
pub mod telemetry;

pub use normalizer::{is_canonical, normalize, normalize_str, redirect_target, Normalizer};
