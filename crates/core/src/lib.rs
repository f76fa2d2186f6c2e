pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{BridgeError, BridgeResult};
pub use types::{EventParams, SdkAdapterConfig};
