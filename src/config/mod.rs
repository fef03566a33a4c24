pub mod traits;
pub mod evolution;
pub mod logging;
pub mod manager;

pub use manager::{ConfigManager, AppConfig};
pub use evolution::EvolutionConfig;
pub use logging::LoggingConfig;
pub use traits::ConfigSection;
