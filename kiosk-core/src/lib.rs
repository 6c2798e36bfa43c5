// Top-level modules
pub mod config;
pub mod controller;
pub mod errors;
pub mod logging;
pub mod settings;
pub mod traits;

// Re-export the configuration collaborators for use in the desktop shell
pub use config::{ConfigRecord, ConfigSource, FileConfigSource, DEFAULT_CONFIG_PATH};

// Re-export the load controller and its event vocabulary
pub use controller::{KioskEvent, LoadController, LoadState, KIOSK_ENTER_DELAY, RETRY_DELAY};

// Re-export error and settings types
pub use errors::KioskError;
pub use settings::{KioskSettings, LoggingSettings, Settings, WindowSettings};

// Re-export capability traits for host integration
pub use traits::{LocalPage, RetryScheduler, WebviewHost};
