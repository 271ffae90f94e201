//! Persistent application settings stored as TOML under the `.quakecast` root.

mod defaults;
mod errors;
mod io;
mod types;

pub use errors::ConfigError;
pub use io::{CONFIG_FILE_NAME, config_path, load_from_path, load_or_default, save_to_path};
pub use types::{AppConfig, GeocoderSettings, LocationSettings, MapSettings, ModelSettings};
