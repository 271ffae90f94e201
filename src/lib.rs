//! Library exports for reuse in benchmarks and tests.
/// Per-user application directories.
pub mod app_dirs;
/// Persisted application settings.
pub mod config;
/// Shared egui UI modules.
pub mod egui_app;
/// Place-name geocoding.
pub mod geocode;
pub(crate) mod http_client;
/// Coordinate validation and location resolution.
pub mod location;
/// Logging setup for stdout and rolling files.
pub mod logging;
/// Map projection and tile loading.
pub mod map;
/// Severity classifier, label decoder and magnitude regressor.
pub mod ml;
/// Model directory setup.
pub mod model_setup;
/// Fault-mechanism form parameters.
pub mod params;
/// The predict action and its single result slot.
pub mod prediction;
/// Display rules for a stored prediction.
pub mod presenter;
