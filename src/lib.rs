pub mod app;
pub mod core;

// Curated re-exports
pub use app::{AppFlowPlugin, AppInput, AppLogic, AppOutput, AppRepo, AppState, Input, Output};
pub use core::config::{DisplaySettings, RenderProfile, SettingsStore};
