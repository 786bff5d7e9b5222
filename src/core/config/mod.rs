pub mod display;
pub mod render;
pub mod store;

pub use display::{
    DisplaySettings, GiQuality, GiType, Msaa, Scaling3dMode, Scaling3dScale, ScreenSpaceAa,
    SsaoQuality, SsilQuality, VSyncMode, WindowMode,
};
pub use render::{EffectQuality, RenderProfile, ScreenSpaceEffect};
pub use store::{SettingsStore, SETTINGS_FILE_NAME};
