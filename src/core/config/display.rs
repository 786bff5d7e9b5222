use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowMode {
    Windowed,
    Minimized,
    Maximized,
    Fullscreen,
    ExclusiveFullscreen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VSyncMode {
    Disabled,
    Enabled,
    Adaptive,
    Mailbox,
}

/// Resolution scale preset for the 3D viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scaling3dScale {
    UltraPerformance,
    Performance,
    Balanced,
    Quality,
    UltraQuality,
    Native,
}

impl Scaling3dScale {
    /// Fraction of the native resolution the 3D viewport renders at.
    pub fn factor(self) -> f32 {
        match self {
            Self::UltraPerformance => 1.0 / 3.0,
            Self::Performance => 1.0 / 2.0,
            Self::Balanced => 1.0 / 1.7,
            Self::Quality => 1.0 / 1.5,
            Self::UltraQuality => 1.0 / 1.3,
            Self::Native => 1.0,
        }
    }
}

/// Upscaling filter used when the 3D scale is below native.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scaling3dMode {
    Bilinear,
    Fsr,
    Fsr2,
    MetalFxSpatial,
    MetalFxTemporal,
}

impl Scaling3dMode {
    pub fn requires_metal(self) -> bool {
        matches!(self, Self::MetalFxSpatial | Self::MetalFxTemporal)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Msaa {
    Disabled,
    Msaa2x,
    Msaa4x,
    Msaa8x,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenSpaceAa {
    Disabled,
    Fxaa,
    Smaa,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GiType {
    LightmapGi,
    VoxelGi,
    Sdfgi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GiQuality {
    Disabled,
    Low,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SsaoQuality {
    Disabled,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SsilQuality {
    Disabled,
    Medium,
    High,
}

/// Player-facing display preferences, persisted as `settings.json`.
///
/// Every field is required when deserializing: a document missing a key is
/// rejected as a whole rather than merged with defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySettings {
    pub display_mode: WindowMode,
    pub vsync_mode: VSyncMode,
    /// Frame cap; `0` means unlimited.
    pub max_fps: u32,
    pub scaling_3d_scale: Scaling3dScale,
    pub scaling_3d_mode: Scaling3dMode,
    pub taa: bool,
    pub msaa: Msaa,
    pub ssaa: ScreenSpaceAa,
    #[serde(rename = "shadow_mapping")]
    pub shadows: bool,
    pub global_illumination_type: GiType,
    pub global_illumination_quality: GiQuality,
    #[serde(rename = "screen_space_ambient_occlusion")]
    pub screen_space_ao_quality: SsaoQuality,
    #[serde(rename = "screen_space_indirect_lighting")]
    pub screen_space_il_quality: SsilQuality,
    pub bloom: bool,
    pub volumetric_fog: bool,
}

impl DisplaySettings {
    /// Used whenever no saved settings can be read.
    pub const DEFAULT: Self = Self {
        display_mode: WindowMode::Windowed,
        vsync_mode: VSyncMode::Disabled,
        max_fps: 60,
        scaling_3d_scale: Scaling3dScale::Balanced,
        scaling_3d_mode: Scaling3dMode::Bilinear,
        taa: true,
        msaa: Msaa::Msaa2x,
        ssaa: ScreenSpaceAa::Fxaa,
        shadows: true,
        global_illumination_type: GiType::LightmapGi,
        global_illumination_quality: GiQuality::Low,
        screen_space_ao_quality: SsaoQuality::Medium,
        screen_space_il_quality: SsilQuality::Medium,
        bloom: true,
        volumetric_fog: true,
    };
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self::DEFAULT
    }
}
