//! Translation of [`DisplaySettings`] into the concrete parameters handed to
//! the renderer and window backend.
use bevy::prelude::*;

use super::display::{
    DisplaySettings, GiQuality, GiType, Msaa, Scaling3dMode, ScreenSpaceAa, SsaoQuality,
    SsilQuality, VSyncMode, WindowMode,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectQuality {
    Medium,
    High,
}

/// Quality parameters shared by SSAO and SSIL.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenSpaceEffect {
    pub quality: EffectQuality,
    pub half_size: bool,
    pub adaptive_target: f32,
    pub blur_passes: u32,
    pub fadeout_from: f32,
    pub fadeout_to: f32,
}

impl ScreenSpaceEffect {
    fn with_quality(quality: EffectQuality) -> Self {
        Self {
            quality,
            half_size: false,
            adaptive_target: 0.5,
            blur_passes: 2,
            fadeout_from: 50.0,
            fadeout_to: 300.0,
        }
    }

    pub fn for_ssao(q: SsaoQuality) -> Option<Self> {
        match q {
            SsaoQuality::Disabled => None,
            SsaoQuality::Medium => Some(Self::with_quality(EffectQuality::Medium)),
            SsaoQuality::High => Some(Self::with_quality(EffectQuality::High)),
        }
    }

    pub fn for_ssil(q: SsilQuality) -> Option<Self> {
        match q {
            SsilQuality::Disabled => None,
            SsilQuality::Medium => Some(Self::with_quality(EffectQuality::Medium)),
            SsilQuality::High => Some(Self::with_quality(EffectQuality::High)),
        }
    }
}

/// Render/window parameters currently in effect.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct RenderProfile {
    pub window_mode: WindowMode,
    pub vsync_mode: VSyncMode,
    /// `None` = uncapped.
    pub max_fps: Option<u32>,
    pub scaling_3d_scale: f32,
    pub scaling_3d_mode: Scaling3dMode,
    pub use_taa: bool,
    pub msaa_3d: Msaa,
    pub screen_space_aa: ScreenSpaceAa,
    pub shadows_enabled: bool,
    pub gi_type: GiType,
    pub gi_quality: GiQuality,
    pub ssao: Option<ScreenSpaceEffect>,
    pub ssil: Option<ScreenSpaceEffect>,
    pub bloom: bool,
    pub volumetric_fog: bool,
}

impl RenderProfile {
    pub fn from_settings(s: &DisplaySettings) -> Self {
        Self {
            window_mode: s.display_mode,
            vsync_mode: s.vsync_mode,
            max_fps: (s.max_fps > 0).then_some(s.max_fps),
            scaling_3d_scale: s.scaling_3d_scale.factor(),
            scaling_3d_mode: s.scaling_3d_mode,
            use_taa: s.taa,
            msaa_3d: s.msaa,
            screen_space_aa: s.ssaa,
            shadows_enabled: s.shadows,
            gi_type: s.global_illumination_type,
            gi_quality: s.global_illumination_quality,
            ssao: ScreenSpaceEffect::for_ssao(s.screen_space_ao_quality),
            ssil: ScreenSpaceEffect::for_ssil(s.screen_space_il_quality),
            bloom: s.bloom,
            volumetric_fog: s.volumetric_fog,
        }
    }
}

impl Default for RenderProfile {
    fn default() -> Self {
        Self::from_settings(&DisplaySettings::DEFAULT)
    }
}
