//! Settings menu model: one selectable choice per option group, mirrored to and
//! from [`DisplaySettings`].
use bevy::prelude::*;

use super::repo::AppRepo;
use super::state::Input;
use crate::core::config::{
    DisplaySettings, GiQuality, GiType, Msaa, Scaling3dMode, Scaling3dScale, ScreenSpaceAa,
    SsaoQuality, SsilQuality, VSyncMode, WindowMode,
};

/// Frame caps offered by the menu; `0` is unlimited.
pub const FPS_CHOICES: [u32; 8] = [30, 40, 60, 72, 90, 120, 144, 0];

pub const METAL_DRIVER: &str = "metal";

/// Window modes a player can pick. Maximized and minimized are not offered.
pub const WINDOW_MODE_CHOICES: [WindowMode; 3] = [
    WindowMode::Windowed,
    WindowMode::Fullscreen,
    WindowMode::ExclusiveFullscreen,
];

/// Upscaling filters available for a rendering driver.
pub fn scaling_mode_choices(driver: &str) -> Vec<Scaling3dMode> {
    let metal = driver == METAL_DRIVER;
    [
        Scaling3dMode::Bilinear,
        Scaling3dMode::Fsr,
        Scaling3dMode::MetalFxSpatial,
        Scaling3dMode::Fsr2,
        Scaling3dMode::MetalFxTemporal,
    ]
    .into_iter()
    .filter(|m| metal || !m.requires_metal())
    .collect()
}

/// Pressed button per group; `None` means nothing in the group is pressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettingsForm {
    pub display_mode: Option<WindowMode>,
    pub vsync_mode: Option<VSyncMode>,
    pub max_fps: Option<u32>,
    pub scaling_3d_scale: Option<Scaling3dScale>,
    pub scaling_3d_mode: Option<Scaling3dMode>,
    pub taa: Option<bool>,
    pub msaa: Option<Msaa>,
    pub ssaa: Option<ScreenSpaceAa>,
    pub shadows: Option<bool>,
    pub gi_type: Option<GiType>,
    pub gi_quality: Option<GiQuality>,
    pub ssao: Option<SsaoQuality>,
    pub ssil: Option<SsilQuality>,
    pub bloom: Option<bool>,
    pub volumetric_fog: Option<bool>,
}

impl SettingsForm {
    pub fn from_settings(s: &DisplaySettings) -> Self {
        let display_mode = if WINDOW_MODE_CHOICES.contains(&s.display_mode) {
            s.display_mode
        } else {
            WindowMode::Windowed
        };
        Self {
            display_mode: Some(display_mode),
            vsync_mode: Some(s.vsync_mode),
            max_fps: FPS_CHOICES.contains(&s.max_fps).then_some(s.max_fps),
            scaling_3d_scale: Some(s.scaling_3d_scale),
            scaling_3d_mode: Some(s.scaling_3d_mode),
            taa: Some(s.taa),
            msaa: Some(s.msaa),
            ssaa: Some(s.ssaa),
            shadows: Some(s.shadows),
            gi_type: Some(s.global_illumination_type),
            gi_quality: Some(s.global_illumination_quality),
            ssao: Some(s.screen_space_ao_quality),
            ssil: Some(s.screen_space_il_quality),
            bloom: Some(s.bloom),
            volumetric_fog: Some(s.volumetric_fog),
        }
    }

    /// Reads the pressed buttons back, falling back per group when empty.
    pub fn to_settings(&self) -> DisplaySettings {
        DisplaySettings {
            display_mode: self.display_mode.unwrap_or(WindowMode::Windowed),
            vsync_mode: self.vsync_mode.unwrap_or(VSyncMode::Disabled),
            max_fps: self.max_fps.unwrap_or(60),
            scaling_3d_scale: self.scaling_3d_scale.unwrap_or(Scaling3dScale::Native),
            scaling_3d_mode: self.scaling_3d_mode.unwrap_or(Scaling3dMode::Bilinear),
            taa: self.taa.unwrap_or(true),
            msaa: self.msaa.unwrap_or(Msaa::Disabled),
            ssaa: self.ssaa.unwrap_or(ScreenSpaceAa::Disabled),
            shadows: self.shadows.unwrap_or(true),
            global_illumination_type: self.gi_type.unwrap_or(GiType::LightmapGi),
            global_illumination_quality: self.gi_quality.unwrap_or(GiQuality::Low),
            screen_space_ao_quality: self.ssao.unwrap_or(SsaoQuality::Medium),
            screen_space_il_quality: self.ssil.unwrap_or(SsilQuality::Medium),
            bloom: self.bloom.unwrap_or(true),
            volumetric_fog: self.volumetric_fog.unwrap_or(true),
        }
    }
}

/// Controller behind the settings panel.
#[derive(Debug, Clone)]
pub struct SettingsMenu {
    pub form: SettingsForm,
    metal_fx_supported: bool,
}

impl SettingsMenu {
    pub fn new(driver: &str) -> Self {
        Self {
            form: SettingsForm::default(),
            metal_fx_supported: driver == METAL_DRIVER,
        }
    }

    /// Loads saved settings into the form. A MetalFX filter is left unselected
    /// when the driver cannot show it.
    pub fn open(&mut self, repo: &AppRepo) {
        self.form = SettingsForm::from_settings(&repo.saved_display_settings());
        if !self.metal_fx_supported
            && self.form.scaling_3d_mode.is_some_and(Scaling3dMode::requires_metal)
        {
            self.form.scaling_3d_mode = None;
        }
        debug!(target: "settings", "Settings menu opened: {:?}", self.form);
    }

    /// Persists the form, then pushes it to display-settings observers.
    pub fn apply(&self, repo: &mut AppRepo) -> DisplaySettings {
        let settings = self.form.to_settings();
        repo.save_display_settings(&settings);
        repo.apply_display_settings(settings);
        settings
    }

    /// Input that returns the app to the main menu.
    pub fn exit(&self) -> Input {
        Input::MainMenu
    }
}

impl Default for SettingsMenu {
    fn default() -> Self {
        Self::new("")
    }
}
