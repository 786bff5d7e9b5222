//! Headless presentation surface: keeps visibility flags and turns timed
//! fades, the splash and save loading into inputs for the app flow.
use bevy::prelude::*;
use std::time::Duration;

use super::binding::PresentationSurface;
use super::state::{FadeAnimation, Input};
use crate::core::config::DisplaySettings;

#[derive(Debug)]
struct ActiveFade {
    animation: FadeAnimation,
    timer: Timer,
}

#[derive(Resource, Debug)]
pub struct HeadlessSurface {
    pub splash_visible: bool,
    pub main_menu_visible: bool,
    pub settings_menu_visible: bool,
    pub blank_screen_visible: bool,
    /// Values the settings panel was last opened with.
    pub settings_shown: Option<DisplaySettings>,
    pub game_scene_loaded: bool,
    pub paused: bool,
    /// Every animation started, oldest first.
    pub animations: Vec<FadeAnimation>,
    fade: Option<ActiveFade>,
    fade_duration: Duration,
    splash_timer: Option<Timer>,
    splash_duration: Duration,
    save_load_pending: bool,
}

impl HeadlessSurface {
    pub fn new(fade_secs: f32, splash_secs: f32) -> Self {
        Self {
            splash_visible: false,
            main_menu_visible: false,
            settings_menu_visible: false,
            blank_screen_visible: true,
            settings_shown: None,
            game_scene_loaded: false,
            paused: true,
            animations: Vec::new(),
            fade: None,
            fade_duration: Duration::from_secs_f32(fade_secs.max(0.0)),
            splash_timer: None,
            splash_duration: Duration::from_secs_f32(splash_secs.max(0.0)),
            save_load_pending: false,
        }
    }

    pub fn fade_in_progress(&self) -> Option<FadeAnimation> {
        self.fade.as_ref().map(|f| f.animation)
    }

    /// Nothing is animating or loading, so no input will arrive on its own.
    pub fn is_idle(&self) -> bool {
        self.fade.is_none() && self.splash_timer.is_none() && !self.save_load_pending
    }

    /// Advances timers; returns the inputs produced this frame in order.
    pub fn tick(&mut self, delta: Duration) -> Vec<Input> {
        let mut inputs = Vec::new();

        if self.save_load_pending {
            self.save_load_pending = false;
            inputs.push(Input::SaveFileLoaded);
        }

        if let Some(timer) = self.splash_timer.as_mut() {
            if timer.tick(delta).finished() {
                self.splash_timer = None;
                inputs.push(Input::SplashScreenSkipped);
            }
        }

        let finished = match self.fade.as_mut() {
            Some(fade) => fade.timer.tick(delta).finished(),
            None => false,
        };
        if finished {
            if let Some(fade) = self.fade.take() {
                if fade.animation == FadeAnimation::FadeIn {
                    self.blank_screen_visible = false;
                }
                inputs.push(Input::from_animation_finished(fade.animation.name()));
            }
        }

        inputs
    }
}

impl Default for HeadlessSurface {
    fn default() -> Self {
        Self::new(0.5, 1.5)
    }
}

impl PresentationSurface for HeadlessSurface {
    fn show_splash(&mut self) {
        self.splash_visible = true;
        self.blank_screen_visible = false;
        self.splash_timer = Some(Timer::new(self.splash_duration, TimerMode::Once));
    }

    fn hide_splash(&mut self) {
        self.splash_visible = false;
        self.splash_timer = None;
    }

    fn show_main_menu(&mut self) {
        self.main_menu_visible = true;
    }

    fn hide_main_menu(&mut self) {
        self.main_menu_visible = false;
    }

    fn show_settings_menu(&mut self, settings: &DisplaySettings) {
        self.settings_menu_visible = true;
        self.settings_shown = Some(*settings);
    }

    fn hide_settings_menu(&mut self) {
        self.settings_menu_visible = false;
    }

    /// A covered splash can no longer time out.
    fn show_blank_screen(&mut self) {
        self.blank_screen_visible = true;
        self.splash_timer = None;
    }

    /// Starting an animation replaces the one playing.
    fn play_animation(&mut self, animation: FadeAnimation) {
        self.animations.push(animation);
        self.fade = Some(ActiveFade {
            animation,
            timer: Timer::new(self.fade_duration, TimerMode::Once),
        });
    }

    fn setup_game_scene(&mut self) {
        if !self.game_scene_loaded {
            info!(target: "binding", "Instantiating game scene");
            self.game_scene_loaded = true;
        }
    }

    fn remove_game_scene(&mut self) {
        self.game_scene_loaded = false;
        self.paused = true;
    }

    fn start_loading_save_file(&mut self) {
        self.save_load_pending = true;
    }

    fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }
}
