//! Realizes [`Output`] commands against the presentation layer.
use bevy::prelude::*;

use super::repo::AppRepo;
use super::state::{FadeAnimation, Output};
use crate::core::config::DisplaySettings;

/// Menus, splash, fade player and game scene container, as seen by the app
/// flow. Implementations only record or forward; they never call back into
/// the state machine synchronously.
pub trait PresentationSurface {
    fn show_splash(&mut self);
    fn hide_splash(&mut self);
    fn show_main_menu(&mut self);
    fn hide_main_menu(&mut self);
    /// Opens the settings panel with the given values pre-selected.
    fn show_settings_menu(&mut self, settings: &DisplaySettings);
    fn hide_settings_menu(&mut self);
    fn show_blank_screen(&mut self);
    fn play_animation(&mut self, animation: FadeAnimation);
    /// Instantiates the game scene unless one already exists.
    fn setup_game_scene(&mut self);
    fn remove_game_scene(&mut self);
    fn start_loading_save_file(&mut self);
    fn set_paused(&mut self, paused: bool);

    fn hide_menus(&mut self) {
        self.hide_splash();
        self.hide_main_menu();
    }

    fn fade_to_black(&mut self) {
        self.show_blank_screen();
        self.play_animation(FadeAnimation::FadeOut);
    }

    fn fade_in_from_black(&mut self) {
        self.show_blank_screen();
        self.play_animation(FadeAnimation::FadeIn);
    }
}

/// Output dispatcher. Each output maps to exactly one block of surface calls.
pub struct AppBinding;

impl AppBinding {
    pub fn dispatch(output: &Output, surface: &mut impl PresentationSurface, repo: &mut AppRepo) {
        debug!(target: "binding", "{output:?}");
        match *output {
            Output::ShowSplashScreen => {
                surface.hide_menus();
                surface.show_splash();
            }
            Output::HideSplashScreen => surface.fade_to_black(),
            Output::ShowMainMenu => {
                surface.hide_menus();
                surface.show_main_menu();
                surface.fade_in_from_black();
            }
            Output::HideMainMenu => surface.hide_menus(),
            Output::ShowSettingsMenu => {
                let settings = repo.saved_display_settings();
                surface.show_settings_menu(&settings);
            }
            Output::HideSettingsMenu => surface.hide_settings_menu(),
            Output::SetupGameScene => {
                surface.setup_game_scene();
                surface.set_paused(false);
            }
            Output::RemoveExistingGame => surface.remove_game_scene(),
            Output::ShowGame { .. } => {
                surface.hide_menus();
                surface.fade_in_from_black();
            }
            Output::HideGame | Output::FadeToBlack => surface.fade_to_black(),
            Output::StartLoadingSaveFile => surface.start_loading_save_file(),
            Output::LoadDisplaySettings => {
                let settings = repo.saved_display_settings();
                repo.apply_display_settings(settings);
            }
            Output::PlayGame => surface.set_paused(false),
        }
    }

    /// Dispatches a batch in emission order.
    pub fn dispatch_all(
        outputs: &[Output],
        surface: &mut impl PresentationSurface,
        repo: &mut AppRepo,
    ) {
        for output in outputs {
            Self::dispatch(output, surface, repo);
        }
    }
}
