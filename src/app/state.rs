//! App flow states and the pure transition function driving them.
//!
//! SplashScreen -> MainMenu <-> SettingsMenu
//!                 MainMenu -> LeavingMenu -> Game -> LeavingGame -> MainMenu | Game
//!
//! States never touch the presentation layer or the repository. Entering,
//! leaving and handling an input only append [`Effect`]s, which the driver in
//! [`super::logic`] delivers afterwards.

/// High-level app lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppState {
    /// Studio splash; waits for it to be skipped and faded out.
    #[default]
    SplashScreen,
    MainMenu,
    SettingsMenu,
    /// Fading out of the menu before the game scene is shown.
    LeavingMenu,
    Game,
    /// Fading out of a running game.
    LeavingGame,
}

/// External stimulus fed into the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Input {
    NewGame,
    LoadGame,
    Settings,
    MainMenu,
    SaveFileLoaded,
    FadeInFinished,
    FadeOutFinished,
    SplashScreenSkipped,
}

impl Input {
    /// Maps a finished fade animation to its input. Only two animations
    /// exist, so anything that is not the fade-in is the fade-out.
    pub fn from_animation_finished(name: &str) -> Self {
        if name == FadeAnimation::FadeIn.name() {
            Self::FadeInFinished
        } else {
            Self::FadeOutFinished
        }
    }
}

/// Command for the presentation layer or settings store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Output {
    ShowSplashScreen,
    HideSplashScreen,
    ShowMainMenu,
    HideMainMenu,
    ShowSettingsMenu,
    HideSettingsMenu,
    SetupGameScene,
    RemoveExistingGame,
    ShowGame { should_load_existing_game: bool },
    HideGame,
    FadeToBlack,
    StartLoadingSaveFile,
    LoadDisplaySettings,
    PlayGame,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeAnimation {
    FadeIn,
    FadeOut,
}

impl FadeAnimation {
    pub fn name(self) -> &'static str {
        match self {
            Self::FadeIn => "fade_in",
            Self::FadeOut => "fade_out",
        }
    }
}

/// What happens once a game has been left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PostGameAction {
    #[default]
    GoToMainMenu,
    RestartNewGame,
}

/// Lifecycle notification for repository observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppNotice {
    SplashScreenSkipped,
    MainMenuEntered,
    SettingsMenuEntered,
    GameEntered,
    GameExited(PostGameAction),
}

/// Data shared by every state for the lifetime of the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AppData {
    pub should_load_existing_game: bool,
    pub post_game_action: PostGameAction,
    /// A save file is being loaded into the current game scene.
    pub awaiting_save_file: bool,
    /// The current game scene has finished fading in.
    pub faded_in: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Emit(Output),
    Notify(AppNotice),
}

/// Ordered effect buffer filled by a single step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Effects(Vec<Effect>);

impl Effects {
    pub fn emit(&mut self, output: Output) {
        self.0.push(Effect::Emit(output));
    }

    pub fn notify(&mut self, notice: AppNotice) {
        self.0.push(Effect::Notify(notice));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn outputs(&self) -> Vec<Output> {
        self.0
            .iter()
            .filter_map(|e| match e {
                Effect::Emit(o) => Some(*o),
                Effect::Notify(_) => None,
            })
            .collect()
    }

    pub fn into_vec(self) -> Vec<Effect> {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Stay,
    To(AppState),
}

/// Result of feeding one handled input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub next: AppState,
    pub effects: Effects,
}

impl AppState {
    pub fn enter(self, data: &mut AppData, fx: &mut Effects) {
        match self {
            Self::SplashScreen => {
                fx.emit(Output::LoadDisplaySettings);
                fx.emit(Output::ShowSplashScreen);
            }
            Self::MainMenu => {
                data.should_load_existing_game = false;
                fx.notify(AppNotice::MainMenuEntered);
                fx.emit(Output::ShowMainMenu);
            }
            Self::SettingsMenu => {
                fx.notify(AppNotice::SettingsMenuEntered);
                fx.emit(Output::HideMainMenu);
                fx.emit(Output::ShowSettingsMenu);
            }
            Self::LeavingMenu => fx.emit(Output::FadeToBlack),
            Self::Game => {
                data.awaiting_save_file = data.should_load_existing_game;
                data.faded_in = false;
                data.post_game_action = PostGameAction::GoToMainMenu;
                fx.notify(AppNotice::GameEntered);
                fx.emit(Output::SetupGameScene);
                fx.emit(Output::ShowGame {
                    should_load_existing_game: data.should_load_existing_game,
                });
                if data.should_load_existing_game {
                    fx.emit(Output::StartLoadingSaveFile);
                }
            }
            Self::LeavingGame => fx.emit(Output::HideGame),
        }
    }

    pub fn exit(self, data: &AppData, fx: &mut Effects) {
        match self {
            Self::SettingsMenu => fx.emit(Output::HideSettingsMenu),
            Self::Game => fx.notify(AppNotice::GameExited(data.post_game_action)),
            Self::LeavingGame => fx.emit(Output::RemoveExistingGame),
            Self::SplashScreen | Self::MainMenu | Self::LeavingMenu => {}
        }
    }

    /// `None` when this state declares no handler for `input`; nothing is
    /// touched in that case.
    pub fn handle(self, input: Input, data: &mut AppData, fx: &mut Effects) -> Option<Transition> {
        use Input as I;
        let transition = match (self, input) {
            (Self::SplashScreen, I::SplashScreenSkipped) => {
                fx.notify(AppNotice::SplashScreenSkipped);
                fx.emit(Output::HideSplashScreen);
                Transition::Stay
            }
            (Self::SplashScreen, I::FadeOutFinished) => Transition::To(Self::MainMenu),

            (Self::MainMenu, I::NewGame) => {
                data.should_load_existing_game = false;
                Transition::To(Self::LeavingMenu)
            }
            (Self::MainMenu, I::LoadGame) => {
                data.should_load_existing_game = true;
                Transition::To(Self::LeavingMenu)
            }
            (Self::MainMenu, I::Settings) => Transition::To(Self::SettingsMenu),

            (Self::SettingsMenu, I::MainMenu) => Transition::To(Self::MainMenu),

            (Self::LeavingMenu, I::FadeOutFinished) => Transition::To(Self::Game),

            (Self::Game, I::FadeInFinished) => {
                if !data.faded_in {
                    data.faded_in = true;
                    if !data.awaiting_save_file {
                        fx.emit(Output::PlayGame);
                    }
                }
                Transition::Stay
            }
            (Self::Game, I::SaveFileLoaded) => {
                if data.awaiting_save_file {
                    data.awaiting_save_file = false;
                    if data.faded_in {
                        fx.emit(Output::PlayGame);
                    }
                }
                Transition::Stay
            }
            (Self::Game, I::MainMenu) => {
                data.post_game_action = PostGameAction::GoToMainMenu;
                Transition::To(Self::LeavingGame)
            }
            (Self::Game, I::NewGame) => {
                data.post_game_action = PostGameAction::RestartNewGame;
                data.should_load_existing_game = false;
                Transition::To(Self::LeavingGame)
            }

            (Self::LeavingGame, I::FadeOutFinished) => match data.post_game_action {
                PostGameAction::GoToMainMenu => Transition::To(Self::MainMenu),
                PostGameAction::RestartNewGame => {
                    data.should_load_existing_game = false;
                    Transition::To(Self::Game)
                }
            },

            _ => return None,
        };
        Some(transition)
    }
}

/// Feeds `input` to `state`: handler effects first, then the old state's exit
/// effects and the new state's entry effects.
pub fn transition(state: AppState, data: &mut AppData, input: Input) -> Option<Step> {
    let mut effects = Effects::default();
    let next = match state.handle(input, data, &mut effects)? {
        Transition::Stay => state,
        Transition::To(next) => {
            state.exit(data, &mut effects);
            next.enter(data, &mut effects);
            next
        }
    };
    Some(Step { next, effects })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_STATES: [AppState; 6] = [
        AppState::SplashScreen,
        AppState::MainMenu,
        AppState::SettingsMenu,
        AppState::LeavingMenu,
        AppState::Game,
        AppState::LeavingGame,
    ];

    const ALL_INPUTS: [Input; 8] = [
        Input::NewGame,
        Input::LoadGame,
        Input::Settings,
        Input::MainMenu,
        Input::SaveFileLoaded,
        Input::FadeInFinished,
        Input::FadeOutFinished,
        Input::SplashScreenSkipped,
    ];

    fn handled(state: AppState) -> &'static [Input] {
        match state {
            AppState::SplashScreen => &[Input::SplashScreenSkipped, Input::FadeOutFinished],
            AppState::MainMenu => &[Input::NewGame, Input::LoadGame, Input::Settings],
            AppState::SettingsMenu => &[Input::MainMenu],
            AppState::LeavingMenu => &[Input::FadeOutFinished],
            AppState::Game => &[
                Input::FadeInFinished,
                Input::SaveFileLoaded,
                Input::MainMenu,
                Input::NewGame,
            ],
            AppState::LeavingGame => &[Input::FadeOutFinished],
        }
    }

    #[test]
    fn undeclared_inputs_change_nothing() {
        let data = AppData {
            should_load_existing_game: true,
            post_game_action: PostGameAction::RestartNewGame,
            awaiting_save_file: true,
            faded_in: true,
        };
        for state in ALL_STATES {
            for input in ALL_INPUTS {
                if handled(state).contains(&input) {
                    continue;
                }
                let mut d = data;
                assert_eq!(transition(state, &mut d, input), None, "{state:?} + {input:?}");
                assert_eq!(d, data, "{state:?} + {input:?} mutated shared data");
            }
        }
    }

    #[test]
    fn declared_inputs_are_handled() {
        for state in ALL_STATES {
            for &input in handled(state) {
                let mut d = AppData::default();
                assert!(transition(state, &mut d, input).is_some(), "{state:?} + {input:?}");
            }
        }
    }

    #[test]
    fn main_menu_entry_resets_flag_before_showing() {
        let mut data = AppData {
            should_load_existing_game: true,
            ..Default::default()
        };
        let mut fx = Effects::default();
        AppState::MainMenu.enter(&mut data, &mut fx);
        assert!(!data.should_load_existing_game);
        assert_eq!(fx.outputs(), vec![Output::ShowMainMenu]);
        assert_eq!(
            fx.into_vec(),
            vec![Effect::Notify(AppNotice::MainMenuEntered), Effect::Emit(Output::ShowMainMenu)]
        );
    }

    #[test]
    fn settings_menu_enter_and_exit_order() {
        let mut data = AppData::default();
        let mut fx = Effects::default();
        AppState::SettingsMenu.enter(&mut data, &mut fx);
        assert_eq!(fx.outputs(), vec![Output::HideMainMenu, Output::ShowSettingsMenu]);

        let mut fx = Effects::default();
        AppState::SettingsMenu.exit(&data, &mut fx);
        assert_eq!(fx.outputs(), vec![Output::HideSettingsMenu]);
    }

    #[test]
    fn settings_menu_returns_to_main_menu() {
        let mut data = AppData::default();
        let step = transition(AppState::SettingsMenu, &mut data, Input::MainMenu).unwrap();
        assert_eq!(step.next, AppState::MainMenu);
        assert_eq!(step.effects.outputs(), vec![Output::HideSettingsMenu, Output::ShowMainMenu]);
    }

    #[test]
    fn load_and_new_game_set_flag() {
        let mut data = AppData::default();
        let step = transition(AppState::MainMenu, &mut data, Input::LoadGame).unwrap();
        assert_eq!(step.next, AppState::LeavingMenu);
        assert!(data.should_load_existing_game);
        assert_eq!(step.effects.outputs(), vec![Output::FadeToBlack]);

        let mut data = AppData {
            should_load_existing_game: true,
            ..Default::default()
        };
        let step = transition(AppState::MainMenu, &mut data, Input::NewGame).unwrap();
        assert_eq!(step.next, AppState::LeavingMenu);
        assert!(!data.should_load_existing_game);
    }

    #[test]
    fn leaving_menu_sets_up_loaded_game() {
        let mut data = AppData {
            should_load_existing_game: true,
            ..Default::default()
        };
        let step = transition(AppState::LeavingMenu, &mut data, Input::FadeOutFinished).unwrap();
        assert_eq!(step.next, AppState::Game);
        assert_eq!(
            step.effects.outputs(),
            vec![
                Output::SetupGameScene,
                Output::ShowGame {
                    should_load_existing_game: true,
                },
                Output::StartLoadingSaveFile,
            ]
        );
        assert!(data.awaiting_save_file);
    }

    #[test]
    fn new_game_plays_after_fade_in() {
        let mut data = AppData::default();
        let step = transition(AppState::LeavingMenu, &mut data, Input::FadeOutFinished).unwrap();
        assert_eq!(
            step.effects.outputs(),
            vec![
                Output::SetupGameScene,
                Output::ShowGame {
                    should_load_existing_game: false,
                },
            ]
        );
        let step = transition(AppState::Game, &mut data, Input::FadeInFinished).unwrap();
        assert_eq!(step.next, AppState::Game);
        assert_eq!(step.effects.outputs(), vec![Output::PlayGame]);
        // a second fade-in does not restart play
        let step = transition(AppState::Game, &mut data, Input::FadeInFinished).unwrap();
        assert!(step.effects.is_empty());
    }

    #[test]
    fn loaded_game_waits_for_both_fade_and_save() {
        let mut data = AppData {
            should_load_existing_game: true,
            ..Default::default()
        };
        AppState::Game.enter(&mut data, &mut Effects::default());

        let step = transition(AppState::Game, &mut data, Input::FadeInFinished).unwrap();
        assert!(step.effects.outputs().is_empty());
        let step = transition(AppState::Game, &mut data, Input::SaveFileLoaded).unwrap();
        assert_eq!(step.effects.outputs(), vec![Output::PlayGame]);

        let mut data = AppData {
            should_load_existing_game: true,
            ..Default::default()
        };
        AppState::Game.enter(&mut data, &mut Effects::default());
        let step = transition(AppState::Game, &mut data, Input::SaveFileLoaded).unwrap();
        assert!(step.effects.outputs().is_empty());
        let step = transition(AppState::Game, &mut data, Input::FadeInFinished).unwrap();
        assert_eq!(step.effects.outputs(), vec![Output::PlayGame]);
    }

    #[test]
    fn quitting_game_removes_scene_then_shows_menu() {
        let mut data = AppData::default();
        let step = transition(AppState::Game, &mut data, Input::MainMenu).unwrap();
        assert_eq!(step.next, AppState::LeavingGame);
        assert_eq!(
            step.effects.clone().into_vec(),
            vec![
                Effect::Notify(AppNotice::GameExited(PostGameAction::GoToMainMenu)),
                Effect::Emit(Output::HideGame),
            ]
        );
        let step = transition(AppState::LeavingGame, &mut data, Input::FadeOutFinished).unwrap();
        assert_eq!(step.next, AppState::MainMenu);
        assert_eq!(step.effects.outputs(), vec![Output::RemoveExistingGame, Output::ShowMainMenu]);
    }

    #[test]
    fn restarting_game_recreates_scene() {
        let mut data = AppData {
            should_load_existing_game: true,
            ..Default::default()
        };
        let step = transition(AppState::Game, &mut data, Input::NewGame).unwrap();
        assert_eq!(step.next, AppState::LeavingGame);
        assert!(!data.should_load_existing_game);
        assert_eq!(data.post_game_action, PostGameAction::RestartNewGame);
        let step = transition(AppState::LeavingGame, &mut data, Input::FadeOutFinished).unwrap();
        assert_eq!(step.next, AppState::Game);
        assert_eq!(
            step.effects.outputs(),
            vec![
                Output::RemoveExistingGame,
                Output::SetupGameScene,
                Output::ShowGame {
                    should_load_existing_game: false,
                },
            ]
        );
    }

    #[test]
    fn splash_skip_hides_then_fade_reaches_menu() {
        let mut data = AppData::default();
        let step =
            transition(AppState::SplashScreen, &mut data, Input::SplashScreenSkipped).unwrap();
        assert_eq!(step.next, AppState::SplashScreen);
        assert_eq!(step.effects.outputs(), vec![Output::HideSplashScreen]);
        let step = transition(AppState::SplashScreen, &mut data, Input::FadeOutFinished).unwrap();
        assert_eq!(step.next, AppState::MainMenu);
        assert_eq!(step.effects.outputs(), vec![Output::ShowMainMenu]);
    }

    #[test]
    fn animation_names_map_to_inputs() {
        assert_eq!(Input::from_animation_finished("fade_in"), Input::FadeInFinished);
        assert_eq!(Input::from_animation_finished("fade_out"), Input::FadeOutFinished);
        assert_eq!(Input::from_animation_finished("anything"), Input::FadeOutFinished);
    }
}
