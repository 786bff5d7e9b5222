use bevy::prelude::*;
use game_demo::app::{
    AppFlowPlugin, AppFlowSet, AppInput, AppLogic, AppOutput, AppRepo, AppState, HeadlessSurface,
    Input, Output, RepoEvent,
};
use game_demo::core::config::{DisplaySettings, RenderProfile, SettingsStore};

#[derive(Resource, Default)]
struct Seen(Vec<Output>);

fn collect(mut events: EventReader<AppOutput>, mut seen: ResMut<Seen>) {
    seen.0.extend(events.read().map(|e| e.0));
}

fn test_app(store: SettingsStore) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    // Zero-length timers finish on their first tick, one transition per frame.
    app.add_plugins(AppFlowPlugin {
        store,
        fade_secs: 0.0,
        splash_secs: 0.0,
    });
    app.init_resource::<Seen>();
    app.add_systems(Update, collect.after(AppFlowSet::Logic));
    app
}

fn run_until_idle(app: &mut App) {
    app.update();
    for _ in 0..20 {
        if app.world().resource::<HeadlessSurface>().is_idle() {
            return;
        }
        app.update();
    }
    panic!("app flow never settled");
}

fn state(app: &App) -> Option<AppState> {
    app.world().resource::<AppLogic>().state()
}

fn send(app: &mut App, input: Input) {
    app.world_mut().send_event(AppInput(input));
    run_until_idle(app);
}

#[test]
fn boots_through_splash_into_main_menu() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = test_app(SettingsStore::at(dir.path().join("settings.json")));
    run_until_idle(&mut app);

    assert_eq!(state(&app), Some(AppState::MainMenu));
    let seen = &app.world().resource::<Seen>().0;
    assert!(
        seen.ends_with(&[Output::HideSplashScreen, Output::ShowMainMenu]),
        "unexpected boot outputs: {seen:?}"
    );
    let surface = app.world().resource::<HeadlessSurface>();
    assert!(surface.main_menu_visible);
    assert!(!surface.splash_visible);
    assert!(!surface.blank_screen_visible);
}

#[test]
fn saved_settings_reach_render_profile() {
    let dir = tempfile::tempdir().unwrap();
    let store = SettingsStore::at(dir.path().join("settings.json"));
    let saved = DisplaySettings {
        max_fps: 0,
        bloom: false,
        ..DisplaySettings::DEFAULT
    };
    store.save(&saved).unwrap();

    let mut app = test_app(store);
    app.update();
    let profile = app.world().resource::<RenderProfile>();
    assert_eq!(*profile, RenderProfile::from_settings(&saved));
    assert_eq!(profile.max_fps, None);
    assert!(!profile.bloom);
}

#[test]
fn new_game_then_back_to_menu() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = test_app(SettingsStore::at(dir.path().join("settings.json")));
    run_until_idle(&mut app);
    app.world_mut().resource_mut::<Seen>().0.clear();

    send(&mut app, Input::NewGame);
    assert_eq!(state(&app), Some(AppState::Game));
    {
        let surface = app.world().resource::<HeadlessSurface>();
        assert!(surface.game_scene_loaded);
        assert!(!surface.paused);
    }

    send(&mut app, Input::MainMenu);
    assert_eq!(state(&app), Some(AppState::MainMenu));
    assert!(!app.world().resource::<HeadlessSurface>().game_scene_loaded);

    let seen = &app.world().resource::<Seen>().0;
    assert_eq!(
        seen.as_slice(),
        &[
            Output::FadeToBlack,
            Output::SetupGameScene,
            Output::ShowGame {
                should_load_existing_game: false,
            },
            Output::PlayGame,
            Output::HideGame,
            Output::RemoveExistingGame,
            Output::ShowMainMenu,
        ]
    );
}

#[test]
fn load_game_waits_for_save_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = test_app(SettingsStore::at(dir.path().join("settings.json")));
    run_until_idle(&mut app);

    send(&mut app, Input::LoadGame);
    assert_eq!(state(&app), Some(AppState::Game));
    let seen = &app.world().resource::<Seen>().0;
    assert!(seen.contains(&Output::StartLoadingSaveFile));
    assert_eq!(seen.iter().filter(|o| **o == Output::PlayGame).count(), 1);
    assert_eq!(seen.last(), Some(&Output::PlayGame));
}

#[test]
fn exit_stops_logic_and_disposes_repo() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = test_app(SettingsStore::at(dir.path().join("settings.json")));
    run_until_idle(&mut app);
    send(&mut app, Input::Settings);
    assert!(app.world().resource::<HeadlessSurface>().settings_menu_visible);

    app.world_mut().send_event(AppExit::Success);
    app.update();

    assert!(!app.world().resource::<AppLogic>().is_running());
    assert!(!app.world().resource::<HeadlessSurface>().settings_menu_visible);
    let repo = app.world().resource::<AppRepo>();
    assert!(repo.is_disposed());
    assert_eq!(repo.observer_count(RepoEvent::DisplaySettingsApplied), 0);
}
