//! Headless driver for the app flow.
//!
//! Feeds a scripted list of player actions into the state machine, one per
//! frame once the previous fade or load has settled, and logs every output.
//!
//! Usage:
//!   cargo run -- --settings /tmp/settings.json \
//!       --script skip-splash,settings,apply-settings,main-menu,new-game,main-menu

use std::path::PathBuf;
use std::time::Duration;

use anyhow::bail;
use bevy::app::ScheduleRunnerPlugin;
use bevy::diagnostic::FrameCount;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use clap::{Parser, ValueEnum};

use game_demo::app::menu::SettingsMenu;
use game_demo::app::{
    AppFlowPlugin, AppFlowSet, AppInput, AppOutput, AppRepo, HeadlessSurface, Input,
};
use game_demo::core::config::SettingsStore;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Step {
    SkipSplash,
    NewGame,
    LoadGame,
    Settings,
    /// Opens the settings form on the saved values and presses Apply.
    ApplySettings,
    MainMenu,
}

#[derive(Parser, Debug)]
#[command(about = "Run the game app flow headless", version, author)]
struct Args {
    /// Settings file; defaults to the user data directory.
    #[arg(long)]
    settings: Option<PathBuf>,
    #[arg(
        long,
        value_enum,
        value_delimiter = ',',
        default_value = "skip-splash,settings,apply-settings,main-menu,new-game,main-menu"
    )]
    script: Vec<Step>,
    #[arg(long, default_value_t = 0.25)]
    fade_secs: f32,
    #[arg(long, default_value_t = 1.0)]
    splash_secs: f32,
    /// Hard stop in case the script never settles.
    #[arg(long, default_value_t = 1200)]
    max_frames: u32,
    /// Rendering driver name reported to the settings menu.
    #[arg(long, default_value = "vulkan")]
    driver: String,
}

#[derive(Resource)]
struct Script {
    steps: Vec<Step>,
    next: usize,
    menu: SettingsMenu,
    max_frames: u32,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if args.fade_secs < 0.0 || args.splash_secs < 0.0 {
        bail!("durations must be non-negative");
    }
    let store = match args.settings {
        Some(path) => SettingsStore::at(path),
        None => SettingsStore::in_user_data_dir(),
    };

    let exit = App::new()
        .add_plugins(
            MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(1.0 / 60.0))),
        )
        .add_plugins(LogPlugin::default())
        .add_plugins(AppFlowPlugin {
            store,
            fade_secs: args.fade_secs,
            splash_secs: args.splash_secs,
        })
        .insert_resource(Script {
            steps: args.script,
            next: 0,
            menu: SettingsMenu::new(&args.driver),
            max_frames: args.max_frames,
        })
        .add_systems(
            Update,
            (
                run_script.after(AppFlowSet::Surface).before(AppFlowSet::Logic),
                log_outputs.after(AppFlowSet::Logic),
            ),
        )
        .run();

    if let AppExit::Error(code) = exit {
        bail!("app exited with code {code}");
    }
    Ok(())
}

fn run_script(
    frames: Res<FrameCount>,
    mut script: ResMut<Script>,
    surface: Res<HeadlessSurface>,
    mut repo: ResMut<AppRepo>,
    mut inputs: EventWriter<AppInput>,
    mut exit: EventWriter<AppExit>,
) {
    if frames.0 >= script.max_frames {
        warn!(
            target: "app",
            "Frame limit {} reached with {} step(s) left",
            script.max_frames,
            script.steps.len() - script.next
        );
        exit.write(AppExit::Success);
        return;
    }
    let Some(&step) = script.steps.get(script.next) else {
        if surface.is_idle() {
            info!(target: "app", "Script finished after {} frames", frames.0);
            exit.write(AppExit::Success);
        }
        return;
    };
    // The splash never settles on its own before it times out.
    if step != Step::SkipSplash && !surface.is_idle() {
        return;
    }
    script.next += 1;
    info!(target: "app", "Script step: {step:?}");
    let input = match step {
        Step::SkipSplash => Input::SplashScreenSkipped,
        Step::NewGame => Input::NewGame,
        Step::LoadGame => Input::LoadGame,
        Step::Settings => Input::Settings,
        Step::MainMenu => Input::MainMenu,
        Step::ApplySettings => {
            let Script { menu, .. } = script.as_mut();
            menu.open(&repo);
            let applied = menu.apply(&mut repo);
            debug!(target: "settings", "Applied {applied:?}");
            return;
        }
    };
    inputs.write(AppInput(input));
}

fn log_outputs(mut outputs: EventReader<AppOutput>) {
    for AppOutput(output) in outputs.read() {
        info!(target: "app", "Output: {output:?}");
    }
}
