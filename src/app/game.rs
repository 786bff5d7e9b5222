// This file is part of Game Demo.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use bevy::prelude::*;
use crossbeam_channel::{Receiver, Sender};

use super::binding::AppBinding;
use super::logic::AppLogic;
use super::repo::AppRepo;
use super::state::{Input, Output};
use super::surface::HeadlessSurface;
use crate::core::config::{DisplaySettings, RenderProfile, SettingsStore};

/// Input delivered to the app flow from anywhere in the schedule.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppInput(pub Input);

/// Output the app flow emitted, already applied to the surface.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppOutput(pub Output);

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum AppFlowSet {
    Surface,
    Logic,
    Apply,
}

#[derive(Resource)]
struct AppliedSettings(Receiver<DisplaySettings>);

pub struct AppFlowPlugin {
    pub store: SettingsStore,
    pub fade_secs: f32,
    pub splash_secs: f32,
}

impl AppFlowPlugin {
    pub fn new(store: SettingsStore) -> Self {
        Self { store, ..default() }
    }
}

impl Default for AppFlowPlugin {
    fn default() -> Self {
        Self {
            store: SettingsStore::in_user_data_dir(),
            fade_secs: 0.5,
            splash_secs: 1.5,
        }
    }
}

impl Plugin for AppFlowPlugin {
    fn build(&self, app: &mut App) {
        let (tx, rx): (Sender<DisplaySettings>, Receiver<DisplaySettings>) =
            crossbeam_channel::unbounded();
        let mut repo = AppRepo::new(self.store.clone());
        repo.on_display_settings_applied(move |settings| {
            if let Err(e) = tx.send(*settings) {
                debug!(target: "render", "Render profile receiver gone; dropped {:?}", e.0);
            }
        });
        info!(target: "app", "Settings file: {}", self.store.path().display());

        app.insert_resource(repo)
            .init_resource::<AppLogic>()
            .insert_resource(HeadlessSurface::new(self.fade_secs, self.splash_secs))
            .init_resource::<RenderProfile>()
            .insert_resource(AppliedSettings(rx))
            .add_event::<AppInput>()
            .add_event::<AppOutput>()
            .configure_sets(
                Update,
                (AppFlowSet::Surface, AppFlowSet::Logic, AppFlowSet::Apply).chain(),
            )
            .add_systems(Startup, start_app_logic)
            .add_systems(
                Update,
                (
                    tick_surface.in_set(AppFlowSet::Surface),
                    run_app_logic.in_set(AppFlowSet::Logic),
                    apply_render_profile.in_set(AppFlowSet::Apply),
                ),
            )
            .add_systems(Last, shutdown_on_exit);
    }
}

fn start_app_logic(
    mut logic: ResMut<AppLogic>,
    mut repo: ResMut<AppRepo>,
    mut surface: ResMut<HeadlessSurface>,
    mut outputs: EventWriter<AppOutput>,
) {
    let out = logic.start(&mut repo);
    AppBinding::dispatch_all(&out, surface.as_mut(), repo.as_mut());
    for o in out {
        outputs.write(AppOutput(o));
    }
}

fn tick_surface(
    time: Res<Time>,
    mut surface: ResMut<HeadlessSurface>,
    mut inputs: EventWriter<AppInput>,
) {
    for input in surface.tick(time.delta()) {
        inputs.write(AppInput(input));
    }
}

fn run_app_logic(
    mut events: EventReader<AppInput>,
    mut logic: ResMut<AppLogic>,
    mut repo: ResMut<AppRepo>,
    mut surface: ResMut<HeadlessSurface>,
    mut outputs: EventWriter<AppOutput>,
) {
    let inputs: Vec<Input> = events.read().map(|e| e.0).collect();
    for input in inputs {
        let out = logic.input(input, &mut repo);
        AppBinding::dispatch_all(&out, surface.as_mut(), repo.as_mut());
        for o in out {
            outputs.write(AppOutput(o));
        }
    }
}

fn apply_render_profile(applied: Res<AppliedSettings>, mut profile: ResMut<RenderProfile>) {
    // Only the newest value matters when several arrive in one frame.
    let Some(settings) = applied.0.try_iter().last() else {
        return;
    };
    let next = RenderProfile::from_settings(&settings);
    if *profile != next {
        info!(target: "render", "Display settings applied: {settings:?}");
        *profile = next;
    }
}

fn shutdown_on_exit(
    mut exits: EventReader<AppExit>,
    mut logic: ResMut<AppLogic>,
    mut repo: ResMut<AppRepo>,
    mut surface: ResMut<HeadlessSurface>,
) {
    if exits.read().next().is_none() || repo.is_disposed() {
        return;
    }
    let out = logic.stop(&mut repo);
    AppBinding::dispatch_all(&out, surface.as_mut(), repo.as_mut());
    repo.dispose();
    info!(target: "app", "App flow shut down");
}
