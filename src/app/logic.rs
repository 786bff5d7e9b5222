use bevy::prelude::*;

use super::repo::AppRepo;
use super::state::{transition, AppData, AppState, Effect, Effects, Input, Output};

/// Drives [`AppState`] and delivers effects: notices go to the repository
/// immediately, outputs are returned in emission order.
#[derive(Resource, Debug, Default)]
pub struct AppLogic {
    state: Option<AppState>,
    data: AppData,
    stopped: bool,
}

impl AppLogic {
    pub fn new() -> Self {
        Self::default()
    }

    /// Active state, `None` before `start` and after `stop`.
    pub fn state(&self) -> Option<AppState> {
        self.state
    }

    pub fn data(&self) -> &AppData {
        &self.data
    }

    pub fn is_running(&self) -> bool {
        self.state.is_some()
    }

    /// Enters the splash screen. Later calls do nothing.
    pub fn start(&mut self, repo: &mut AppRepo) -> Vec<Output> {
        if self.state.is_some() || self.stopped {
            return Vec::new();
        }
        let initial = AppState::default();
        let mut fx = Effects::default();
        initial.enter(&mut self.data, &mut fx);
        self.state = Some(initial);
        info!(target: "app", "AppLogic started in {initial:?}");
        deliver(fx, repo)
    }

    /// Inputs the current state does not handle are ignored.
    pub fn input(&mut self, input: Input, repo: &mut AppRepo) -> Vec<Output> {
        let Some(state) = self.state else {
            debug!(target: "app", "Input {input:?} ignored: AppLogic not running");
            return Vec::new();
        };
        let Some(step) = transition(state, &mut self.data, input) else {
            debug!(target: "app", "Input {input:?} ignored in {state:?}");
            return Vec::new();
        };
        if step.next != state {
            info!(target: "app", "{state:?} --{input:?}--> {:?}", step.next);
        }
        self.state = Some(step.next);
        deliver(step.effects, repo)
    }

    /// Runs the active state's exit effects once and parks the machine.
    pub fn stop(&mut self, repo: &mut AppRepo) -> Vec<Output> {
        let Some(state) = self.state.take() else {
            return Vec::new();
        };
        self.stopped = true;
        let mut fx = Effects::default();
        state.exit(&self.data, &mut fx);
        info!(target: "app", "AppLogic stopped in {state:?}");
        deliver(fx, repo)
    }
}

fn deliver(fx: Effects, repo: &mut AppRepo) -> Vec<Output> {
    let mut outputs = Vec::new();
    for effect in fx.into_vec() {
        match effect {
            Effect::Emit(output) => outputs.push(output),
            Effect::Notify(notice) => repo.notify(notice),
        }
    }
    outputs
}
