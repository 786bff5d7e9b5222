//! Application repository shared between the flow state machine, the main
//! menu and the settings menu.
use bevy::prelude::*;

use super::state::{AppNotice, PostGameAction};
use crate::core::config::{DisplaySettings, SettingsStore};

/// Handle returned by a subscription, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type Callback<T> = Box<dyn FnMut(&T) + Send + Sync>;

/// Ordered list of callbacks for one event kind.
pub struct Observers<T> {
    next_id: u64,
    entries: Vec<(ObserverId, Callback<T>)>,
    closed: bool,
}

impl<T> Default for Observers<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
            closed: false,
        }
    }
}

impl<T> Observers<T> {
    /// Once closed, new callbacks are dropped instead of stored.
    pub fn subscribe(&mut self, callback: impl FnMut(&T) + Send + Sync + 'static) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        if !self.closed {
            self.entries.push((id, Box::new(callback)));
        }
        id
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(eid, _)| *eid != id);
        self.entries.len() != before
    }

    /// Calls every observer in registration order.
    pub fn notify(&mut self, value: &T) {
        for (_, cb) in self.entries.iter_mut() {
            cb(value);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn close(&mut self) {
        self.entries.clear();
        self.closed = true;
    }
}

/// Which list a subscription belongs to, for [`AppRepo::unsubscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepoEvent {
    SplashScreenSkipped,
    MainMenuEntered,
    SettingsMenuEntered,
    GameEntered,
    GameExited,
    DisplaySettingsApplied,
}

#[derive(Resource)]
pub struct AppRepo {
    store: SettingsStore,
    splash_screen_skipped: Observers<()>,
    main_menu_entered: Observers<()>,
    settings_menu_entered: Observers<()>,
    game_entered: Observers<()>,
    game_exited: Observers<PostGameAction>,
    display_settings_applied: Observers<DisplaySettings>,
    disposed: bool,
}

impl AppRepo {
    pub fn new(store: SettingsStore) -> Self {
        Self {
            store,
            splash_screen_skipped: Observers::default(),
            main_menu_entered: Observers::default(),
            settings_menu_entered: Observers::default(),
            game_entered: Observers::default(),
            game_exited: Observers::default(),
            display_settings_applied: Observers::default(),
            disposed: false,
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    fn subscribe<T>(
        disposed: bool,
        list: &mut Observers<T>,
        cb: impl FnMut(&T) + Send + Sync + 'static,
    ) -> ObserverId {
        if disposed {
            warn!(target: "app", "AppRepo already disposed; subscription dropped");
        }
        list.subscribe(cb)
    }

    pub fn on_splash_screen_skipped(
        &mut self,
        mut cb: impl FnMut() + Send + Sync + 'static,
    ) -> ObserverId {
        Self::subscribe(self.disposed, &mut self.splash_screen_skipped, move |_| cb())
    }

    pub fn on_main_menu_entered(
        &mut self,
        mut cb: impl FnMut() + Send + Sync + 'static,
    ) -> ObserverId {
        Self::subscribe(self.disposed, &mut self.main_menu_entered, move |_| cb())
    }

    pub fn on_settings_menu_entered(
        &mut self,
        mut cb: impl FnMut() + Send + Sync + 'static,
    ) -> ObserverId {
        Self::subscribe(self.disposed, &mut self.settings_menu_entered, move |_| cb())
    }

    pub fn on_game_entered(
        &mut self,
        mut cb: impl FnMut() + Send + Sync + 'static,
    ) -> ObserverId {
        Self::subscribe(self.disposed, &mut self.game_entered, move |_| cb())
    }

    pub fn on_game_exited(
        &mut self,
        cb: impl FnMut(&PostGameAction) + Send + Sync + 'static,
    ) -> ObserverId {
        Self::subscribe(self.disposed, &mut self.game_exited, cb)
    }

    pub fn on_display_settings_applied(
        &mut self,
        cb: impl FnMut(&DisplaySettings) + Send + Sync + 'static,
    ) -> ObserverId {
        Self::subscribe(self.disposed, &mut self.display_settings_applied, cb)
    }

    pub fn unsubscribe(&mut self, event: RepoEvent, id: ObserverId) -> bool {
        match event {
            RepoEvent::SplashScreenSkipped => self.splash_screen_skipped.unsubscribe(id),
            RepoEvent::MainMenuEntered => self.main_menu_entered.unsubscribe(id),
            RepoEvent::SettingsMenuEntered => self.settings_menu_entered.unsubscribe(id),
            RepoEvent::GameEntered => self.game_entered.unsubscribe(id),
            RepoEvent::GameExited => self.game_exited.unsubscribe(id),
            RepoEvent::DisplaySettingsApplied => self.display_settings_applied.unsubscribe(id),
        }
    }

    pub fn observer_count(&self, event: RepoEvent) -> usize {
        match event {
            RepoEvent::SplashScreenSkipped => self.splash_screen_skipped.len(),
            RepoEvent::MainMenuEntered => self.main_menu_entered.len(),
            RepoEvent::SettingsMenuEntered => self.settings_menu_entered.len(),
            RepoEvent::GameEntered => self.game_entered.len(),
            RepoEvent::GameExited => self.game_exited.len(),
            RepoEvent::DisplaySettingsApplied => self.display_settings_applied.len(),
        }
    }

    pub fn skip_splash_screen(&mut self) {
        self.splash_screen_skipped.notify(&());
    }

    pub fn main_menu_entered(&mut self) {
        self.main_menu_entered.notify(&());
    }

    pub fn settings_menu_entered(&mut self) {
        self.settings_menu_entered.notify(&());
    }

    pub fn enter_game(&mut self) {
        self.game_entered.notify(&());
    }

    pub fn exit_game(&mut self, action: PostGameAction) {
        self.game_exited.notify(&action);
    }

    /// Broadcasts `settings` to whoever configures the renderer.
    pub fn apply_display_settings(&mut self, settings: DisplaySettings) {
        self.display_settings_applied.notify(&settings);
    }

    /// Routes a state machine notice to its observer list.
    pub fn notify(&mut self, notice: AppNotice) {
        match notice {
            AppNotice::SplashScreenSkipped => self.skip_splash_screen(),
            AppNotice::MainMenuEntered => self.main_menu_entered(),
            AppNotice::SettingsMenuEntered => self.settings_menu_entered(),
            AppNotice::GameEntered => self.enter_game(),
            AppNotice::GameExited(action) => self.exit_game(action),
        }
    }

    /// Saved settings, or the defaults when nothing usable is on disk.
    pub fn saved_display_settings(&self) -> DisplaySettings {
        self.store.load_or_default()
    }

    /// Best effort: failures are logged and otherwise ignored.
    pub fn save_display_settings(&self, settings: &DisplaySettings) {
        if let Err(e) = self.store.save(settings) {
            warn!(target: "settings", "Failed to save display settings: {e:#}");
        }
    }

    /// Drops every observer. Safe to call more than once.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.splash_screen_skipped.close();
        self.main_menu_entered.close();
        self.settings_menu_entered.close();
        self.game_entered.close();
        self.game_exited.close();
        self.display_settings_applied.close();
        self.disposed = true;
        debug!(target: "app", "AppRepo disposed");
    }
}
