pub mod binding;
pub mod game;
pub mod logic;
pub mod menu;
pub mod repo;
pub mod state;
pub mod surface;

pub use binding::{AppBinding, PresentationSurface};
pub use game::{AppFlowPlugin, AppFlowSet, AppInput, AppOutput};
pub use logic::AppLogic;
pub use menu::{SettingsForm, SettingsMenu};
pub use repo::{AppRepo, ObserverId, RepoEvent};
pub use state::{AppState, FadeAnimation, Input, Output, PostGameAction};
pub use surface::HeadlessSurface;
