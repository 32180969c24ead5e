mod drill;
mod home;
mod review;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use drill::{DrillScreen, DrillView};
pub use home::HomeView;
pub use review::ReviewPanel;
pub use state::ViewError;
