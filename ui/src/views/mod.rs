mod home;
mod state;

pub use home::Home;
pub use state::use_sleepwell_state;
