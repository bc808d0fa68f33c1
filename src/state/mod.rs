pub mod session_state;
pub mod ui_state;

pub use session_state::SessionState;
pub use ui_state::{Panel, UiState};
