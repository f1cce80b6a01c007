mod controller;
pub mod display;
mod mode;
mod state;

pub use controller::{SelectorOption, ViewError, ViewStateController};
pub use display::{BookCard, ResultsView};
pub use mode::ViewMode;
pub use state::{SessionSnapshot, TriggerClass};
