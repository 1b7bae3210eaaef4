pub mod app;
pub mod domain;
pub mod infra;
pub mod prompt;
pub mod ui;

pub use domain::errors::PromptError;
pub use domain::model::{Choice, DisabledReason, Entry, Separator};
pub use prompt::RangeSelect;

pub fn init() {
    tracing_subscriber::fmt::init();
}
