//! CLI command handlers. Each command is in its own file.

mod check;
mod completions;
mod config;
mod links;
mod submit;

pub use check::run_check;
pub use completions::{run_completions, run_man};
pub use config::run_config;
pub use submit::{run_submit, SubmitOptions};
