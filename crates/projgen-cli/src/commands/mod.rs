//! Command implementations for projgen-cli

pub mod add;
pub mod run;
pub mod synth;

pub use add::run_add;
pub use run::{run_list_tasks, run_task};
pub use synth::run_synth;
