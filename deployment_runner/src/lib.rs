mod orchestrator;
mod report;
mod verify;

pub use orchestrator::{run_deployment, Orchestrator, RunSettings};
pub use report::{print_failure, print_outcome, verification_table};
pub use verify::verify_deployment;
