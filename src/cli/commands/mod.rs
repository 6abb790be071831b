//! CLI command implementations.

mod config;
mod doctor;
mod generate;
mod serve;
mod transcript;

pub use config::run_config;
pub use doctor::run_doctor;
pub use generate::run_generate;
pub use serve::run_serve;
pub use transcript::run_transcript;
