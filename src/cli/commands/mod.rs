//! CLI command implementations.

mod config;
mod doctor;
mod init;
mod serve;
mod study;
mod tutor;

pub use config::run_config;
pub use doctor::run_doctor;
pub use init::run_init;
pub use serve::run_serve;
pub use study::run_study;
pub use tutor::run_tutor;
