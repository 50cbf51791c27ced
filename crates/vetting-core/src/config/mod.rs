//! Configuration system for the vetting engine.
//! TOML-based, layered: compiled defaults < `vetting.toml` < `VETTING_*` env vars.

pub mod defaults;
pub mod inheritance_config;
pub mod log_config;
pub mod vetting_config;
pub mod voting_config;

pub use inheritance_config::InheritanceConfig;
pub use log_config::LogConfig;
pub use vetting_config::VettingConfig;
pub use voting_config::VotingConfig;
