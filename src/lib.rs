pub mod check;
pub mod cli;
pub mod cloud_providers;
pub mod logging;
pub mod status;
