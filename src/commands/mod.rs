//! CLI commands

pub mod check;
pub mod export;
pub mod init;
pub mod list;
pub mod new;
pub mod show;
pub mod status;
