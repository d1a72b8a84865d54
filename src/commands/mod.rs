//! Command entry points

mod context;
pub mod deploy;
pub mod init;

pub use context::CommandContext;
