pub mod bootstrap;
pub mod config;
pub mod repl;
pub mod session;
