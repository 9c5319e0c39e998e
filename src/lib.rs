pub mod banner;
pub mod clock;
pub mod commands;
pub mod config;
pub mod consts;
pub mod context;
pub mod events;
pub mod host;
pub mod lines;
pub mod programs;
pub mod session;
pub mod shell;
pub mod stage;
pub mod status;
