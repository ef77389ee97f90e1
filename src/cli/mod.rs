mod command;
mod runner;

pub use command::Command;
pub use runner::{OutputMode, exit_code, render, run};
