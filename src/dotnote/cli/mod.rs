mod commands;
mod render;
mod setup;
mod terminal;

pub use commands::run;
