pub mod commands;
mod email;
mod environment;
