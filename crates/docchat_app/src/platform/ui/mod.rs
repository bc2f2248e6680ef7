pub mod commands;
pub mod flatten;
pub mod render;
pub mod terminal;
