pub mod commands;
pub mod passes;
pub mod renderer;
