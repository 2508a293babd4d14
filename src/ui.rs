pub mod console;
pub mod input;
