pub mod gamepad;
pub mod input;
pub mod keymap;
pub mod renderer;
pub mod surface;
pub mod terminal;
