pub mod camera;
pub mod cli;
pub mod clock;
pub mod config;
pub mod input;
pub mod renderer;
pub mod shader;
