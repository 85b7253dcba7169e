// cli.rs - Command-line interface configuration
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "rayview")]
#[command(about = "Interactive GPU ray tracing viewer", long_about = None)]
pub struct Cli {
    /// Path to a JSON viewer configuration file
    #[arg(long = "config")]
    pub config: Option<PathBuf>,

    /// Path to the WGSL ray tracing shader
    #[arg(long = "shader", default_value = "assets/shaders/raytrace.wgsl")]
    pub shader: PathBuf,

    /// Disable the on-screen overlay
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,
}
