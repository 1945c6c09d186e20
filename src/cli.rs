// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::camera::CameraMode;

#[derive(Parser, Debug, Clone)]
#[command(name = "camera-lab")]
#[command(about = "Euler vs quaternion camera playground", long_about = None)]
pub struct Cli {
    /// JSON config file; built-in defaults when omitted
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Starting camera mode, overrides the config file
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Disable UI elements and console output
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,

    /// Print the effective config as JSON and exit
    #[arg(long)]
    pub print_config: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArg {
    Euler,
    Quaternion,
}

impl From<ModeArg> for CameraMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Euler => CameraMode::Euler,
            ModeArg::Quaternion => CameraMode::Quaternion,
        }
    }
}
