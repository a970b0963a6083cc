// src/args.rs
use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about = "Hand gesture heads-up display over a live camera feed", long_about = None)]
pub struct Args {
    /// Camera index, overriding the config file
    #[arg(short, long)]
    pub camera: Option<u32>,

    /// JSON config file (defaults to the per-user config, if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Hand landmark ONNX model, overriding the config file
    #[arg(long)]
    pub model: Option<PathBuf>,

    /// Drive the HUD with a synthetic hand instead of a model
    #[arg(long, default_value_t = false)]
    pub simulate: bool,

    /// Draw the hand landmark skeleton
    #[arg(long, default_value_t = false)]
    pub skeleton: bool,

    /// List available cameras and exit
    #[arg(long, default_value_t = false)]
    pub list_cameras: bool,
}
