// https://docs.rs/clap-serde/latest/clap_serde/#
use clap_serde_derive::{
    clap::{self, Parser},
    serde::Serialize,
    ClapSerde,
};
use flocking_lib::options;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Interactive boids flocking (Reynolds '87) with mouse attraction and a predator.
pub struct Args {
    /// Config file
    #[arg(short, long = "config", default_value = "config.yaml")]
    pub config_path: std::path::PathBuf,

    /// Rest of arguments
    #[command(flatten)]
    pub config: <Config as ClapSerde>::Opt,
}

#[derive(ClapSerde, Serialize)]
/// Programatic configuration
///
/// Uses defaults, which can be overwritten by specifying a filepath for the `-c` or `--config` arg option
pub struct Config {
    #[default(options::NUM_BOIDS)]
    #[arg(short = 'n', long)]
    /// number of boids
    pub no_boids: usize,

    #[default(options::WIDTH as u32)]
    #[arg(short = 'x', long)]
    pub width: u32,

    #[default(options::HEIGHT as u32)]
    #[arg(short = 'y', long)]
    pub height: u32,

    #[default(options::MAX_SPEED)]
    #[arg(long = "max_speed")]
    pub max_speed: f32,

    #[default(options::MAX_FORCE)]
    #[arg(long = "max_force")]
    pub max_force: f32,

    #[default(options::PERCEPTION_RADIUS)]
    #[arg(long = "perception")]
    /// neighbourhood radius, separation uses half of it
    pub perception_radius: f32,

    #[default(options::BOID_RADIUS)]
    #[arg(long = "size")]
    pub boid_radius: f32,

    #[default(options::FPS)]
    #[arg(long)]
    pub fps: u32,

    #[default(0)]
    #[arg(short = 's', long)]
    /// rng seed, 0 picks a random one
    pub seed: u64,

    #[default(String::from("spathash"))]
    #[arg(short = 't', long)]
    /// neighbour lookup, `naive` or `spathash`
    pub tracker: String,

    #[default(1)]
    #[arg(short = 'r', long)]
    /// ratio of renders/sample_rate, e,g, 4 = sample every 4th render
    pub sample_rate: u64,

    #[default(false)]
    #[arg(short = 'v', long)]
    pub verbose: bool,
}
