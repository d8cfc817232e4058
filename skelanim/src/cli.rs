//! Root CLI structure for skelanim

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "skelanim")]
#[command(about = "Build, inspect, sample and blend skeletal animations", long_about = None)]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a runtime animation archive from a raw JSON description
    BuildAnimation {
        /// Raw animation JSON file
        input: PathBuf,

        /// Output animation archive
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Build a runtime skeleton archive from a raw JSON description
    BuildSkeleton {
        /// Raw skeleton JSON file
        input: PathBuf,

        /// Output skeleton archive
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Display information about an animation or skeleton archive
    Info {
        /// Archive file
        file: PathBuf,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Sample an animation and print model-space joint positions
    Sample(SampleArgs),

    /// Play, blend and resolve several animations frame by frame
    Blend(BlendArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args)]
pub struct SampleArgs {
    /// Skeleton archive
    pub skeleton: PathBuf,

    /// Animation archive
    pub animation: PathBuf,

    /// Time in seconds, clamped to the animation duration
    #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub time: f32,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Args)]
pub struct BlendArgs {
    /// Skeleton archive
    pub skeleton: PathBuf,

    /// Animation archives, one blend layer each
    #[arg(required = true, num_args = 1..)]
    pub animations: Vec<PathBuf>,

    /// Blend ratio in [0, 1]; derives weights and synchronised speeds
    #[arg(long, conflicts_with = "weights")]
    pub ratio: Option<f32>,

    /// Explicit layer weights, one per animation
    #[arg(long, num_args = 1.., value_delimiter = ',')]
    pub weights: Option<Vec<f32>>,

    /// Number of frames to play
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub frames: u32,

    /// Frame duration in seconds
    #[arg(long, default_value_t = 1.0 / 60.0)]
    pub dt: f32,

    /// Minimum weight for a layer to contribute
    #[arg(long, default_value_t = skel_runtime::DEFAULT_THRESHOLD)]
    pub threshold: f32,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
