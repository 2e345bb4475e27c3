// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand};
use photobooth::backends::camera::types::FacingMode;
use photobooth::capture::FilterType;
use photobooth::compose::Template;
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "photobooth")]
#[command(about = "Photobooth strip camera for the desktop")]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a booth session: capture, compose, save
    Run {
        /// Strip template (classic, grid, polaroid)
        #[arg(short, long)]
        template: Option<Template>,

        /// Per-shot filter (original, grayscale, sepia)
        #[arg(short, long, default_value = "original")]
        filter: FilterType,

        /// Preferred camera facing mode (front, rear)
        #[arg(long)]
        facing: Option<FacingMode>,

        /// Number of photos to capture (bounded by the template)
        #[arg(short, long)]
        count: Option<usize>,

        /// Scatter confetti over the strip
        #[arg(long)]
        confetti: bool,

        /// Darken strip corners with a vignette
        #[arg(long)]
        vignette: bool,

        /// Header title text
        #[arg(long)]
        title: Option<String>,

        /// Footer caption text
        #[arg(long)]
        caption: Option<String>,

        /// Output directory (default: ~/Pictures/photobooth)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Hand the finished strip to the system share handler
        #[arg(long)]
        share: bool,

        /// Pick the save location with a file dialog
        #[arg(long)]
        dialog: bool,

        /// Mute the shutter sound (persisted)
        #[arg(long, conflicts_with = "unmute")]
        mute: bool,

        /// Unmute the shutter sound (persisted)
        #[arg(long)]
        unmute: bool,

        /// Use a synthetic test pattern instead of a real camera
        #[arg(long)]
        test_pattern: bool,
    },

    /// List available cameras
    List {
        /// Include the synthetic test pattern source
        #[arg(long)]
        test_pattern: bool,
    },

    /// Compose a strip from image files
    Compose {
        /// Image files in strip order
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Strip template (classic, grid, polaroid)
        #[arg(short, long)]
        template: Option<Template>,

        /// Scatter confetti over the strip
        #[arg(long)]
        confetti: bool,

        /// Darken strip corners with a vignette
        #[arg(long)]
        vignette: bool,

        /// Header title text
        #[arg(long)]
        title: Option<String>,

        /// Footer caption text
        #[arg(long)]
        caption: Option<String>,

        /// Output directory (default: ~/Pictures/photobooth)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Open the strips folder
    Gallery,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=photobooth=debug, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let args = Cli::parse();

    match args.command {
        Some(Commands::Run {
            template,
            filter,
            facing,
            count,
            confetti,
            vignette,
            title,
            caption,
            output,
            share,
            dialog,
            mute,
            unmute,
            test_pattern,
        }) => cli::run_booth(cli::BoothOptions {
            template,
            filter,
            facing,
            count,
            confetti,
            vignette,
            title,
            caption,
            output,
            share,
            dialog,
            mute: match (mute, unmute) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            },
            test_pattern,
        }),
        Some(Commands::List { test_pattern }) => cli::list_cameras(test_pattern),
        Some(Commands::Compose {
            files,
            template,
            confetti,
            vignette,
            title,
            caption,
            output,
        }) => cli::compose_from_files(
            files,
            cli::BoothOptions {
                template,
                confetti,
                vignette,
                title,
                caption,
                output,
                ..Default::default()
            },
        ),
        Some(Commands::Gallery) => cli::open_gallery(),
        None => cli::run_booth(cli::BoothOptions::default()),
    }
}
