// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands for booth operations
//!
//! This module provides command-line functionality for:
//! - Running a full booth session (capture → compose → export)
//! - Listing available cameras
//! - Composing a strip from image files on disk
//! - Opening the strip gallery folder

use photobooth::backends::audio::ShutterSound;
use photobooth::backends::camera::types::{CaptureFormat, FacingMode};
use photobooth::backends::camera::{CameraBackendManager, default_backend};
use photobooth::capture::{CaptureController, CapturedPhoto, FilterType};
use photobooth::compose::{Composer, RenderOptions, Template};
use photobooth::constants::capture::DEFAULT_PHOTO_COUNT;
use photobooth::{Config, Session, export, storage};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Options for a booth session, assembled from CLI flags
#[derive(Debug, Default)]
pub struct BoothOptions {
    pub template: Option<Template>,
    pub filter: FilterType,
    pub facing: Option<FacingMode>,
    pub count: Option<usize>,
    pub confetti: bool,
    pub vignette: bool,
    pub title: Option<String>,
    pub caption: Option<String>,
    pub output: Option<PathBuf>,
    /// Hand the strip to the platform share handler instead of just saving
    pub share: bool,
    /// Ask for the save location with a native dialog
    pub dialog: bool,
    /// Persisted mute override: --mute / --unmute
    pub mute: Option<bool>,
    /// Use the synthetic test pattern instead of real hardware
    pub test_pattern: bool,
}

/// List all available cameras
pub fn list_cameras(test_pattern: bool) -> Result<(), Box<dyn std::error::Error>> {
    let manager =
        CameraBackendManager::new(default_backend(test_pattern), CaptureFormat::default());

    let cameras = match manager.enumerate() {
        Ok(cameras) => cameras,
        Err(_) => {
            println!("No cameras found.");
            return Ok(());
        }
    };

    println!("Available cameras:");
    println!();
    for (index, camera) in cameras.iter().enumerate() {
        let facing = camera
            .facing
            .map(|f| format!(", {}-facing", f))
            .unwrap_or_default();
        println!("  [{}] {} ({}{})", index, camera.name, camera.path, facing);
        if !camera.driver.is_empty() {
            println!("      Driver: {}", camera.driver);
        }
        println!();
    }

    Ok(())
}

/// Run a full booth session
pub fn run_booth(options: BoothOptions) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load();

    // --mute / --unmute persist, like flipping the preference in the UI
    if let Some(mute) = options.mute
        && config.mute_shutter != mute
    {
        config.mute_shutter = mute;
        if let Err(e) = config.save() {
            eprintln!("Warning: could not persist mute preference: {}", e);
        }
    }

    // Release the camera cleanly on Ctrl-C between shots
    let interrupted = Arc::new(AtomicBool::new(false));
    {
        let interrupted = Arc::clone(&interrupted);
        ctrlc::set_handler(move || interrupted.store(true, Ordering::SeqCst))?;
    }

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(booth_session(options, config, interrupted))
}

async fn booth_session(
    options: BoothOptions,
    config: Config,
    interrupted: Arc<AtomicBool>,
) -> Result<(), Box<dyn std::error::Error>> {
    let template = options.template.unwrap_or(config.default_template);
    let count = options
        .count
        .unwrap_or(DEFAULT_PHOTO_COUNT)
        .clamp(1, template.max_photos());

    let mut session = Session::new();
    println!("Template: {}  ({} photos)", template, count);

    let manager = CameraBackendManager::new(
        default_backend(options.test_pattern),
        CaptureFormat::default(),
    );
    let shutter = ShutterSound::new(config.mute_shutter);
    let mut controller = CaptureController::new(manager, shutter, options.filter, count);

    session.start_capture()?;
    if let Err(e) = controller.acquire_camera(options.facing) {
        // Fallback chain exhausted; this is the blocking error screen
        eprintln!("\n{}\n", e);
        return Err(e.into());
    }

    while !controller.is_complete() {
        if interrupted.load(Ordering::SeqCst) {
            controller.release_camera();
            session.cancel()?;
            println!("\nSession cancelled.");
            return Ok(());
        }

        println!("Photo {}/{}", controller.photos_taken() + 1, count);
        let capture = controller
            .request_capture(|n| {
                print!("  {}... ", n);
                let _ = std::io::stdout().flush();
            })
            .await;

        match capture {
            Ok(_) => println!("captured"),
            Err(e) => {
                controller.release_camera();
                eprintln!("\n{}", e);
                return Err(e.into());
            }
        }
    }

    session.begin_processing()?;
    // Leaving the camera screen releases the stream before compositing
    controller.release_camera();
    let photos = controller.take_photos();

    println!("Composing strip...");
    let composer = Composer::new(render_options(&options, &config));

    let strip = match composer.compose(&photos, template).await {
        Ok(strip) => strip,
        Err(e) => {
            // Route back to capture; the photo list is already spent
            session.fail_processing()?;
            eprintln!("Composition failed: {}", e);
            return Err(e.into());
        }
    };
    session.finish_processing()?;

    let dir = storage::strips_dir(
        options
            .output
            .as_deref()
            .or(config.output_dir.as_deref()),
    );

    if options.share {
        let (path, outcome) = export::share(&strip, &dir).await?;
        println!("Strip saved: {}", path.display());
        match outcome {
            export::ShareOutcome::Opened => println!("Handed to the system handler."),
            export::ShareOutcome::OpenedFolder => println!("Opened the strip folder."),
            export::ShareOutcome::SavedOnly => {}
        }
    } else {
        match export::download(&strip, &dir, options.dialog).await {
            Ok(path) => println!("Strip saved: {}", path.display()),
            Err(photobooth::errors::ExportError::Cancelled) => {
                // Silent per the export contract; just finish the session
            }
            Err(e) => {
                eprintln!("{}", e);
                return Err(e.into());
            }
        }
    }

    session.cancel()?;
    Ok(())
}

fn render_options(options: &BoothOptions, config: &Config) -> RenderOptions {
    let mut render = RenderOptions::default();
    if let Some(title) = &options.title {
        render.title = title.clone();
    }
    if let Some(caption) = &options.caption {
        render.caption = caption.clone();
    }
    render.confetti = options.confetti || config.confetti;
    render.vignette = options.vignette || config.vignette;
    render
}

/// Compose a strip from image files on disk
pub fn compose_from_files(
    files: Vec<PathBuf>,
    options: BoothOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load();
    let template = options.template.unwrap_or(config.default_template);

    let mut photos = Vec::with_capacity(files.len());
    for (index, path) in files.iter().enumerate() {
        let data = std::fs::read(path)
            .map_err(|e| format!("Cannot read {}: {}", path.display(), e))?;
        let (width, height) = image::image_dimensions(path).unwrap_or((0, 0));
        photos.push(CapturedPhoto {
            index,
            data,
            width,
            height,
        });
    }

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let composer = Composer::new(render_options(&options, &config));
        let strip = composer.compose(&photos, template).await?;

        let dir = storage::strips_dir(
            options
                .output
                .as_deref()
                .or(config.output_dir.as_deref()),
        );
        let path = export::download(&strip, &dir, options.dialog).await?;
        println!("Strip saved: {}", path.display());
        Ok::<_, Box<dyn std::error::Error>>(())
    })
}

/// Open the strips folder in the file manager
pub fn open_gallery() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load();
    let dir = storage::strips_dir(config.output_dir.as_deref());
    std::fs::create_dir_all(&dir)?;
    open::that_detached(&dir)?;
    println!("Opened {}", dir.display());
    Ok(())
}
