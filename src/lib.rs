//! Labelscope: statistics, consistency checks and box overlays for
//! YOLO-style object detection datasets.
//!
//! A dataset is a root directory holding a `data.yaml` class manifest and
//! `train/`, `valid/` and `test/` splits, each with `images/` and `labels/`.
//! Every label file lists one normalized bounding box per line.
//!
//! # Modules
//!
//! - [`dataset`]: Dataset layout, file inventory and class manifest
//! - [`label`]: Label file parsing into [`label::Detection`] values
//! - [`stats`]: Per-class, per-split counts and totals
//! - [`validation`]: Images without labels and labels without images
//! - [`render`]: Pixel-space placement and box overlays
//! - [`error`]: Error types for labelscope operations

pub mod dataset;
pub mod error;
pub mod label;
pub mod render;
pub mod stats;
pub mod validation;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::info;
use serde::Serialize;

use dataset::{
    locate_image, normalize_extension, read_class_manifest, ClassList, DatasetLayout,
    InventoryOptions,
};
pub use error::LabelscopeError;

/// The labelscope CLI application.
#[derive(Parser)]
#[command(name = "labelscope")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Print image and per-class annotation counts for every split.
    Stats(DatasetArgs),
    /// Check that every image has a label file and vice versa.
    Validate(ValidateArgs),
    /// Print statistics, then validate the dataset.
    Inspect(DatasetArgs),
    /// Draw the bounding boxes of one image.
    Render(RenderArgs),
}

/// Arguments shared by the dataset subcommands.
#[derive(clap::Args)]
struct DatasetArgs {
    /// Dataset root containing data.yaml and train/, valid/, test/.
    root: PathBuf,

    /// Image file extension.
    #[arg(long, env = "LABELSCOPE_IMAGE_EXT", default_value = ".jpg")]
    image_ext: String,

    /// Label file extension.
    #[arg(long, env = "LABELSCOPE_LABEL_EXT", default_value = ".txt")]
    label_ext: String,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

impl DatasetArgs {
    fn inventory(&self) -> InventoryOptions {
        InventoryOptions::new(&self.image_ext, &self.label_ext)
    }
}

/// Arguments for the validate subcommand.
#[derive(clap::Args)]
struct ValidateArgs {
    #[command(flatten)]
    dataset: DatasetArgs,

    /// Exit non-zero if any image or label is unmatched.
    #[arg(long)]
    strict: bool,
}

/// Arguments for the render subcommand.
#[derive(clap::Args)]
struct RenderArgs {
    /// Image to annotate.
    image: PathBuf,

    /// Label file (default: derived from <root>/<split>/images/<image>).
    #[arg(long)]
    labels: Option<PathBuf>,

    /// Class manifest (default: <root>/data.yaml).
    #[arg(long, conflicts_with = "classes")]
    data: Option<PathBuf>,

    /// Comma-separated class names, used instead of a manifest.
    #[arg(long, value_delimiter = ',')]
    classes: Option<Vec<String>>,

    /// Where to write the annotated image; the extension picks the format.
    #[arg(short, long, default_value = "result.jpg")]
    output: PathBuf,

    /// Do not draw class names.
    #[arg(long)]
    no_text: bool,

    /// Box outline width in pixels.
    #[arg(long, default_value_t = 1)]
    line_width: u32,

    /// Label file extension, used when deriving the label path.
    #[arg(long, env = "LABELSCOPE_LABEL_EXT", default_value = ".txt")]
    label_ext: String,
}

/// Run the labelscope CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), LabelscopeError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Stats(args)) => run_stats(args),
        Some(Commands::Validate(args)) => run_validate(args),
        Some(Commands::Inspect(args)) => run_inspect(args),
        Some(Commands::Render(args)) => run_render(args),
        None => {
            // No subcommand: print a short hint and exit successfully
            println!("labelscope {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Statistics, consistency checks and box overlays for detection datasets.");
            println!();
            println!("Run 'labelscope --help' for usage information.");
            Ok(())
        }
    }
}

/// Execute the stats subcommand.
fn run_stats(args: DatasetArgs) -> Result<(), LabelscopeError> {
    check_output_format(&args.output)?;
    let layout = DatasetLayout::new(&args.root);

    // The manifest is checked before any split is read.
    let classes = read_class_manifest(&layout.manifest_path())?;
    let opts = stats::StatsOptions {
        inventory: args.inventory(),
        ..Default::default()
    };
    let report = stats::stats_dataset(&layout, &classes, &opts)?;

    emit(&report, &args.output)
}

/// Execute the validate subcommand.
fn run_validate(args: ValidateArgs) -> Result<(), LabelscopeError> {
    check_output_format(&args.dataset.output)?;
    let layout = DatasetLayout::new(&args.dataset.root);
    let opts = validation::ValidateOptions {
        inventory: args.dataset.inventory(),
        strict: args.strict,
    };

    let validation = validation::validate_dataset(&layout, &opts)?;
    emit(&validation, &args.dataset.output)?;

    if opts.strict && !validation.is_clean() {
        return Err(LabelscopeError::ValidationFailed {
            images_without_label: validation.images_without_label(),
            labels_without_image: validation.labels_without_image(),
        });
    }
    Ok(())
}

/// Execute the inspect subcommand: stats first, then validation.
fn run_inspect(args: DatasetArgs) -> Result<(), LabelscopeError> {
    check_output_format(&args.output)?;
    let layout = DatasetLayout::new(&args.root);
    let classes = read_class_manifest(&layout.manifest_path())?;
    let inventory = args.inventory();

    let stats_opts = stats::StatsOptions {
        inventory: inventory.clone(),
        ..Default::default()
    };
    let report = stats::stats_dataset(&layout, &classes, &stats_opts)?;

    let validate_opts = validation::ValidateOptions {
        inventory,
        strict: false,
    };
    let validation = validation::validate_dataset(&layout, &validate_opts)?;

    match args.output.as_str() {
        "json" => {
            let combined = serde_json::json!({
                "stats": report,
                "validation": validation,
            });
            println!("{}", serde_json::to_string_pretty(&combined)?);
        }
        _ => {
            print!("{}", report);
            println!();
            print!("{}", validation);
            println!();
            println!("Completed!");
        }
    }
    Ok(())
}

/// Execute the render subcommand.
fn run_render(args: RenderArgs) -> Result<(), LabelscopeError> {
    let label_ext = normalize_extension(&args.label_ext);

    let label_path = match &args.labels {
        Some(path) => path.clone(),
        None => locate_image(&args.image, &label_ext)?.label_path,
    };

    let classes = match (&args.classes, &args.data) {
        (Some(names), _) => ClassList::new(names.iter().map(|name| name.trim())),
        (None, Some(manifest)) => read_class_manifest(manifest)?,
        (None, None) => {
            let location = locate_image(&args.image, &label_ext)?;
            read_class_manifest(&location.manifest_path())?
        }
    };
    info!("{} class(es), labels from {}", classes.len(), label_path.display());

    let opts = render::RenderOptions {
        draw_labels: !args.no_text,
        line_width: args.line_width,
    };
    let drawn = render::annotate_image(&args.image, &label_path, &classes, &args.output, &opts)?;

    println!(
        "Annotation marked: {} box(es) written to {}",
        drawn,
        args.output.display()
    );
    Ok(())
}

fn check_output_format(output: &str) -> Result<(), LabelscopeError> {
    match output {
        "text" | "json" => Ok(()),
        other => Err(LabelscopeError::UnsupportedOutput(format!(
            "'{}' (supported: text, json)",
            other
        ))),
    }
}

/// Print a report as text or pretty JSON.
fn emit<R: Serialize + std::fmt::Display>(report: &R, output: &str) -> Result<(), LabelscopeError> {
    match output {
        "json" => println!("{}", serde_json::to_string_pretty(report)?),
        _ => print!("{}", report),
    }
    Ok(())
}
