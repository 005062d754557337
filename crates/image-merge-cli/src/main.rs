mod logger;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use image_merge::{
    Color, Direction, FontOrigin, LabelFont, MergeError, MergeOptions, SourceLoader,
    is_supported_path, merge_files_async, probe_text_metrics, resolve_font, save_canvas_async,
};
use logger::CliLogger;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "imgm", about = "Merge labeled images and PDF pages into one grid", version)]
struct Cli {
    /// More log output (repeat for debug/trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge images and PDF pages into one labeled grid
    Merge {
        /// Input images or PDFs, merged in the given order
        #[arg(short, long, required = true, num_args = 1..)]
        input: Vec<PathBuf>,

        /// Output image (.png, .jpg or .jpeg; anything else gets .png)
        #[arg(short, long)]
        output: PathBuf,

        /// JSON options file, flags below override it
        #[arg(long)]
        config: Option<PathBuf>,

        #[command(flatten)]
        overrides: OptionOverrides,
    },

    /// Show what would be loaded from the inputs
    Inspect {
        /// Input images or PDFs
        #[arg(short, long, required = true, num_args = 1..)]
        input: Vec<PathBuf>,

        /// PDF render resolution
        #[arg(long, default_value = "150")]
        dpi: f32,
    },

    /// Write the default options as JSON
    Config {
        /// Output JSON file
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(Args)]
struct OptionOverrides {
    /// Pixels between blocks and rows
    #[arg(long)]
    spacing: Option<u32>,

    /// Height of the label bar in pixels
    #[arg(long)]
    label_height: Option<u32>,

    /// Blocks per row
    #[arg(long)]
    columns: Option<usize>,

    /// Longest image side in pixels, 0 keeps original sizes
    #[arg(long)]
    max_size: Option<u32>,

    /// Stacking direction (recorded only, the grid always fills row by row)
    #[arg(long, value_enum)]
    direction: Option<DirectionArg>,

    /// Canvas and label background, #RRGGBB or #RRGGBBAA
    #[arg(long)]
    background: Option<Color>,

    /// Label text color, #RRGGBB or #RRGGBBAA
    #[arg(long)]
    text_color: Option<Color>,

    /// Don't outline each block
    #[arg(long)]
    no_outline: bool,

    /// Estimate label widths instead of measuring glyphs
    #[arg(long)]
    estimate_text: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum DirectionArg {
    Vertical,
    Horizontal,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Vertical => Self::Vertical,
            DirectionArg::Horizontal => Self::Horizontal,
        }
    }
}

impl OptionOverrides {
    fn apply(self, options: &mut MergeOptions) {
        if let Some(spacing) = self.spacing {
            options.spacing = spacing;
        }
        if let Some(label_height) = self.label_height {
            options.label_height = label_height;
        }
        if let Some(columns) = self.columns {
            options.columns_per_row = columns;
        }
        if let Some(max_size) = self.max_size {
            options.max_image_size = max_size;
        }
        if let Some(direction) = self.direction {
            options.direction = direction.into();
        }
        if let Some(background) = self.background {
            options.background_color = background;
        }
        if let Some(text_color) = self.text_color {
            options.text_color = text_color;
        }
        if self.no_outline {
            options.draw_outline = false;
        }
        if self.estimate_text {
            options.use_text_width_estimate = true;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    CliLogger::from_verbosity(cli.verbose, cli.quiet)
        .init()
        .context("Failed to initialize logging")?;

    match cli.command {
        Commands::Merge {
            input,
            output,
            config,
            overrides,
        } => {
            let mut options = match config {
                Some(path) => MergeOptions::load(&path)
                    .await
                    .with_context(|| format!("Failed to load {}", path.display()))?,
                None => MergeOptions::default(),
            };
            overrides.apply(&mut options);
            options.validate()?;

            let (input, rejected) = split_supported(input);
            for path in &rejected {
                log::warn!("Ignoring {}: not a supported image or PDF", path.display());
                eprintln!("Ignoring unsupported input {}", path.display());
            }
            if input.is_empty() {
                anyhow::bail!("No supported inputs to merge (images or PDFs)");
            }

            // Decide once whether glyph metrics work on this machine
            if !options.use_text_width_estimate {
                let font = resolve_font(
                    options.font_size,
                    options.bold,
                    &options.font_candidates,
                    &stem_sample(&input),
                )?;
                if !probe_text_metrics(&font) {
                    log::warn!("Text metrics unavailable, estimating label widths");
                    options.use_text_width_estimate = true;
                }
            }

            let background = options.background_color.into();
            let outcome = match merge_files_async(input, options).await {
                Ok(outcome) => outcome,
                Err(e) => return Err(with_hint(e)),
            };

            for skipped in &outcome.skipped {
                eprintln!("Skipped {}: {}", skipped.path.display(), skipped.error);
            }

            let written = save_canvas_async(outcome.canvas, &output, background).await?;
            println!(
                "Merged {} block(s) → {}",
                outcome.block_count,
                written.display()
            );
        }

        Commands::Inspect { input, dpi } => {
            let loader = SourceLoader::new(dpi);
            if !loader.pdf_available() {
                println!("PDF support: unavailable (pdfium not found)");
            }
            let report = loader.load(&input);

            println!("Loaded {} item(s):", report.items.len());
            for item in &report.items {
                println!("  {} ({}x{})", item.label, item.width(), item.height());
            }
            if !report.skipped.is_empty() {
                println!("Skipped {} input(s):", report.skipped.len());
                for skipped in &report.skipped {
                    println!("  {}: {}", skipped.path.display(), skipped.error);
                }
            }

            let labels: String = report.items.iter().map(|item| item.label.as_str()).collect();
            let font = resolve_font(
                image_merge::constants::DEFAULT_FONT_SIZE,
                true,
                &[],
                &labels,
            )?;
            println!("Label font: {}", describe_font(&font));
        }

        Commands::Config { output } => {
            MergeOptions::default().save(&output).await?;
            println!("Wrote default options → {}", output.display());
        }
    }

    Ok(())
}

fn with_hint(err: MergeError) -> anyhow::Error {
    match err.hint() {
        Some(hint) => anyhow::anyhow!("{}. {}", err, hint),
        None => err.into(),
    }
}

fn describe_font(font: &LabelFont) -> String {
    let name = match font.origin() {
        FontOrigin::File(source) => source.path.display().to_string(),
        FontOrigin::Embedded => "embedded DejaVu Sans Bold".to_string(),
    };
    if probe_text_metrics(font) {
        name
    } else {
        format!("{} (metrics unavailable, widths estimated)", name)
    }
}

/// Split inputs into (supported, rejected), keeping the given order
fn split_supported(inputs: Vec<PathBuf>) -> (Vec<PathBuf>, Vec<PathBuf>) {
    inputs.into_iter().partition(|path| is_supported_path(path))
}

/// File stems of the inputs, used to pick a font that can draw the labels
fn stem_sample(inputs: &[PathBuf]) -> String {
    inputs
        .iter()
        .filter_map(|path| path.file_stem())
        .map(|stem| stem.to_string_lossy())
        .collect()
}
