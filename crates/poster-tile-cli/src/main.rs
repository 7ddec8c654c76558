use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ptile", about = "Split an image into a printable multi-page poster", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tile an image across A4 sheets and write one PDF
    Split {
        /// Input image (PNG, JPEG, ...)
        #[arg(short, long)]
        input: PathBuf,

        /// Output PDF file (defaults to output_<orientation>.pdf in --output-dir)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Directory for the default output file
        #[arg(long, default_value = "outputs")]
        output_dir: PathBuf,

        /// Sheets across; the number of rows follows from the image shape
        #[arg(long, default_value = "2")]
        cols: u32,

        /// Sheet orientation
        #[arg(long, default_value = "landscape", value_enum)]
        orientation: OrientationArg,

        /// Keep a white border around every tile
        #[arg(long)]
        borders: bool,

        /// Read cols, orientation and borders from a JSON layout file
        #[arg(long, conflicts_with_all = ["cols", "orientation", "borders"])]
        config: Option<PathBuf>,

        /// Write the layout used to a JSON file
        #[arg(long)]
        save_config: Option<PathBuf>,

        /// Stage tiles as tile_<row>_<col>.jpg in this directory while building
        #[arg(long)]
        tile_dir: Option<PathBuf>,

        /// Show statistics only, don't generate PDF
        #[arg(long)]
        stats_only: bool,
    },

    /// Empty the working directories, including tiles left by a failed run
    Reset {
        /// Directories to empty and recreate
        #[arg(num_args = 1.., default_values = ["uploads", "outputs"])]
        dirs: Vec<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OrientationArg {
    Landscape,
    Portrait,
}

impl From<OrientationArg> for poster_tile::Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Landscape => Self::Landscape,
            OrientationArg::Portrait => Self::Portrait,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Split {
            input,
            output,
            output_dir,
            cols,
            orientation,
            borders,
            config,
            save_config,
            tile_dir,
            stats_only,
        } => {
            let spec = match config {
                Some(path) => poster_tile::LayoutSpec::load(&path)
                    .await
                    .with_context(|| format!("loading layout from {}", path.display()))?,
                None => poster_tile::LayoutSpec::new(cols, orientation.into(), borders),
            };
            spec.validate()?;

            if let Some(path) = &save_config {
                spec.save(path).await?;
                log::info!("Saved layout to {}", path.display());
            }

            let image = poster_tile::load_image(&input)
                .await
                .with_context(|| format!("reading {}", input.display()))?;

            // Calculate and show statistics
            let stats = poster_tile::calculate_statistics(image.width(), image.height(), &spec)?;
            println!("Poster Statistics:");
            println!("  Source image: {}x{} px", stats.image_width, stats.image_height);
            println!("  Grid: {} rows x {} cols", stats.rows, stats.cols);
            println!("  Tile size: {}x{} px", stats.cell_width, stats.cell_height);
            if stats.remainder_width > 0 || stats.remainder_height > 0 {
                println!(
                    "  Edge remainder: {} px right, {} px bottom",
                    stats.remainder_width, stats.remainder_height
                );
            }
            println!("  Pages: {}", stats.page_count);
            println!(
                "  Page: {}x{} px on {}x{} mm",
                stats.page_format.width_px,
                stats.page_format.height_px,
                stats.page_format.width_mm,
                stats.page_format.height_mm
            );
            println!(
                "  Poster size: {} x {} mm",
                stats.poster_width_mm, stats.poster_height_mm
            );

            if stats_only {
                return Ok(());
            }

            let context = match tile_dir {
                Some(dir) => poster_tile::AssemblyContext::with_tile_dir(dir),
                None => poster_tile::AssemblyContext::default(),
            };

            let poster = poster_tile::assemble(&image, &spec, &context).await?;
            for failure in &poster.cleanup.failed {
                eprintln!(
                    "warning: could not remove {}: {}",
                    failure.path.display(),
                    failure.error
                );
            }

            let output = match output {
                Some(path) => path,
                None => {
                    tokio::fs::create_dir_all(&output_dir).await?;
                    poster_tile::output_path(&output_dir, spec.orientation)
                }
            };
            poster_tile::save_pdf(&poster, &output).await?;
            println!(
                "Generated {} pages → {}",
                poster.page_count(),
                output.display()
            );
        }

        Commands::Reset { dirs } => {
            let report = poster_tile::reset_workspace(&dirs).await?;
            println!("Removed {} files", report.removed.len());
            for failure in &report.failed {
                eprintln!(
                    "warning: skipped {}: {}",
                    failure.path.display(),
                    failure.error
                );
            }
        }
    }

    Ok(())
}
