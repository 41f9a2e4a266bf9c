use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use photo_sheet::{FitMode, ImageQueue, SheetOptions, UploadedImage};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "psheet", about = "Compose portrait photos into printable A4 sheets", version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export one PNG per sheet
    Sheets {
        #[command(flatten)]
        input: InputArgs,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Only export the sheet with this number (1-based)
        #[arg(long)]
        sheet: Option<usize>,
    },

    /// Export every sheet into a single zip archive
    Archive {
        #[command(flatten)]
        input: InputArgs,

        /// Output zip file (default: <brand>-sheets.zip)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export every sheet as a page of one print-ready PDF
    Print {
        #[command(flatten)]
        input: InputArgs,

        /// Output PDF file (default: <brand>-sheets.pdf)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show statistics only, don't export anything
    Stats {
        #[command(flatten)]
        input: InputArgs,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Input image file(s) or directories - can specify multiple
    #[arg(short, long, required = true, num_args = 1..)]
    input: Vec<PathBuf>,

    /// Brand prefix for exported file names
    #[arg(long)]
    brand: Option<String>,

    /// Initial fit mode for every image
    #[arg(long, default_value = "cover", value_enum)]
    fit: FitArg,

    /// Raster oversampling over 96 DPI
    #[arg(long)]
    oversampling: Option<f32>,

    /// JSON configuration file with sheet options
    #[arg(long)]
    config: Option<PathBuf>,

    /// Leave out the record line and sheet reference
    #[arg(long)]
    no_header: bool,

    /// Leave out the brand wordmark
    #[arg(long)]
    no_wordmark: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum FitArg {
    Cover,
    Contain,
}

impl From<FitArg> for FitMode {
    fn from(arg: FitArg) -> Self {
        match arg {
            FitArg::Cover => Self::Cover,
            FitArg::Contain => Self::Contain,
        }
    }
}

/// Expand directories and keep only files with an image extension.
///
/// Finding no image is not an error; the commands then have nothing to do.
async fn collect_image_paths(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for input in inputs {
        if tokio::fs::metadata(input)
            .await
            .with_context(|| format!("Cannot access {}", input.display()))?
            .is_dir()
        {
            let mut entries = tokio::fs::read_dir(input).await?;
            let mut dir_paths = Vec::new();
            while let Some(entry) = entries.next_entry().await? {
                dir_paths.push(entry.path());
            }
            dir_paths.sort();
            paths.extend(
                dir_paths
                    .into_iter()
                    .filter(|p| photo_sheet::is_supported_image(p)),
            );
        } else if photo_sheet::is_supported_image(input) {
            paths.push(input.clone());
        } else {
            log::warn!("Skipping {}: not an image file", input.display());
        }
    }

    if paths.is_empty() {
        log::warn!("No image files found in the given inputs");
    }
    Ok(paths)
}

async fn build_options(args: &InputArgs) -> Result<SheetOptions> {
    let mut options = match &args.config {
        Some(path) => SheetOptions::load(path)
            .await
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => SheetOptions::default(),
    };

    if let Some(brand) = &args.brand {
        options.brand = brand.clone();
    }
    if let Some(oversampling) = args.oversampling {
        options.oversampling = oversampling;
    }
    if args.no_header {
        options.draw_header = false;
    }
    if args.no_wordmark {
        options.draw_wordmark = false;
    }
    options.validate()?;
    Ok(options)
}

async fn load_queue(args: &InputArgs) -> Result<ImageQueue> {
    let paths = collect_image_paths(&args.input).await?;
    let images = photo_sheet::load_images(&paths).await?;

    let fit_mode = FitMode::from(args.fit);
    let mut queue = ImageQueue::new();
    queue.append(images.into_iter().map(|mut image: UploadedImage| {
        image.adjustment.fit_mode = fit_mode;
        (image, ())
    }));

    for image in queue.images().filter(|img| !img.has_dimensions()) {
        println!("Warning: {} could not be read and stays blank", image.name);
    }
    Ok(queue)
}

fn print_statistics(queue: &ImageQueue) {
    let stats = photo_sheet::calculate_statistics(&queue.snapshot());
    println!("Sheet Statistics:");
    println!("  Images: {}", stats.images);
    println!("  Sheets: {}", stats.sheets);
    println!("  Filled slots: {}", stats.filled_slots);
    println!("  Empty slots: {}", stats.empty_slots);
    if stats.unsized_images > 0 {
        println!("  Unreadable images: {}", stats.unsized_images);
    }
}

fn output_or_default(output: Option<PathBuf>, default_name: String) -> PathBuf {
    output.unwrap_or_else(|| Path::new(".").join(default_name))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Commands::Sheets {
            input,
            output_dir,
            sheet,
        } => {
            let options = build_options(&input).await?;
            let queue = load_queue(&input).await?;
            print_statistics(&queue);

            let sheets: Vec<_> = queue
                .sheets()
                .into_iter()
                .filter(|s| sheet.is_none_or(|wanted| s.id == wanted))
                .collect();
            if sheets.is_empty() {
                match sheet {
                    Some(wanted) => bail!("No sheet matches the selection: {}", wanted),
                    None => {
                        println!("Nothing to export");
                        return Ok(());
                    }
                }
            }

            tokio::fs::create_dir_all(&output_dir).await?;
            for sheet in &sheets {
                let path = output_dir.join(options.sheet_file_name(sheet.id));
                photo_sheet::export_sheet(sheet, &options, &path).await?;
                println!("Sheet {} → {}", sheet.id, path.display());
            }
        }

        Commands::Archive { input, output } => {
            let options = build_options(&input).await?;
            let queue = load_queue(&input).await?;
            print_statistics(&queue);

            let output = output_or_default(output, options.archive_file_name());
            match photo_sheet::export_archive(&queue.sheets(), &options, &output).await? {
                Some(path) => println!("Archive → {}", path.display()),
                None => println!("Nothing to export"),
            }
        }

        Commands::Print { input, output } => {
            let options = build_options(&input).await?;
            let queue = load_queue(&input).await?;
            print_statistics(&queue);

            let output = output_or_default(output, options.print_file_name());
            match photo_sheet::export_print(&queue.sheets(), &options, &output).await? {
                Some(path) => println!("Print document → {}", path.display()),
                None => println!("Nothing to export"),
            }
        }

        Commands::Stats { input } => {
            let queue = load_queue(&input).await?;
            print_statistics(&queue);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_empty_directory_collects_nothing() {
        let dir = TempDir::new().unwrap();
        let paths = collect_image_paths(&[dir.path().to_path_buf()]).await.unwrap();
        assert!(paths.is_empty());
    }

    #[tokio::test]
    async fn test_non_images_are_skipped() {
        let dir = TempDir::new().unwrap();
        let notes = dir.path().join("notes.txt");
        std::fs::write(&notes, b"not a photo").unwrap();
        std::fs::write(dir.path().join("b.png"), b"").unwrap();
        std::fs::write(dir.path().join("a.jpg"), b"").unwrap();

        let paths = collect_image_paths(&[dir.path().to_path_buf(), notes])
            .await
            .unwrap();
        assert_eq!(
            paths,
            vec![dir.path().join("a.jpg"), dir.path().join("b.png")]
        );
    }

    #[tokio::test]
    async fn test_missing_input_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");
        assert!(collect_image_paths(&[missing]).await.is_err());
    }

    #[tokio::test]
    async fn test_no_images_means_empty_queue() {
        let dir = TempDir::new().unwrap();
        let args = InputArgs {
            input: vec![dir.path().to_path_buf()],
            config: None,
            brand: None,
            oversampling: None,
            fit: FitArg::Cover,
            no_header: false,
            no_wordmark: false,
        };
        let queue = load_queue(&args).await.unwrap();
        assert!(queue.sheets().is_empty());

        let options = SheetOptions::default();
        let output = dir.path().join("out.zip");
        let exported = photo_sheet::export_archive(&queue.sheets(), &options, &output)
            .await
            .unwrap();
        assert!(exported.is_none());
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_text_flags_turn_labels_off() {
        let args = InputArgs {
            input: Vec::new(),
            config: None,
            brand: None,
            oversampling: None,
            fit: FitArg::Cover,
            no_header: true,
            no_wordmark: false,
        };
        let options = build_options(&args).await.unwrap();
        assert!(!options.draw_header);
        assert!(options.draw_wordmark);
    }
}
