use bingo_sheets::compose::PageLayout;
use bingo_sheets::config::{self, SheetConfig};
use bingo_sheets::document::{DocumentWriter, PdfWriter};
use bingo_sheets::generate::generate_sheets;
use bingo_sheets::load::{LoadSettings, load_images};
use bingo_sheets::output;
use clap::Parser;
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "bingo-sheets")]
#[command(version)]
#[command(about = "Generate printable bingo sheets from a folder of images")]
#[command(long_about = "\
Generate printable bingo sheets from a folder of images

Every image in IMAGE_FOLDER (.jpg, .jpeg, .png, .gif, .bmp) is one bingo
item. Each page of OUTPUT is a freshly shuffled grid of those items. Files
that fail to decode are skipped with a warning.

Layout (grid size, page size, margins, image quality) comes from an optional
TOML file; run 'bingo-sheets --print-config' for a documented template.

Set RUST_LOG=info for pipeline details.")]
struct Cli {
    /// Folder with one image per bingo item
    #[arg(required_unless_present = "print_config")]
    image_folder: Option<PathBuf>,

    /// Number of pages to generate
    #[arg(
        required_unless_present = "print_config",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    num_pages: Option<u32>,

    /// Output PDF path
    #[arg(required_unless_present = "print_config")]
    output: Option<PathBuf>,

    /// Stamp a white, black-bordered square in the bottom-right corner of every image
    #[arg(long)]
    overlay: bool,

    /// Layout config file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed the shuffle for reproducible sheets
    #[arg(long)]
    seed: Option<u64>,

    /// Also write a JSON summary of every page's cells to this path
    #[arg(long)]
    layout: Option<PathBuf>,

    /// Print a documented config.toml with all defaults and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if cli.print_config {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }
    let (Some(folder), Some(num_pages), Some(output_path)) =
        (cli.image_folder, cli.num_pages, cli.output)
    else {
        return Err("IMAGE_FOLDER, NUM_PAGES and OUTPUT are required".into());
    };

    let sheet_config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => SheetConfig::default(),
    };
    init_thread_pool(&sheet_config.processing);

    println!("==> Loading images from {}", folder.display());
    let settings = LoadSettings::from_config(&sheet_config, cli.overlay);
    let (tx, rx) = std::sync::mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            if let Some(line) = output::format_load_event(&event) {
                println!("{}", line);
            }
        }
    });
    let loaded = load_images(&folder, &settings, Some(tx));
    let _ = printer.join();
    let images = loaded?;
    println!("Loaded {} images", images.len());

    let num_pages = num_pages as usize;
    println!("==> Generating {} pages", num_pages);
    let layout = PageLayout::from_config(&sheet_config);
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut writer = PdfWriter::new(sheet_config.page.width_mm, sheet_config.page.height_mm);

    let (tx, rx) = std::sync::mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            println!("{}", output::format_page_event(&event));
        }
    });
    let generated = generate_sheets(
        &images,
        &layout,
        num_pages,
        &mut rng,
        &mut writer,
        Some(tx),
    );
    let _ = printer.join();
    let summary = generated?;

    writer.finalize(&output_path)?;
    if let Some(layout_path) = &cli.layout {
        write_layout(layout_path, &summary)?;
    }
    println!("{}", output::format_done(&summary, &output_path));
    Ok(())
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores; the config can only lower it.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    info!("Loading with {} worker threads", threads);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}

fn write_layout(
    path: &Path,
    summary: &bingo_sheets::generate::SheetSummary,
) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(summary)?;
    std::fs::write(path, json)?;
    info!("Wrote layout summary to {}", path.display());
    Ok(())
}
