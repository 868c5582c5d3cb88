use clap::Parser;
use folio::{FixedMetrics, FolioError, LayoutConfig, RecordingCanvas};
use std::env;
use std::path::PathBuf;

/// Paginates a JSON document and prints where everything landed.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the document JSON
    document: PathBuf,

    /// Layout configuration JSON
    #[arg(long)]
    config: Option<PathBuf>,

    /// Page limit per section, overriding the configuration
    #[arg(long)]
    max_pages: Option<usize>,

    /// Print the draw commands as JSON instead of a page summary
    #[arg(long, default_value_t = false)]
    commands: bool,
}

fn main() -> Result<(), FolioError> {
    if env::var("RUST_LOG").is_err() {
        unsafe {
            env::set_var("RUST_LOG", "folio=info");
        }
    }
    env_logger::init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => folio::load_config(path)?,
        None => LayoutConfig::default(),
    };
    if let Some(max_pages) = args.max_pages {
        config.max_pages = max_pages;
    }

    let document = folio::load_document(&args.document)?;
    let measurer = FixedMetrics::default();
    let sections = folio::paginate_document(&document, &config, &measurer)?;

    if args.commands {
        let mut canvas = RecordingCanvas::new();
        folio::render_document(&sections, &mut canvas)?;
        println!("{}", serde_json::to_string_pretty(&canvas.commands)?);
        return Ok(());
    }

    for section in &sections {
        println!("Section {}", section.number);
        for page in &section.pages {
            let placed = page.records.iter().filter(|r| !r.is_empty()).count();
            println!(
                "  page {:>4}: {:>3} records, {:>7.1}pt used",
                page.number,
                placed,
                folio_layout::render_record::total_height(&page.records)
            );
        }
    }
    Ok(())
}
