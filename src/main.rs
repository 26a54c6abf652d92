use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod geometry;
mod numbering;
mod placement;
mod render;
mod rows;

use config::DefaultLayout;
use placement::{LabelMode, LabelPlacement, PageGeometry};

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "pdf-linenums")]
#[command(about = "Overlay line numbers on PDF pages from a row file", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write an annotated copy of the PDF.
    ///
    /// Without ROWS, `linenums_<name>.csv` beside the PDF is used; if it does
    /// not exist yet it is generated and labels show their y-coordinates.
    Annotate {
        pdf: PathBuf,

        rows: Option<PathBuf>,

        /// Label each position with its y-coordinate instead of a line number.
        #[arg(long)]
        mark_position: bool,

        #[arg(short = 'o', long)]
        out: Option<PathBuf>,

        #[command(flatten)]
        layout: DefaultLayout,
    },

    /// Only write the default row file for a PDF.
    Generate {
        pdf: PathBuf,

        rows: Option<PathBuf>,

        #[command(flatten)]
        layout: DefaultLayout,
    },

    /// Print the computed label placements as JSON.
    Plan {
        pdf: PathBuf,

        rows: PathBuf,

        #[arg(long)]
        mark_position: bool,

        #[arg(short = 'o', long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("{}=info", env!("CARGO_CRATE_NAME")))),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.cmd {
        Commands::Annotate {
            pdf,
            rows,
            mark_position,
            out,
            layout,
        } => {
            let out = out.unwrap_or_else(|| config::default_output_path(&pdf));
            annotate(&pdf, rows.as_deref(), mark_position, &out, &layout)?;
            println!("Wrote {}", out.display());
        }
        Commands::Generate { pdf, rows, layout } => {
            config::check_input(&pdf, "pdf", "first")?;
            let rows = rows.unwrap_or_else(|| config::default_rows_path(&pdf));
            let doc = render::load_pdf(&pdf)?;
            let pages = render::page_geometry(&doc)?;
            if rows::generate_rows_file(&pages, &rows, &layout)? {
                println!("Wrote {}", rows.display());
            } else {
                warn!(path = %rows.display(), "row file already exists; left untouched");
            }
        }
        Commands::Plan {
            pdf,
            rows,
            mark_position,
            out,
        } => {
            let (pages, placements) = plan(&pdf, &rows, label_mode(mark_position))?;
            let json = render::render_placements(&pages, &placements)?;
            match out {
                Some(out) => {
                    std::fs::write(&out, json)?;
                    println!("Wrote {}", out.display());
                }
                None => println!("{}", json),
            }
        }
    }

    Ok(())
}

fn label_mode(mark_position: bool) -> LabelMode {
    if mark_position {
        LabelMode::MarkPosition
    } else {
        LabelMode::Numbers
    }
}

/// Annotate `pdf` into `out`. Nothing is written unless every row is valid.
fn annotate(
    pdf: &Path,
    rows: Option<&Path>,
    mark_position: bool,
    out: &Path,
    layout: &DefaultLayout,
) -> Result<()> {
    // 1) Inputs + page geometry.
    config::check_input(pdf, "pdf", "first")?;
    let mut doc = render::load_pdf(pdf)?;
    let pages = render::page_geometry(&doc)?;

    // 2) Row file: explicit, or the default one beside the PDF.
    let (rows_path, generated) = match rows {
        Some(path) => {
            config::check_input(path, "csv", "second")?;
            (path.to_path_buf(), false)
        }
        None => {
            let path = config::default_rows_path(pdf);
            let generated = rows::generate_rows_file(&pages, &path, layout)?;
            if generated {
                info!(path = %path.display(), pages = pages.len(), "generated default row file");
            } else {
                warn!(path = %path.display(), "reusing existing row file");
            }
            (path, generated)
        }
    };

    // A freshly generated row file is a calibration pass.
    let mode = label_mode(mark_position || generated);

    // 3) Placements.
    let rows = rows::parse_rows_file(&rows_path)?;
    info!(rows = rows.len(), path = %rows_path.display(), "loaded row file");
    let placements = placement::plan_placements(&rows, &pages, mode)?;

    // 4) Write once.
    render::add_annotations(&mut doc, &placements)?;
    render::save_pdf(&mut doc, out)?;
    info!(labels = placements.len(), ?mode, out = %out.display(), "wrote annotated pdf");
    Ok(())
}

fn plan(pdf: &Path, rows: &Path, mode: LabelMode) -> Result<(Vec<PageGeometry>, Vec<LabelPlacement>)> {
    config::check_input(pdf, "pdf", "first")?;
    config::check_input(rows, "csv", "second")?;
    let doc = render::load_pdf(pdf)?;
    let pages = render::page_geometry(&doc)?;
    let rows = rows::parse_rows_file(rows)?;
    let placements = placement::plan_placements(&rows, &pages, mode)?;
    Ok((pages, placements))
}
