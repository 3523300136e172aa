//! docx2tex CLI - Word to LaTeX project converter

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process;

use chrono::Local;
use clap::error::ErrorKind;
use clap::Parser;
use colored::Colorize;
use env_logger::{Env, Target};
use indicatif::{ProgressBar, ProgressStyle};

use docx2tex::{
    convert_file_with_progress, ConversionReport, ConvertOptions, ExtractionStatus, Layout,
    ParseOptions, RenderOptions, Stage,
};

#[derive(Parser)]
#[command(name = "docx2tex")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Convert a Word document into a zipped LaTeX project", long_about = None)]
struct Cli {
    /// Input DOCX file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output directory
    #[arg(value_name = "OUTPUT_DIR")]
    output_dir: PathBuf,

    /// Log file (appended to)
    #[arg(long, value_name = "PATH", env = "DOCX2TEX_LOG_FILE", default_value = "conversion.log")]
    log_file: PathBuf,

    /// Figure width as a fraction of \textwidth
    #[arg(long, value_name = "FRACTION")]
    figure_width: Option<f32>,

    /// Place figures where images are drawn
    #[arg(long)]
    inline_figures: bool,

    /// Emit a title block from the document properties
    #[arg(long)]
    title_page: bool,

    /// Do not write latex_project.zip
    #[arg(long)]
    no_archive: bool,

    /// Write image payloads without PNG transcoding
    #[arg(long)]
    keep_raw_images: bool,

    /// Print the conversion report as JSON
    #[arg(long)]
    json: bool,

    /// Suppress progress and summary output
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                let _ = e.print();
                process::exit(0);
            }
            _ => {
                let _ = e.print();
                eprintln!("{}", "Usage: docx2tex <INPUT> <OUTPUT_DIR> [OPTIONS]".yellow());
                process::exit(1);
            }
        },
    };

    init_logging(&cli.log_file);

    if let Err(e) = cmd_convert(&cli) {
        log::error!("Conversion failed: {}", e);
        eprintln!("{}: {}", "Error".red().bold(), e);
        process::exit(1);
    }
}

fn init_logging(log_file: &Path) {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} [{}] {}: {}",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            record.level(),
            record.target(),
            record.args()
        )
    });

    match OpenOptions::new().create(true).append(true).open(log_file) {
        Ok(file) => {
            builder.target(Target::Pipe(Box::new(file)));
        }
        Err(e) => {
            eprintln!(
                "{}: cannot open log file {} ({}); logging to stderr",
                "Warning".yellow().bold(),
                log_file.display(),
                e
            );
        }
    }
    builder.init();
}

fn build_options(cli: &Cli) -> ConvertOptions {
    let mut render = RenderOptions::new().with_title_block(cli.title_page);
    if let Some(width) = cli.figure_width {
        render = render.with_figure_width(width);
    }

    ConvertOptions::new()
        .with_parse_options(ParseOptions::new().lenient())
        .with_render_options(render)
        .with_layout(if cli.inline_figures {
            Layout::Inline
        } else {
            Layout::Passes
        })
        .with_transcode_images(!cli.keep_raw_images)
        .with_archive(!cli.no_archive)
}

fn cmd_convert(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let options = build_options(cli);

    let pb = if cli.quiet || cli.json {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(Stage::COUNT)
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    let report = convert_file_with_progress(&cli.input, &cli.output_dir, &options, |stage| {
        if stage != Stage::Reading {
            pb.inc(1);
        }
        if stage == Stage::Done {
            pb.finish_with_message(stage.to_string());
        } else {
            pb.set_message(stage.to_string());
        }
    })?;

    if cli.json {
        println!("{}", report.to_json()?);
    } else if !cli.quiet {
        print_summary(&report);
    }
    Ok(())
}

fn print_summary(report: &ConversionReport) {
    let stats = &report.stats;

    println!("\n{}", "Output files:".green().bold());
    println!("  {} {}", "├─".dimmed(), report.layout.tex_path.display());
    let images_glyph = if report.package.is_some() { "├─" } else { "└─" };
    println!(
        "  {} {} ({} images)",
        images_glyph.dimmed(),
        report.layout.images_dir.display(),
        stats.images_extracted
    );
    if let Some(package) = &report.package {
        println!(
            "  {} {} ({} files)",
            "└─".dimmed(),
            package.archive.display(),
            package.files
        );
    }

    println!();
    println!("{}", "Content".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Headings".bold(), stats.heading_count);
    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!("{}: {}", "Tables".bold(), stats.table_count);
    println!("{}: {}", "Figures".bold(), stats.figure_count);
    println!("{}: {}", "Equations".bold(), stats.equation_count);
    println!("{}: {}", "Words".bold(), stats.word_count);

    for entry in report.skipped_images() {
        let reason = match &entry.status {
            ExtractionStatus::Failed(reason) => reason.as_str(),
            ExtractionStatus::Missing => "no payload in package",
            ExtractionStatus::Extracted => continue,
        };
        println!(
            "{}: image {} ({}) skipped: {}",
            "Warning".yellow().bold(),
            entry.id,
            entry.rel_id,
            reason
        );
    }
}
