//! bookparse CLI - layout classification tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use bookparse::render::{self, ExtractionStats};
use bookparse::{
    BookParser, Document, JsonFormat, JsonLayoutSource, LayoutSource, PageSelection,
    ParseOptions, RenderOptions,
};

#[derive(Parser)]
#[command(name = "bookparse")]
#[command(version)]
#[command(about = "Classify decoded PDF page layouts into tagged markup", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a layout dump to markup
    #[command(alias = "html")]
    Markup {
        /// Input layout dump (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Leave footnotes out of the output
        #[arg(long)]
        no_footnotes: bool,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Convert a layout dump to JSON
    Json {
        /// Input layout dump (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Convert a layout dump to plain text
    Text {
        /// Input layout dump (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Show document information and classification statistics
    Info {
        /// Input layout dump (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Show filtered, segmented objects without classifying them
    Preprocess {
        /// Input layout dump (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Show version information
    Version,
}

/// Flags shared by every processing command.
#[derive(Args, Debug, Default)]
struct CommonArgs {
    /// JSON file with parse options (frame, text heights, ...)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Page range (e.g., "12-26", "1,3,5")
    #[arg(long)]
    pages: Option<String>,

    /// Directory for extracted images
    #[arg(long, value_name = "DIR")]
    images_dir: Option<PathBuf>,

    /// Document password
    #[arg(long, env = "BOOKPARSE_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Classify pages one at a time
    #[arg(long)]
    sequential: bool,
}

impl CommonArgs {
    /// Build parse options: config file first, then command-line overrides.
    fn parse_options(&self) -> Result<ParseOptions, Box<dyn std::error::Error>> {
        let mut options = match &self.config {
            Some(path) => ParseOptions::from_json(&fs::read_to_string(path)?)?,
            None => ParseOptions::new(),
        };

        if let Some(p) = &self.pages {
            let selection =
                PageSelection::parse(p).map_err(|e| format!("Invalid page range: {}", e))?;
            options = options.with_pages(selection);
        }
        if let Some(dir) = &self.images_dir {
            options = options.with_images_folder(dir);
        }
        if let Some(password) = &self.password {
            options = options.with_password(password);
        }
        if self.sequential {
            options = options.sequential();
        }
        Ok(options)
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Markup {
            input,
            output,
            no_footnotes,
            common,
        } => cmd_markup(&input, output.as_deref(), no_footnotes, &common),
        Commands::Json {
            input,
            output,
            compact,
            common,
        } => cmd_json(&input, output.as_deref(), compact, &common),
        Commands::Text {
            input,
            output,
            common,
        } => cmd_text(&input, output.as_deref(), &common),
        Commands::Info { input, common } => cmd_info(&input, &common),
        Commands::Preprocess {
            input,
            output,
            common,
        } => cmd_preprocess(&input, output.as_deref(), &common),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Classify a layout dump, showing progress on stderr.
fn classify(input: &Path, common: &CommonArgs) -> Result<Document, Box<dyn std::error::Error>> {
    let options = common.parse_options()?;
    let source = JsonLayoutSource::open(input, options.password.as_deref())?;
    let parser = BookParser::new(options)?;

    let document = if parser.options().parallel || !source.is_extractable() {
        let pb = ProgressBar::new_spinner();
        pb.set_message("Classifying pages...");
        let mut doc = parser.parse(&source)?;
        pb.finish_and_clear();
        doc.metadata.source = Some(input.display().to_string());
        doc
    } else {
        let pb = ProgressBar::new(u64::from(source.page_count()));
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} pages")?
                .progress_chars("#>-"),
        );

        let mut doc = Document::new();
        doc.metadata.source = Some(input.display().to_string());
        doc.metadata.page_count = source.page_count();
        doc.outline = source.outline().filter(|o| !o.is_empty());
        for page in parser.pages(&source) {
            pb.set_position(u64::from(page.number));
            doc.add_page(page);
        }
        pb.finish_and_clear();
        doc
    };

    report(&document);
    Ok(document)
}

/// Print warnings for problems that did not stop the run.
fn report(doc: &Document) {
    if doc.is_forbidden() {
        eprintln!(
            "{} document denies content extraction; output is empty",
            "Warning:".yellow().bold()
        );
    }
    for issue in doc.pages.iter().flat_map(|p| &p.issues) {
        eprintln!("{} {}", "Warning:".yellow().bold(), issue);
    }
}

fn write_output(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_markup(
    input: &Path,
    output: Option<&Path>,
    no_footnotes: bool,
    common: &CommonArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = classify(input, common)?;
    let render_options = RenderOptions::new().with_footnotes(!no_footnotes);
    let markup = render::to_markup(&doc, &render_options)?;
    write_output(output, &markup)
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    common: &CommonArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = classify(input, common)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = render::to_json(&doc, format)?;
    write_output(output, &json)
}

fn cmd_text(
    input: &Path,
    output: Option<&Path>,
    common: &CommonArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = classify(input, common)?;
    let text = render::to_text(&doc, &RenderOptions::default())?;
    write_output(output, &text)
}

fn cmd_info(input: &Path, common: &CommonArgs) -> Result<(), Box<dyn std::error::Error>> {
    let doc = classify(input, common)?;
    let stats = ExtractionStats::from_document(&doc);

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Pages".bold(), doc.metadata.page_count);
    println!(
        "{}: {}",
        "Extraction".bold(),
        if doc.is_forbidden() { "Forbidden" } else { "Allowed" }
    );
    if let Some(ref outline) = doc.outline {
        println!("{}: {}", "Outline entries".bold(), outline.items.len());
    }

    println!();
    println!("{}", "Classification Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Pages processed".bold(), stats.page_count);
    for (tag, count) in &stats.tag_counts {
        println!("  {} <{}>: {}", "├─".dimmed(), tag, count);
    }
    println!("{}: {}", "Images".bold(), stats.image_count);
    println!("{}: {}", "Footnotes".bold(), stats.footnote_count);
    println!("{}: {}", "Passthrough objects".bold(), stats.passthrough_count);
    println!("{}: {}", "Words".bold(), stats.word_count);
    if stats.issue_count > 0 {
        println!("{}: {}", "Issues".yellow().bold(), stats.issue_count);
    }

    Ok(())
}

fn cmd_preprocess(
    input: &Path,
    output: Option<&Path>,
    common: &CommonArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = common.parse_options()?;
    let source = JsonLayoutSource::open(input, options.password.as_deref())?;
    let parser = BookParser::new(options)?;

    let mut pages = Vec::new();
    if source.is_extractable() {
        for n in (1..=source.page_count()).filter(|&n| parser.options().pages.includes(n)) {
            let objects = source.page_layout(n)?;
            pages.push(serde_json::json!({
                "page": n,
                "items": parser.preprocess_page(n, &objects),
            }));
        }
    }

    let json = serde_json::to_string_pretty(&pages)?;
    write_output(output, &json)
}

fn cmd_version() {
    println!("{} {}", "bookparse".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Layout classification tool for decoded PDF pages");
    println!();
    println!("License: MIT");
}
