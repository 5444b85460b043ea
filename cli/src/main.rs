//! pdflayout CLI - layout segmentation and role labeling of PDF primitives

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::{ColoredString, Colorize};

use pdflayout::render::PageSelection;
use pdflayout::{
    AnalyzeOptions, Analyzer, Document, JsonFormat, RenderOptions, Role, TextOptions,
};

#[derive(Parser)]
#[command(name = "pdflayout")]
#[command(version)]
#[command(
    about = "Segment PDF page primitives into blocks, paragraphs and roles",
    long_about = None
)]
struct Cli {
    /// JSON file with analysis options
    #[arg(short, long, global = true, value_name = "FILE", env = "PDFLAYOUT_CONFIG")]
    config: Option<PathBuf>,

    /// Segment pages one after another
    #[arg(long, global = true)]
    sequential: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the paragraphs as plain text
    Text {
        /// Primitive dump (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Prefix paragraphs with their role
        #[arg(short, long)]
        roles: bool,

        /// Drop sub- and superscripts
        #[arg(long)]
        no_scripts: bool,

        /// Drop punctuation
        #[arg(long)]
        no_punctuation: bool,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,
    },

    /// Write the labeled block tree as JSON
    Json {
        /// Primitive dump (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,
    },

    /// List every block with its role
    Roles {
        /// Primitive dump (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Only print the per-role counts
        #[arg(short, long)]
        summary: bool,
    },

    /// Show document statistics
    Info {
        /// Primitive dump (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Print the effective analysis options as JSON
    Config,

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let options = match load_options(cli.config.as_deref(), cli.sequential) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            std::process::exit(2);
        }
    };

    let result = match cli.command {
        Commands::Text {
            input,
            output,
            roles,
            no_scripts,
            no_punctuation,
            pages,
        } => {
            let mut text = TextOptions::default();
            if no_scripts {
                text = text.without_scripts();
            }
            if no_punctuation {
                text = text.without_punctuation();
            }
            cmd_text(options, &input, output.as_deref(), roles, text, pages.as_deref())
        }
        Commands::Json {
            input,
            output,
            compact,
            pages,
        } => cmd_json(options, &input, output.as_deref(), compact, pages.as_deref()),
        Commands::Roles { input, summary } => cmd_roles(options, &input, summary),
        Commands::Info { input } => cmd_info(options, &input),
        Commands::Config => cmd_config(&options),
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

fn load_options(config: Option<&Path>, sequential: bool) -> pdflayout::Result<AnalyzeOptions> {
    let options = match config {
        Some(path) => {
            log::info!("Loading options from {}", path.display());
            AnalyzeOptions::from_path(path)?
        }
        None => AnalyzeOptions::default(),
    };
    Ok(if sequential { options.sequential() } else { options })
}

fn analyze(options: AnalyzeOptions, input: &Path) -> Result<Document, Box<dyn std::error::Error>> {
    let analyzer = Analyzer::new(options)?;
    Ok(analyzer.analyze_file(input)?)
}

fn page_selection(pages: Option<&str>) -> Result<PageSelection, Box<dyn std::error::Error>> {
    Ok(match pages {
        Some(p) => PageSelection::parse(p).map_err(|e| format!("Invalid page range: {}", e))?,
        None => PageSelection::All,
    })
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

fn cmd_text(
    options: AnalyzeOptions,
    input: &Path,
    output: Option<&Path>,
    roles: bool,
    text: TextOptions,
    pages: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let render_options = RenderOptions::new()
        .with_text_options(text)
        .with_roles(roles)
        .with_pages(page_selection(pages)?);
    let doc = analyze(options, input)?;
    let text = pdflayout::render::to_text(&doc, &render_options)?;
    write_output(output, &text)
}

fn cmd_json(
    options: AnalyzeOptions,
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    pages: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let render_options = RenderOptions::new().with_pages(page_selection(pages)?);
    let doc = analyze(options, input)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = pdflayout::render::to_json(&doc, &render_options, format)?;
    write_output(output, &json)
}

fn role_label(role: Option<Role>) -> ColoredString {
    let Some(role) = role else {
        return "UNLABELED".red();
    };
    let label = role.as_str();
    match role {
        Role::Title | Role::Heading => label.cyan().bold(),
        Role::BodyText => label.normal(),
        Role::PageHeader | Role::PageFooter | Role::Footnote => label.dimmed(),
        Role::Caption | Role::Table | Role::Figure => label.yellow(),
        Role::Other => label.red(),
        _ => label.green(),
    }
}

fn cmd_roles(
    options: AnalyzeOptions,
    input: &Path,
    summary: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = analyze(options, input)?;

    let mut counts: BTreeMap<Option<Role>, usize> = BTreeMap::new();
    for (page, block) in doc.blocks() {
        *counts.entry(block.role()).or_default() += 1;
        if summary {
            continue;
        }
        let mut text = block.running_text(&TextOptions::default());
        if text.chars().count() > 60 {
            text = text.chars().take(57).collect::<String>() + "...";
        }
        let secondary = block
            .secondary_role()
            .map(|r| format!("/{}", r.as_str()))
            .unwrap_or_default();
        println!(
            "{} {}{} {}",
            format!("p{:<3}", page.number).as_str().dimmed(),
            role_label(block.role()),
            secondary.as_str().dimmed(),
            text
        );
    }

    if !summary {
        println!();
    }
    println!("{}", "Role Summary".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for (role, count) in &counts {
        println!("{}: {}", role_label(*role), count);
    }

    Ok(())
}

fn cmd_info(options: AnalyzeOptions, input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let doc = analyze(options, input)?;
    let statistics = doc.statistics();

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Pages".bold(), doc.page_count());
    println!("{}: {}", "Fonts".bold(), doc.fonts.len());
    println!("{}: {}", "Colors".bold(), doc.colors.len());

    println!();
    println!("{}", "Layout Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let characters: usize = doc.pages.iter().map(|p| p.characters().len()).sum();
    let lines: usize = doc.pages.iter().map(|p| p.lines().len()).sum();
    let graphics: usize = doc.pages.iter().map(|p| p.graphics().len()).sum();
    println!("{}: {}", "Characters".bold(), characters);
    println!("{}: {}", "Lines".bold(), lines);
    println!("{}: {}", "Blocks".bold(), doc.blocks().count());
    println!("{}: {}", "Paragraphs".bold(), doc.paragraphs().count());
    println!("{}: {}", "Graphic groups".bold(), graphics);

    let text = &statistics.text;
    if let Some(face) = text.most_common_face {
        let name = doc
            .font(face.font_id)
            .map(|f| f.name.as_str())
            .unwrap_or("unknown");
        println!("{}: {} {}pt", "Body font".bold(), name, face.size);
    }
    println!(
        "{}: {}x{}",
        "Glyph size".bold(),
        statistics.dimension.most_common_width,
        statistics.dimension.most_common_height
    );
    if let Some(pitch) = statistics.text_line.line_pitch() {
        println!("{}: {}", "Line pitch".bold(), pitch);
    }

    Ok(())
}

fn cmd_config(options: &AnalyzeOptions) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(options)?);
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pdflayout".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Layout segmentation and role labeling for PDF primitives");
    println!();
    println!("License: MIT");
}
