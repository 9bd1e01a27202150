//! CLI binary for codedown: describe methods and lambdas in Java and Kotlin sources.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use codedown_core::config::CodedownConfig;
use codedown_core::schema;
use codedown_parser::extract::DescriptionExtractor;
use codedown_parser::languages::Language;
use codedown_parser::scan;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "codedown", about = "Method and lambda descriptions for documentation generators")]
struct Cli {
    /// Project root directory, where .codedown/config.toml is looked up (defaults to current directory)
    #[arg(short, long, global = true)]
    project: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Describe the innermost method or lambda at a byte offset
    Describe {
        /// Source file (relative paths resolve against the project root)
        file: PathBuf,

        /// Byte offset of the caret
        #[arg(short, long)]
        offset: usize,

        /// Archive protocol of the file, e.g. "jar" for sources browsed inside a library
        #[arg(long)]
        protocol: Option<String>,
    },

    /// Describe every method and lambda under a directory
    List {
        /// Directory to scan (defaults to the project root)
        path: Option<PathBuf>,

        /// Restrict to one language (java, kotlin)
        #[arg(short, long)]
        lang: Option<String>,

        /// Glob patterns to include files (repeatable)
        #[arg(long)]
        include: Vec<String>,

        /// Emit one compact description per line instead of grouped JSON
        #[arg(long)]
        jsonl: bool,
    },
}

fn get_project_root(cli: &Cli) -> Result<PathBuf> {
    match &cli.project {
        Some(p) => Ok(p.clone()),
        None => std::env::current_dir().context("failed to get current directory"),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let project_root = get_project_root(&cli)?;
    let config = CodedownConfig::load(&project_root)?;
    let extractor = DescriptionExtractor::new(config.attributes);

    match cli.command {
        Commands::Describe {
            file,
            offset,
            protocol,
        } => cmd_describe(&project_root, &extractor, &file, offset, protocol),
        Commands::List {
            path,
            lang,
            include,
            jsonl,
        } => cmd_list(&project_root, &extractor, path, lang, include, jsonl),
    }
}

fn cmd_describe(
    project_root: &Path,
    extractor: &DescriptionExtractor,
    file: &Path,
    offset: usize,
    protocol: Option<String>,
) -> Result<()> {
    let path = if file.is_absolute() {
        file.to_path_buf()
    } else {
        project_root.join(file)
    };
    let description = scan::describe_at(&path, offset, protocol.as_deref(), extractor)?;
    let Some(description) = description else {
        anyhow::bail!("no method or lambda at offset {} in {}", offset, path.display());
    };
    println!("{}", schema::to_json(&description)?);
    Ok(())
}

fn cmd_list(
    project_root: &Path,
    extractor: &DescriptionExtractor,
    path: Option<PathBuf>,
    lang: Option<String>,
    include: Vec<String>,
    jsonl: bool,
) -> Result<()> {
    use indicatif::{ProgressBar, ProgressStyle};

    let languages: Vec<Language> = match lang {
        Some(l) => {
            let lang = Language::from_name(&l)
                .or_else(|| Language::from_extension(&l))
                .ok_or_else(|| anyhow::anyhow!("unsupported language: {}", l))?;
            vec![lang]
        }
        None => Language::ALL.to_vec(),
    };

    let root = match path {
        Some(p) if p.is_absolute() => p,
        Some(p) => project_root.join(p),
        None => project_root.to_path_buf(),
    };

    let files = scan::collect_source_files(&root, &languages, &include)?;
    if files.is_empty() {
        let names: Vec<&str> = languages.iter().map(|l| l.name()).collect();
        anyhow::bail!(
            "No {} source files found in {}",
            names.join("/"),
            root.display()
        );
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .context("invalid progress template")?,
    );
    spinner.set_message(format!("Describing {} files...", files.len()));
    let results = scan::describe_files_parallel(&root, &files, extractor);
    spinner.finish_and_clear();

    let total: usize = results.iter().map(|r| r.descriptions.len()).sum();
    tracing::info!("{} descriptions in {} files", total, results.len());

    if jsonl {
        for result in &results {
            print!("{}", schema::to_json_lines(&result.descriptions)?);
        }
    } else {
        let json = serde_json::to_string_pretty(&results).context("failed to serialize results")?;
        println!("{json}");
    }
    Ok(())
}
