use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use studyhall_core::config::Settings;
use studyhall_core::{DocumentSource, Normalizer, OpenAiBackend, quizzes};
use tracing_subscriber::EnvFilter;

mod output;

use output::ColorMode;

/// Study assistant toolbox: extract documents and generate study material.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract plain text from a PDF or DOCX file
    Extract {
        /// Path to the document
        file_path: PathBuf,
    },

    /// Extract a document and print its AI-derived summary, keywords, and mind map
    Summarize {
        /// Path to the document
        file_path: PathBuf,

        /// Title to process under (defaults to the file name)
        #[arg(long)]
        title: Option<String>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Generate a multiple-choice quiz for a topic
    Quiz {
        /// Topic to quiz on
        topic: String,

        /// Number of questions
        #[arg(long)]
        count: Option<usize>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Extract { file_path } => extract(&file_path),
        Command::Summarize {
            file_path,
            title,
            no_color,
        } => summarize(&file_path, title, ColorMode(!no_color)).await,
        Command::Quiz {
            topic,
            count,
            no_color,
        } => quiz(&topic, count, ColorMode(!no_color)).await,
    }
}

fn read_source(path: &Path) -> anyhow::Result<DocumentSource> {
    let data = std::fs::read(path)?;
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload")
        .to_string();
    Ok(DocumentSource::Upload { filename, data })
}

fn normalizer_from_settings() -> Normalizer {
    let settings = Settings::load();
    let backend = Arc::new(OpenAiBackend::new(settings.api_key, settings.api_base));
    Normalizer::new(backend, settings.model)
}

fn extract(path: &Path) -> anyhow::Result<()> {
    let text = read_source(path)?.into_text()?;
    println!("{text}");
    Ok(())
}

async fn summarize(path: &Path, title: Option<String>, color: ColorMode) -> anyhow::Result<()> {
    let title = title.unwrap_or_else(|| {
        path.file_stem()
            .and_then(|n| n.to_str())
            .unwrap_or("document")
            .to_string()
    });

    let text = read_source(path)?.into_text()?;
    let normalizer = normalizer_from_settings();
    let insights = normalizer.process_note(&title, &text).await?;

    let mut stdout = std::io::stdout().lock();
    output::print_insights(&mut stdout, &title, &insights, color)?;
    Ok(())
}

async fn quiz(topic: &str, count: Option<usize>, color: ColorMode) -> anyhow::Result<()> {
    let count = count
        .unwrap_or(quizzes::DEFAULT_QUESTION_COUNT)
        .clamp(1, quizzes::MAX_QUESTION_COUNT);

    let normalizer = normalizer_from_settings();
    let questions = normalizer.generate_quiz(topic, count).await?;

    let mut stdout = std::io::stdout().lock();
    output::print_quiz(&mut stdout, topic, &questions, color)?;
    Ok(())
}
