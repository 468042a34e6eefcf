//! Command-line front end: import translation files, fill and export them.
#![allow(clippy::print_stdout)]

use std::collections::BTreeSet;
use std::path::{
    Path,
    PathBuf,
};
use std::process::ExitCode;

use clap::{
    Args as ClapArgs,
    Parser,
    Subcommand,
};
use i18n_table::config::{
    ConfigError,
    ConfigManager,
    TableSettings,
};
use i18n_table::export::{
    ExportError,
    write_export,
};
use i18n_table::indexer::{
    IndexerError,
    expand_inputs,
    read_batch,
};
use i18n_table::session::SessionError;
use i18n_table::translate::PassthroughProvider;
use i18n_table::{
    LanguageId,
    Session,
};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "i18n-table",
    about = "Merge per-language JSON translation files into one table and export them back",
    version
)]
struct Cli {
    /// Settings file (defaults to ./.i18n-table.json when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Import files, optionally seed missing values, and export per-language files
    Convert(ConvertArgs),
    /// List entries whose key or any value contains the query
    Search(SearchArgs),
    /// Show how many keys each file contributes, and which files are rejected
    Keys(InputArgs),
}

#[derive(ClapArgs, Debug)]
struct InputArgs {
    /// Translation files or directories, in merge order (later files win)
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

#[derive(ClapArgs, Debug)]
struct ConvertArgs {
    #[command(flatten)]
    input: InputArgs,
    /// Output directory (defaults to export.outputDir from the settings)
    #[arg(long)]
    out: Option<PathBuf>,
    /// Languages to export, comma separated (defaults to every imported language)
    #[arg(long, value_delimiter = ',')]
    languages: Vec<String>,
    /// Copy source-language text into empty cells of the exported languages
    #[arg(long, default_value_t = false)]
    fill: bool,
    /// Like --fill, but copy from this language instead of sourceLanguage
    #[arg(long)]
    fill_from: Option<String>,
}

#[derive(ClapArgs, Debug)]
struct SearchArgs {
    #[command(flatten)]
    input: InputArgs,
    /// Case-insensitive text to look for
    #[arg(long, short)]
    query: String,
}

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Indexer(#[from] IndexerError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error("None of the input files could be imported")]
    NothingImported,
    #[error("Failed to determine the current directory: {0}")]
    CurrentDir(std::io::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    let (writer, _guard) = tracing_appender::non_blocking(std::io::stderr());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(writer)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!("{error}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let settings = load_settings(cli.config.as_deref())?;

    match cli.cmd {
        Cmd::Convert(args) => convert(&settings, args).await,
        Cmd::Search(args) => search(&settings, args).await,
        Cmd::Keys(args) => keys(&settings, &args).await,
    }
}

fn load_settings(config: Option<&Path>) -> Result<TableSettings, CliError> {
    let mut manager = ConfigManager::new();
    match config {
        Some(path) => manager.load_file(path)?,
        None => {
            let cwd = std::env::current_dir().map_err(CliError::CurrentDir)?;
            manager.load_settings(&cwd)?;
        }
    }
    Ok(manager.get_settings().clone())
}

async fn import(settings: &TableSettings, input: &InputArgs) -> Result<Session, CliError> {
    let paths = expand_inputs(&input.inputs, &settings.translation_files.file_pattern)?;
    let mut session = Session::new(settings.registry());
    let batch = session.import(&paths, settings.import_concurrency()).await;
    if batch.is_empty() {
        return Err(CliError::NothingImported);
    }
    Ok(session)
}

async fn convert(settings: &TableSettings, args: ConvertArgs) -> Result<(), CliError> {
    let mut session = import(settings, &args.input).await?;

    let languages: BTreeSet<LanguageId> = if args.languages.is_empty() {
        session.store().languages().into_iter().cloned().collect()
    } else {
        args.languages.into_iter().map(LanguageId::from).collect()
    };
    for language in &languages {
        session.toggle_language(language)?;
    }

    let source = args
        .fill_from
        .map(LanguageId::from)
        .or_else(|| args.fill.then(|| settings.source_language.clone()));
    if let Some(source) = source {
        let report = session.fill_missing(&PassthroughProvider, &source);
        tracing::info!(%source, filled = report.filled, "Seeded missing translations");
    }

    let documents = session.export_selected()?;
    let out = args.out.unwrap_or_else(|| settings.export.output_dir.clone());
    let written = write_export(&out, &documents).await?;
    tracing::info!(files = written.len(), out = %out.display(), "Export finished");
    Ok(())
}

async fn search(settings: &TableSettings, args: SearchArgs) -> Result<(), CliError> {
    let session = import(settings, &args.input).await?;

    for entry in session.filter(&args.query) {
        let mut values: Vec<_> = entry.values().collect();
        values.sort();
        let cells: Vec<String> = values
            .into_iter()
            .map(|(language, value)| {
                format!("{}={value}", session.registry().display_name(language))
            })
            .collect();
        println!("{}\t{}", entry.key, cells.join("\t"));
    }
    Ok(())
}

async fn keys(settings: &TableSettings, args: &InputArgs) -> Result<(), CliError> {
    let paths = expand_inputs(&args.inputs, &settings.translation_files.file_pattern)?;
    let batch = read_batch(&paths, settings.import_concurrency()).await;

    for (path, count) in batch.key_counts() {
        println!("{}\t{count} keys", path.display());
    }
    for rejected in &batch.rejected {
        println!("{}\trejected: {}", rejected.path.display(), rejected.error);
    }
    Ok(())
}
