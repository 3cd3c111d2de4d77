//! Renders a mustache template file against a JSON or YAML data file.

use std::cell::RefCell;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use mustache::{Context, JsonValue, Template, TemplateMap, TemplateStore, YamlValue};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mustache")]
#[command(version)]
#[command(about = "Render a mustache template against JSON or YAML data", long_about = None)]
struct Cli {
    /// Template file
    template: PathBuf,

    /// Data file, read as JSON (.json) or YAML (.yml, .yaml)
    data: PathBuf,

    /// Output file path (writes to stdout if not provided)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory of `*.mustache` partials, named after their file stem
    #[arg(short, long)]
    partials: Option<PathBuf>,

    /// Fail when a partial tag names a partial that does not exist
    #[arg(long)]
    strict_partials: bool,
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error("{}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("{}: unsupported data format, expected .json, .yml or .yaml", .0.display())]
    UnsupportedData(PathBuf),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("partial `{0}` not found")]
    MissingPartial(String),

    #[error("{}: {source}", path.display())]
    Template { path: PathBuf, source: mustache::Error },
}

enum Data {
    Json(JsonValue),
    Yaml(YamlValue),
}

impl Data {
    fn load(path: &Path) -> Result<Self, CliError> {
        let extension = path.extension().and_then(|it| it.to_str()).unwrap_or_default();
        match extension.to_ascii_lowercase().as_str() {
            "json" => Ok(Data::Json(serde_json::from_str(&read(path)?)?)),
            "yml" | "yaml" => Ok(Data::Yaml(serde_yaml::from_str(&read(path)?)?)),
            _ => Err(CliError::UnsupportedData(path.to_owned())),
        }
    }

    fn context(&self) -> &dyn Context {
        match self {
            Data::Json(value) => value,
            Data::Yaml(value) => value,
        }
    }
}

/// Records the names it could not resolve.
struct StrictStore<'s> {
    inner: &'s TemplateMap,
    missing: RefCell<Vec<String>>,
}

impl TemplateStore for StrictStore<'_> {
    fn get(&self, name: &str) -> Option<&Template> {
        let template = self.inner.get(name);
        if template.is_none() {
            self.missing.borrow_mut().push(name.to_owned());
        }
        template
    }
}

fn read(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Io { path: path.to_owned(), source })
}

fn compile(path: &Path) -> Result<Template, CliError> {
    Template::from(&read(path)?).map_err(|source| CliError::Template { path: path.to_owned(), source })
}

fn load_partials(dir: &Path) -> Result<TemplateMap, CliError> {
    let io_error = |source| CliError::Io { path: dir.to_owned(), source };
    let mut partials = TemplateMap::new();
    for entry in fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if path.extension().is_some_and(|it| it == "mustache") {
            if let Some(name) = path.file_stem().and_then(|it| it.to_str()) {
                debug!(partial = name, "loading partial");
                partials.insert(name, compile(&path)?);
            }
        }
    }
    info!(count = partials.len(), "loaded partials");
    Ok(partials)
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let template = compile(&cli.template)?;
    let data = Data::load(&cli.data)?;
    let partials = match &cli.partials {
        Some(dir) => load_partials(dir)?,
        None => TemplateMap::new(),
    };

    let render_error = |source| CliError::Template { path: cli.template.clone(), source };
    let result = if cli.strict_partials {
        let store = StrictStore { inner: &partials, missing: RefCell::new(Vec::new()) };
        let result = template.render_with_partials(data.context(), &store).map_err(render_error)?;
        if let Some(name) = store.missing.into_inner().into_iter().next() {
            return Err(CliError::MissingPartial(name));
        }
        result
    } else {
        template.render_with_partials(data.context(), &partials).map_err(render_error)?
    };

    match &cli.output {
        Some(path) => fs::write(path, result)
            .map_err(|source| CliError::Io { path: path.clone(), source }),
        None => io::stdout()
            .write_all(result.as_bytes())
            .map_err(|source| CliError::Io { path: PathBuf::from("<stdout>"), source }),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
