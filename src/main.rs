use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use linode::api::{format_api_error, LinodeClient};
use linode::config::Config;
use linode::object::{ResourceKind, ResourceObject};
use linode::resource::Collection;
use serde_json::{Map, Value};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Command-line client for the Linode API
#[derive(Parser, Debug)]
#[command(name = "linode", version, about, long_about = None)]
struct Args {
    /// Personal access token (overrides LINODE_TOKEN and the config file)
    #[arg(long, global = true)]
    token: Option<String>,

    /// API root (overrides LINODE_API_URL and the config file)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Datacenters
    Datacenters {
        #[command(subcommand)]
        action: ReadAction,
    },
    /// Kernels
    Kernels {
        #[command(subcommand)]
        action: ReadAction,
    },
    /// Distributions
    Distributions {
        #[command(subcommand)]
        action: ReadAction,
    },
    /// Linode instances
    Linodes {
        #[command(subcommand)]
        action: LinodeAction,
    },
    /// Save a token to the config file
    Login {
        #[arg(value_name = "TOKEN")]
        access_token: String,
    },
}

#[derive(Subcommand, Debug)]
enum ReadAction {
    /// List every item
    List,
    /// Show one item
    Get { id: String },
}

#[derive(Subcommand, Debug)]
enum LinodeAction {
    List,
    Get {
        id: u64,
    },
    /// Change the label of an instance
    Rename {
        id: u64,
        label: String,
    },
    /// Change or clear the display group of an instance
    Group {
        id: u64,
        group: Option<String>,
    },
    Delete {
        id: u64,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(level: LogLevel) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let tracing_level = level.to_tracing_level()?;

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Failed to open log file {:?}: {}", log_path, e);
            return None;
        }
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("linode started with log level: {:?}", level);
    tracing::info!("Log file: {:?}", log_path);

    Some(guard)
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("linode").join("linode.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".linode").join("linode.log");
    }
    PathBuf::from("linode.log")
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level);

    let mut config = Config::load();

    if let Command::Login { access_token } = &args.command {
        config.set_token(access_token).context("Failed to save config")?;
        println!("Token saved to {:?}", Config::config_path().unwrap_or_default());
        return Ok(());
    }

    let token = config.effective_token(args.token.as_deref());
    let api_url = config.effective_api_url(args.api_url.as_deref());
    tracing::info!("Using API root: {}", api_url);

    let client = LinodeClient::new(token.as_deref(), &api_url)
        .context("Failed to initialize Linode client")?;

    match run(&client, &args).await {
        Ok(values) => print(&values, args.output),
        Err(err) => {
            tracing::error!("Command failed: {}", err);
            anyhow::bail!(format_api_error(&err))
        }
    }
}

async fn run(client: &LinodeClient, args: &Args) -> linode::Result<Vec<Value>> {
    match &args.command {
        Command::Datacenters { action } => read(client.datacenters(), action).await,
        Command::Kernels { action } => read(client.kernels(), action).await,
        Command::Distributions { action } => read(client.distributions(), action).await,
        Command::Linodes { action } => linodes(client, action).await,
        Command::Login { .. } => Ok(Vec::new()),
    }
}

async fn read<O: ResourceObject>(
    collection: Collection<'_, O>,
    action: &ReadAction,
) -> linode::Result<Vec<Value>> {
    match action {
        ReadAction::List => Ok(collection
            .list()
            .await?
            .iter()
            .map(|o| o.fields().to_value())
            .collect()),
        ReadAction::Get { id } => {
            let endpoint = O::Kind::endpoint_for(&Value::from(id.as_str()));
            tracing::debug!("Fetching {}", endpoint);
            let object = collection.get(id.as_str()).await?;
            Ok(vec![object.fields().to_value()])
        }
    }
}

async fn linodes(client: &LinodeClient, action: &LinodeAction) -> linode::Result<Vec<Value>> {
    let linodes = client.linodes();
    match action {
        LinodeAction::List => Ok(linodes
            .list()
            .await?
            .iter()
            .map(|l| l.fields().to_value())
            .collect()),
        LinodeAction::Get { id } => Ok(vec![linodes.get(*id).await?.fields().to_value()]),
        LinodeAction::Rename { id, label } => {
            let mut linode = linodes.get(*id).await?;
            linode.rename(label)?;
            linode.save().await?;
            Ok(vec![linode.fields().to_value()])
        }
        LinodeAction::Group { id, group } => {
            let mut linode = linodes.get(*id).await?;
            linode.set_group(group.as_deref())?;
            linode.save().await?;
            Ok(vec![linode.fields().to_value()])
        }
        LinodeAction::Delete { id } => {
            let mut linode = linodes.get(*id).await?;
            linode.delete().await?;
            let mut deleted = Map::new();
            deleted.insert("deleted".to_string(), Value::String(linode.endpoint()));
            Ok(vec![Value::Object(deleted)])
        }
    }
}

fn print(values: &[Value], format: OutputFormat) -> Result<()> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(values)?,
        OutputFormat::Yaml => serde_yaml::to_string(values)?,
    };
    println!("{}", rendered);
    Ok(())
}
