//! ResNet Serving Client CLI
//!
//! Sends a preprocessed image to a remote model-serving endpoint,
//! repeats the request to collect a latency distribution, and reports
//! the majority-vote prediction (plus accuracy when a target label is
//! given).

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use resnet_client::utils::logging::{init_logging, LogConfig};
use resnet_client::{
    ClientConfig, ImageSource, ImageTensor, InferenceRunner, PredictRequest, ServingClient,
};

/// ResNet serving client and latency benchmark
///
/// A thin client for an image classification model served over HTTP.
/// The input can be a URL or a local file path.
#[derive(Parser, Debug)]
#[command(name = "resnet_client")]
#[command(version)]
#[command(about = "Client and latency benchmark for a ResNet serving endpoint", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, default_value = "false")]
    verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

/// Flags shared by every subcommand that talks to the server
#[derive(clap::Args, Debug)]
struct ServerArgs {
    /// Server URL to connect to, including scheme
    #[arg(long)]
    server_url: Option<String>,

    /// Server REST port
    #[arg(long)]
    server_port: Option<u16>,

    /// Model path on the server (without the predict verb)
    #[arg(long)]
    server_model: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Optional TOML config file; flags override file values
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify an image via the serving endpoint and measure latency
    Infer {
        /// URL or local path of the image
        #[arg(short, long)]
        source: String,

        /// Known class label of the image, enables accuracy reporting
        #[arg(short, long)]
        target: Option<usize>,

        /// Number of timed requests
        #[arg(short, long)]
        requests: Option<usize>,

        /// Number of warmup requests before measurement
        #[arg(long)]
        warmup: Option<usize>,

        /// Skip warmup entirely
        #[arg(long, default_value = "false")]
        no_warmup: bool,

        /// Write the full report as JSON to this path
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        server: ServerArgs,
    },

    /// Query the model status endpoint
    Status {
        #[command(flatten)]
        server: ServerArgs,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_config = if cli.verbose {
        LogConfig::verbose()
    } else {
        LogConfig::default()
    };

    let _ = init_logging(&log_config);

    match cli.command {
        Commands::Infer {
            source,
            target,
            requests,
            warmup,
            no_warmup,
            output,
            server,
        } => cmd_infer(
            &source,
            target,
            requests,
            warmup,
            no_warmup,
            output.as_deref(),
            &server,
        ),

        Commands::Status { server } => cmd_status(&server),
    }
}

/// Merge the config file (if any) with CLI overrides
fn resolve_config(args: &ServerArgs) -> Result<ClientConfig> {
    let mut config = match &args.config {
        Some(path) => ClientConfig::from_toml(path)?,
        None => ClientConfig::default(),
    };

    if let Some(url) = &args.server_url {
        config.server.base_url = url.clone();
    }
    if let Some(port) = args.server_port {
        config.server.port = port;
    }
    if let Some(model) = &args.server_model {
        config.server.model_path = model.clone();
    }
    if let Some(timeout) = args.timeout_secs {
        config.request.timeout_secs = timeout;
    }

    Ok(config)
}

fn cmd_infer(
    source: &str,
    target: Option<usize>,
    requests: Option<usize>,
    warmup: Option<usize>,
    no_warmup: bool,
    output: Option<&Path>,
    server: &ServerArgs,
) -> Result<()> {
    let mut config = resolve_config(server)?;

    if let Some(requests) = requests {
        config.request.num_requests = requests;
    }
    if let Some(warmup) = warmup {
        config.request.warmup_requests = warmup;
    }
    if no_warmup {
        config.request.warmup_requests = 0;
    }
    config.validate()?;

    println!(
        "Using {} as the backend!",
        config.server.predict_url().green().bold()
    );

    let resolved = ImageSource::resolve(source);
    info!("Input resolved as {}: {}", kind_label(&resolved), resolved);

    let bytes = resolved.read(config.request.timeout())?;
    let tensor = ImageTensor::from_bytes(&bytes)?;
    info!(
        "Decoded image: {}x{} pixels",
        tensor.width(),
        tensor.height()
    );

    let request = PredictRequest::single(tensor.to_instance());
    let client = ServingClient::new(&config.server, config.request.timeout())?;
    let runner = InferenceRunner::new(client, config.request.clone());

    let report = runner.run(&request, target)?;

    println!(
        "Prediction class: {}, avg latency: {} ms",
        report.prediction.to_string().magenta().bold(),
        format!("{:.3}", report.latency.mean_ms).magenta().bold()
    );
    println!(
        "  P50/P95/P99: {:.2}/{:.2}/{:.2} ms | Min/Max: {:.2}/{:.2} ms",
        report.latency.p50_ms,
        report.latency.p95_ms,
        report.latency.p99_ms,
        report.latency.min_ms,
        report.latency.max_ms
    );
    if let Some(accuracy) = report.accuracy {
        println!(
            "\t Metrics with targets --> {}: {}",
            "Accuracy".bold(),
            accuracy
        );
    }

    if let Some(path) = output {
        report.save(path)?;
        println!("Saved report to: {}", path.display().to_string().cyan());
    }

    Ok(())
}

fn cmd_status(server: &ServerArgs) -> Result<()> {
    let config = resolve_config(server)?;
    config.server.validate()?;

    println!(
        "Querying {}",
        config.server.status_url().green().bold()
    );

    let client = ServingClient::new(&config.server, config.request.timeout())?;
    let status = client.status()?;

    println!("{}", serde_json::to_string_pretty(&status)?);
    Ok(())
}

fn kind_label(source: &ImageSource) -> &'static str {
    if source.is_remote() {
        "URL"
    } else {
        "file"
    }
}
