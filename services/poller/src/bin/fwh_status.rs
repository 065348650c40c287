//! `fwh-status`: print the live power flows of a FranklinWH site

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use config::{ClientSettings, Credentials, DEFAULT_CREDENTIALS_PATH};
use network::HttpTransport;
use poller::{write_sample, CredentialPrompt, SampleFormat, SamplePlan, StatusPoller};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "fwh-status", author, version, about, long_about = None)]
struct Args {
    /// Account email (with --newlogin)
    #[arg(long)]
    email: Option<String>,

    /// Comma separated aGate serial numbers (with --newlogin)
    #[arg(long)]
    devices: Option<String>,

    /// Credentials file
    #[arg(long, default_value = DEFAULT_CREDENTIALS_PATH)]
    config: PathBuf,

    /// Optional TOML file with client settings
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Prompt for credentials and save them to --config
    #[arg(long)]
    newlogin: bool,

    /// Print the whole status record instead of the power table
    #[arg(long)]
    debug: bool,

    /// Number of samples; zero or less polls until interrupted
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    poll: i64,

    /// Seconds between samples; zero takes a single sample
    #[arg(long, default_value_t = 0)]
    delay: u64,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn init_logging(fallback: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let settings = ClientSettings::from_toml_with_env_overrides(args.settings.as_deref())?;

    let credentials = if args.newlogin {
        CredentialPrompt::terminal().collect(args.email.as_deref(), args.devices.as_deref())?
    } else {
        Credentials::load(&args.config).with_context(|| {
            format!(
                "no usable credentials in {} (run with --newlogin)",
                args.config.display()
            )
        })?
    };

    let transport = HttpTransport::new(&settings)?;
    let session = transport
        .authenticate(&credentials)
        .await
        .context("unable to authenticate a connection")?;

    if args.newlogin {
        credentials.save(&args.config)?;
        info!("Saved credentials to {}", args.config.display());
    }

    let format = if args.debug {
        SampleFormat::Debug
    } else {
        SampleFormat::Table
    };
    let plan = SamplePlan::new(args.poll, Duration::from_secs(args.delay));
    let mut poller = StatusPoller::new(session, settings.initial_backoff());

    let sampling = poller.run(plan, |index, record| {
        if let Err(e) = write_sample(&mut io::stdout().lock(), format, index, record) {
            warn!("Failed to write sample {}: {}", index, e);
        }
    });

    tokio::select! {
        result = sampling => {
            result.context("failed to obtain status")?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted, stopping");
        }
    }

    Ok(())
}
