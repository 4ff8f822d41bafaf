use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use emotion_detector::classifier::EmotionDetector;
use emotion_detector::classifier::watson::WatsonTransport;
use emotion_detector::config::{DetectorConfig, ServerConfig};
use emotion_detector::consts::{DEFAULT_BIND, DEFAULT_ENDPOINT, DEFAULT_MODEL_ID, DEFAULT_TIMEOUT};
use emotion_detector::{report, server};

#[derive(Parser)]
#[command(
    name = "emotion-detector",
    version,
    about = "Find the dominant emotion in a piece of text."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Address the HTTP server listens on
    #[arg(short, long, global = true, env = "EMOTION_DETECTOR_BIND", default_value = DEFAULT_BIND)]
    bind: String,

    #[command(flatten)]
    detector: DetectorArgs,
}

#[derive(Args)]
struct DetectorArgs {
    /// Emotion prediction endpoint
    #[arg(long, global = true, env = "EMOTION_API_URL", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Model id sent to the prediction service
    #[arg(long, global = true, env = "EMOTION_MODEL_ID", default_value = DEFAULT_MODEL_ID)]
    model_id: String,

    /// Upstream request timeout in seconds
    #[arg(
        long,
        global = true,
        env = "EMOTION_API_TIMEOUT",
        default_value_t = DEFAULT_TIMEOUT.as_secs(),
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout: u64,
}

impl From<DetectorArgs> for DetectorConfig {
    fn from(args: DetectorArgs) -> Self {
        Self {
            endpoint: args.endpoint,
            model_id: args.model_id,
            timeout: Duration::from_secs(args.timeout),
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Classify a single statement and exit
    Classify {
        /// Text to analyze
        text: String,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,emotion_detector=debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let detector_config = DetectorConfig::from(cli.detector);
    let transport = WatsonTransport::new(&detector_config)?;
    let detector = EmotionDetector::new(Arc::new(transport));

    match cli.command {
        Some(Command::Classify { text }) => {
            let classification = detector.classify(&text).await;
            println!("{}", report::render(&classification));
        }
        Some(Command::Serve) | None => {
            let config = ServerConfig {
                bind: cli.bind,
                detector: detector_config,
            };
            server::serve(&config, detector).await?;
        }
    }
    Ok(())
}
