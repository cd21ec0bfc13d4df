use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use wordmap_common::{logger, AppConfig};
use wordmap_vector::{explore, parse_top_n, EmbeddingStore, Exploration, VocabFormat};

/// Find project root by looking for .git directory
fn find_project_root() -> Option<PathBuf> {
    let mut current_dir = std::env::current_dir().ok()?;

    loop {
        if current_dir.join(".git").exists() {
            return Some(current_dir);
        }

        if !current_dir.pop() {
            break;
        }
    }

    None
}

/// Load .env file from project root
fn load_dotenv_from_project_root() {
    if let Some(root) = find_project_root() {
        let env_path = root.join(".env");
        if env_path.exists() {
            dotenv::from_path(&env_path).ok();
        }
    } else {
        dotenv::dotenv().ok();
    }
}

#[derive(Parser)]
#[command(name = "wordmap")]
#[command(about = "Wordmap - nearest words in an embedding vocabulary, projected to 2D", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(long)]
        port: Option<u16>,

        #[command(flatten)]
        vocab: VocabArgs,
    },

    /// Print the nearest words and their 2D coordinates
    Neighbors {
        /// Word to look up
        word: String,

        /// Number of neighbors (falls back to 5 when not a positive integer)
        #[arg(long, default_value = "5")]
        topn: String,

        #[command(flatten)]
        vocab: VocabArgs,
    },
}

#[derive(clap::Args)]
struct VocabArgs {
    /// Vocabulary file
    #[arg(long)]
    vocab: Option<PathBuf>,

    /// Vocabulary format (auto, text, binary)
    #[arg(long)]
    format: Option<String>,
}

impl VocabArgs {
    fn apply(self, config: &mut AppConfig) {
        if let Some(path) = self.vocab {
            config.vocab_path = path;
        }
        if let Some(format) = self.format {
            config.vocab_format = format;
        }
    }
}

#[actix_web::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    load_dotenv_from_project_root();

    let mut config = AppConfig::from_env()?;

    match cli.command {
        Some(Commands::Serve { host, port, vocab }) => {
            if let Some(host) = host {
                config.server_host = host;
            }
            if let Some(port) = port {
                config.server_port = port;
            }
            vocab.apply(&mut config);
            serve(config).await?;
        }
        Some(Commands::Neighbors { word, topn, vocab }) => {
            vocab.apply(&mut config);
            logger::setup_console_logging(&config.log_level)?;
            let exploration = run_neighbors(&config, &word, &topn)?;
            print_exploration(&exploration);
        }
        None => serve(config).await?,
    }

    Ok(())
}

async fn serve(config: AppConfig) -> Result<()> {
    config.validate()?;
    logger::setup_logging(&config)?;

    tracing::info!("Wordmap starting...");
    tracing::info!("  Vocabulary: {}", config.vocab_path.display());
    tracing::info!("  Address: {}", config.server_bind_address());

    println!("Server listening on http://{}", config.server_bind_address());

    wordmap_server::start_server(config).await?;
    Ok(())
}

/// Load the vocabulary and explore one word
///
/// Request-level failures come back carrying the message shown to users.
fn run_neighbors(config: &AppConfig, word: &str, topn: &str) -> Result<Exploration> {
    config.validate()?;

    let format: VocabFormat = config.vocab_format.parse()?;
    let store = EmbeddingStore::load(&config.vocab_path, format)?;

    match explore(&store, word.trim(), parse_top_n(Some(topn))) {
        Ok(exploration) => Ok(exploration),
        Err(e) if e.is_recoverable() => Err(anyhow!(e.user_message())),
        Err(e) => Err(e.into()),
    }
}

fn print_exploration(exploration: &Exploration) {
    println!("{}", exploration.title());
    for (rank, neighbor) in exploration.neighbors.iter().enumerate() {
        println!("{:>3}. {}\t{:.4}", rank + 1, neighbor.word, neighbor.score);
    }

    println!();
    println!("2D projection:");
    for point in &exploration.points {
        let marker = if point.is_query { " *" } else { "" };
        println!("  {}\t{:>9.4}\t{:>9.4}{}", point.label, point.x, point.y, marker);
    }
}
