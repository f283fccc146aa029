use clap::Parser;
use dotenv::dotenv;
use log::info;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
mod config;
mod models;
mod services;
mod traits;
mod utils;
use config::GenesisConfig;
use models::KeygenError;
use services::{GenesisKeyGenerator, NodeKeyTool, VALIDATOR_COUNT};

/// Derive genesis authority and root keys from $SECRET and print them as
/// chain_spec literals.
#[derive(Parser, Debug)]
#[command(name = "genesis-keys")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Node binary providing the `key` subcommand
    #[arg(long, value_name = "PATH")]
    node_bin: Option<PathBuf>,

    /// Chain passed to `key insert`
    #[arg(long)]
    chain: Option<String>,

    /// Directory under which per-validator keystores are created
    #[arg(long, value_name = "DIR")]
    base_path: Option<PathBuf>,

    /// Referral name prefix; prompted for when omitted
    #[arg(long)]
    referral: Option<String>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Prompts on `prompt` and reads one line from `input`. End of input is an error.
fn read_referral<R: BufRead, W: Write>(
    input: &mut R,
    prompt: &mut W,
) -> Result<String, KeygenError> {
    write!(prompt, "Referral name: ")?;
    prompt.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(KeygenError::MissingReferral);
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

async fn run(cli: Cli) -> Result<(), KeygenError> {
    // The secret is checked before anything else touches the terminal or the node binary.
    let mut config = GenesisConfig::load()?;
    if let Some(node_bin) = cli.node_bin {
        config.node_binary = node_bin;
    }
    if let Some(chain) = cli.chain {
        config.chain = chain;
    }
    if let Some(base_path) = cli.base_path {
        config.base_path = base_path;
    }

    let referral = match cli.referral {
        Some(referral) => referral,
        None => read_referral(&mut io::stdin().lock(), &mut io::stderr())?,
    };
    info!(
        "Generating {} authorities for referral prefix {:?} on chain {}",
        VALIDATOR_COUNT, referral, config.chain
    );

    let tool = NodeKeyTool::new(config.node_binary.clone());
    let generator = GenesisKeyGenerator::new(config, tool);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    generator.run(&referral, &mut out).await?;
    out.flush()?;
    Ok(())
}

#[tokio::main]
async fn main() {
    // Load .env file
    dotenv().ok();

    let cli = Cli::parse();
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(log_level));

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
