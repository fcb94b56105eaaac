//! hero-bridge command-line front end.
//!
//! ```text
//! hero-bridge search  [filters]             list heroes owned by the key file's address
//! hero-bridge bridge  [filters] --hero ID   search, select and bridge in one go
//! hero-bridge shell                         interactive session
//! hero-bridge seal-key                      write an encrypted key file
//! ```
//!
//! The passphrase comes from `HERO_BRIDGE_PASSPHRASE` or one line of stdin.

use clap::{Args, Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use zeroize::Zeroizing;

use hero_bridge::blockchain::Wallet;
use hero_bridge::bridge::BridgeEvent;
use hero_bridge::config::{load_or_default, BridgeConfig};
use hero_bridge::directory::{ClassFilter, HeroSummary, Profession, Realm, SearchFilters};
use hero_bridge::observability::logging::init_logging;
use hero_bridge::vault::{KeyVault, PrivateKey};
use hero_bridge::Session;

const PASSPHRASE_ENV: &str = "HERO_BRIDGE_PASSPHRASE";
const PRIVATE_KEY_ENV: &str = "HERO_BRIDGE_PRIVATE_KEY";

#[derive(Parser)]
#[command(name = "hero-bridge")]
#[command(about = "Search DeFi Kingdoms heroes and bridge them between realms", long_about = None)]
struct Cli {
    /// Configuration file; built-in defaults are used when it does not exist
    #[arg(short, long, global = true, default_value = "hero-bridge.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List heroes owned by the key file's address
    Search(FilterArgs),
    /// Search, select and bridge heroes, then wait for the run to finish
    Bridge {
        #[command(flatten)]
        filters: FilterArgs,

        /// Hero ids to bridge (comma separated or repeated)
        #[arg(long = "hero", value_delimiter = ',')]
        heroes: Vec<u64>,

        /// Bridge every hero the search returns
        #[arg(long, conflicts_with = "heroes")]
        all: bool,
    },
    /// Interactive session: search, select and bridge while runs are in flight
    Shell,
    /// Encrypt the key in HERO_BRIDGE_PRIVATE_KEY into a key file
    SealKey {
        /// Output path; defaults to the configured key file or hero-bridge.key in key_dir
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Clone)]
struct FilterArgs {
    /// Main class: 7, 0-11, 2,3 or [2;3]
    #[arg(long)]
    main_class: Option<ClassFilter>,

    /// Sub class, same forms as --main-class
    #[arg(long)]
    sub_class: Option<ClassFilter>,

    #[arg(long, default_value_t = 0)]
    min_summons: u32,

    #[arg(long, default_value_t = 999)]
    max_summons: u32,

    #[arg(long, default_value_t = 0)]
    min_gen: u32,

    #[arg(long, default_value_t = 999)]
    max_gen: u32,

    /// 0 common .. 4 mythic
    #[arg(long, default_value_t = 0)]
    min_rarity: u8,

    #[arg(long, default_value_t = 4)]
    max_rarity: u8,

    #[arg(long, default_value_t = 1)]
    min_level: u32,

    #[arg(long, default_value_t = 20)]
    max_level: u32,

    /// crystalvale (dfk) or serendale (kla)
    #[arg(long = "realm", value_delimiter = ',')]
    realms: Vec<Realm>,

    /// foraging, fishing, gardening or mining
    #[arg(long = "profession", value_delimiter = ',')]
    professions: Vec<Profession>,
}

impl FilterArgs {
    fn to_filters(&self) -> SearchFilters {
        SearchFilters {
            main_class: self.main_class.clone().unwrap_or_default(),
            sub_class: self.sub_class.clone().unwrap_or_default(),
            summons: self.min_summons..=self.max_summons,
            generation: self.min_gen..=self.max_gen,
            rarity: self.min_rarity..=self.max_rarity,
            level: self.min_level..=self.max_level,
            realms: self.realms.iter().copied().collect(),
            professions: self.professions.iter().copied().collect(),
        }
    }
}

/// One line typed into the shell.
#[derive(Parser)]
#[command(no_binary_name = true, disable_help_flag = true)]
enum ShellCommand {
    /// Run a search with the given filters
    Search(FilterArgs),
    /// Show the last search results
    Results,
    /// Show the selection
    Selected,
    /// Add heroes from the results to the selection
    Select { ids: Vec<u64> },
    /// Remove heroes from the selection
    Deselect { ids: Vec<u64> },
    /// Flip heroes in or out of the selection
    Toggle { ids: Vec<u64> },
    /// Select all results, or clear them if all are selected
    All,
    /// Bridge the selection in the background
    Bridge,
    /// Quit the shell
    #[command(alias = "exit")]
    Quit,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_or_default(&cli.config)?;
    init_logging(&config.observability.log_level);

    tracing::debug!(config = %cli.config.display(), networks = config.networks.len(), "Configuration loaded");

    match cli.command {
        Commands::Search(filters) => run_search(&config, &filters).await,
        Commands::Bridge {
            filters,
            heroes,
            all,
        } => run_bridge(&config, &filters, &heroes, all).await,
        Commands::Shell => run_shell(&config).await,
        Commands::SealKey { out } => seal_key(&config, out),
    }
}

fn read_passphrase() -> io::Result<Zeroizing<String>> {
    if let Ok(passphrase) = std::env::var(PASSPHRASE_ENV) {
        return Ok(Zeroizing::new(passphrase));
    }

    eprint!("Passphrase: ");
    io::stderr().flush()?;
    let mut line = Zeroizing::new(String::new());
    io::stdin().lock().read_line(&mut line)?;
    Ok(Zeroizing::new(line.trim_end_matches(['\r', '\n']).to_string()))
}

async fn run_search(config: &BridgeConfig, filters: &FilterArgs) -> Result<(), Box<dyn std::error::Error>> {
    let passphrase = read_passphrase()?;
    let mut session = Session::from_config(config)?;

    let heroes = session.search(&passphrase, &filters.to_filters()).await?;
    for hero in heroes {
        println!("{}", HeroSummary(hero));
    }
    println!("Total heroes found: {}", heroes.len());
    Ok(())
}

async fn run_bridge(
    config: &BridgeConfig,
    filters: &FilterArgs,
    hero_ids: &[u64],
    all: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let passphrase = read_passphrase()?;
    let mut session = Session::from_config(config)?;

    let found = session.search(&passphrase, &filters.to_filters()).await?.len();
    println!("Total heroes found: {}", found);

    if all {
        session.select_all_toggle();
    } else {
        for id in hero_ids {
            session.select(*id)?;
        }
    }

    for (tag, error) in session.orchestrator().verify_networks().await {
        eprintln!("Warning: network {} failed verification: {}", tag, error);
    }

    let handle = session.start_bridge(&passphrase).await?;
    while let Some(event) = session.next_event().await {
        let finished = matches!(event, BridgeEvent::Finished(_));
        print_event(&event);
        if finished {
            break;
        }
    }

    let summary = handle.await?;
    if summary.failed > 0 {
        return Err(format!("{} of {} heroes failed to bridge", summary.failed, summary.failed + summary.confirmed).into());
    }
    Ok(())
}

async fn run_shell(config: &BridgeConfig) -> Result<(), Box<dyn std::error::Error>> {
    let passphrase = read_passphrase()?;
    let mut session = Session::from_config(config)?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Commands: search [filters], results, selected, select|deselect|toggle <ids>, all, bridge, quit");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let words = line.split_whitespace().collect::<Vec<_>>();
                if words.is_empty() {
                    continue;
                }

                let command = match ShellCommand::try_parse_from(words) {
                    Ok(command) => command,
                    Err(e) => {
                        eprintln!("{}", e);
                        continue;
                    }
                };
                if matches!(command, ShellCommand::Quit) {
                    break;
                }
                handle_shell_command(&mut session, &passphrase, command).await;
            }
            Some(event) = session.next_event() => print_event(&event),
        }
    }

    if session.is_bridging() {
        eprintln!("Bridge run still in progress; pending transactions keep going on-chain.");
    }
    Ok(())
}

async fn handle_shell_command(session: &mut Session, passphrase: &str, command: ShellCommand) {
    match command {
        ShellCommand::Search(filters) => match session.search(passphrase, &filters.to_filters()).await {
            Ok(heroes) => {
                for hero in heroes {
                    println!("{}", HeroSummary(hero));
                }
                println!("Total heroes found: {}", heroes.len());
            }
            Err(e) => eprintln!("{}", e),
        },
        ShellCommand::Results => {
            for hero in session.results() {
                let mark = if session.selection().contains(hero.id) { "*" } else { " " };
                println!("{} {}", mark, HeroSummary(hero));
            }
        }
        ShellCommand::Selected => {
            for hero in session.selection().iter() {
                println!("{}", HeroSummary(hero));
            }
            println!("{} selected", session.selection().len());
        }
        ShellCommand::Select { ids } => {
            for id in ids {
                if let Err(e) = session.select(id) {
                    eprintln!("{}", e);
                }
            }
        }
        ShellCommand::Deselect { ids } => {
            for id in ids {
                session.deselect(id);
            }
        }
        ShellCommand::Toggle { ids } => {
            for id in ids {
                if let Err(e) = session.toggle(id) {
                    eprintln!("{}", e);
                }
            }
        }
        ShellCommand::All => {
            session.select_all_toggle();
            println!("{} selected", session.selection().len());
        }
        ShellCommand::Bridge => match session.start_bridge(passphrase).await {
            Ok(_) => println!("Bridge run started for {} heroes", session.selection().len()),
            Err(e) => eprintln!("{}", e),
        },
        ShellCommand::Quit => {}
    }
}

fn print_event(event: &BridgeEvent) {
    match event {
        BridgeEvent::Log(line) => println!("{}", line),
        BridgeEvent::StateChanged { hero_id, state } => {
            tracing::debug!(hero_id, ?state, "Hero state changed");
        }
        BridgeEvent::Removed(_) | BridgeEvent::Outcome(_) => {}
        BridgeEvent::Finished(summary) => println!(
            "Bridge run finished: {} confirmed, {} failed",
            summary.confirmed, summary.failed
        ),
    }
}

fn seal_key(config: &BridgeConfig, out: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let raw = Zeroizing::new(
        std::env::var(PRIVATE_KEY_ENV).map_err(|_| format!("{} is not set", PRIVATE_KEY_ENV))?,
    );
    let key = PrivateKey::new(raw.to_string());
    let address = Wallet::from_private_key(key.expose_secret())?.address();

    let path = out.unwrap_or_else(|| match &config.vault.key_file {
        Some(path) => PathBuf::from(path),
        None => PathBuf::from(&config.vault.key_dir).join("hero-bridge.key"),
    });

    let passphrase = read_passphrase()?;
    KeyVault::at(&path).seal(&key, &passphrase)?;
    println!("Sealed key for {} into {}", address, path.display());
    Ok(())
}
