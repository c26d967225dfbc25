use clap::{Args, Parser, Subcommand};
use ferrous_lookup_domain::{AddressFamilyFilter, CliOverrides};
use std::process::ExitCode;
use tracing::info;

mod bootstrap;
mod commands;
mod output;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(name = "ferrous-lookup")]
#[command(version)]
#[command(about = "Ferrous Lookup - asynchronous DNS lookups from the command line")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE", global = true)]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Upstream server, repeatable (`ip`, `ip:port`, `tcp://ip:port`)
    #[arg(long = "server", value_name = "ADDR", global = true)]
    servers: Vec<String>,

    /// Per-query upstream timeout in milliseconds
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    /// Answer from a JSON fixture file instead of the network
    #[arg(long, value_name = "FILE", global = true)]
    fixtures: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Look up the addresses of every NAME (read from stdin when none given)
    Addr(AddrArgs),

    /// Look up records of one type
    General {
        qname: String,
        /// Numeric type, mnemonic or TYPEnnn
        qtype: String,
    },

    /// Resolve once and print the raw response tree as JSON
    Dump { qname: String, qtype: String },

    /// Print the effective engine and upstream settings as JSON
    Context,
}

#[derive(Args)]
struct AddrArgs {
    /// Only accept DNSSEC secured answers
    #[arg(short = 's', long)]
    secure: bool,

    /// IPv4 addresses only
    #[arg(short = '4', conflicts_with = "v6")]
    v4: bool,

    /// IPv6 addresses only
    #[arg(short = '6')]
    v6: bool,

    names: Vec<String>,
}

impl AddrArgs {
    fn family(&self) -> AddressFamilyFilter {
        match (self.v4, self.v6) {
            (true, _) => AddressFamilyFilter::V4Only,
            (_, true) => AddressFamilyFilter::V6Only,
            _ => AddressFamilyFilter::Any,
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        log_level: cli.log_level.clone(),
        servers: cli.servers.clone(),
        timeout_ms: cli.timeout_ms,
        ..CliOverrides::default()
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!(version = env!("CARGO_PKG_VERSION"), "Ferrous Lookup starting");

    let library = bootstrap::build_library(&config, cli.fixtures.as_deref())?;

    let all_succeeded = match cli.command {
        Command::Addr(args) => {
            let names = if args.names.is_empty() {
                commands::read_names(std::io::stdin().lock())?
            } else {
                args.names.clone()
            };
            commands::addr::run(&config, library, &names, args.family(), args.secure)?
        }
        Command::General { qname, qtype } => {
            commands::general::run(&config, library, &qname, &qtype)?
        }
        Command::Dump { qname, qtype } => commands::dump::run(&config, library, &qname, &qtype)?,
        Command::Context => {
            commands::context::run(&config, cli.fixtures.as_deref(), std::io::stdout().lock())?
        }
    };

    Ok(if all_succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
