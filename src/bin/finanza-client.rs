extern crate structopt;
#[macro_use]
extern crate slog;
extern crate slog_async;
extern crate slog_term;
use finanza_bridge::{Bridge, BridgeOptions, Command, FinanzaClient, Result, ServerConfig};
use serde::Serialize;
use slog::{Drain, Level, LevelFilter};
use std::process;
use std::time::Duration;
use structopt::StructOpt;

#[derive(StructOpt)]
struct Opt {
    #[structopt(short = "V", long = "version")]
    version: bool,
    #[structopt(long, global = true, default_value = "localhost", env = "FINANZA_SERVER_HOST")]
    host: String,
    #[structopt(long, global = true, default_value = "8080", env = "FINANZA_SERVER_PORT")]
    port: u16,
    #[structopt(long = "timeout-ms", global = true, default_value = "5000")]
    timeout_ms: u64,
    /// Substring identifying the server's greeting line
    #[structopt(long, global = true, default_value = "Conectado ao Finanza Server")]
    greeting: String,
    /// Log bridge activity to stderr
    #[structopt(short, long, global = true)]
    verbose: bool,
    #[structopt(subcommand)]
    cmd: Option<Cmd>,
}

#[derive(StructOpt)]
enum Cmd {
    #[structopt(name = "ping")]
    Ping,
    /// Report reachability, never fails
    #[structopt(name = "test")]
    Test,
    /// Report reachability with timing, never fails
    #[structopt(name = "status")]
    Status,
    /// Send a raw JSON command
    #[structopt(name = "send")]
    Send { json: String },
    #[structopt(name = "login")]
    Login { email: String, senha: String },
    #[structopt(name = "register")]
    Register {
        nome: String,
        email: String,
        senha: String,
    },
    #[structopt(name = "sync-user")]
    SyncUser { user_id: i64 },
    #[structopt(name = "sync-accounts")]
    SyncAccounts { user_id: i64 },
    #[structopt(name = "sync-transactions")]
    SyncTransactions { user_id: i64 },
    #[structopt(name = "sync-categories")]
    SyncCategories,
}

fn main() {
    let opt = Opt::from_args();
    if opt.version {
        println!(env!("CARGO_PKG_VERSION"));
        return;
    }
    let cmd = match opt.cmd {
        Some(ref cmd) => cmd,
        None => process::exit(1),
    };
    let server = ServerConfig::new(opt.host.clone(), opt.port);
    let level = if opt.verbose { Level::Debug } else { Level::Warning };
    let decorator = slog_term::TermDecorator::new().stderr().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();
    let drain = LevelFilter::new(drain, level).fuse();
    let log = slog::Logger::root(
        drain,
        o!("version" => env!("CARGO_PKG_VERSION"), "server" => server.to_string()),
    );
    let options = BridgeOptions {
        timeout: Duration::from_millis(opt.timeout_ms),
        greeting_marker: Some(opt.greeting.clone()).filter(|marker| !marker.is_empty()),
    };
    let client = FinanzaClient::new(server, Bridge::new(options, log));

    if let Err(e) = run(&client, cmd) {
        eprintln!("{}", e);
        process::exit(1);
    }
}

fn run(client: &FinanzaClient, cmd: &Cmd) -> Result<()> {
    match cmd {
        Cmd::Ping => print(&client.ping()?),
        Cmd::Test => print(&client.test_connection()),
        Cmd::Status => print(&client.status()),
        Cmd::Send { json } => {
            let cmd: Command = serde_json::from_str(json)?;
            print(&client.send(&cmd)?)
        }
        Cmd::Login { email, senha } => print(&client.login(email, senha)?),
        Cmd::Register { nome, email, senha } => print(&client.register(nome, email, senha)?),
        Cmd::SyncUser { user_id } => print(&client.sync_user(*user_id)?),
        Cmd::SyncAccounts { user_id } => print(&client.sync_accounts(*user_id)?),
        Cmd::SyncTransactions { user_id } => print(&client.sync_transactions(*user_id)?),
        Cmd::SyncCategories => print(&client.sync_categories()?),
    }
}

fn print<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
