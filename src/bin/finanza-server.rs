extern crate structopt;
#[macro_use]
extern crate slog;
extern crate slog_async;
extern crate slog_term;
use finanza_bridge::thread_pool::{NaiveThreadPool, SharedQueueThreadPool, ThreadPool};
use finanza_bridge::{FinanzaHandler, FinanzaServer, Result};
use slog::{Drain, Logger};
use std::str::FromStr;
use structopt::StructOpt;

#[derive(StructOpt)]
struct Opt {
    #[structopt(short = "V", long = "version")]
    version: bool,
    #[structopt(long, global = true, default_value = "127.0.0.1:8080")]
    addr: String,
    /// Text sent in the greeting line of every connection
    #[structopt(long, default_value = "Conectado ao Finanza Server")]
    banner: String,
    /// Thread pool flavour: naive or shared
    #[structopt(long)]
    pool: Option<Pool>,
    #[structopt(long, default_value = "10")]
    threads: usize,
}

#[derive(Clone, Copy, Debug)]
enum Pool {
    Naive,
    Shared,
}

impl FromStr for Pool {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "naive" => Ok(Pool::Naive),
            "shared" => Ok(Pool::Shared),
            other => Err(format!("unknown pool: {}", other)),
        }
    }
}

const DEFAULT_POOL: Pool = Pool::Shared;

fn main() -> Result<()> {
    let opt = Opt::from_args();
    if opt.version {
        println!(env!("CARGO_PKG_VERSION"));
        return Ok(());
    }
    let pool = match opt.pool {
        Some(pool) => pool,
        None => DEFAULT_POOL,
    };
    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();
    let log = slog::Logger::root(
        drain,
        o!("version" => env!("CARGO_PKG_VERSION"), "pool" => format!("{:?}", pool), "addr" => opt.addr.clone()),
    );
    info!(log, "Starting server");
    match pool {
        Pool::Naive => run::<NaiveThreadPool>(&opt, log),
        Pool::Shared => run::<SharedQueueThreadPool>(&opt, log),
    }
}

fn run<P: ThreadPool>(opt: &Opt, log: Logger) -> Result<()> {
    let pool = P::new(opt.threads)?;
    let server = FinanzaServer::new(opt.addr.clone(), FinanzaHandler, log, pool)?
        .with_banner(opt.banner.clone());
    server.start()
}
