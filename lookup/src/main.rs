use std::process::ExitCode;

use configuration::LookupConfiguration;
use domain_name_query_types::QType;
use domain_name_resolver::Resolver;
use tracing_subscriber::EnvFilter;

mod cli_args;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args: cli_args::CliArgs = argh::from_env();

    // stdout carries only the answer
    let default_level = if args.verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match configuration::get_config::<LookupConfiguration>(args.config.clone()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("failed to load config {}: {}", args.config.display(), e);
            return ExitCode::FAILURE;
        }
    };
    tracing::debug!("config: {:?}", config);

    let resolver = Resolver::udp(&config);
    let result = match args.upstream.or(config.resolver.upstream) {
        Some(upstream) => resolver.resolve_via_upstream(&args.domain, QType::A, upstream).await,
        None => resolver.resolve(&args.domain, QType::A).await,
    };

    match result {
        Ok(addr) => {
            println!("{}", addr);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}: {}", args.domain, e);
            ExitCode::FAILURE
        }
    }
}
