use clap::Parser;

use sweep_cli::{cli::Args, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    telemetry::init_tracing(args.log_json, args.log_level);
    sweep_cli::run(args).await
}
