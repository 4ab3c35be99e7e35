use anyhow::Result;
use clap::Parser;
use trophic_core::{init_logging, AppConfig};
use trophic_lib::cli::{Args, Mode};
use trophic_lib::headless;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = AppConfig::load(&args.config)?;
    args.apply(&mut config);
    config.validate()?;
    init_logging(&config.log.filter);

    match args.mode {
        Mode::Serve => trophic_server::serve(&config).await?,
        Mode::Headless => {
            tracing::info!("Running in headless mode");
            let request = args.start_request();
            let ticks = args.ticks;
            let run_config = config.clone();
            // Ticks may block on the worker pool; keep them off the runtime.
            let summary =
                tokio::task::spawn_blocking(move || headless::run(&run_config, &request, ticks))
                    .await??;
            tracing::info!(
                ticks = summary.ticks,
                plants = summary.census.plants,
                herbivores = summary.census.herbivores,
                carnivores = summary.census.carnivores,
                "Headless simulation finished"
            );
            if args.dump {
                println!("{}", serde_json::to_string(&summary.snapshot)?);
            }
        }
    }

    Ok(())
}
