use clap::Parser;
use trophic_core::AppConfig;
use trophic_data::StartRequest;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// How to run the simulation
    #[arg(short, long, value_enum, default_value = "serve")]
    pub mode: Mode,

    /// Custom config file path
    #[arg(short, long, default_value = "trophic.toml")]
    pub config: String,

    /// Seed override for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Port override for serve mode
    #[arg(long)]
    pub port: Option<u16>,

    /// Ticks to run in headless mode
    #[arg(long, default_value_t = 100)]
    pub ticks: u64,

    /// Initial plants in headless mode
    #[arg(long, default_value_t = 40)]
    pub plants: u32,

    /// Initial herbivores in headless mode
    #[arg(long, default_value_t = 20)]
    pub herbivores: u32,

    /// Initial carnivores in headless mode
    #[arg(long, default_value_t = 5)]
    pub carnivores: u32,

    /// Print the final grid as JSON when a headless run ends
    #[arg(long)]
    pub dump: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// HTTP server
    Serve,
    /// Run ticks in-process and log population figures
    Headless,
}

impl Args {
    /// Applies command-line overrides on top of the file configuration.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(seed) = self.seed {
            config.engine.seed = Some(seed);
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
    }

    #[must_use]
    pub fn start_request(&self) -> StartRequest {
        StartRequest::new(self.plants, self.herbivores, self.carnivores)
    }
}
