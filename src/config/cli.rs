use crate::config::toml_config::TomlConfig;
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "lucky-draw")]
#[command(about = "Draw random winners from a CSV participant list")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Participants CSV (needs 'department' and 'name' columns)
    #[arg(long)]
    pub participants: Option<PathBuf>,

    /// Directory that receives round_N.csv files
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Winners per round, e.g. --rounds 3,2,1
    #[arg(long, value_delimiter = ',')]
    pub rounds: Vec<usize>,

    /// Seed the draw for a reproducible result
    #[arg(long)]
    pub seed: Option<u64>,

    /// Skip the rolling name display
    #[arg(long)]
    pub no_animation: bool,

    /// Wait for Enter to start and stop each round; accepts reset/import commands between rounds
    #[arg(short, long)]
    pub interactive: bool,

    /// How long names roll before each draw, in milliseconds
    #[arg(long)]
    pub shuffle_ms: Option<u64>,

    /// Print the results as JSON
    #[arg(long)]
    pub json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Load the config file (or defaults) and apply command line overrides on top.
    pub fn resolve(&self) -> Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        // 命令列參數優先於設定檔
        if let Some(path) = &self.participants {
            config.roster.path = path.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output.dir = dir.clone();
        }
        if !self.rounds.is_empty() {
            config.draw.rounds = self.rounds.clone();
        }
        if self.seed.is_some() {
            config.draw.seed = self.seed;
        }
        if self.no_animation {
            config.animation.enabled = false;
        }
        if let Some(ms) = self.shuffle_ms {
            config.animation.duration_ms = ms;
        }

        Ok(config)
    }
}
