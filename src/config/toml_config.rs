use crate::core::shuffle::ShuffleSettings;
use crate::core::ConfigProvider;
use crate::utils::error::{DrawError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub roster: RosterConfig,
    pub output: OutputConfig,
    pub draw: DrawConfig,
    pub animation: AnimationConfig,
    pub web: WebConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    pub path: PathBuf,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/participants.csv"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("output"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawConfig {
    /// Winners per round, in order.
    pub rounds: Vec<usize>,
    pub seed: Option<u64>,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            rounds: vec![1],
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub enabled: bool,
    /// How long the names roll before a round is drawn (non-interactive mode).
    pub duration_ms: u64,
    pub initial_interval_ms: u64,
    pub min_interval_ms: u64,
    pub max_interval_ms: u64,
    pub jitter_probability: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            duration_ms: 2000,
            initial_interval_ms: 150,
            min_interval_ms: 100,
            max_interval_ms: 300,
            jitter_probability: 0.2,
        }
    }
}

impl AnimationConfig {
    pub fn shuffle_settings(&self) -> ShuffleSettings {
        ShuffleSettings {
            initial_interval: Duration::from_millis(self.initial_interval_ms),
            min_interval: Duration::from_millis(self.min_interval_ms),
            max_interval: Duration::from_millis(self.max_interval_ms),
            jitter_probability: self.jitter_probability,
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    pub bind: String,
    pub port: u16,
    pub json_logs: bool,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 5000,
            json_logs: false,
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| DrawError::ConfigError {
            message: format!("cannot read {}: {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DrawError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DRAW_DATA_DIR})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DrawError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_path("roster.path", &self.roster.path)?;
        validation::validate_path("output.dir", &self.output.dir)?;

        validation::validate_at_least("draw.rounds", self.draw.rounds.len(), 1)?;
        for count in &self.draw.rounds {
            validation::validate_at_least("draw.rounds", *count, 1)?;
        }

        let animation = &self.animation;
        validation::validate_range(
            "animation.jitter_probability",
            animation.jitter_probability,
            0.0,
            1.0,
        )?;
        validation::validate_at_least(
            "animation.min_interval_ms",
            animation.min_interval_ms as usize,
            1,
        )?;
        validation::validate_range(
            "animation.initial_interval_ms",
            animation.initial_interval_ms,
            animation.min_interval_ms,
            animation.max_interval_ms,
        )?;

        validation::validate_non_empty_string("web.bind", &self.web.bind)?;
        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn participants_path(&self) -> &Path {
        &self.roster.path
    }

    fn output_dir(&self) -> &Path {
        &self.output.dir
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
