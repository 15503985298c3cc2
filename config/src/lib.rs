use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// the Linkwarden backup file.
    pub input: PathBuf,
    /// the converted link list.
    pub output: PathBuf,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("backup.json"),
            output: PathBuf::from("output.json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// the converted link list to upload.
    pub input: PathBuf,
    /// base url of the Linksnapper service.
    pub endpoint: String,
    /// max concurrent upload requests.
    pub workers: usize,
    pub timeout_secs: Option<u64>,
    pub progress: bool,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("final.json"),
            endpoint: "http://localhost:8080".to_owned(),
            workers: 5,
            timeout_secs: None,
            progress: true,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub convert: ConvertConfig,
    pub import: ImportConfig,
}

impl Config {
    /// load the given config file, or `config.toml` beside the executable if it exists.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let file = match file {
            Some(f) => {
                if !f.is_file() {
                    bail!("config file {:?} not found", f);
                }
                f.to_path_buf()
            }
            None => {
                let mut work_dir =
                    std::env::current_exe().context("failed to get current execute directory")?;
                work_dir.pop();
                let f = work_dir.join("config.toml");
                if !f.is_file() {
                    log::debug!("no config.toml at {:?}, using defaults", f);
                    return Ok(Config::default());
                }
                f
            }
        };
        Self::from_file(&file)
    }

    pub fn from_file(file: &Path) -> Result<Self> {
        log::debug!("loading config from: {:?}", file);
        let content = std::fs::read_to_string(file)
            .with_context(|| format!("failed to read config {:?}", file))?;
        toml::from_str(&content).with_context(|| format!("failed to parse config {:?}", file))
    }
}

impl ConvertConfig {
    /// override with values given on the command line.
    pub fn merge(&mut self, input: Option<PathBuf>, output: Option<PathBuf>) {
        if let Some(input) = input {
            self.input = input;
        }
        if let Some(output) = output {
            self.output = output;
        }
    }
}

impl ImportConfig {
    /// override with values given on the command line.
    pub fn merge(&mut self, input: Option<PathBuf>, endpoint: Option<String>, workers: Option<usize>) {
        if let Some(input) = input {
            self.input = input;
        }
        if let Some(endpoint) = endpoint {
            self.endpoint = endpoint;
        }
        if let Some(workers) = workers {
            self.workers = workers;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            bail!("import.workers must be at least 1");
        }
        let endpoint = self.endpoint.as_str();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            bail!("import.endpoint must be an http(s) url, got {:?}", endpoint);
        }
        if self.timeout_secs == Some(0) {
            bail!("import.timeout_secs must be greater than 0");
        }
        Ok(())
    }
}
