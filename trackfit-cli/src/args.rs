//! Command-line arguments shared by the binaries, and how they layer over
//! `trackfit.toml`.

use std::path::PathBuf;

use clap::Args;
use trackfit_core::config::TrackfitConfig;

/// Flags every binary accepts.
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Config file (defaults to ./trackfit.toml when present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Exercises root directory override
    #[arg(long, value_name = "DIR")]
    pub exercises_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

/// Flags for binaries that call the inference endpoint.
#[derive(Args, Debug, Clone, Default)]
pub struct LlmArgs {
    /// Model identifier override
    #[arg(long)]
    pub model: Option<String>,

    /// Inference server base URL override
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,
}

impl CommonArgs {
    /// Load the config file and apply flag overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit config file is missing or any config
    /// file is invalid.
    pub fn load_config(&self) -> trackfit_core::error::Result<TrackfitConfig> {
        let mut config = TrackfitConfig::load(self.config.as_deref())?;
        if let Some(dir) = &self.exercises_dir {
            config.catalog.exercises_dir.clone_from(dir);
        }
        Ok(config)
    }
}

impl LlmArgs {
    /// Apply model and URL overrides to `config`.
    pub fn apply(&self, config: &mut TrackfitConfig) {
        if let Some(model) = &self.model {
            config.llm.model.clone_from(model);
        }
        if let Some(url) = &self.base_url {
            config.llm.base_url.clone_from(url);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_config_values() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("trackfit.toml");
        std::fs::write(&path, "[catalog]\nexercises_dir = \"from-file\"\n").expect("write");

        let common = CommonArgs {
            config: Some(path),
            exercises_dir: Some(PathBuf::from("from-flag")),
            verbose: false,
        };
        let mut config = common.load_config().expect("load");
        assert_eq!(config.catalog.exercises_dir, PathBuf::from("from-flag"));

        LlmArgs {
            model: Some("llama3.1:8b".into()),
            base_url: None,
        }
        .apply(&mut config);
        assert_eq!(config.llm.model, "llama3.1:8b");
        assert_eq!(config.llm.base_url, "http://localhost:11434");
    }
}
