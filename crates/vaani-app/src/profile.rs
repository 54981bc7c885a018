use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use vaani_config::Config;

pub const DEFAULT_CONFIG_FILE: &str = "vaani.json";

fn load_file(path: &Path) -> anyhow::Result<Config> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let reader = BufReader::new(file);
    let config: Config = serde_json::from_reader(reader)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(config)
}

/// Explicit path must exist. Without one, `vaani.json` is used when present,
/// otherwise everything comes from the environment.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => {
            tracing::info!("Loading config from {}", path.display());
            load_file(path)?.with_env_secrets()
        }
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            tracing::info!("Loading config from {}", DEFAULT_CONFIG_FILE);
            load_file(Path::new(DEFAULT_CONFIG_FILE))?.with_env_secrets()
        }
        None => {
            tracing::debug!("No config file, using environment");
            Config::new()
        }
    };

    Ok(config)
}
