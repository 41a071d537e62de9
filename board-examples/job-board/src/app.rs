use board_core::{BoardConfig, BoardConfigSnapshot};

pub const ENV_PREFIX: &str = "JOBBOARD";

/// Defaults, then `JOBBOARD__*` overrides from the environment.
pub fn board_config() -> BoardConfigSnapshot {
    let mut config = defaults();
    config.load_env(ENV_PREFIX);
    config.snapshot()
}

pub fn defaults() -> BoardConfig {
    let mut config = BoardConfig::new();
    config.set("data.dir", "./data");
    config.set("log.filter", "info");
    config
}
