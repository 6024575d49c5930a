use std::path::PathBuf;

use duel_engine::{DuelError, Side};

#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error(transparent)]
    Engine(#[from] DuelError),

    #[error("{side} was offered no abilities")]
    EmptyOffer { side: Side },

    #[error("the duel is already over")]
    DuelOver,

    #[error("failed to read config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
