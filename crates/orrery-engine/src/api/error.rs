use crate::assets::manifest::ManifestError;

/// Fatal startup failure. Returned from [`Game::init`](crate::Game::init);
/// the runner refuses to tick a game whose init failed.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("asset manifest: {0}")]
    Manifest(#[from] ManifestError),
}
