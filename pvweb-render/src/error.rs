use pvweb_format::DecodeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Layer metadata was requested for a layer the description does not list.
    #[error("scene description has no entry for layer {0}")]
    InvalidSceneLayer(usize),

    #[error("viewer has not been created")]
    ViewerNotCreated,

    #[error("invalid scene description: {0}")]
    Description(#[from] serde_json::Error),

    #[error("invalid reader options: {0}")]
    Options(#[from] toml::de::Error),
}

pub type SceneResult<T> = Result<T, SceneError>;
