use cellgraph_model::ModelError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{kind} is missing required field `id`")]
    MissingId { kind: &'static str },

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("Unknown cell id `{id}` in {action} operation")]
    UnknownCell { action: &'static str, id: String },

    #[error("Invalid diagram XML: {message}")]
    Xml { message: String },

    #[error("Invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown template `{name}` (available: {available})")]
    UnknownTemplate { name: String, available: String },

    #[error("Document has no pages")]
    EmptyDocument,
}

impl From<roxmltree::Error> for Error {
    fn from(err: roxmltree::Error) -> Self {
        Self::Xml {
            message: err.to_string(),
        }
    }
}
