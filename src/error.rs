use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnnotableError {
    #[error("Declaration error: no annotation names given")]
    EmptyDeclaration,
    #[error("Construction error: method '{method}' has no annotations")]
    NoAnnotations { method: String },
    #[error("Selection error: no annotation names given")]
    EmptySelection,
    #[error("Unknown tag: {0}")]
    UnknownTag(String),
}

pub type Result<T> = std::result::Result<T, AnnotableError>;
