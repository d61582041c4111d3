use thiserror::Error;

/// Everything that can go wrong during one submission.
///
/// `Display` yields the message shown to the user; the payload carries the
/// underlying detail, which only goes to the log.
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("Por favor, selecciona una imagen.")]
    Validation,

    #[error("No se pudo cargar la imagen")]
    Decode(String),

    /// Raster surface could not be set up. The `image` backend allocates its
    /// buffers infallibly, so the normalizer never produces this; it stays so
    /// the error vocabulary covers backends that can fail here.
    #[error("Canvas no soportado")]
    CanvasUnavailable,

    #[error("toBlob falló")]
    Encode(String),

    #[error("Error en la petición")]
    Network(String),

    #[error("No se pudo procesar la petición.")]
    Parse(String),

    #[error("No se pudo guardar el historial.")]
    Storage(String),
}

impl SubmitError {
    /// Underlying cause for logging, when there is one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            SubmitError::Decode(d)
            | SubmitError::Encode(d)
            | SubmitError::Network(d)
            | SubmitError::Parse(d)
            | SubmitError::Storage(d) => Some(d),
            _ => None,
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Endpoint must be an absolute http(s) URL, got '{0}'")]
    InvalidEndpoint(String),
}
