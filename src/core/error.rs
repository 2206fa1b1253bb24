//! Error types for the logging pipeline

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// A callable offered as a stage does not have a recognized shape
    #[error("InvalidMapperFunc {type_name}")]
    InvalidMapperFunc { type_name: String },

    /// The mapper being called is unset
    #[error("NilMapperFunc")]
    NilMapperFunc,

    /// The mapper was called without an event
    #[error("NilEvent")]
    NilEvent,

    /// A stage failed while processing an event
    #[error("Map error idx {index} ev {event}: {source}")]
    Stage {
        index: usize,
        event: String,
        #[source]
        source: Box<LoggerError>,
    },

    /// A stage panicked while processing an event
    #[error("Stage #{index} panicked: {message}")]
    StagePanicked { index: usize, message: String },

    /// No context was attached to the carrier
    #[error("No context attached to carrier")]
    ContextNotFound,

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Sink error with sink name
    #[error("Sink error ({sink}): {message}")]
    Sink { sink: String, message: String },

    /// Error raised by caller-supplied stage logic
    #[error(transparent)]
    Source(#[from] Box<dyn std::error::Error + Send + Sync>),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create an invalid mapper error naming the offending type
    pub fn invalid_mapper(type_name: impl Into<String>) -> Self {
        LoggerError::InvalidMapperFunc {
            type_name: type_name.into(),
        }
    }

    /// Wrap a stage error with the stage position and the event it was given
    pub fn stage(index: usize, event: impl Into<String>, source: LoggerError) -> Self {
        LoggerError::Stage {
            index,
            event: event.into(),
            source: Box::new(source),
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a sink error
    pub fn sink(sink: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::Sink {
            sink: sink.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }

    /// The innermost error below any stage wrapping
    pub fn root_cause(&self) -> &LoggerError {
        let mut err = self;
        while let LoggerError::Stage { source, .. } = err {
            err = source;
        }
        err
    }

    /// Stage positions from the outermost wrapping inwards
    pub fn stage_path(&self) -> Vec<usize> {
        let mut path = Vec::new();
        let mut err = self;
        while let LoggerError::Stage { index, source, .. } = err {
            path.push(*index);
            err = source;
        }
        path
    }
}
