use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Main error type for cssprite operations
#[derive(Error, Diagnostic, Debug)]
pub enum SpriteError {
    #[error("Syntax error at {location}: {message}")]
    #[diagnostic(code(cssprite::syntax))]
    Syntax {
        message: String,
        location: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("Image not found: {name}")]
    #[diagnostic(code(cssprite::image::not_found))]
    ImageNotFound {
        name: String,
        #[help]
        help: Option<String>,
    },

    #[error("Failed to decode {name}: {message}")]
    #[diagnostic(
        code(cssprite::image::decode),
        help("only PNG images can be merged into sprites")
    )]
    ImageDecode { name: String, message: String },

    #[error("Failed to read {path}: {message}")]
    #[diagnostic(code(cssprite::read))]
    Read {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Failed to encode sprite: {message}")]
    #[diagnostic(code(cssprite::encode))]
    Encode { message: String },

    #[error("Failed to write {target}: {message}")]
    #[diagnostic(code(cssprite::write))]
    Write { target: String, message: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(cssprite::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("{message}")]
    #[diagnostic(code(cssprite::usage))]
    Usage {
        message: String,
        #[help]
        help: Option<String>,
    },
}

/// Broad classification of a [`SpriteError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad stylesheet, image or manifest data supplied by the caller.
    Input,
    /// Failure producing output.
    Runtime,
    /// Invalid invocation.
    Usage,
}

impl SpriteError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SpriteError::Syntax { .. }
            | SpriteError::ImageNotFound { .. }
            | SpriteError::ImageDecode { .. }
            | SpriteError::Read { .. }
            | SpriteError::Config { .. } => ErrorKind::Input,
            SpriteError::Encode { .. } | SpriteError::Write { .. } => ErrorKind::Runtime,
            SpriteError::Usage { .. } => ErrorKind::Usage,
        }
    }

    /// Process exit status the CLI reports for this error.
    pub fn exit_code(&self) -> i32 {
        match self.kind() {
            ErrorKind::Usage => 2,
            ErrorKind::Input | ErrorKind::Runtime => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, SpriteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        let not_found = SpriteError::ImageNotFound {
            name: "g1.a.png".to_string(),
            help: None,
        };
        assert_eq!(not_found.kind(), ErrorKind::Input);

        let write = SpriteError::Write {
            target: "abc.png".to_string(),
            message: "disk full".to_string(),
        };
        assert_eq!(write.kind(), ErrorKind::Runtime);
        assert_eq!(write.exit_code(), 1);

        let usage = SpriteError::Usage {
            message: "missing --output".to_string(),
            help: None,
        };
        assert_eq!(usage.kind(), ErrorKind::Usage);
        assert_eq!(usage.exit_code(), 2);
    }

    #[test]
    fn test_bad_manifest_is_input_error() {
        let config = SpriteError::Config {
            message: "Invalid manifest".to_string(),
            help: None,
        };
        assert_eq!(config.kind(), ErrorKind::Input);
        assert_eq!(config.exit_code(), 1);
    }

    #[test]
    fn test_display_includes_name() {
        let err = SpriteError::ImageDecode {
            name: "g1.a.png".to_string(),
            message: "bad signature".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to decode g1.a.png: bad signature");
    }
}
