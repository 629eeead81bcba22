//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors raised while building or searching trees.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("nil parameter: {name}")]
    NilParameter { name: String },

    #[error("children producer failed: {message}")]
    Producer {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("failed to build tree{}: {source}", location(.stage, .ordinal))]
    BuildFailure {
        stage: Option<usize>,
        ordinal: Option<usize>,
        #[source]
        source: Box<DomainError>,
    },

    #[error("traversal failed{}: {source}", location(.stage, &None))]
    TraversalFailure {
        stage: Option<usize>,
        #[source]
        source: Box<DomainError>,
    },
}

fn location(stage: &Option<usize>, ordinal: &Option<usize>) -> String {
    match (*stage, *ordinal) {
        (Some(s), Some(o)) => format!(" at stage {} (element {})", s, o),
        (Some(s), None) => format!(" at stage {}", s),
        (None, Some(o)) => format!(" (element {})", o),
        (None, None) => String::new(),
    }
}

impl DomainError {
    pub fn nil_parameter(name: impl Into<String>) -> Self {
        Self::NilParameter { name: name.into() }
    }

    /// Producer failure carrying an underlying cause.
    pub fn producer(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Producer {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub(crate) fn build_failure(source: DomainError) -> Self {
        Self::BuildFailure {
            stage: None,
            ordinal: None,
            source: Box::new(source),
        }
    }

    pub(crate) fn traversal_failure(source: DomainError) -> Self {
        Self::TraversalFailure {
            stage: None,
            source: Box::new(source),
        }
    }

    /// Tag a build or traversal failure with the cascade position it happened at.
    ///
    /// Other variants are wrapped as a build failure when an ordinal is given,
    /// otherwise as a traversal failure.
    pub(crate) fn at_stage(self, stage: usize, ordinal: Option<usize>) -> Self {
        match self {
            Self::BuildFailure { source, .. } => Self::BuildFailure {
                stage: Some(stage),
                ordinal,
                source,
            },
            Self::TraversalFailure { source, .. } => Self::TraversalFailure {
                stage: Some(stage),
                source,
            },
            other if ordinal.is_some() => Self::BuildFailure {
                stage: Some(stage),
                ordinal,
                source: Box::new(other),
            },
            other => Self::TraversalFailure {
                stage: Some(stage),
                source: Box::new(other),
            },
        }
    }

    /// Innermost domain error, looking through build/traversal wrappers.
    pub fn root_cause(&self) -> &DomainError {
        match self {
            Self::BuildFailure { source, .. } | Self::TraversalFailure { source, .. } => {
                source.root_cause()
            }
            other => other,
        }
    }

    pub fn is_nil_parameter(&self) -> bool {
        matches!(self.root_cause(), Self::NilParameter { .. })
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
