// Represents errors that can occur while driving a style component through
// its lifecycle.
//
// Factory failures are carried through the same enum so that a concrete
// style's error reaches the caller of `mount`/`refresh` unchanged, whether
// it was raised synchronously or through a deferred value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    /// The composing type supplied no style factory.
    NotImplemented { component: String },
    /// The rendering engine refused to construct a style object.
    EngineRejected(String),
    /// A failure raised by the base lifecycle.
    Base(String),
    /// The operation is not allowed in the component's current state.
    InvalidState {
        component: String,
        operation: &'static str,
        state: &'static str,
    },
    /// The producer of a deferred value was dropped before resolving it.
    Abandoned,
}

impl std::fmt::Display for LifecycleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LifecycleError::NotImplemented { component } => {
                write!(f, "Not implemented method: createStyle ({component})")
            }
            LifecycleError::EngineRejected(s) => write!(f, "Engine Rejected Style: {s}"),
            LifecycleError::Base(s) => write!(f, "Base Lifecycle Failed: {s}"),
            LifecycleError::InvalidState {
                component,
                operation,
                state,
            } => write!(
                f,
                "Invalid State: cannot {operation} '{component}' while {state}"
            ),
            LifecycleError::Abandoned => {
                write!(f, "Deferred value abandoned before it was resolved")
            }
        }
    }
}

impl std::error::Error for LifecycleError {}

/// A specialized `Result` type for lifecycle operations.
pub type Result<T> = std::result::Result<T, LifecycleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_implemented_message_names_component() {
        let err = LifecycleError::NotImplemented {
            component: "vl-style-custom".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("Not implemented"));
        assert!(text.contains("vl-style-custom"));
    }

    #[test]
    fn test_invalid_state_message() {
        let err = LifecycleError::InvalidState {
            component: "vl-style-fill".to_string(),
            operation: "mount",
            state: "mounted",
        };
        assert_eq!(
            err.to_string(),
            "Invalid State: cannot mount 'vl-style-fill' while mounted"
        );
    }
}
