use crate::value::Kind;
use thiserror::Error;

/// Why a stored value could not be turned into the requested type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoerceError {
    /// Text was present but did not parse as the target type
    #[error("cannot parse {input:?} as {target}")]
    Parse { target: Kind, input: String },
    /// The stored representation has no conversion to the target type
    #[error("no conversion from {from} to {to}")]
    Incompatible { from: Kind, to: Kind },
    /// The stored value is a typed null
    #[error("null {kind} cannot become {target}")]
    Null { kind: Kind, target: Kind },
    /// A NaN or infinite float has no decimal form
    #[error("non-finite float cannot become {target}")]
    NonFinite { target: Kind },
}

/// Errors reported by the strict accessors of [`NameValues`](crate::NameValues)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    /// The requested name is not in the collection
    #[error("name not found: {0}")]
    KeyNotFound(String),
    /// The name exists but its value could not be converted
    #[error("value of {name:?} is unusable: {source}")]
    Coerce {
        name: String,
        #[source]
        source: CoerceError,
    },
}
