//! Error types for the CSR graph builder.
//!
//! Defines the error enum exposed by the public API, its stable codes, and a
//! convenient result alias.

use std::fmt;

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Error produced while buffering or compressing a graph.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GraphError {
    /// The caller's expected vertex count disagrees with the number of
    /// equivalence classes present after merging.
    #[error(
        "expected {expected} vertices after merging, but the graph has {actual} equivalence classes"
    )]
    VertexCountMismatch {
        /// Vertex count supplied to `finalize`.
        expected: usize,
        /// Number of distinct equivalence classes actually present.
        actual: usize,
    },
    /// Bulk insertion received row and column slices of different lengths.
    #[error("coordinate column table has {columns} entries but row table has {rows}")]
    CoordinateLengthMismatch {
        /// Length of the row (source vertex) slice.
        rows: usize,
        /// Length of the column (target vertex) slice.
        columns: usize,
    },
    /// An internal invariant was violated, indicating a logic error.
    #[error("CSR invariant violated: {invariant}")]
    InvariantViolation {
        /// Name of the violated invariant to assist debugging.
        invariant: &'static str,
    },
}

define_error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    enum GraphErrorCode for GraphError {
        /// Expected vertex count disagrees with the merged class count.
        VertexCountMismatch => VertexCountMismatch { .. } => "CSR_VERTEX_COUNT_MISMATCH",
        /// Bulk insertion slices had different lengths.
        CoordinateLengthMismatch => CoordinateLengthMismatch { .. } => "CSR_COORDINATE_LENGTH_MISMATCH",
        /// An internal invariant was violated.
        InvariantViolation => InvariantViolation { .. } => "CSR_INVARIANT_VIOLATION",
    }
}

/// Convenient alias for results returned by the graph builder.
pub type Result<T> = core::result::Result<T, GraphError>;
