//! Content validation errors.
//!
//! All of these are construction-time fatal: a [`super::Content`] that
//! fails validation never becomes usable, so the engine can assume every
//! reference it meets at runtime resolves.

use super::LayerId;
use crate::formula::FormulaError;

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ContentError {
    #[error("layer at position {expected} declares id {found}")]
    LayerIdMismatch { expected: LayerId, found: LayerId },

    #[error("duplicate layer slug '{slug}'")]
    DuplicateSlug { slug: String },

    #[error("{context} references unknown layer {layer}")]
    UnknownLayer {
        context: &'static str,
        layer: LayerId,
    },

    #[error("layer '{slug}' appears in the tree more than once")]
    DuplicateTreeNode { slug: String },

    #[error("branch endpoint '{slug}' is not a tree node")]
    BranchEndpointNotInTree { slug: String },

    #[error("branch graph cycle reachable from layer '{slug}'")]
    CyclicBranch { slug: String },

    #[error("invalid conversion formula on layer '{slug}': {source}")]
    InvalidFormula {
        slug: String,
        #[source]
        source: FormulaError,
    },
}
