//! Node types of the alpha-beta search.

/// Node outside the principal variation, searched with a null window.
pub struct NonPV;

/// Node on the principal variation, searched with a full window.
pub struct PV;

/// Compile-time node type specialization.
pub trait NodeType {
    /// Whether this is a PV node.
    const PV_NODE: bool;
}

impl NodeType for NonPV {
    const PV_NODE: bool = false;
}

impl NodeType for PV {
    const PV_NODE: bool = true;
}
