/// Index of a sync marker inside a timeline's marker list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MarkerIndex {
    /// Not searched for yet.
    #[default]
    Uninitialized,
    /// No marker on this side: the timeline does not loop and the position is
    /// before its first or after its last marker.
    Boundary,
    At(usize),
}

impl MarkerIndex {
    pub fn get(self) -> Option<usize> {
        match self {
            MarkerIndex::At(index) => Some(index),
            _ => None,
        }
    }

    pub fn is_boundary(self) -> bool {
        self == MarkerIndex::Boundary
    }

    pub fn is_uninitialized(self) -> bool {
        self == MarkerIndex::Uninitialized
    }
}

/// The markers directly behind and ahead of a timeline position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct MarkerPair {
    pub prev: MarkerIndex,
    pub next: MarkerIndex,
}

impl MarkerPair {
    pub fn new(prev: MarkerIndex, next: MarkerIndex) -> Self {
        Self { prev, next }
    }

    pub fn is_initialized(&self) -> bool {
        !self.prev.is_uninitialized() && !self.next.is_uninitialized()
    }
}
