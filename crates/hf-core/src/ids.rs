use core::fmt;
use core::num::NonZeroU32;

/// Position of a node, boundary or link inside a thermal network.
///
/// Stored off by one in a `NonZeroU32` so `Option<Id>` costs nothing extra.
/// IDs are handed out in insertion order and stay valid for the life of the
/// network they came from.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(NonZeroU32);

impl Id {
    /// ID of the `index`-th object (0-based).
    pub fn from_index(index: u32) -> Self {
        Self(NonZeroU32::MIN.saturating_add(index))
    }

    pub fn index(self) -> u32 {
        self.0.get() - 1
    }

    /// The 0-based index as a slice position.
    #[inline]
    pub fn slot(self) -> usize {
        self.index() as usize
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

pub type NodeId = Id;
pub type LinkId = Id;
pub type BoundaryId = Id;
