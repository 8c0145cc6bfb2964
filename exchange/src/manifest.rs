//! Frame manifest: the fixed-length integer block that opens every frame.
//!
//! Layout (four little-endian u64 words):
//!
//! | word | meaning                                   |
//! |------|-------------------------------------------|
//! | 0    | frame kind code                           |
//! | 1    | owner tag (container / registry tag)      |
//! | 2    | entry count `n`                           |
//! | 3    | owner's next-tag counter                  |

use std::fmt;

/// Number of words in a manifest.
pub const MANIFEST_WORDS: usize = 4;

/// What kind of object a frame carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameKind {
    /// A constraint container.
    Container,
    /// A single hypothesis (nested inside a registry frame).
    Hypothesis,
    /// A hypothesis registry.
    Registry,
}

impl FrameKind {
    /// Wire code of this kind.
    pub fn code(&self) -> u64 {
        match self {
            FrameKind::Container => 1,
            FrameKind::Hypothesis => 2,
            FrameKind::Registry => 3,
        }
    }

    /// Decode a wire code.
    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            1 => Some(FrameKind::Container),
            2 => Some(FrameKind::Hypothesis),
            3 => Some(FrameKind::Registry),
            _ => None,
        }
    }
}

impl fmt::Display for FrameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameKind::Container => write!(f, "container"),
            FrameKind::Hypothesis => write!(f, "hypothesis"),
            FrameKind::Registry => write!(f, "registry"),
        }
    }
}

/// The manifest of one frame. Built fresh for every send and every receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Manifest {
    /// Raw kind code (validated by the receiver, not here).
    pub kind: u64,
    /// Tag of the object that owns the serialized collection.
    pub owner_tag: u64,
    /// Number of label/payload pairs that follow.
    pub count: u64,
    /// The owner's next-tag counter at send time.
    pub next_tag: u64,
}

impl Manifest {
    pub fn new(kind: FrameKind, owner_tag: u64, count: u64, next_tag: u64) -> Self {
        Self {
            kind: kind.code(),
            owner_tag,
            count,
            next_tag,
        }
    }

    /// Words in wire order.
    pub fn to_words(&self) -> [u64; MANIFEST_WORDS] {
        [self.kind, self.owner_tag, self.count, self.next_tag]
    }

    /// Rebuild from words in wire order.
    pub fn from_words(words: [u64; MANIFEST_WORDS]) -> Self {
        Self {
            kind: words[0],
            owner_tag: words[1],
            count: words[2],
            next_tag: words[3],
        }
    }

    /// Decoded kind, if the code is known.
    pub fn frame_kind(&self) -> Option<FrameKind> {
        FrameKind::from_code(self.kind)
    }
}
