//! Mirroring of an input directory tree into an output location.
//!
//! [`MirrorTree::walk`] collects every directory and regular file below an
//! input root together with its destination below the output root, and
//! classifies each file by extension into a [`FileKind`].

mod copy;
mod tree;

pub use copy::{CopyError, copy_preserving_metadata};
pub use tree::{FileKind, MirrorFile, MirrorTree, WalkError};
