//! Filesystem operations: substitution, content rewriting and the tree walk.

mod atomic;
mod entry;
mod helpers;
mod meta;
mod node;
mod rewrite;
mod substitute;
mod text;
mod util;
mod walk;

pub use atomic::try_atomic_rename;
pub use entry::run;
pub use helpers::{describe_io_error, io_error_with_help};
pub use node::{FsNode, NodeKind};
pub use rewrite::{RewriteOutcome, rewrite_contents, write_atomic};
pub use substitute::{RenamePlan, Substitution};
pub use text::{SNIFF_LEN, looks_like_text};
pub use util::{TEMP_PREFIX, TEMP_SUFFIX};
pub use walk::{TreeWalker, WalkReport};
