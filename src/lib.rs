//! Fully persistent collections built on fat nodes.
//!
//! Every collection here is a cheap snapshot handle. Mutating methods take
//! `&self` and return a new snapshot, and any snapshot, old or new, can be
//! read and edited again, so histories branch freely.
//!
//! All snapshots descended from one empty collection share a single
//! backbone of fat nodes, each storing one payload per version id, and a
//! single [VersionCounter] handing out those ids. A snapshot itself only
//! records which version is active for each of its positions.
//!
//! Three collections are provided:
//! - [PersistentArray]: positions map to fixed slots; O(1) reads and `set`,
//!   inserts and removes rewrite the tail.
//! - [PersistentList]: a doubly linked chain; interior edits write a
//!   constant number of entries, reads walk from the nearer end.
//! - [PersistentMap]: a hash map whose chains are rewritten per version.
//!
//! Snapshots are `Send` and `Sync` whenever their payloads are. Edits to a
//! version tree are serialised by a lock on its backbone; reads proceed
//! concurrently.
//!
//! The backbone never forgets: every version written stays reachable by
//! the snapshots holding it, and memory grows with the total number of
//! edits ever made to the tree.

pub mod error;
pub mod fatnode;
pub mod version;

mod root;

pub mod array;
pub mod list;
pub mod map;
pub mod sequence;

#[cfg(feature = "proptest")]
pub mod strategy;

pub use array::PersistentArray;
pub use error::OutOfRange;
pub use list::PersistentList;
pub use map::PersistentMap;
pub use sequence::PersistentSequence;
pub use version::{VersionCounter, VersionId};
