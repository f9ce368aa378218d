//! Building compressed codepoint name tables
//!
//! Character names tend to repeat long runs of words between neighbouring
//! codepoints: "Latin Capital Letter A", "Latin Capital Letter B", and so on.
//! This crate compresses a sorted list of `(key, name)` pairs by factoring
//! these runs into a pool of shared prefixes, so each name is stored as an
//! optional prefix index and a (usually short) suffix.
//!
//! Prefixes are discovered with a bounded lookback: each new name is compared
//! against the previous [`window_size`](BuildOptions::window_size) names, and
//! the word-aligned prefix that best covers the window is applied to the new
//! name and, retroactively, to the window entries that share it.
//!
//! Named key ranges, such as Unicode blocks, can be added with
//! [`NameTableBuilder::add_block`] and are stored alongside the names.
//!
//! The resulting [`NameTables`] can be queried directly, or serialized with
//! [`dump_tables`] into the compact binary form read by the [`read`] crate.
//!
//! # Example
//!
//! ```
//! use write_names::{dump_tables, NameTables};
//!
//! let tables = NameTables::from_entries([
//!     (0x41, "Latin Capital Letter A"),
//!     (0x42, "Latin Capital Letter B"),
//!     (0x1F600, "Grinning Face"),
//! ])
//! .unwrap();
//! assert_eq!(tables.prefixes.len(), 1);
//! assert_eq!(tables.name(0x42).as_deref(), Some("Latin Capital Letter B"));
//!
//! let bytes = dump_tables(&tables).unwrap();
//! let loaded = write_names::read::NameTables::new(&bytes).unwrap();
//! assert_eq!(loaded.name(0x1F600).unwrap(), "Grinning Face");
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![deny(rustdoc::broken_intra_doc_links)]

/// Expose the crate used to read serialized tables.
pub extern crate read_names as read;

pub mod blocks;
mod builder;
mod error;
mod options;
pub mod pool;
pub mod prefix;
pub mod sequence;
mod tables;
pub mod validate;
mod write;

pub use blocks::{short_block_name, BlockRange};
pub use builder::{BuilderRecord, NameTableBuilder};
pub use error::Error;
pub use options::{BuildOptions, DEFAULT_MIN_PREFIX_LEN, DEFAULT_WINDOW_SIZE};
pub use pool::{NameRecord, PrefixPool};
pub use sequence::{build_sequence_table, SequenceRecord};
pub use tables::{NameTables, TableStats};
pub use write::{dump_tables, StringPool, TableWrite, TableWriter};
