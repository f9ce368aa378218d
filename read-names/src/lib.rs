//! Reading compressed codepoint name tables
//!
//! This crate provides zero-allocation lookup of names in the tables produced
//! by [`write-names`]. It is intended to run on small targets where the tables
//! live in a read-only data segment, and is `no_std` when the default `std`
//! feature is disabled.
//!
//! The tables store each name as an optional index into a pool of shared
//! prefixes, plus a suffix. Keys are not stored per name: the [`sequence`]
//! table records only where a run of consecutive keys begins, and the row of
//! any other key is inferred from its distance to the start of its run.
//! An optional list of named key ranges (Unicode blocks, for example) is
//! stored alongside, and can be searched with [`NameTables::block_name`].
//!
//! # Example
//!
//! ```no_run
//! # let path_to_tables = std::path::Path::new("");
//! use read_names::NameTables;
//! let bytes = std::fs::read(path_to_tables).unwrap();
//! let tables = NameTables::new(&bytes).expect("malformed name tables");
//! if let Some(name) = tables.name(0x1F600) {
//!     println!("U+1F600 {name}");
//! }
//! ```
//!
//! [`write-names`]: https://docs.rs/write-names/

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(any(feature = "std", test))]
#[macro_use]
extern crate std;

#[cfg(all(not(feature = "std"), not(test)))]
#[macro_use]
extern crate core as std;

mod raw;
mod read;
pub mod sequence;
mod table_data;
pub mod tables;

pub use raw::{BigEndian, FixedSize, Scalar};
pub use read::{ReadError, TableRead};
pub use table_data::TableData;
pub use tables::{Name, NameTables};
