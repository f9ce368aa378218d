//! The pre-serialization validation pass

use std::fmt::{Debug, Display};

use read_names::tables::{EMPTY_SUFFIX, NO_PREFIX};

use crate::{
    blocks::BlockRange,
    pool::{NameRecord, PrefixPool},
    sequence::SequenceRecord,
    tables::NameTables,
};

/// Strings are stored with a single length byte.
pub const MAX_STRING_LEN: usize = u8::MAX as usize;

/// Pre-serialization validation of tables.
///
/// The serialized format imposes limits that are awkward to encode in the
/// type system, such as the length of each string and the number of
/// prefixes. Tables built by the [`NameTableBuilder`](crate::NameTableBuilder)
/// uphold the structural invariants, but may still exceed these limits.
pub trait Validate {
    /// Ensure that this table is well-formed, reporting any errors.
    fn validate(&self) -> Result<(), ValidationReport> {
        let mut ctx = Default::default();
        self.validate_impl(&mut ctx);
        if ctx.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationReport { errors: ctx.errors })
        }
    }

    /// Validate this table.
    ///
    /// If you need to implement this directly, it should look something like:
    ///
    /// ```rust
    /// # use write_names::validate::{Validate, ValidationCtx};
    /// struct MyRecord {
    ///     my_values: Vec<u16>,
    /// }
    ///
    /// impl Validate for MyRecord {
    ///     fn validate_impl(&self, ctx: &mut ValidationCtx) {
    ///         ctx.in_table("MyRecord", |ctx| {
    ///             ctx.in_field("my_values", |ctx| {
    ///                 if self.my_values.len() > (u16::MAX as usize) {
    ///                     ctx.report("array is too long");
    ///                 }
    ///             })
    ///         })
    ///     }
    /// }
    /// ```
    fn validate_impl(&self, ctx: &mut ValidationCtx);
}

/// A context for collecting validation errors.
///
/// This is responsible for tracking the position in the tables at which
/// a given error is reported.
#[derive(Clone, Debug, Default)]
pub struct ValidationCtx {
    cur_location: Vec<LocationElem>,
    errors: Vec<ValidationError>,
}

#[derive(Debug, Clone)]
struct ValidationError {
    error: String,
    location: Vec<LocationElem>,
}

/// One or more validation errors.
pub struct ValidationReport {
    errors: Vec<ValidationError>,
}

#[derive(Debug, Clone)]
enum LocationElem {
    Table(&'static str),
    Field(&'static str),
    Index(usize),
}

impl ValidationCtx {
    /// Run the provided closure in the context of a new table.
    pub fn in_table(&mut self, name: &'static str, f: impl FnOnce(&mut ValidationCtx)) {
        self.with_elem(LocationElem::Table(name), f);
    }

    /// Run the provided closure in the context of a new field.
    pub fn in_field(&mut self, name: &'static str, f: impl FnOnce(&mut ValidationCtx)) {
        self.with_elem(LocationElem::Field(name), f);
    }

    /// Run the provided closure in the context of an array.
    pub fn in_array(&mut self, f: impl FnOnce(&mut ValidationCtx)) {
        self.with_elem(LocationElem::Index(0), f);
    }

    /// Run the provided closure in the context of a new array item.
    ///
    /// This must only be called in a closure passed to [in_array][Self::in_array].
    pub fn array_item(&mut self, f: impl FnOnce(&mut ValidationCtx)) {
        assert!(matches!(
            self.cur_location.last(),
            Some(LocationElem::Index(_))
        ));
        f(self);
        match self.cur_location.last_mut() {
            Some(LocationElem::Index(i)) => *i += 1,
            _ => panic!("array_item called outside of array"),
        }
    }

    /// Report a new error, associating it with the current path.
    pub fn report(&mut self, msg: impl Display) {
        self.errors.push(ValidationError {
            location: self.cur_location.clone(),
            error: msg.to_string(),
        });
    }

    fn with_elem(&mut self, elem: LocationElem, f: impl FnOnce(&mut ValidationCtx)) {
        self.cur_location.push(elem);
        f(self);
        self.cur_location.pop();
    }
}

impl ValidationReport {
    /// The number of errors in this report.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let [error] = self.errors.as_slice() {
            return writeln!(f, "Validation error:\n{error}");
        }

        writeln!(f, "{} validation errors:", self.errors.len())?;
        for (i, error) in self.errors.iter().enumerate() {
            writeln!(f, "#{}\n{error}", i + 1)?;
        }
        Ok(())
    }
}

impl Debug for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as Display>::fmt(self, f)
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "\"{}\"", self.error)?;
        write!(f, "in: ")?;
        for elem in &self.location {
            match elem {
                LocationElem::Table(name) => write!(f, "{name}"),
                LocationElem::Field(name) => write!(f, ".{name}"),
                LocationElem::Index(idx) => write!(f, "[{idx}]"),
            }?;
        }
        writeln!(f)
    }
}

impl<T: Validate> Validate for Vec<T> {
    fn validate_impl(&self, ctx: &mut ValidationCtx) {
        ctx.in_array(|ctx| {
            for item in self.iter() {
                ctx.array_item(|ctx| {
                    item.validate_impl(ctx);
                })
            }
        });
    }
}

fn check_string_len(ctx: &mut ValidationCtx, string: &str) {
    if string.len() > MAX_STRING_LEN {
        ctx.report(format!(
            "string is {} bytes, the limit is {MAX_STRING_LEN}",
            string.len()
        ));
    }
}

impl Validate for PrefixPool {
    fn validate_impl(&self, ctx: &mut ValidationCtx) {
        if self.len() >= NO_PREFIX as usize {
            ctx.report(format!(
                "{} prefixes, the limit is {}",
                self.len(),
                NO_PREFIX - 1
            ));
        }
        let prefixes = self.iter().collect::<Vec<_>>();
        if prefixes.windows(2).any(|pair| pair[0] >= pair[1]) {
            ctx.report("prefixes must be sorted and unique");
        }
        ctx.in_array(|ctx| {
            for prefix in prefixes {
                ctx.array_item(|ctx| {
                    if prefix.is_empty() {
                        ctx.report("prefix must not be empty");
                    }
                    check_string_len(ctx, prefix);
                })
            }
        });
    }
}

impl Validate for NameRecord {
    fn validate_impl(&self, ctx: &mut ValidationCtx) {
        ctx.in_field("suffix", |ctx| check_string_len(ctx, &self.suffix));
    }
}

impl Validate for BlockRange {
    fn validate_impl(&self, ctx: &mut ValidationCtx) {
        if self.start > self.end {
            ctx.report(format!(
                "block 0x{:04X}..=0x{:04X} ends before it starts",
                self.start, self.end
            ));
        }
        ctx.in_field("name", |ctx| check_string_len(ctx, &self.name));
    }
}

impl Validate for NameTables {
    fn validate_impl(&self, ctx: &mut ValidationCtx) {
        ctx.in_table("NameTables", |ctx| {
            ctx.in_field("prefixes", |ctx| self.prefixes.validate_impl(ctx));
            ctx.in_field("names", |ctx| {
                if self.names.len() > u32::MAX as usize {
                    ctx.report("too many names");
                }
                self.names.validate_impl(ctx);
                ctx.in_array(|ctx| {
                    for record in &self.names {
                        ctx.array_item(|ctx| match record.prefix_index {
                            Some(index) if index as usize >= self.prefixes.len() => ctx
                                .report(format!(
                                    "prefix index {index} out of range for {} prefixes",
                                    self.prefixes.len()
                                )),
                            _ => (),
                        })
                    }
                });
            });
            ctx.in_field("sequences", |ctx| self.validate_sequences(ctx));
            ctx.in_field("blocks", |ctx| {
                if self.blocks.len() > u16::MAX as usize {
                    ctx.report(format!(
                        "{} blocks, the limit is {}",
                        self.blocks.len(),
                        u16::MAX
                    ));
                }
                if self
                    .blocks
                    .windows(2)
                    .any(|pair| pair[0].end >= pair[1].start)
                {
                    ctx.report("blocks must be sorted and must not overlap");
                }
                self.blocks.validate_impl(ctx);
            });
            ctx.in_field("max_name_len", |ctx| {
                let max_len = self.max_name_len();
                if max_len > u16::MAX as usize {
                    ctx.report(format!("longest name is {max_len} bytes"));
                }
            });
            ctx.in_field("string_data", |ctx| {
                let block_bytes = self
                    .blocks
                    .iter()
                    .map(|block| block.name.len() + 1)
                    .sum::<usize>();
                // offsets are 32 bits, and the largest value is reserved
                if self.stats().encoded_bytes + block_bytes >= EMPTY_SUFFIX as usize {
                    ctx.report("string data too large for 32-bit offsets");
                }
            });
        })
    }
}

impl NameTables {
    fn validate_sequences(&self, ctx: &mut ValidationCtx) {
        match self.sequences.first() {
            None if !self.names.is_empty() => {
                ctx.report("names without any sequence records");
            }
            Some(first) if first.name_index != 0 => {
                ctx.report("first sequence record must start at row 0");
            }
            _ => (),
        }
        if self
            .sequences
            .windows(2)
            .any(|pair| pair[0].key >= pair[1].key || pair[0].name_index >= pair[1].name_index)
        {
            ctx.report("sequence records must be strictly increasing");
        }
        ctx.in_array(|ctx| {
            for (i, record) in self.sequences.iter().enumerate() {
                ctx.array_item(|ctx| {
                    if record.name_index as usize >= self.names.len() {
                        ctx.report(format!(
                            "name index {} out of range for {} names",
                            record.name_index,
                            self.names.len()
                        ));
                        return;
                    }
                    self.validate_run_len(ctx, record, self.sequences.get(i + 1));
                })
            }
        });
    }

    /// Every row of a run must be reachable from a key: the run may not
    /// reach the start of the next run, or go past the largest key.
    fn validate_run_len(
        &self,
        ctx: &mut ValidationCtx,
        record: &SequenceRecord,
        next: Option<&SequenceRecord>,
    ) {
        match next {
            Some(next) if next.key > record.key && next.name_index > record.name_index => {
                let rows = next.name_index - record.name_index;
                let keys = next.key - record.key;
                if rows > keys {
                    ctx.report(format!(
                        "run of {rows} names at 0x{:04X} overlaps the run at 0x{:04X}",
                        record.key, next.key
                    ));
                }
            }
            // unordered pairs are reported above
            Some(_) => (),
            None => {
                let rows = (self.names.len() - record.name_index as usize) as u64;
                let last_key = record.key as u64 + rows - 1;
                if last_key > u32::MAX as u64 {
                    ctx.report(format!(
                        "run of {rows} names at 0x{:04X} extends past the largest key",
                        record.key
                    ));
                }
            }
        }
    }
}
