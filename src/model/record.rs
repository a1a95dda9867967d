//! The generic record abstraction shared by every list surface.
//!
//! A record type declares its identifier and a closed set of fields. Search
//! fields, field filters and export columns are all expressed in terms of
//! `Record::Field`, so a column or filter naming a field that the record does
//! not have is a compile error rather than a silent miss.

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// A named field of a record type.
///
/// Implemented by a fieldless enum per record type.
pub trait RecordField: Copy + Eq + Hash + Ord + Debug + 'static {
    /// Every field, in declaration order.
    fn all() -> &'static [Self];

    /// Stable machine name (used in config and logs).
    fn name(self) -> &'static str;

    /// Parse a machine name back into a field.
    fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|f| f.name() == name)
    }
}

/// A row managed by a record table.
pub trait Record: Clone + Debug {
    /// Unique identifier, required on every record.
    type Id: Clone + Eq + Hash + Ord + Debug + Display;

    /// The declared field set.
    type Field: RecordField;

    /// Identifier of this record.
    fn id(&self) -> &Self::Id;

    /// Scalar value of a field rendered as text.
    ///
    /// `None` means the field is absent for this record. Absent fields never
    /// match a search or filter and export as empty cells.
    fn field(&self, field: Self::Field) -> Option<String>;
}

/// Collect the ids of a slice of records, preserving order.
pub fn ids_of<R: Record>(records: &[R]) -> Vec<R::Id> {
    records.iter().map(|r| r.id().clone()).collect()
}
