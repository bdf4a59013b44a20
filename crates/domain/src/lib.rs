//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod activity_log;
mod conflict;
mod constraint;
mod instant;
mod pagination;

pub use activity_log::{LogEntry, LogResultSet};
pub use conflict::{
    CONFLICT_ROW_FIELDS, ConflictPair, ConflictReport, LengthMismatch, zip_conflict_pairs,
};
pub use constraint::{ActionConstraint, ConstrainedAction, ConstraintRequest};
pub use instant::{CALENDAR_DATE_FORMAT, DateSelection, SelectableDateRange, TimeInstant};
pub use pagination::{PAGE_SIZE, PageBounds, PaginationState};
