//! Allocation records and the report they accumulate into.

use std::fmt;

use serde::Serialize;

use super::{gender::Gender, group::GroupId, room::Room};

/// Sentinel written to the hostel and room columns of a shortfall record.
pub const NOT_ALLOCATED: &str = "Not Allocated";

/// The `Members Allocated` cell of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Allocated {
    /// A single-gender group placed whole: the bare member count.
    Whole(u32),
    /// Part of a mixed group placed in one room, e.g. `3 Boys`.
    Split {
        /// Members placed in this room.
        count: u32,
        /// Which sub-group they belong to.
        gender: Gender,
    },
    /// Summary of a mixed group that fell short, e.g. `4 Boys & 0 Girls`.
    Shortfall {
        /// Boys actually placed.
        boys: u32,
        /// Girls actually placed.
        girls: u32,
    },
}

impl fmt::Display for Allocated {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Whole(count) => write!(f, "{count}"),
            Self::Split { count, gender } => write!(f, "{count} {gender}"),
            Self::Shortfall { boys, girls } => write!(f, "{boys} Boys & {girls} Girls"),
        }
    }
}

impl Serialize for Allocated {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One group/room pairing in the output table.
///
/// Immutable once created. Shortfall records carry the
/// [`NOT_ALLOCATED`] sentinel in place of a hostel and room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllocationRecord {
    #[serde(rename = "Group ID")]
    group_id: GroupId,
    #[serde(rename = "Hostel Name")]
    hostel: String,
    #[serde(rename = "Room Number")]
    room: String,
    #[serde(rename = "Members Allocated")]
    members: Allocated,
}

impl AllocationRecord {
    /// Record for a single-gender group placed whole in one room.
    #[must_use]
    pub fn whole(group_id: GroupId, room: &Room, size: u32) -> Self {
        Self {
            group_id,
            hostel: room.hostel().to_string(),
            room: room.number().to_string(),
            members: Allocated::Whole(size),
        }
    }

    /// Record for one room's share of a mixed group's sub-allocation.
    #[must_use]
    pub fn split(group_id: GroupId, room: &Room, count: u32, gender: Gender) -> Self {
        Self {
            group_id,
            hostel: room.hostel().to_string(),
            room: room.number().to_string(),
            members: Allocated::Split { count, gender },
        }
    }

    /// Summary record for a mixed group that could not be fully placed.
    #[must_use]
    pub fn shortfall(group_id: GroupId, boys: u32, girls: u32) -> Self {
        Self {
            group_id,
            hostel: NOT_ALLOCATED.to_string(),
            room: NOT_ALLOCATED.to_string(),
            members: Allocated::Shortfall { boys, girls },
        }
    }

    /// The group this record belongs to.
    #[must_use]
    pub const fn group_id(&self) -> &GroupId {
        &self.group_id
    }

    /// The hostel name, or [`NOT_ALLOCATED`].
    #[must_use]
    pub fn hostel(&self) -> &str {
        &self.hostel
    }

    /// The room number, or [`NOT_ALLOCATED`].
    #[must_use]
    pub fn room(&self) -> &str {
        &self.room
    }

    /// The members cell.
    #[must_use]
    pub const fn members(&self) -> Allocated {
        self.members
    }
}

/// Ordered accumulator for allocation records.
///
/// Records are kept exactly in the order produced (group input order, then
/// per-group record order); there is no sorting, deduplication or
/// aggregation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Report {
    records: Vec<AllocationRecord>,
}

impl Report {
    /// Creates an empty report.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Appends a record.
    pub fn push(&mut self, record: AllocationRecord) {
        self.records.push(record);
    }

    /// The accumulated records, in production order.
    #[must_use]
    pub fn records(&self) -> &[AllocationRecord] {
        &self.records
    }

    /// Number of accumulated records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the report is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Consumes the report, yielding the ordered record sequence.
    #[must_use]
    pub fn into_records(self) -> Vec<AllocationRecord> {
        self.records
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn group(id: &str) -> GroupId {
        GroupId::new(id.to_string()).unwrap()
    }

    #[test_case(Allocated::Whole(3), "3"; "whole count is bare")]
    #[test_case(Allocated::Split { count: 3, gender: Gender::Boys }, "3 Boys"; "split names gender")]
    #[test_case(Allocated::Shortfall { boys: 4, girls: 0 }, "4 Boys & 0 Girls"; "shortfall composite")]
    fn allocated_display(cell: Allocated, expected: &str) {
        assert_eq!(cell.to_string(), expected);
    }

    #[test]
    fn shortfall_record_uses_sentinel_columns() {
        let record = AllocationRecord::shortfall(group("105"), 5, 1);
        assert_eq!(record.hostel(), NOT_ALLOCATED);
        assert_eq!(record.room(), NOT_ALLOCATED);
        assert_eq!(record.members(), Allocated::Shortfall { boys: 5, girls: 1 });
    }

    #[test]
    fn report_preserves_push_order() {
        let room = Room::new("Boys Hostel A", "101", 3, Gender::Boys);
        let mut report = Report::new();
        report.push(AllocationRecord::whole(group("101"), &room, 3));
        report.push(AllocationRecord::split(group("105"), &room, 2, Gender::Boys));
        report.push(AllocationRecord::shortfall(group("105"), 2, 0));

        let records = report.into_records();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].group_id().as_str(), "101");
        assert_eq!(records[1].members(), Allocated::Split { count: 2, gender: Gender::Boys });
        assert_eq!(records[2].hostel(), NOT_ALLOCATED);
    }
}
