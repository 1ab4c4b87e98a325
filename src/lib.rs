//! Hostel room allocation.
//!
//! Groups of people, each with a size and gender composition, are assigned
//! to rooms drawn from a capacity-limited inventory. Single-gender groups
//! are placed first-fit-whole; mixed groups are split greedily across rooms
//! per sub-gender. Deliberately greedy: no rebalancing or backtracking once
//! a room is chosen.

pub mod domain;
pub use domain::{
    AllocateError, Allocated, AllocationEvent, AllocationRecord, Allocator, Config, Gender,
    GenderSpec, Group, GroupId, NullObserver, Observer, Room, RoomInventory, allocate,
};

/// CSV ingestion and report serialization.
pub mod storage;
pub use storage::{LoadError, WriteError, read_groups, read_rooms, write_report};
