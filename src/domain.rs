//! Domain models for room allocation.
//!
//! This module contains the core domain types: gender specs, groups, the
//! room inventory, the allocation engine and its records, and
//! configuration.

/// Allocation records and the report builder.
pub mod allocation;
pub use allocation::{Allocated, AllocationRecord, NOT_ALLOCATED, Report};

mod config;
pub use config::Config;

/// The allocation engine and its observer seam.
pub mod engine;
pub use engine::{
    AllocateError, AllocationEvent, Allocator, NullObserver, Observer, allocate,
};

/// Gender tags and gender-spec parsing.
pub mod gender;
pub use gender::{Gender, GenderSpec, ParseGenderError, ParseSpecError};

/// Groups requesting accommodation.
pub mod group;
pub use group::{EmptyGroupIdError, Group, GroupId};

/// Rooms and the capacity inventory.
pub mod room;
pub use room::{Room, RoomInventory};
