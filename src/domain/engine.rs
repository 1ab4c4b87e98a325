//! The allocation engine.
//!
//! Groups are resolved strictly in input order against a mutable
//! [`RoomInventory`]. Single-gender groups are placed first-fit-whole: the
//! first room with enough remaining capacity takes the entire group, or the
//! group goes unplaced. Mixed groups are filled greedily per sub-gender,
//! splitting across rooms in inventory order; a group whose sub-counts fall
//! short gets one trailing shortfall record.
//!
//! Single-gender groups that cannot be placed produce no record at all,
//! while mixed groups that fall short do. That asymmetry is observable,
//! long-standing behaviour and is kept intact here.

use super::{
    allocation::{AllocationRecord, Report},
    gender::{Gender, GenderSpec, ParseSpecError},
    group::{Group, GroupId},
    room::{Room, RoomInventory},
};

/// Errors that abort an allocation run.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AllocateError {
    /// A group's gender descriptor matched no recognised pattern.
    #[error(transparent)]
    Spec(#[from] ParseSpecError),

    /// A single-gender group's members column was not a non-negative
    /// integer.
    #[error("invalid member count '{value}' for group {group}")]
    Members {
        /// The offending group.
        group: GroupId,
        /// The raw members column value.
        value: String,
    },
}

/// A structured notification emitted alongside each allocation decision.
///
/// The engine never formats or prints; callers that want the classic
/// per-decision log lines attach an [`Observer`] and render these however
/// they like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationEvent<'a> {
    /// A group is about to be resolved.
    GroupStarted {
        /// The group being resolved.
        group: &'a GroupId,
        /// Raw members column.
        members: &'a str,
        /// Raw gender column.
        gender: &'a str,
    },
    /// A single-gender group was placed whole.
    Placed {
        /// The placed group.
        group: &'a GroupId,
        /// The room it landed in.
        room: &'a Room,
        /// Members placed.
        size: u32,
    },
    /// Part of a mixed group's sub-allocation landed in one room.
    SplitPlaced {
        /// The group being split.
        group: &'a GroupId,
        /// The room this share landed in.
        room: &'a Room,
        /// Which sub-group the share belongs to.
        gender: Gender,
        /// Members placed in this room.
        count: u32,
    },
    /// No room could take a single-gender group whole.
    Unplaced {
        /// The unplaced group.
        group: &'a GroupId,
    },
    /// A mixed group's sub-counts fell short of the request.
    Shortfall {
        /// The short group.
        group: &'a GroupId,
        /// Boys placed.
        boys_allocated: u32,
        /// Boys requested.
        boys_requested: u32,
        /// Girls placed.
        girls_allocated: u32,
        /// Girls requested.
        girls_requested: u32,
    },
}

/// Receives [`AllocationEvent`]s as the engine makes decisions.
pub trait Observer {
    /// Called once per event, in decision order.
    fn event(&mut self, event: &AllocationEvent<'_>);
}

/// Observer that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl Observer for NullObserver {
    fn event(&mut self, _event: &AllocationEvent<'_>) {}
}

/// Resolves groups against a room inventory, one run at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocator {
    inventory: RoomInventory,
}

impl Allocator {
    /// Builds an allocator over the supplied rooms, partitioned by gender in
    /// input order.
    #[must_use]
    pub fn new(rooms: Vec<Room>) -> Self {
        Self {
            inventory: RoomInventory::new(rooms),
        }
    }

    /// The live inventory. Capacities reflect all placements made so far.
    #[must_use]
    pub const fn inventory(&self) -> &RoomInventory {
        &self.inventory
    }

    /// Resolves every group, in order, returning the ordered record
    /// sequence.
    ///
    /// # Errors
    ///
    /// Returns [`AllocateError`] if any group's gender descriptor is
    /// unrecognised, or a single-gender group's member count is not an
    /// integer. The run aborts at the offending group; no report is
    /// produced.
    pub fn run(&mut self, groups: &[Group]) -> Result<Vec<AllocationRecord>, AllocateError> {
        self.run_with(groups, &mut NullObserver)
    }

    /// As [`run`](Self::run), forwarding every decision to `observer`.
    ///
    /// # Errors
    ///
    /// See [`run`](Self::run).
    pub fn run_with(
        &mut self,
        groups: &[Group],
        observer: &mut dyn Observer,
    ) -> Result<Vec<AllocationRecord>, AllocateError> {
        let mut report = Report::new();

        for group in groups {
            let spec: GenderSpec = group.gender_spec().parse()?;
            observer.event(&AllocationEvent::GroupStarted {
                group: group.id(),
                members: group.members(),
                gender: group.gender_spec(),
            });

            match spec {
                GenderSpec::Single(gender) => {
                    let size = parse_members(group)?;
                    self.place_whole(group.id(), gender, size, &mut report, observer);
                }
                GenderSpec::Mixed { boys, girls } => {
                    let boys_allocated =
                        self.fill_greedy(group.id(), Gender::Boys, boys, &mut report, observer);
                    let girls_allocated =
                        self.fill_greedy(group.id(), Gender::Girls, girls, &mut report, observer);

                    if boys_allocated < boys || girls_allocated < girls {
                        report.push(AllocationRecord::shortfall(
                            group.id().clone(),
                            boys_allocated,
                            girls_allocated,
                        ));
                        observer.event(&AllocationEvent::Shortfall {
                            group: group.id(),
                            boys_allocated,
                            boys_requested: boys,
                            girls_allocated,
                            girls_requested: girls,
                        });
                    }
                }
            }
        }

        Ok(report.into_records())
    }

    /// First-fit-whole: the first room with `capacity >= size` takes the
    /// entire group. No fit means no record (and no sentinel) for this
    /// group.
    fn place_whole(
        &mut self,
        id: &GroupId,
        gender: Gender,
        size: u32,
        report: &mut Report,
        observer: &mut dyn Observer,
    ) {
        let found = self
            .inventory
            .rooms(gender)
            .iter()
            .position(|room| room.capacity() >= size);

        let Some(index) = found else {
            observer.event(&AllocationEvent::Unplaced { group: id });
            return;
        };

        self.inventory.reduce(gender, index, size);
        let room = &self.inventory.rooms(gender)[index];
        report.push(AllocationRecord::whole(id.clone(), room, size));
        observer.event(&AllocationEvent::Placed {
            group: id,
            room,
            size,
        });
    }

    /// Greedy fill: walk the full sequence in order, taking
    /// `min(remaining, capacity)` from every room with spare capacity until
    /// the request is satisfied or the sequence is exhausted. Returns the
    /// total placed, which may be less than `requested`.
    fn fill_greedy(
        &mut self,
        id: &GroupId,
        gender: Gender,
        requested: u32,
        report: &mut Report,
        observer: &mut dyn Observer,
    ) -> u32 {
        let mut remaining = requested;

        for index in 0..self.inventory.rooms(gender).len() {
            if remaining == 0 {
                break;
            }
            let capacity = self.inventory.rooms(gender)[index].capacity();
            if capacity == 0 {
                continue;
            }

            let take = remaining.min(capacity);
            self.inventory.reduce(gender, index, take);
            remaining -= take;

            let room = &self.inventory.rooms(gender)[index];
            report.push(AllocationRecord::split(id.clone(), room, take, gender));
            observer.event(&AllocationEvent::SplitPlaced {
                group: id,
                room,
                gender,
                count: take,
            });
        }

        requested - remaining
    }
}

fn parse_members(group: &Group) -> Result<u32, AllocateError> {
    group
        .members()
        .trim()
        .parse()
        .map_err(|_| AllocateError::Members {
            group: group.id().clone(),
            value: group.members().to_string(),
        })
}

/// Resolves `groups` against `rooms` in one pass.
///
/// Convenience wrapper around [`Allocator`] for callers that do not need
/// the final inventory state or an observer.
///
/// # Errors
///
/// See [`Allocator::run`].
pub fn allocate(
    groups: &[Group],
    rooms: Vec<Room>,
) -> Result<Vec<AllocationRecord>, AllocateError> {
    Allocator::new(rooms).run(groups)
}
