//! Rooms and the mutable capacity inventory the engine draws against.

use super::gender::Gender;

/// A hostel room with its remaining capacity.
///
/// Capacity only ever decreases within a run; rooms never regain capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    hostel: String,
    number: String,
    capacity: u32,
    gender: Gender,
}

impl Room {
    /// Creates a room from its table row. The capacity is taken verbatim;
    /// no upper bound is enforced.
    #[must_use]
    pub fn new(
        hostel: impl Into<String>,
        number: impl Into<String>,
        capacity: u32,
        gender: Gender,
    ) -> Self {
        Self {
            hostel: hostel.into(),
            number: number.into(),
            capacity,
            gender,
        }
    }

    /// The hostel this room belongs to.
    #[must_use]
    pub fn hostel(&self) -> &str {
        &self.hostel
    }

    /// The room's identifier within its hostel.
    #[must_use]
    pub fn number(&self) -> &str {
        &self.number
    }

    /// Remaining capacity.
    #[must_use]
    pub const fn capacity(&self) -> u32 {
        self.capacity
    }

    /// The gender this room is reserved for.
    #[must_use]
    pub const fn gender(&self) -> Gender {
        self.gender
    }
}

/// The ordered, mutable collection of rooms, partitioned by gender.
///
/// Order is semantically significant: it determines first-fit priority and is
/// preserved exactly as supplied. No rooms can be added, removed or reordered
/// after construction; the only mutation is [`reduce`](Self::reduce).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomInventory {
    boys: Vec<Room>,
    girls: Vec<Room>,
}

impl RoomInventory {
    /// Partitions the supplied rooms by gender, preserving their relative
    /// order within each partition.
    #[must_use]
    pub fn new(rooms: Vec<Room>) -> Self {
        let (boys, girls) = rooms
            .into_iter()
            .partition(|room| room.gender() == Gender::Boys);
        Self { boys, girls }
    }

    /// The ordered room sequence for one gender.
    #[must_use]
    pub fn rooms(&self, gender: Gender) -> &[Room] {
        match gender {
            Gender::Boys => &self.boys,
            Gender::Girls => &self.girls,
        }
    }

    /// Decrements the capacity of the room at `index` in the sequence for
    /// `gender` by `amount`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds or `amount` exceeds the room's
    /// remaining capacity. Both are programmer errors, not recoverable
    /// conditions: callers select the room and clamp the amount first.
    pub fn reduce(&mut self, gender: Gender, index: usize, amount: u32) {
        let rooms = match gender {
            Gender::Boys => &mut self.boys,
            Gender::Girls => &mut self.girls,
        };
        let room = &mut rooms[index];
        assert!(
            amount <= room.capacity,
            "capacity underflow: room {}/{} has {} remaining, asked to reduce by {amount}",
            room.hostel,
            room.number,
            room.capacity
        );
        room.capacity -= amount;
    }

    /// Total remaining capacity across all rooms of one gender.
    #[must_use]
    pub fn remaining(&self, gender: Gender) -> u32 {
        self.rooms(gender).iter().map(Room::capacity).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mixed_inventory() -> RoomInventory {
        RoomInventory::new(vec![
            Room::new("Boys Hostel A", "101", 3, Gender::Boys),
            Room::new("Girls Hostel B", "201", 2, Gender::Girls),
            Room::new("Boys Hostel A", "102", 4, Gender::Boys),
            Room::new("Girls Hostel B", "202", 5, Gender::Girls),
        ])
    }

    #[test]
    fn partition_preserves_input_order() {
        let inventory = mixed_inventory();
        let boys: Vec<_> = inventory
            .rooms(Gender::Boys)
            .iter()
            .map(Room::number)
            .collect();
        let girls: Vec<_> = inventory
            .rooms(Gender::Girls)
            .iter()
            .map(Room::number)
            .collect();
        assert_eq!(boys, ["101", "102"]);
        assert_eq!(girls, ["201", "202"]);
    }

    #[test]
    fn reduce_decrements_only_the_addressed_room() {
        let mut inventory = mixed_inventory();
        inventory.reduce(Gender::Boys, 1, 4);
        assert_eq!(inventory.rooms(Gender::Boys)[0].capacity(), 3);
        assert_eq!(inventory.rooms(Gender::Boys)[1].capacity(), 0);
        assert_eq!(inventory.remaining(Gender::Boys), 3);
        assert_eq!(inventory.remaining(Gender::Girls), 7);
    }

    #[test]
    fn reduce_to_zero_is_allowed() {
        let mut inventory = mixed_inventory();
        inventory.reduce(Gender::Girls, 0, 2);
        assert_eq!(inventory.rooms(Gender::Girls)[0].capacity(), 0);
    }

    #[test]
    #[should_panic(expected = "capacity underflow")]
    fn reduce_past_capacity_panics() {
        let mut inventory = mixed_inventory();
        inventory.reduce(Gender::Boys, 0, 4);
    }
}
