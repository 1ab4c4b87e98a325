//! CSV ingestion for the group and room tables, and serialization of the
//! allocation report.
//!
//! Columns are matched by exact name against the header row, so column
//! order does not matter. Schema problems (missing columns, wrong types)
//! surface here as [`LoadError`]s and never reach the engine.

use std::{fs, io, path::{Path, PathBuf}};

use serde::Deserialize;

use crate::domain::{
    AllocationRecord, EmptyGroupIdError, Gender, Group, GroupId, ParseGenderError, Room,
};

/// Errors raised while reading an input table.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The table could not be opened, or a row was missing a column or
    /// carried a value of the wrong type.
    #[error("failed to read table '{}'", path.display())]
    Csv {
        /// The table being read.
        path: PathBuf,
        /// The underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// A room row carried a gender other than `Boys` or `Girls`.
    #[error("room {room} in {hostel}: {source}")]
    RoomGender {
        /// Hostel name of the offending row.
        hostel: String,
        /// Room number of the offending row.
        room: String,
        /// The parse failure.
        #[source]
        source: ParseGenderError,
    },

    /// A group row carried an empty identifier.
    #[error("line {line} of '{}': {source}", path.display())]
    GroupId {
        /// The table being read.
        path: PathBuf,
        /// 1-based line number of the offending row.
        line: usize,
        /// The underlying validation failure.
        #[source]
        source: EmptyGroupIdError,
    },
}

/// Errors raised while writing the allocation report.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    /// A record failed to serialize.
    #[error("failed to serialize the allocation report")]
    Csv(#[from] csv::Error),

    /// The report file could not be written.
    #[error("failed to write report to '{}'", path.display())]
    Io {
        /// The destination path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Deserialize)]
struct GroupRow {
    #[serde(rename = "Group ID")]
    group_id: String,
    // Kept verbatim: mixed groups carry composites like `5&3` here which
    // are never parsed.
    #[serde(rename = "Members")]
    members: String,
    #[serde(rename = "Gender")]
    gender: String,
}

#[derive(Debug, Deserialize)]
struct RoomRow {
    #[serde(rename = "Hostel Name")]
    hostel: String,
    #[serde(rename = "Room Number")]
    room: String,
    #[serde(rename = "Capacity")]
    capacity: u32,
    #[serde(rename = "Gender")]
    gender: String,
}

/// Reads the groups table, preserving row order.
///
/// # Errors
///
/// Returns [`LoadError`] if the file cannot be opened, a column is missing,
/// or a group identifier is empty.
pub fn read_groups(path: &Path) -> Result<Vec<Group>, LoadError> {
    let mut reader = csv::Reader::from_path(path).map_err(|source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    })?;

    let mut groups = Vec::new();
    for (index, row) in reader.deserialize().enumerate() {
        let row: GroupRow = row.map_err(|source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let id = GroupId::new(row.group_id).map_err(|source| LoadError::GroupId {
            path: path.to_path_buf(),
            // +2: line 1 is the header row.
            line: index + 2,
            source,
        })?;
        groups.push(Group::new(id, row.members, row.gender));
    }
    Ok(groups)
}

/// Reads the rooms table, preserving row order.
///
/// # Errors
///
/// Returns [`LoadError`] if the file cannot be opened, a column is missing
/// or mistyped, or a room's gender is neither `Boys` nor `Girls`.
pub fn read_rooms(path: &Path) -> Result<Vec<Room>, LoadError> {
    let mut reader = csv::Reader::from_path(path).map_err(|source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    })?;

    let mut rooms = Vec::new();
    for row in reader.deserialize() {
        let row: RoomRow = row.map_err(|source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let gender: Gender = row.gender.parse().map_err(|source| LoadError::RoomGender {
            hostel: row.hostel.clone(),
            room: row.room.clone(),
            source,
        })?;
        rooms.push(Room::new(row.hostel, row.room, row.capacity, gender));
    }
    Ok(rooms)
}

/// Output table header, written even when there are no records.
const REPORT_HEADER: [&str; 4] = ["Group ID", "Hostel Name", "Room Number", "Members Allocated"];

/// Writes the allocation report to `path`.
///
/// The whole report is serialized into memory first and written in a single
/// filesystem operation, so an aborted run never leaves a partial file
/// behind.
///
/// # Errors
///
/// Returns [`WriteError`] if serialization fails or the file cannot be
/// written.
pub fn write_report(path: &Path, records: &[AllocationRecord]) -> Result<(), WriteError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(REPORT_HEADER)?;
    for record in records {
        writer.serialize(record)?;
    }

    let buffer = writer
        .into_inner()
        .map_err(|source| WriteError::Io {
            path: path.to_path_buf(),
            source: source.into_error(),
        })?;
    fs::write(path, buffer).map_err(|source| WriteError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use crate::domain::allocate;

    use super::*;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn reads_groups_in_row_order() {
        let file = write_temp(
            "Group ID,Members,Gender\n101,3,Boys\n105,5&3,5 Boys & 3 Girls\n",
        );

        let groups = read_groups(file.path()).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].id().as_str(), "101");
        assert_eq!(groups[0].members(), "3");
        assert_eq!(groups[1].gender_spec(), "5 Boys & 3 Girls");
    }

    #[test]
    fn group_columns_match_by_name_not_position() {
        let file = write_temp("Gender,Group ID,Members\nBoys,7,4\n");

        let groups = read_groups(file.path()).unwrap();
        assert_eq!(groups[0].id().as_str(), "7");
        assert_eq!(groups[0].members(), "4");
        assert_eq!(groups[0].gender_spec(), "Boys");
    }

    #[test]
    fn missing_group_column_is_a_csv_error() {
        let file = write_temp("Group ID,Gender\n101,Boys\n");

        let error = read_groups(file.path()).unwrap_err();
        assert!(matches!(error, LoadError::Csv { .. }));
    }

    #[test]
    fn empty_group_id_is_rejected_with_line_number() {
        let file = write_temp("Group ID,Members,Gender\n101,3,Boys\n,2,Girls\n");

        let error = read_groups(file.path()).unwrap_err();
        assert!(matches!(error, LoadError::GroupId { line: 3, .. }));
    }

    #[test]
    fn reads_rooms_with_typed_capacity() {
        let file = write_temp(
            "Hostel Name,Room Number,Capacity,Gender\nBoys Hostel A,101,3,Boys\nGirls Hostel B,201,2,Girls\n",
        );

        let rooms = read_rooms(file.path()).unwrap();
        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms[0].capacity(), 3);
        assert_eq!(rooms[0].gender(), Gender::Boys);
        assert_eq!(rooms[1].hostel(), "Girls Hostel B");
    }

    #[test]
    fn non_numeric_capacity_is_a_csv_error() {
        let file =
            write_temp("Hostel Name,Room Number,Capacity,Gender\nBoys Hostel A,101,lots,Boys\n");

        let error = read_rooms(file.path()).unwrap_err();
        assert!(matches!(error, LoadError::Csv { .. }));
    }

    #[test]
    fn unknown_room_gender_is_rejected() {
        let file =
            write_temp("Hostel Name,Room Number,Capacity,Gender\nBoys Hostel A,101,3,Mixed\n");

        let error = read_rooms(file.path()).unwrap_err();
        assert!(matches!(error, LoadError::RoomGender { .. }));
    }

    #[test]
    fn writes_header_even_for_an_empty_report() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("allocation.csv");

        write_report(&path, &[]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "Group ID,Hostel Name,Room Number,Members Allocated\n");
    }

    #[test]
    fn end_to_end_tables_through_engine_to_report() {
        let groups_file = write_temp(
            "Group ID,Members,Gender\n\
             101,3,Boys\n\
             102,4,Girls\n\
             103,2,Boys\n\
             104,5,Girls\n\
             105,5&3,5 Boys & 3 Girls\n",
        );
        let rooms_file = write_temp(
            "Hostel Name,Room Number,Capacity,Gender\n\
             Boys Hostel A,101,3,Boys\n\
             Boys Hostel A,102,4,Boys\n\
             Girls Hostel B,201,2,Girls\n\
             Girls Hostel B,202,5,Girls\n",
        );

        let groups = read_groups(groups_file.path()).unwrap();
        let rooms = read_rooms(rooms_file.path()).unwrap();
        let records = allocate(&groups, rooms).unwrap();

        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("allocation.csv");
        write_report(&path, &records).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let expected = "\
            Group ID,Hostel Name,Room Number,Members Allocated\n\
            101,Boys Hostel A,101,3\n\
            102,Girls Hostel B,202,4\n\
            103,Boys Hostel A,102,2\n\
            105,Boys Hostel A,102,2 Boys\n\
            105,Girls Hostel B,201,2 Girls\n\
            105,Girls Hostel B,202,1 Girls\n\
            105,Not Allocated,Not Allocated,2 Boys & 3 Girls\n";
        assert_eq!(content, expected);
    }
}
