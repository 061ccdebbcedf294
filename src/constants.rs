// src/constants.rs
//
// Application-wide names shared by storage, CLI and tests.

/// Folder created under the user's documents directory.
///
/// Used in: `infrastructure/config.rs`
pub const NOTES_DIR_NAME: &str = "BulletinBoard";

/// Every note file is named `<id>` followed by this suffix.
///
/// Used in: `infrastructure/notes_dir.rs`
pub const NOTE_FILE_SUFFIX: &str = "-note.txt";
