//! Global constants for the RSI editor

/// Base window title
pub const WINDOW_TITLE: &str = "RSI editor";

/// Default edge length of a state thumbnail, in pixels
pub const DEFAULT_ICON_SIZE: u32 = 50;

/// Smallest and largest thumbnail sizes offered in preferences
pub const ICON_SIZE_RANGE: std::ops::RangeInclusive<u32> = 16..=256;

/// How much wider than its icon a state name label may grow
pub const DEFAULT_STATE_NAME_FACTOR: f32 = 1.2;

/// Frame size for newly created RSIs
pub const DEFAULT_RSI_SIZE: (u32, u32) = (32, 32);

/// Title of the directory chooser used by Open
pub const OPEN_DIALOG_TITLE: &str = "Open RSI";

/// Title of the file chooser used by Open Archive
pub const OPEN_ARCHIVE_DIALOG_TITLE: &str = "Open RSI archive";

/// Title of the directory chooser used by Save
pub const SAVE_DIALOG_TITLE: &str = "Save RSI";

/// Title of the prompt shown when saving before close fails
pub const DISCARD_DIALOG_TITLE: &str = "Save failed";

/// Name shown for documents that have never been saved
pub const UNTITLED_NAME: &str = "Untitled";
