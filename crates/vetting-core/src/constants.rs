//! Domain constants shared across the vetting crates.

/// String form of the "inherit from the fallback resolver" vote.
pub const INHERITANCE_MARKER: &str = "↑↑↑";

/// Identifier of the terminal locale.
pub const ROOT_LOCALE: &str = "root";

/// Locale identifiers that canonicalise to root.
pub const ROOT_SYNONYMS: &[&str] = &["root", "und"];

/// Pseudo path reported for values built by the display-name constructor.
pub const CONSTRUCTED_PATH: &str = "constructed";

/// Attributes that are carried in the full form of a field path only.
pub const NON_DISTINGUISHING_ATTRIBUTES: &[&str] =
    &["draft", "references", "standard", "validSubLocales"];

/// Weight a winning value needs to reach `contributed` in an established locale.
/// Fixed at one vetter-level vote; not configurable.
pub const CONTRIBUTION_BAR: u32 = 4;

/// Root path for locale display names.
pub const DISPLAY_NAMES_PREFIX: &str = "//ldml/localeDisplayNames";
