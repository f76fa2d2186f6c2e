//! Naming rules of the analytics backend and the sanitization applied to
//! names that have no canonical mapping.

/// Longest event name the backend accepts.
pub const MAX_EVENT_NAME_LEN: usize = 40;
/// Longest parameter name the backend accepts.
pub const MAX_PARAMETER_NAME_LEN: usize = 40;
/// Longest user-property name the backend accepts.
pub const MAX_USER_PROPERTY_NAME_LEN: usize = 24;

/// Name prefixes the backend keeps for itself.
pub const RESERVED_PREFIXES: &[&str] = &["firebase_", "google_", "ga_"];

/// The kind of name being translated; each kind has its own length limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    Event,
    Parameter,
    UserProperty,
}

impl NameKind {
    pub fn max_len(self) -> usize {
        match self {
            NameKind::Event => MAX_EVENT_NAME_LEN,
            NameKind::Parameter => MAX_PARAMETER_NAME_LEN,
            NameKind::UserProperty => MAX_USER_PROPERTY_NAME_LEN,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NameKind::Event => "event",
            NameKind::Parameter => "parameter",
            NameKind::UserProperty => "user_property",
        }
    }
}

/// Whether `c` belongs to the backend's name alphabet.
pub fn is_allowed_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Strip characters outside `[A-Za-z0-9_]` and truncate to `max_len`.
///
/// The output only contains ASCII, so truncation never splits a character.
/// Applying it twice gives the same result as applying it once.
pub fn sanitize(name: &str, max_len: usize) -> String {
    name.chars().filter(|&c| is_allowed_char(c)).take(max_len).collect()
}

/// Whether `name` already satisfies every backend rule for `kind`: non-empty,
/// within the length limit, only allowed characters, starts with a letter and
/// carries no reserved prefix.
pub fn is_valid_name(name: &str, kind: NameKind) -> bool {
    let starts_with_letter = name.chars().next().is_some_and(|c| c.is_ascii_alphabetic());
    starts_with_letter
        && name.len() <= kind.max_len()
        && name.chars().all(is_allowed_char)
        && !has_reserved_prefix(name)
}

pub fn has_reserved_prefix(name: &str) -> bool {
    RESERVED_PREFIXES
        .iter()
        .any(|prefix| name.starts_with(prefix))
}
