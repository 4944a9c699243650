//! Rule engine constants.

/// Separator placed between the base system message and each rule text.
pub const RULE_SEPARATOR: &str = "\n\n";

/// Marker distinguishing a URI (`scheme://...`) from a plain path.
pub const URI_SCHEME_SEPARATOR: &str = "://";

/// Opening/closing marker of a fenced code block.
pub const CODE_FENCE: &str = "```";
