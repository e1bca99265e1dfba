//! Command line parsing
//!
//! A line is split into at most three pieces: tag, keyword, and the
//! rest of the line as one raw string. Each handler parses its own
//! arguments out of that remainder.

/// Tag used when the client sent nothing usable as a tag. Such a
/// command is never run.
pub const UNTAGGED: &str = "*";

/// One parsed client request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub tag: String,
    /// Keyword, upper-cased.
    pub name: String,
    pub remainder: Option<String>,
}

impl Command {
    /// Split a line into tag, keyword and remainder.
    ///
    /// Never fails: a line without a keyword yields an empty `name`,
    /// which no handler matches.
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let mut parts = line.splitn(3, ' ');
        let tag = parts.next().filter(|t| !t.is_empty()).unwrap_or(UNTAGGED);
        let name = parts.next().unwrap_or_default().to_ascii_uppercase();
        let remainder = parts.next().map(str::to_string);

        Self {
            tag: tag.to_string(),
            name,
            remainder,
        }
    }

    /// Whether the line started with a usable tag.
    #[must_use]
    pub fn is_tagged(&self) -> bool {
        self.tag != UNTAGGED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_into_three_parts() {
        let cmd = Command::parse("a1 login \"user\" \"pass word\"");
        assert_eq!(cmd.tag, "a1");
        assert_eq!(cmd.name, "LOGIN");
        assert_eq!(cmd.remainder.as_deref(), Some("\"user\" \"pass word\""));
    }

    #[test]
    fn keyword_without_arguments() {
        let cmd = Command::parse("A0001 CAPABILITY");
        assert_eq!(cmd.name, "CAPABILITY");
        assert_eq!(cmd.remainder, None);
    }

    #[test]
    fn trailing_space_gives_empty_remainder() {
        let cmd = Command::parse("a1 LIST ");
        assert_eq!(cmd.remainder.as_deref(), Some(""));
    }

    #[test]
    fn tag_only_line_has_no_keyword() {
        let cmd = Command::parse("a1");
        assert_eq!(cmd.tag, "a1");
        assert!(cmd.name.is_empty());
    }

    #[test]
    fn empty_line_uses_untagged_marker() {
        let cmd = Command::parse("");
        assert_eq!(cmd.tag, UNTAGGED);
        assert!(cmd.name.is_empty());
        assert!(!cmd.is_tagged());
    }

    #[test]
    fn leading_space_means_no_tag() {
        let cmd = Command::parse(" LOGIN user password");
        assert!(!cmd.is_tagged());
        assert_eq!(cmd.name, "LOGIN");
    }

    #[test]
    fn star_is_not_a_tag() {
        assert!(!Command::parse("* NOOP").is_tagged());
        assert!(Command::parse("a1 NOOP").is_tagged());
    }
}
