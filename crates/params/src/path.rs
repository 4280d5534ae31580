//! Accessor paths into the region and parameter hierarchies.

use std::fmt;

/// Separator used in string-form accessor paths (`"World|DEU|BER"`).
pub const PATH_SEPARATOR: char = '|';

/// A normalized hierarchical accessor path.
///
/// All accepted accessor forms normalize to the same segment list, so a
/// string with separators, an array of segments and a bare name address the
/// same node:
///
/// ```ignore
/// use helios_params::Path;
///
/// assert_eq!(Path::from("World|DEU"), Path::from(["World", "DEU"]));
/// assert_eq!(Path::from("World"), Path::from(["World"]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<String>,
}

impl Path {
    /// The path segments in order from the outermost level.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Whether the path has no segments (or any empty segment), which is
    /// rejected by all accessors.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty() || self.segments.iter().any(|s| s.is_empty())
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("|"))
    }
}

impl From<&str> for Path {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            return Path { segments: Vec::new() };
        }
        Path {
            segments: s.split(PATH_SEPARATOR).map(str::to_string).collect(),
        }
    }
}

impl From<String> for Path {
    fn from(s: String) -> Self {
        Path::from(s.as_str())
    }
}

impl From<&String> for Path {
    fn from(s: &String) -> Self {
        Path::from(s.as_str())
    }
}

impl From<&[&str]> for Path {
    fn from(segments: &[&str]) -> Self {
        Path {
            segments: segments.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl<const N: usize> From<[&str; N]> for Path {
    fn from(segments: [&str; N]) -> Self {
        Path::from(segments.as_slice())
    }
}

impl From<Vec<&str>> for Path {
    fn from(segments: Vec<&str>) -> Self {
        Path::from(segments.as_slice())
    }
}

impl From<Vec<String>> for Path {
    fn from(segments: Vec<String>) -> Self {
        Path { segments }
    }
}

impl From<&Path> for Path {
    fn from(path: &Path) -> Self {
        path.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessor_forms_normalize_identically() {
        let expected = Path::from(["World", "DEU", "BER"]);
        assert_eq!(Path::from("World|DEU|BER"), expected);
        assert_eq!(Path::from(vec!["World", "DEU", "BER"]), expected);
        assert_eq!(
            Path::from(vec![
                "World".to_string(),
                "DEU".to_string(),
                "BER".to_string()
            ]),
            expected
        );
    }

    #[test]
    fn bare_name() {
        let p = Path::from("World");
        assert_eq!(p.segments(), ["World"]);
        assert!(!p.is_empty());
    }

    #[test]
    fn empty_forms() {
        assert!(Path::from("").is_empty());
        assert!(Path::from(Vec::<String>::new()).is_empty());
    }

    #[test]
    fn empty_segment_is_rejected() {
        assert!(Path::from("World||BER").is_empty());
    }

    #[test]
    fn segments_keep_inner_spaces() {
        let p = Path::from("World|Second test|Lower");
        assert_eq!(p.segments(), ["World", "Second test", "Lower"]);
    }

    #[test]
    fn display_round_trip() {
        let p = Path::from("World|DEU");
        assert_eq!(p.to_string(), "World|DEU");
    }
}
