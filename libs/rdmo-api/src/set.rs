use std::fmt;
use std::str::FromStr;

/// Position of a set relative to its superior sets.
///
/// Stored as `|`-delimited text (`""`, `"0"`, `"1|2"`). Internally an ordered
/// list of set indexes, outermost first. Parsing and formatting only happen at
/// the storage / serde boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SetPrefix(Vec<i64>);

impl SetPrefix {
    pub const DELIMITER: char = '|';

    /// The top-level prefix (empty string).
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn from_segments(segments: Vec<i64>) -> Self {
        Self(segments)
    }

    pub fn segments(&self) -> &[i64] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Prefix of the sets nested inside the set at `set_index` of this prefix.
    ///
    /// `"" + 3 → "3"`, `"1|2" + 0 → "1|2|0"`.
    pub fn child(&self, set_index: i64) -> Self {
        let mut segments = self.0.clone();
        segments.push(set_index);
        Self(segments)
    }

    /// Split off the innermost segment: `"1|2" → ("1", 2)`.
    ///
    /// `None` for the root prefix.
    pub fn split_last(&self) -> Option<(Self, i64)> {
        let (last, rest) = self.0.split_last()?;
        Some((Self(rest.to_vec()), *last))
    }
}

impl fmt::Display for SetPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for segment in &self.0 {
            if !first {
                write!(f, "{}", Self::DELIMITER)?;
            }
            write!(f, "{segment}")?;
            first = false;
        }
        Ok(())
    }
}

/// Malformed set prefix text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetPrefixError {
    pub input: String,
    pub segment: String,
}

impl fmt::Display for SetPrefixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid set prefix '{}': segment '{}' is not a canonical integer",
            self.input, self.segment
        )
    }
}

impl std::error::Error for SetPrefixError {}

impl FromStr for SetPrefix {
    type Err = SetPrefixError;

    /// Segments must be canonical integers, written the way `Display`
    /// writes them.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Self::root());
        }
        s.split(Self::DELIMITER)
            .map(|segment| {
                segment
                    .parse::<i64>()
                    .ok()
                    .filter(|n| n.to_string() == segment)
                    .ok_or_else(|| SetPrefixError {
                        input: s.to_string(),
                        segment: segment.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl serde::Serialize for SetPrefix {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for SetPrefix {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A concrete set: prefix of its superior sets plus its own index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct SetPosition {
    #[serde(default)]
    pub set_prefix: SetPrefix,
    #[serde(default)]
    pub set_index: i64,
}

impl SetPosition {
    pub fn new(set_prefix: SetPrefix, set_index: i64) -> Self {
        Self { set_prefix, set_index }
    }

    /// Prefix shared by all sets nested inside this one.
    pub fn child_prefix(&self) -> SetPrefix {
        self.set_prefix.child(self.set_index)
    }

    /// Position of the enclosing set, or `None` at the top level.
    ///
    /// The innermost prefix segment becomes the parent's `set_index`.
    pub fn parent(&self) -> Option<Self> {
        self.set_prefix
            .split_last()
            .map(|(set_prefix, set_index)| Self { set_prefix, set_index })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_formats() {
        let prefix: SetPrefix = "1|2|0".parse().unwrap();
        assert_eq!(prefix.segments(), &[1, 2, 0]);
        assert_eq!(prefix.to_string(), "1|2|0");

        let root: SetPrefix = "".parse().unwrap();
        assert!(root.is_root());
        assert_eq!(root.to_string(), "");
    }

    #[test]
    fn rejects_non_integer_segments() {
        let err = "1|x".parse::<SetPrefix>().unwrap_err();
        assert_eq!(err.segment, "x");
        assert!("1||2".parse::<SetPrefix>().is_err());
    }

    #[test]
    fn rejects_non_canonical_segments() {
        for raw in ["01", " 1", "1| 2", "+3", "-0", "2|007"] {
            assert!(raw.parse::<SetPrefix>().is_err(), "{raw:?} should be rejected");
        }
        let err = "0|05".parse::<SetPrefix>().unwrap_err();
        assert_eq!(err.segment, "05");
        assert_eq!("10|-1".parse::<SetPrefix>().unwrap().to_string(), "10|-1");
    }

    #[test]
    fn child_prefix_matches_interview_layout() {
        let top = SetPosition::new(SetPrefix::root(), 3);
        assert_eq!(top.child_prefix().to_string(), "3");

        let nested = SetPosition::new("1|2".parse().unwrap(), 0);
        assert_eq!(nested.child_prefix().to_string(), "1|2|0");
    }

    #[test]
    fn parent_pops_innermost_segment() {
        let pos = SetPosition::new("4|1".parse().unwrap(), 2);
        let parent = pos.parent().unwrap();
        assert_eq!(parent.set_prefix.to_string(), "4");
        assert_eq!(parent.set_index, 1);

        let grandparent = parent.parent().unwrap();
        assert!(grandparent.set_prefix.is_root());
        assert_eq!(grandparent.set_index, 4);
        assert!(grandparent.parent().is_none());
    }

    #[test]
    fn serde_uses_delimited_text() {
        let pos: SetPosition = serde_json::from_str(r#"{"set_prefix":"0|5","set_index":1}"#).unwrap();
        assert_eq!(pos.set_prefix.segments(), &[0, 5]);
        assert_eq!(serde_json::to_string(&pos.set_prefix).unwrap(), r#""0|5""#);

        let default: SetPosition = serde_json::from_str("{}").unwrap();
        assert_eq!(default, SetPosition::default());
    }
}
