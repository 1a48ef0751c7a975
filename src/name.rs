//! Hierarchical symbol names.
//!
//! A [`Name`] is a sequence of string or numeric components, e.g.
//! `Nat.add_comm` or `_private.Init.Data.0.helper`. Equality and hashing are
//! structural, so a `Name` can key the node table directly.
//!
//! The canonical string form joins components with `.` and wraps string
//! components that would otherwise be ambiguous in `«…»`. A string component
//! may not contain `»`, so every `Name` parses back from its canonical form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{RefGraphError, Result};

const ESCAPE_OPEN: char = '«';
const ESCAPE_CLOSE: char = '»';

/// One segment of a [`Name`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NameComponent {
    Str(String),
    Num(u64),
}

impl NameComponent {
    fn is_representable(&self) -> bool {
        match self {
            NameComponent::Str(s) => !s.contains(ESCAPE_CLOSE),
            NameComponent::Num(_) => true,
        }
    }

    fn needs_escape(s: &str) -> bool {
        s.is_empty()
            || s.starts_with(|c: char| c.is_ascii_digit())
            || s.contains(['.', ESCAPE_OPEN, ESCAPE_CLOSE])
    }
}

impl fmt::Display for NameComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameComponent::Str(s) if Self::needs_escape(s) => {
                write!(f, "{ESCAPE_OPEN}{s}{ESCAPE_CLOSE}")
            }
            NameComponent::Str(s) => f.write_str(s),
            NameComponent::Num(n) => write!(f, "{n}"),
        }
    }
}

/// A fully-qualified symbol identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name {
    components: Vec<NameComponent>,
}

impl Name {
    /// Build a name from explicit components.
    ///
    /// Returns `None` for an empty component list (the anonymous name never
    /// identifies a declaration) or a string component containing `»`.
    pub fn from_components(components: Vec<NameComponent>) -> Option<Self> {
        if components.is_empty() || !components.iter().all(NameComponent::is_representable) {
            None
        } else {
            Some(Self { components })
        }
    }

    /// A single-component string name.
    ///
    /// # Panics
    ///
    /// If `s` contains `»`.
    pub fn atom(s: impl Into<String>) -> Self {
        Self {
            components: vec![string_component(s.into())],
        }
    }

    /// Append a string component.
    ///
    /// # Panics
    ///
    /// If `s` contains `»`.
    pub fn child(mut self, s: impl Into<String>) -> Self {
        self.components.push(string_component(s.into()));
        self
    }

    /// Append a numeric component.
    pub fn child_num(mut self, n: u64) -> Self {
        self.components.push(NameComponent::Num(n));
        self
    }

    pub fn components(&self) -> &[NameComponent] {
        &self.components
    }

    /// The enclosing namespace, if any.
    pub fn parent(&self) -> Option<Name> {
        let (_, init) = self.components.split_last()?;
        Name::from_components(init.to_vec())
    }

    /// Parse the canonical string form.
    pub fn parse(input: &str) -> Result<Self> {
        let mut components = Vec::new();
        let mut buf = String::new();
        let mut escaped = false;
        let mut in_escape = false;

        for c in input.chars() {
            if in_escape {
                // Components never contain `»`, so it always closes.
                match c {
                    ESCAPE_CLOSE => in_escape = false,
                    _ => buf.push(c),
                }
                continue;
            }
            match c {
                '.' => {
                    components.push(finish_component(input, &mut buf, escaped)?);
                    escaped = false;
                }
                ESCAPE_OPEN if buf.is_empty() && !escaped => {
                    in_escape = true;
                    escaped = true;
                }
                ESCAPE_OPEN | ESCAPE_CLOSE => {
                    return Err(RefGraphError::invalid_name(
                        input,
                        format!("unexpected {c:?}"),
                    ));
                }
                _ if escaped => {
                    return Err(RefGraphError::invalid_name(
                        input,
                        "text after escaped component",
                    ));
                }
                _ => buf.push(c),
            }
        }

        if in_escape {
            return Err(RefGraphError::invalid_name(input, "unterminated «"));
        }
        if input.is_empty() {
            return Err(RefGraphError::invalid_name(input, "empty name"));
        }
        components.push(finish_component(input, &mut buf, escaped)?);

        Ok(Self { components })
    }
}

fn string_component(s: String) -> NameComponent {
    assert!(
        !s.contains(ESCAPE_CLOSE),
        "name component {s:?} contains {ESCAPE_CLOSE:?}"
    );
    NameComponent::Str(s)
}

fn finish_component(input: &str, buf: &mut String, escaped: bool) -> Result<NameComponent> {
    let text = std::mem::take(buf);
    if escaped {
        return Ok(NameComponent::Str(text));
    }
    if text.is_empty() {
        return Err(RefGraphError::invalid_name(input, "empty component"));
    }
    if text.bytes().all(|b| b.is_ascii_digit()) {
        return text
            .parse()
            .map(NameComponent::Num)
            .map_err(|e| RefGraphError::invalid_name(input, e.to_string()));
    }
    Ok(NameComponent::Str(text))
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, component) in self.components.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{component}")?;
        }
        Ok(())
    }
}

impl FromStr for Name {
    type Err = RefGraphError;

    fn from_str(s: &str) -> Result<Self> {
        Name::parse(s)
    }
}

impl Serialize for Name {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Name {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Name::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_parse_dotted() {
        let name = Name::parse("Nat.add_comm").unwrap();
        assert_eq!(name, Name::atom("Nat").child("add_comm"));
        assert_eq!(name.to_string(), "Nat.add_comm");
    }

    #[test]
    fn test_numeric_component() {
        let name = Name::parse("_private.Init.0.helper").unwrap();
        assert_eq!(name.components()[2], NameComponent::Num(0));
        assert_eq!(name.to_string(), "_private.Init.0.helper");
    }

    #[test]
    fn test_escaped_component_round_trip() {
        let name = Name::atom("Foo").child("a.b").child("");
        assert_eq!(name.to_string(), "Foo.«a.b».«»");
        assert_eq!(Name::parse("Foo.«a.b».«»").unwrap(), name);
    }

    #[test]
    fn test_string_digit_component_is_escaped() {
        let name = Name::atom("Foo").child("0");
        assert_eq!(name.to_string(), "Foo.«0»");
        assert_ne!(name, Name::atom("Foo").child_num(0));
    }

    #[test]
    fn test_invalid_names() {
        for bad in ["", "Foo..bar", "Foo.", ".Foo", "«open", "a«b»", "«a»b", "a»"] {
            let err = Name::parse(bad).unwrap_err();
            assert!(
                matches!(err, RefGraphError::InvalidName { .. }),
                "expected InvalidName for {bad:?}"
            );
        }
    }

    #[test]
    fn test_close_escape_rejected_at_construction() {
        let components = vec![
            NameComponent::Str("Foo".to_string()),
            NameComponent::Str("a»b".to_string()),
        ];
        assert_eq!(Name::from_components(components), None);
        assert_eq!(Name::from_components(vec![]), None);
        assert!(std::panic::catch_unwind(|| Name::atom("a»b")).is_err());
        assert!(std::panic::catch_unwind(|| Name::atom("Foo").child("»")).is_err());
    }

    #[test]
    fn test_constructed_names_round_trip() {
        let names = [
            Name::atom("Foo").child("a.b").child_num(7).child(""),
            Name::atom("«").child("1x"),
            Name::atom("term_/_"),
            Name::from_components(vec![
                NameComponent::Num(0),
                NameComponent::Str("«open".to_string()),
            ])
            .unwrap(),
        ];
        for name in names {
            let text = name.to_string();
            assert_eq!(Name::parse(&text).unwrap(), name, "{text}");
        }
    }

    #[test]
    fn test_structural_hash() {
        let mut set = HashSet::new();
        set.insert(Name::parse("A.B").unwrap());
        set.insert(Name::atom("A").child("B"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_parent() {
        let name = Name::parse("A.B.C").unwrap();
        assert_eq!(name.parent(), Some(Name::parse("A.B").unwrap()));
        assert_eq!(Name::atom("A").parent(), None);
    }

    #[test]
    fn test_serde_as_string() {
        let name = Name::parse("Eq.«mp.r»").unwrap();
        let json = serde_json::to_string(&name).unwrap();
        assert_eq!(json, "\"Eq.«mp.r»\"");
        let back: Name = serde_json::from_str(&json).unwrap();
        assert_eq!(back, name);
        assert!(serde_json::from_str::<Name>("\"a..b\"").is_err());
    }
}
