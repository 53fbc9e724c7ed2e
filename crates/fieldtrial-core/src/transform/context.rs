//! Location tracking for schema violations

use std::fmt;

/// JSON-path-like location inside a trial config, rooted at `$`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaPath {
    path: String,
}

impl SchemaPath {
    pub fn root() -> Self {
        Self {
            path: "$".to_string(),
        }
    }

    /// Path of a named member
    pub fn child<P: AsRef<str>>(&self, segment: P) -> Self {
        Self {
            path: format!("{}.{}", self.path, segment.as_ref()),
        }
    }

    /// Path of an array element
    pub fn index(&self, index: usize) -> Self {
        Self {
            path: format!("{}[{}]", self.path, index),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for SchemaPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

impl From<SchemaPath> for String {
    fn from(path: SchemaPath) -> Self {
        path.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_and_index() {
        let path = SchemaPath::root().child("MyTrial").index(1).child("platforms").index(0);
        assert_eq!(path.as_str(), "$.MyTrial[1].platforms[0]");
        assert_eq!(String::from(path), "$.MyTrial[1].platforms[0]");
    }
}
