//! Object addressing: bucket, optional key prefix, filename

/// Identifies one object in a bucket.
///
/// The prefix is normalized on construction by stripping leading and trailing
/// `/` separators; the object key is always the join of the normalized prefix
/// and the filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectLocation {
    pub bucket: String,
    pub prefix: Option<String>,
    pub file: String,
}

impl ObjectLocation {
    pub fn new(bucket: impl Into<String>, prefix: Option<&str>, file: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            prefix: normalize_prefix(prefix),
            file: file.into(),
        }
    }

    /// Full object key under the bucket
    pub fn key(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}/{}", prefix, self.file),
            None => self.file.clone(),
        }
    }
}

/// Strip leading/trailing separators; all-separator or empty prefixes collapse
/// to `None`.
pub(crate) fn normalize_prefix(prefix: Option<&str>) -> Option<String> {
    let trimmed = prefix?.trim_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Listing prefix for a path: `"path/"`, or `""` when no path is given.
pub(crate) fn list_prefix(path: Option<&str>) -> String {
    match normalize_prefix(path) {
        Some(prefix) => format!("{prefix}/"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_joins_prefix_and_file() {
        let location = ObjectLocation::new("bucket", Some("daily/2024"), "points.csv");
        assert_eq!(location.key(), "daily/2024/points.csv");
    }

    #[test]
    fn key_without_prefix_is_the_filename() {
        let location = ObjectLocation::new("bucket", None, "points.csv");
        assert_eq!(location.key(), "points.csv");
    }

    #[test]
    fn prefix_separators_are_stripped() {
        for raw in ["/daily/", "daily/", "/daily", "//daily//"] {
            let location = ObjectLocation::new("bucket", Some(raw), "a.csv");
            assert_eq!(location.prefix.as_deref(), Some("daily"));
            assert_eq!(location.key(), "daily/a.csv");
        }
    }

    #[test]
    fn empty_prefixes_collapse_to_none() {
        assert_eq!(normalize_prefix(Some("")), None);
        assert_eq!(normalize_prefix(Some("/")), None);
        assert_eq!(normalize_prefix(Some("///")), None);
        assert_eq!(normalize_prefix(None), None);
    }

    #[test]
    fn list_prefix_carries_a_trailing_separator() {
        assert_eq!(list_prefix(Some("daily")), "daily/");
        assert_eq!(list_prefix(Some("/daily/")), "daily/");
        assert_eq!(list_prefix(None), "");
        assert_eq!(list_prefix(Some("/")), "");
    }
}
