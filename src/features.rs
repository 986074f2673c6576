//! Feature set assembly
//!
//! Cargo features are passed as a single comma-joined argument, so ordering
//! matters for reproducible invocations: names keep their first-seen position
//! and duplicates are dropped.

/// Insertion-ordered set of cargo feature names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureSet {
    names: Vec<String>,
}

impl FeatureSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a feature name, skipping empty names and exact duplicates.
    /// Returns true if the name was actually added.
    pub fn insert(&mut self, name: &str) -> bool {
        if name.is_empty() || self.contains(name) {
            return false;
        }
        self.names.push(name.to_string());
        true
    }

    /// Add every name from a comma-separated list, left to right
    pub fn extend_from_list(&mut self, list: &str) {
        for name in list.split(',') {
            self.insert(name.trim());
        }
    }

    /// Append another set, preserving this set's existing order
    pub fn merge(&mut self, other: &FeatureSet) {
        for name in other.iter() {
            self.insert(name);
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Render as the value of cargo's `--features` argument
    pub fn to_arg(&self) -> String {
        self.names.join(",")
    }
}

/// Merge explicit `--features` values, shortcut flags, and config-detected
/// features into one set. Append order fixes the first-seen positions:
/// explicit values first, then shortcuts, then detected features.
pub fn build_feature_set(
    explicit: &[String],
    with_feishu: bool,
    with_matrix: bool,
    detected: Option<&FeatureSet>,
) -> FeatureSet {
    let mut features = FeatureSet::new();

    for list in explicit {
        features.extend_from_list(list);
    }
    if with_feishu {
        features.insert("channel-lark");
    }
    if with_matrix {
        features.insert("channel-matrix");
    }
    if let Some(detected) = detected {
        features.merge(detected);
    }

    features
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_is_idempotent() {
        let mut features = FeatureSet::new();
        assert!(features.insert("channel-lark"));
        assert!(!features.insert("channel-lark"));
        assert_eq!(features.len(), 1);
    }

    #[test]
    fn test_insert_skips_empty_names() {
        let mut features = FeatureSet::new();
        assert!(!features.insert(""));
        assert!(features.is_empty());
    }

    #[test]
    fn test_first_seen_order_is_kept() {
        let mut features = FeatureSet::new();
        features.extend_from_list("b,a,b,c,a");
        assert_eq!(features.to_arg(), "b,a,c");
    }

    #[test]
    fn test_extend_trims_and_drops_empty_segments() {
        let mut features = FeatureSet::new();
        features.extend_from_list(" a , ,b,,c ");
        assert_eq!(features.to_arg(), "a,b,c");
    }

    #[test]
    fn test_dedup_is_case_sensitive() {
        let mut features = FeatureSet::new();
        features.insert("Matrix");
        features.insert("matrix");
        assert_eq!(features.len(), 2);
    }

    #[test]
    fn test_build_order_explicit_then_shortcuts_then_detected() {
        let mut detected = FeatureSet::new();
        detected.insert("whatsapp-web");

        let explicit = vec!["extra".to_string()];
        let features = build_feature_set(&explicit, true, true, Some(&detected));
        assert_eq!(
            features.to_arg(),
            "extra,channel-lark,channel-matrix,whatsapp-web"
        );
    }

    #[test]
    fn test_shortcut_duplicate_of_explicit_keeps_first_position() {
        let explicit = vec!["channel-matrix,other".to_string()];
        let features = build_feature_set(&explicit, false, true, None);
        assert_eq!(features.to_arg(), "channel-matrix,other");
    }

    #[test]
    fn test_detected_duplicate_of_shortcut_is_dropped() {
        let mut detected = FeatureSet::new();
        detected.insert("channel-lark");

        let features = build_feature_set(&[], true, false, Some(&detected));
        assert_eq!(features.to_arg(), "channel-lark");
    }
}
