/// True when `s` can be used as a single path component: non-empty, no separators,
/// and not one of the relative markers `.` / `..`.
pub fn is_safe_path_segment(s: &str) -> bool {
    !s.is_empty() && s != "." && s != ".." && !s.contains(['/', '\\', '\0'])
}

/// Resource names as Perses accepts them: `[A-Za-z0-9_.-]+`.
pub fn is_valid_resource_name(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
}

/// Prometheus label names: `[a-zA-Z_][a-zA-Z0-9_]*`.
pub fn is_valid_label_name(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Prometheus metric names, which also allow `:` for recording rules.
pub fn is_valid_metric_name(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == ':' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_path_segment() {
        assert!(is_safe_path_segment("demo-app"));
        assert!(is_safe_path_segment("blackbox-exporter.rules"));
        assert!(!is_safe_path_segment(""));
        assert!(!is_safe_path_segment("."));
        assert!(!is_safe_path_segment(".."));
        assert!(!is_safe_path_segment("a/b"));
        assert!(!is_safe_path_segment("a\\b"));
    }

    #[test]
    fn test_resource_name() {
        assert!(is_valid_resource_name("default"));
        assert!(is_valid_resource_name("my_project.v2-a"));
        assert!(!is_valid_resource_name(""));
        assert!(!is_valid_resource_name("my project"));
    }

    #[test]
    fn test_label_name() {
        assert!(is_valid_label_name("cluster"));
        assert!(is_valid_label_name("_k8s_cluster1"));
        assert!(!is_valid_label_name("1cluster"));
        assert!(!is_valid_label_name("k8s-cluster"));
        assert!(!is_valid_label_name(""));
    }

    #[test]
    fn test_metric_name() {
        assert!(is_valid_metric_name("job:up:sum"));
        assert!(is_valid_metric_name("_private"));
        assert!(!is_valid_metric_name("1abc"));
        assert!(!is_valid_metric_name("bad-name"));
        assert!(!is_valid_metric_name(""));
    }
}
