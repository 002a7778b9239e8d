//! Category inference for discovered tools.
//!
//! Pure name-based classification. The rule table is ordered and the first
//! matching substring wins; several substrings overlap (e.g. "service" vs.
//! "file"), so reordering the table changes results.

/// Category assigned when no rule matches.
pub const DEFAULT_CATEGORY: &str = "general";

/// Ordered (substring, category) rules. First match wins.
const RULES: &[(&str, &str)] = &[
    ("k8s", "kubernetes"),
    ("kubernetes", "kubernetes"),
    ("pod", "kubernetes"),
    ("deploy", "kubernetes"),
    ("service", "kubernetes"),
    ("node", "kubernetes"),
    ("namespace", "kubernetes"),
    ("log", "monitoring"),
    ("metric", "monitoring"),
    ("file", "file operations"),
    ("read", "file operations"),
    ("write", "file operations"),
    ("search", "search/query"),
    ("query", "search/query"),
    ("web", "network request"),
    ("http", "network request"),
    ("database", "database"),
    ("db", "database"),
];

/// Infer a category label from a tool name.
///
/// Case-insensitive substring match against the ordered rule table;
/// falls back to [`DEFAULT_CATEGORY`].
pub fn classify(tool_name: &str) -> &'static str {
    let name = tool_name.to_lowercase();
    RULES
        .iter()
        .find(|(needle, _)| name.contains(needle))
        .map_or(DEFAULT_CATEGORY, |(_, category)| *category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kubernetes_names() {
        assert_eq!(classify("list_pods"), "kubernetes");
        assert_eq!(classify("K8s_scale"), "kubernetes");
        assert_eq!(classify("get_namespace"), "kubernetes");
    }

    #[test]
    fn test_file_operations() {
        assert_eq!(classify("read_file"), "file operations");
        assert_eq!(classify("write_config"), "file operations");
    }

    #[test]
    fn test_monitoring_and_network() {
        assert_eq!(classify("tail_logs"), "monitoring");
        assert_eq!(classify("fetch_web_page"), "network request");
    }

    #[test]
    fn test_search_and_database() {
        assert_eq!(classify("search_docs"), "search/query");
        assert_eq!(classify("db_migrate"), "database");
    }

    #[test]
    fn test_fallback() {
        assert_eq!(classify("unrelated_name"), "general");
        assert_eq!(classify(""), "general");
    }

    #[test]
    fn test_rule_order_wins_on_overlap() {
        // "deploy_database" matches both "deploy" and "database";
        // the kubernetes rule comes first.
        assert_eq!(classify("deploy_database"), "kubernetes");
        // "log_search" matches "log" before "search".
        assert_eq!(classify("log_search"), "monitoring");
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(classify("READ_FILE"), "file operations");
    }
}
