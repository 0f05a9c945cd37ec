//! Topic grouping of digest entries.

use std::collections::HashMap;

use crate::model::ArticleEntry;

/// Entries sharing one topic cluster.
#[derive(Debug, Clone)]
pub struct TopicGroup<'a> {
    pub topic_cluster: String,
    /// Members in input order.
    pub articles: Vec<&'a ArticleEntry>,
    /// Mean of the members' topic confidences.
    pub avg_confidence: f64,
}

/// Group entries by topic cluster; empty clusters count as "General".
///
/// With `sort_by_confidence` groups come out by descending average
/// confidence, ties keeping first-appearance order. Without it groups keep
/// first-appearance order.
pub fn group_by_topic(entries: &[ArticleEntry], sort_by_confidence: bool) -> Vec<TopicGroup<'_>> {
    let mut groups: Vec<TopicGroup<'_>> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for entry in entries {
        let cluster = entry.cluster_name();
        let slot = *index.entry(cluster).or_insert_with(|| {
            groups.push(TopicGroup {
                topic_cluster: cluster.to_string(),
                articles: Vec::new(),
                avg_confidence: 0.0,
            });
            groups.len() - 1
        });
        groups[slot].articles.push(entry);
    }

    for group in &mut groups {
        let total: f64 = group.articles.iter().map(|a| a.topic_confidence).sum();
        group.avg_confidence = total / group.articles.len() as f64;
    }

    if sort_by_confidence {
        // Stable sort keeps first-appearance order among ties.
        groups.sort_by(|a, b| b.avg_confidence.total_cmp(&a.avg_confidence));
    }

    tracing::debug!(
        groups = groups.len(),
        entries = entries.len(),
        sort_by_confidence,
        "Grouped entries by topic"
    );

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str, cluster: &str, confidence: f64) -> ArticleEntry {
        ArticleEntry::new(title, "https://example.com", "summary").with_topic(cluster, confidence)
    }

    #[test]
    fn test_empty_input() {
        assert!(group_by_topic(&[], true).is_empty());
    }

    #[test]
    fn test_technology_and_general() {
        let entries = vec![
            entry("Tech A", "Technology", 0.9),
            entry("Tech B", "Technology", 0.8),
            entry("Gen", "", 0.5),
        ];

        let groups = group_by_topic(&entries, true);
        assert_eq!(groups.len(), 2);

        assert_eq!(groups[0].topic_cluster, "Technology");
        assert_eq!(groups[0].articles.len(), 2);
        assert!((groups[0].avg_confidence - 0.85).abs() < 1e-6);

        assert_eq!(groups[1].topic_cluster, "General");
        assert_eq!(groups[1].articles.len(), 1);
        assert!((groups[1].avg_confidence - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_groups_partition_input() {
        let entries = vec![
            entry("a", "Rust", 0.4),
            entry("b", "Go", 0.9),
            entry("c", "", 0.1),
            entry("d", "Rust", 0.6),
            entry("e", "Go", 0.7),
        ];

        let groups = group_by_topic(&entries, false);
        let total: usize = groups.iter().map(|g| g.articles.len()).sum();
        assert_eq!(total, entries.len());

        for e in &entries {
            let owners = groups
                .iter()
                .filter(|g| g.articles.iter().any(|a| std::ptr::eq(*a, e)))
                .count();
            assert_eq!(owners, 1);
        }

        // Insertion order within a group.
        let rust = groups.iter().find(|g| g.topic_cluster == "Rust").unwrap();
        let titles: Vec<_> = rust.articles.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "d"]);
    }

    #[test]
    fn test_unsorted_keeps_first_appearance() {
        let entries = vec![entry("a", "Low", 0.1), entry("b", "High", 0.9)];
        let names: Vec<_> = group_by_topic(&entries, false)
            .into_iter()
            .map(|g| g.topic_cluster)
            .collect();
        assert_eq!(names, vec!["Low", "High"]);
    }

    #[test]
    fn test_sorted_ties_keep_first_appearance() {
        let entries = vec![
            entry("a", "First", 0.5),
            entry("b", "Top", 0.9),
            entry("c", "Second", 0.5),
        ];
        let names: Vec<_> = group_by_topic(&entries, true)
            .into_iter()
            .map(|g| g.topic_cluster)
            .collect();
        assert_eq!(names, vec!["Top", "First", "Second"]);
    }

    #[test]
    fn test_average_is_mean_of_members() {
        let entries = vec![
            entry("a", "X", 0.3),
            entry("b", "X", 0.6),
            entry("c", "X", 0.75),
        ];
        let groups = group_by_topic(&entries, true);
        assert!((groups[0].avg_confidence - 0.55).abs() < 1e-6);
    }
}
