use std::collections::BTreeSet;

use crate::projects::collection::ProjectCollection;

use super::ProjectSelector;

/// Selects projects carrying at least one of the search tags
pub struct SearchTagSelector<'a> {
    tags: &'a BTreeSet<String>,
}

impl<'a> SearchTagSelector<'a> {
    #[must_use]
    pub fn new(tags: &'a BTreeSet<String>) -> Self {
        Self { tags }
    }
}

impl ProjectSelector for SearchTagSelector<'_> {
    fn split_projects(&self, projects: ProjectCollection) -> (ProjectCollection, ProjectCollection) {
        projects.partition(|project| project.shares_tag(self.tags))
    }
}

/// Drops projects carrying any of the excluded tags
pub struct ExcludeTagSelector<'a> {
    tags: &'a BTreeSet<String>,
}

impl<'a> ExcludeTagSelector<'a> {
    #[must_use]
    pub fn new(tags: &'a BTreeSet<String>) -> Self {
        Self { tags }
    }
}

impl ProjectSelector for ExcludeTagSelector<'_> {
    fn split_projects(&self, projects: ProjectCollection) -> (ProjectCollection, ProjectCollection) {
        projects.partition(|project| !project.shares_tag(self.tags))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projects::project::Project;

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(ToString::to_string).collect()
    }

    fn make_project(key: &str, tags: &[&str]) -> Project {
        Project {
            key: key.to_string(),
            path: key.into(),
            tags: set(tags),
            ..Default::default()
        }
    }

    fn sample() -> ProjectCollection {
        [
            make_project("api", &["rust", "backend"]),
            make_project("web", &["ts", "frontend"]),
            make_project("notes", &[]),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_search_selector_splits_on_intersection() {
        let tags = set(&["backend", "ts"]);
        let (selected, dropped) = SearchTagSelector::new(&tags).split_projects(sample());
        assert_eq!(selected.names().collect::<Vec<_>>(), vec!["api", "web"]);
        assert_eq!(dropped.names().collect::<Vec<_>>(), vec!["notes"]);
    }

    #[test]
    fn test_search_selector_with_empty_tags_selects_nothing() {
        // The empty-set shortcut lives in `filter_by_search_tags`
        let tags = BTreeSet::new();
        let (selected, dropped) = SearchTagSelector::new(&tags).split_projects(sample());
        assert!(selected.is_empty());
        assert_eq!(dropped.len(), 3);
    }

    #[test]
    fn test_exclude_selector_drops_tagged_projects() {
        let tags = set(&["frontend"]);
        let (selected, dropped) = ExcludeTagSelector::new(&tags).split_projects(sample());
        assert_eq!(selected.names().collect::<Vec<_>>(), vec!["api", "notes"]);
        assert_eq!(dropped.names().collect::<Vec<_>>(), vec!["web"]);
    }

    #[test]
    fn test_exclude_selector_with_empty_tags_is_noop() {
        let tags = BTreeSet::new();
        let (selected, dropped) = ExcludeTagSelector::new(&tags).split_projects(sample());
        assert_eq!(selected, sample());
        assert!(dropped.is_empty());
    }
}
