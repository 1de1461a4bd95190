use std::collections::BTreeSet;

use log::{debug, warn};

use crate::projects::collection::ProjectCollection;

pub mod name;
pub mod tags;

/// Filters supplied once per run, built from the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    /// Project keys removed regardless of their tags
    pub excluded_names: BTreeSet<String>,
    /// A project must carry at least one of these, when any are given
    pub search_tags: BTreeSet<String>,
    /// A project carrying any of these is removed
    pub exclude_tags: BTreeSet<String>,
}

impl FilterSpec {
    pub fn new<N, S, E>(excluded_names: N, search_tags: S, exclude_tags: E) -> Self
    where
        N: IntoIterator<Item = String>,
        S: IntoIterator<Item = String>,
        E: IntoIterator<Item = String>,
    {
        Self {
            excluded_names: excluded_names.into_iter().collect(),
            search_tags: search_tags.into_iter().collect(),
            exclude_tags: exclude_tags.into_iter().collect(),
        }
    }
}

pub trait ProjectSelector {
    /// Split projects into (selected, dropped) based on this selector's criteria.
    fn split_projects(&self, projects: ProjectCollection) -> (ProjectCollection, ProjectCollection);
}

/// Keep only projects sharing a tag with `tags`; identity when `tags` is empty.
#[must_use]
pub fn filter_by_search_tags(
    projects: ProjectCollection,
    tags: &BTreeSet<String>,
) -> ProjectCollection {
    if tags.is_empty() {
        return projects;
    }
    tags::SearchTagSelector::new(tags).split_projects(projects).0
}

/// Remove every project sharing a tag with `tags`.
#[must_use]
pub fn exclude_by_tags(projects: ProjectCollection, tags: &BTreeSet<String>) -> ProjectCollection {
    tags::ExcludeTagSelector::new(tags)
        .split_projects(projects)
        .0
}

/// Remove every project whose key is in `names`.
#[must_use]
pub fn exclude_by_name(projects: ProjectCollection, names: &BTreeSet<String>) -> ProjectCollection {
    name::ExcludeNameSelector::new(names)
        .split_projects(projects)
        .0
}

/// Runs all filters in order (search tags, exclude tags, excluded names) and
/// returns the projects the command should run in.
#[must_use]
pub fn select_projects(projects: ProjectCollection, filters: &FilterSpec) -> ProjectCollection {
    let total = projects.len();
    for name in &filters.excluded_names {
        if !projects.contains(name) {
            warn!("Excluded project '{name}' does not exist in the config");
        }
    }

    let searched = filter_by_search_tags(projects, &filters.search_tags);
    let after_search = searched.len();

    let tag_filtered = exclude_by_tags(searched, &filters.exclude_tags);
    let after_tags = tag_filtered.len();

    let selected = exclude_by_name(tag_filtered, &filters.excluded_names);

    debug!(
        "Selected {} of {total} projects ({} dropped by search tags, {} by exclude tags, {} by name)",
        selected.len(),
        total - after_search,
        after_search - after_tags,
        after_tags - selected.len()
    );

    selected
}
