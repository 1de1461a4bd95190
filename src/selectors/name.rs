use std::collections::BTreeSet;

use crate::projects::collection::ProjectCollection;

use super::ProjectSelector;

/// Drops projects by key, regardless of their tags
pub struct ExcludeNameSelector<'a> {
    names: &'a BTreeSet<String>,
}

impl<'a> ExcludeNameSelector<'a> {
    #[must_use]
    pub fn new(names: &'a BTreeSet<String>) -> Self {
        Self { names }
    }
}

impl ProjectSelector for ExcludeNameSelector<'_> {
    fn split_projects(&self, projects: ProjectCollection) -> (ProjectCollection, ProjectCollection) {
        projects.partition(|project| !self.names.contains(&project.key))
    }
}
