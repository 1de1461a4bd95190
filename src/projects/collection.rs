use std::collections::BTreeMap;
use std::collections::btree_map::Values;

use crate::projects::project::Project;

/// Mapping from unique project key to project, iterated in key order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectCollection {
    projects: BTreeMap<String, Project>,
}

impl ProjectCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Project> {
        self.projects.get(key)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.projects.contains_key(key)
    }

    /// Project keys in iteration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.projects.keys().map(String::as_str)
    }

    pub fn iter(&self) -> Values<'_, String, Project> {
        self.projects.values()
    }

    /// Add a project, replacing any previous project with the same key.
    ///
    /// Only used while loading; filtering never adds projects.
    pub fn insert(&mut self, project: Project) -> Option<Project> {
        self.projects.insert(project.key.clone(), project)
    }

    /// Split into (kept, dropped) using `keep`.
    #[must_use]
    pub fn partition<F>(self, mut keep: F) -> (Self, Self)
    where
        F: FnMut(&Project) -> bool,
    {
        let (kept, dropped): (BTreeMap<_, _>, BTreeMap<_, _>) = self
            .projects
            .into_iter()
            .partition(|(_, project)| keep(project));
        (Self { projects: kept }, Self { projects: dropped })
    }
}

impl FromIterator<Project> for ProjectCollection {
    fn from_iter<I: IntoIterator<Item = Project>>(iter: I) -> Self {
        let mut collection = Self::new();
        for project in iter {
            collection.insert(project);
        }
        collection
    }
}

impl<'a> IntoIterator for &'a ProjectCollection {
    type Item = &'a Project;
    type IntoIter = Values<'a, String, Project>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
