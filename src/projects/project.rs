use std::collections::BTreeSet;
use std::path::PathBuf;

/// A single project directory the command can be executed in
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Project {
    /// Unique key from the `projects` mapping of the config file
    pub key: String,
    /// Optional human readable name
    pub name: Option<String>,
    /// Working directory for the command
    pub path: PathBuf,
    pub tags: BTreeSet<String>,
}

impl Project {
    /// Name used when talking about the project to the user.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.key,
        }
    }

    /// Whether at least one of `tags` is attached to this project.
    #[must_use]
    pub fn shares_tag(&self, tags: &BTreeSet<String>) -> bool {
        !self.tags.is_disjoint(tags)
    }
}
