//! Project data model
//!
//! A project is a named, path-anchored unit the command runs against. Projects are
//! labelled with tags which the selectors use to decide whether a project takes part
//! in a run. Projects are immutable once loaded; the collection only ever shrinks.

pub mod collection;
pub mod project;
