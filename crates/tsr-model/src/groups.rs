//! Named subdivision groups.
//!
//! A report is always run for one named group of counties or districts. The
//! built-in groups cover the regions the reports were first written for;
//! config files can add groups or replace a built-in one by reusing its name.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tsr_common::normalize_identifier;

use crate::error::{ModelError, Result};
use crate::filter::FilterSpec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubdivisionLevel {
    Counties,
    Districts,
}

impl fmt::Display for SubdivisionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Counties => f.write_str("counties"),
            Self::Districts => f.write_str("districts"),
        }
    }
}

/// A group as written in a config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupConfig {
    pub level: SubdivisionLevel,
    /// Identifier to display label.
    pub members: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubdivisionGroup {
    pub name: String,
    pub level: SubdivisionLevel,
    /// Normalized identifier to display label.
    pub members: BTreeMap<String, String>,
}

impl SubdivisionGroup {
    pub fn new<I, K, V>(name: impl Into<String>, level: SubdivisionLevel, members: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let members = members
            .into_iter()
            .filter_map(|(id, label)| normalize_identifier(id.as_ref()).map(|id| (id, label.into())))
            .collect();
        Self {
            name: name.into(),
            level,
            members,
        }
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.members.keys().map(String::as_str)
    }

    /// Restrict `spec` to this group's members on the matching axis.
    #[must_use]
    pub fn restrict(&self, spec: FilterSpec) -> FilterSpec {
        match self.level {
            SubdivisionLevel::Counties => spec.with_counties(self.identifiers()),
            SubdivisionLevel::Districts => spec.with_districts(self.identifiers()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GroupCatalog {
    groups: BTreeMap<String, SubdivisionGroup>,
}

impl Default for GroupCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl GroupCatalog {
    pub fn empty() -> Self {
        Self {
            groups: BTreeMap::new(),
        }
    }

    pub fn builtin() -> Self {
        let mut catalog = Self::empty();
        catalog.insert(SubdivisionGroup::new(
            "dallas_counties",
            SubdivisionLevel::Counties,
            [("57", "DALLAS"), ("220", "TARRANT")],
        ));
        catalog.insert(SubdivisionGroup::new(
            "houston_districts",
            SubdivisionLevel::Districts,
            [("101828", "Houston Gateway"), ("101912", "Houston ISD")],
        ));
        catalog.insert(SubdivisionGroup::new(
            "basis_districts",
            SubdivisionLevel::Districts,
            [
                ("15834", "Basis Texas"),
                ("15907", "San Antonio ISD"),
                ("15901", "Alamo Heights ISD"),
                ("15915", "Northside ISD"),
            ],
        ));
        catalog.insert(SubdivisionGroup::new(
            "new_houston_districts",
            SubdivisionLevel::Districts,
            [
                ("101802", "Ser-Ninos Charter School"),
                ("101806", "Raul Yzaguirre School for Success"),
                ("101814", "The Varnett Public School"),
                ("101828", "Houston Gateway Academy Inc"),
                ("101853", "Promise Community School"),
                ("101912", "Houston ISD"),
            ],
        ));
        catalog
    }

    /// Built-in groups overlaid with configured ones.
    pub fn with_configured(configured: &BTreeMap<String, GroupConfig>) -> Self {
        let mut catalog = Self::builtin();
        for (name, group) in configured {
            catalog.insert(SubdivisionGroup::new(
                name.clone(),
                group.level,
                group.members.iter().map(|(id, label)| (id, label.clone())),
            ));
        }
        catalog
    }

    pub fn insert(&mut self, group: SubdivisionGroup) {
        self.groups.insert(group.name.clone(), group);
    }

    pub fn get(&self, name: &str) -> Result<&SubdivisionGroup> {
        self.groups
            .get(name)
            .ok_or_else(|| ModelError::UnknownGroup {
                name: name.to_string(),
                known: self.names().collect::<Vec<_>>().join(", "),
            })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SubdivisionGroup> {
        self.groups.values()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
