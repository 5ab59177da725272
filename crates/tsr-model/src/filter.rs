use std::collections::BTreeSet;

use tsr_common::normalize_identifiers;

/// Restrictions applied by the filter engine.
///
/// Each axis is optional; `None` or an empty set imposes no restriction.
/// County and district identifiers are stored normalized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    pub columns: Option<Vec<String>>,
    pub counties: Option<BTreeSet<String>>,
    pub districts: Option<BTreeSet<String>>,
    pub years: Option<BTreeSet<String>>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_counties<I, S>(mut self, counties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.counties = Some(normalize_identifiers(counties));
        self
    }

    #[must_use]
    pub fn with_districts<I, S>(mut self, districts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.districts = Some(normalize_identifiers(districts));
        self
    }

    #[must_use]
    pub fn with_years<I, S>(mut self, years: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.years = Some(
            years
                .into_iter()
                .map(|year| year.as_ref().trim().to_string())
                .collect(),
        );
        self
    }

    /// Column allow-list, if one restricts the projection.
    pub fn column_restriction(&self) -> Option<&[String]> {
        self.columns.as_deref().filter(|columns| !columns.is_empty())
    }

    pub fn county_restriction(&self) -> Option<&BTreeSet<String>> {
        non_empty(self.counties.as_ref())
    }

    pub fn district_restriction(&self) -> Option<&BTreeSet<String>> {
        non_empty(self.districts.as_ref())
    }

    pub fn year_restriction(&self) -> Option<&BTreeSet<String>> {
        non_empty(self.years.as_ref())
    }

    /// True when no axis restricts anything.
    pub fn is_unrestricted(&self) -> bool {
        self.column_restriction().is_none()
            && self.county_restriction().is_none()
            && self.district_restriction().is_none()
            && self.year_restriction().is_none()
    }
}

fn non_empty(set: Option<&BTreeSet<String>>) -> Option<&BTreeSet<String>> {
    set.filter(|values| !values.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unrestricted() {
        assert!(FilterSpec::new().is_unrestricted());
    }

    #[test]
    fn empty_lists_impose_no_restriction() {
        let spec = FilterSpec::new()
            .with_counties(Vec::<String>::new())
            .with_columns(Vec::<String>::new())
            .with_years(Vec::<String>::new());
        assert!(spec.is_unrestricted());
        assert!(spec.county_restriction().is_none());
    }

    #[test]
    fn identifiers_are_normalized() {
        let spec = FilterSpec::new()
            .with_counties(["057", "220"])
            .with_districts(["'101912"]);
        let counties = spec.county_restriction().unwrap();
        assert!(counties.contains("57"));
        assert!(counties.contains("220"));
        assert!(spec.district_restriction().unwrap().contains("101912"));
    }
}
