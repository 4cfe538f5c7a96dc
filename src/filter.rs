//! AND-of-ORs term matching over event text fields.

/// A parsed `--include` specification: an OR over groups of ANDed terms.
/// `[["a","b"],["c"]]` reads "(a AND b) OR c". An empty spec matches
/// everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchSpec {
    groups: Vec<Vec<String>>,
}

impl SearchSpec {
    /// Parse raw CLI values. Each value is one OR-group of
    /// comma-separated terms; blank terms and empty groups are dropped.
    pub fn parse(values: &[String]) -> Self {
        let mut groups = Vec::new();
        for value in values {
            let terms: Vec<String> = value
                .split(',')
                .map(str::trim)
                .filter(|term| !term.is_empty())
                .map(str::to_string)
                .collect();
            if !terms.is_empty() {
                groups.push(terms);
            }
        }
        SearchSpec { groups }
    }

    #[cfg(test)]
    fn from_groups(groups: Vec<Vec<String>>) -> Self {
        SearchSpec { groups }
    }

    /// True when no group carries any terms.
    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(Vec::is_empty)
    }

    /// A match needs one group whose every term is found, case
    /// insensitively, as a substring of at least one field.
    pub fn matches(&self, fields: &[&str]) -> bool {
        if self.is_empty() {
            return true;
        }
        self.groups.iter().any(|group| group_matches(group, fields))
    }
}

fn group_matches(group: &[String], fields: &[&str]) -> bool {
    group.iter().all(|term| {
        let needle = term.to_lowercase();
        fields
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    })
}
