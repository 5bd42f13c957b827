//! Calendar and trip exclusion by service ID.

use std::collections::HashSet;

/// Services kept for the generated schedule.
///
/// Computed once before the run from the requested date range and passed to
/// the agency on construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ServiceFilter {
    /// No date range requested: nothing is excluded by service.
    #[default]
    Undefined,
    /// Only these services are kept. An empty set excludes everything.
    Useful(HashSet<String>),
}

impl ServiceFilter {
    pub fn useful<I, S>(service_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ServiceFilter::Useful(service_ids.into_iter().map(Into::into).collect())
    }

    /// True when no service survives, so the whole feed is skipped.
    pub fn excluding_all(&self) -> bool {
        matches!(self, ServiceFilter::Useful(ids) if ids.is_empty())
    }

    /// Whether rows tied to `service_id` are dropped.
    pub fn excludes(&self, service_id: &str) -> bool {
        match self {
            ServiceFilter::Undefined => false,
            ServiceFilter::Useful(ids) => !ids.contains(service_id),
        }
    }
}

impl From<Option<Vec<String>>> for ServiceFilter {
    fn from(service_ids: Option<Vec<String>>) -> Self {
        match service_ids {
            Some(ids) => ServiceFilter::useful(ids),
            None => ServiceFilter::Undefined,
        }
    }
}
