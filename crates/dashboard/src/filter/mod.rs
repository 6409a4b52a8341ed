//! Client-side list filtering
//!
//! A criteria value (`AuthorFilter`, `ArticleFilter`, `StoryFilter`) decides
//! per item whether it is shown. `FilteredList` memoizes the derived list and
//! only recomputes when the source list or the criteria differ from the last
//! call. Relative order of the source is always preserved.

mod criteria;

pub use criteria::{ArticleFilter, AuthorFilter, StoryFilter};

use std::fmt;
use std::str::FromStr;
use tracing::trace;

/// Sentinel accepted by every facet
pub const ALL: &str = "all";

/// Categorical constraint: everything, or exactly one value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facet<T> {
    All,
    Only(T),
}

impl<T> Default for Facet<T> {
    fn default() -> Self {
        Facet::All
    }
}

impl<T: PartialEq> Facet<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Facet::All => true,
            Facet::Only(wanted) => wanted == value,
        }
    }

    /// For fields the entity may lack: a missing value only passes `All`
    pub fn matches_opt(&self, value: Option<&T>) -> bool {
        match (self, value) {
            (Facet::All, _) => true,
            (Facet::Only(wanted), Some(value)) => wanted == value,
            (Facet::Only(_), None) => false,
        }
    }
}

impl<T: FromStr> FromStr for Facet<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ALL {
            Ok(Facet::All)
        } else {
            s.parse().map(Facet::Only)
        }
    }
}

impl<T: fmt::Display> fmt::Display for Facet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Facet::All => f.write_str(ALL),
            Facet::Only(value) => value.fmt(f),
        }
    }
}

/// Case-insensitive substring match. An empty needle matches everything.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Predicate over one entity type
pub trait Criteria<T>: Clone + PartialEq {
    fn matches(&self, item: &T) -> bool;

    /// Items passing the criteria, in source order
    fn apply(&self, items: &[T]) -> Vec<T>
    where
        T: Clone,
    {
        items.iter().filter(|item| self.matches(item)).cloned().collect()
    }
}

/// Memoized filtered view over a source list
#[derive(Debug, Clone)]
pub struct FilteredList<T, C> {
    source: Vec<T>,
    criteria: Option<C>,
    output: Vec<T>,
    recomputations: usize,
}

impl<T, C> Default for FilteredList<T, C> {
    fn default() -> Self {
        Self {
            source: Vec::new(),
            criteria: None,
            output: Vec::new(),
            recomputations: 0,
        }
    }
}

impl<T, C> FilteredList<T, C>
where
    T: Clone + PartialEq,
    C: Criteria<T>,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Filtered view of `source`, reused when neither input changed
    pub fn view(&mut self, source: &[T], criteria: &C) -> &[T] {
        let unchanged =
            self.criteria.as_ref() == Some(criteria) && self.source.as_slice() == source;

        if !unchanged {
            self.output = criteria.apply(source);
            self.source = source.to_vec();
            self.criteria = Some(criteria.clone());
            self.recomputations += 1;
            trace!(
                source = source.len(),
                shown = self.output.len(),
                "Filtered list recomputed"
            );
        }

        &self.output
    }

    /// How many times the view was actually derived
    pub fn recomputations(&self) -> usize {
        self.recomputations
    }
}
