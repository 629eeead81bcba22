//! Search criteria: a wildcard or a pure predicate over raw elements.

use std::fmt;
use std::sync::Arc;

type PredicateFn<E> = dyn Fn(&E) -> bool + Send + Sync;

/// Criteria applied to each candidate element.
///
/// `Wildcard` matches everything wherever a single predicate is required. In a
/// cascading search it counts as "no criteria" and is dropped.
pub enum SearchCriteria<E> {
    Wildcard,
    Predicate(Arc<PredicateFn<E>>),
}

impl<E> SearchCriteria<E> {
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&E) -> bool + Send + Sync + 'static,
    {
        Self::Predicate(Arc::new(predicate))
    }

    pub fn matches(&self, element: &E) -> bool {
        match self {
            Self::Wildcard => true,
            Self::Predicate(f) => f(element),
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::Wildcard)
    }

    /// Both criteria must match. A wildcard side is absorbed.
    pub fn and(self, other: Self) -> Self
    where
        E: 'static,
    {
        match (self, other) {
            (Self::Wildcard, c) | (c, Self::Wildcard) => c,
            (Self::Predicate(a), Self::Predicate(b)) => Self::new(move |e| a(e) && b(e)),
        }
    }
}

impl<E> Clone for SearchCriteria<E> {
    fn clone(&self) -> Self {
        match self {
            Self::Wildcard => Self::Wildcard,
            Self::Predicate(f) => Self::Predicate(Arc::clone(f)),
        }
    }
}

impl<E> Default for SearchCriteria<E> {
    fn default() -> Self {
        Self::Wildcard
    }
}

impl<E> fmt::Debug for SearchCriteria<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wildcard => write!(f, "Wildcard"),
            Self::Predicate(_) => write!(f, "Predicate(..)"),
        }
    }
}

impl<E> From<Option<SearchCriteria<E>>> for SearchCriteria<E> {
    fn from(criteria: Option<SearchCriteria<E>>) -> Self {
        criteria.unwrap_or(Self::Wildcard)
    }
}
