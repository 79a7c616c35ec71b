//! Comparators for optional values.
//!
//! `Option<T>` already orders `None` first when `T: Ord`, but that only covers one
//! placement and one inner order. [`NullsOrdering`] lets the caller pick where absent
//! values go and which comparator orders the present ones, and keeps that choice when the
//! comparator is chained or reversed.

use std::cmp::Ordering;

use strum::{Display, EnumString};

/// A boxed comparator over `T`.
pub type Comparator<T> = Box<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

/// Where absent values are placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum NullPlacement {
    First,
    Last,
}

impl NullPlacement {
    fn flipped(self) -> Self {
        match self {
            Self::First => Self::Last,
            Self::Last => Self::First,
        }
    }
}

/// Orders `Option<T>` values with absent values first or last.
///
/// Two present values are ordered by the inner comparator, or treated as equal when
/// there is none.
///
/// ```
/// use uwutils::compare::null_last_by;
///
/// let mut scores = vec![Some(3), None, Some(1)];
/// let order = null_last_by(|a: &i32, b: &i32| a.cmp(b));
/// scores.sort_by(|a, b| order.compare(a, b));
/// assert_eq!(scores, vec![Some(1), Some(3), None]);
/// ```
pub struct NullsOrdering<T> {
    placement: NullPlacement,
    inner: Option<Comparator<T>>,
}

impl<T: 'static> NullsOrdering<T> {
    pub fn new(placement: NullPlacement, inner: Option<Comparator<T>>) -> Self {
        Self { placement, inner }
    }

    pub fn placement(&self) -> NullPlacement {
        self.placement
    }

    pub fn compare(&self, a: &Option<T>, b: &Option<T>) -> Ordering {
        let absent_first = match (a, b) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(a), Some(b)) => {
                return self
                    .inner
                    .as_ref()
                    .map_or(Ordering::Equal, |inner| inner(a, b));
            }
        };

        match self.placement {
            NullPlacement::First => absent_first,
            NullPlacement::Last => absent_first.reverse(),
        }
    }

    /// Break ties between present values with `other`.
    pub fn then_comparing(self, other: impl Fn(&T, &T) -> Ordering + Send + Sync + 'static) -> Self {
        let inner: Comparator<T> = match self.inner {
            Some(first) => Box::new(move |a, b| first(a, b).then_with(|| other(a, b))),
            None => Box::new(other),
        };
        Self::new(self.placement, Some(inner))
    }

    /// The opposite ordering: absent values move to the other end and the inner
    /// comparator is reversed.
    pub fn reversed(self) -> Self {
        let inner = self.inner.map(|inner| -> Comparator<T> {
            Box::new(move |a: &T, b: &T| inner(a, b).reverse())
        });
        Self::new(self.placement.flipped(), inner)
    }
}

/// Absent values first, present values equal.
pub fn null_first<T: 'static>() -> NullsOrdering<T> {
    NullsOrdering::new(NullPlacement::First, None)
}

/// Absent values last, present values equal.
pub fn null_last<T: 'static>() -> NullsOrdering<T> {
    NullsOrdering::new(NullPlacement::Last, None)
}

pub fn null_first_by<T: 'static>(
    inner: impl Fn(&T, &T) -> Ordering + Send + Sync + 'static,
) -> NullsOrdering<T> {
    NullsOrdering::new(NullPlacement::First, Some(Box::new(inner)))
}

pub fn null_last_by<T: 'static>(
    inner: impl Fn(&T, &T) -> Ordering + Send + Sync + 'static,
) -> NullsOrdering<T> {
    NullsOrdering::new(NullPlacement::Last, Some(Box::new(inner)))
}
