//! Enum helpers built on strum's derives.
//!
//! [`values`] memoizes the variant list per enum type, so repeated lookups (for example
//! building a name index on every request) don't re-run the iterator.

use std::any::{Any, TypeId};
use std::str::FromStr;
use std::sync::{Arc, LazyLock};

use dashmap::DashMap;
use strum::IntoEnumIterator;

/// Variant tables keyed by enum type. Each value is an `Arc<[E]>` for its key's `E`.
static VALUES_CACHE: LazyLock<DashMap<TypeId, Box<dyn Any + Send + Sync>>> =
    LazyLock::new(DashMap::new);

/// All variants of `E`, in declaration order.
///
/// The table is computed on first use and shared afterwards.
///
/// ```
/// use strum::EnumIter;
/// use uwutils::enums;
///
/// #[derive(Debug, Clone, PartialEq, EnumIter)]
/// enum Suit { Hearts, Spades }
///
/// assert_eq!(&*enums::values::<Suit>(), &[Suit::Hearts, Suit::Spades]);
/// ```
pub fn values<E>() -> Arc<[E]>
where
    E: IntoEnumIterator + Clone + Send + Sync + 'static,
{
    let entry = VALUES_CACHE
        .entry(TypeId::of::<E>())
        .or_insert_with(|| Box::new(E::iter().collect::<Arc<[E]>>()) as Box<dyn Any + Send + Sync>);

    let cached: &(dyn Any + Send + Sync) = &**entry.value();
    match cached.downcast_ref::<Arc<[E]>>() {
        Some(values) => values.clone(),
        // Unreachable as long as the key is derived from E; recompute rather than panic.
        None => E::iter().collect(),
    }
}

/// Parse a variant from its name.
pub fn from_name<E: FromStr>(name: &str) -> Option<E> {
    match name.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            log::debug!(
                "No variant of {} named {name:?}",
                std::any::type_name::<E>()
            );
            None
        }
    }
}

pub fn from_name_or<E: FromStr>(name: &str, default: E) -> E {
    from_name(name).unwrap_or(default)
}

pub fn from_name_or_else<E: FromStr>(name: &str, default: impl FnOnce() -> E) -> E {
    from_name(name).unwrap_or_else(default)
}
