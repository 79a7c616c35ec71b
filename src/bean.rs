//! Service provider discovery.
//!
//! A service file lists provider names for an interface, one per line, at
//! `META-INF/services/<interface>` under any resource root. Names are resolved to
//! instances through a [`TypeRegistry`]; names nobody registered are skipped.

use std::collections::HashSet;
use std::fmt;

use crate::reflect::TypeRegistry;
use crate::resource::ResourceLocator;

pub const SERVICES_DIR: &str = "META-INF/services";

/// A resolved provider: the name it was listed under and a fresh instance.
pub struct Provider<T: ?Sized> {
    pub name: String,
    pub instance: Box<T>,
}

impl<T: ?Sized> fmt::Debug for Provider<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provider").field("name", &self.name).finish_non_exhaustive()
    }
}

/// Resource path of the service file for `interface`.
pub fn service_path(interface: &str) -> String {
    format!("{SERVICES_DIR}/{interface}")
}

/// Provider names listed for `interface` across every root, first occurrence first.
///
/// Any line break separates names. Blank lines and `#` comments are skipped.
pub fn find_service_names(locator: &ResourceLocator, interface: &str) -> Vec<String> {
    if interface.trim().is_empty() {
        return Vec::new();
    }

    let mut seen = HashSet::new();
    locator
        .find_all(&service_path(interface))
        .iter()
        .filter_map(|file| locator.read_file(file))
        .flat_map(|contents| {
            contents
                .split(['\r', '\n'])
                .map(|line| line.trim().to_string())
                .collect::<Vec<_>>()
        })
        .filter(|name| !name.is_empty() && !name.starts_with('#'))
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

/// Instantiate every provider listed for `interface` that `registry` knows.
pub fn find_services<T: ?Sized>(
    locator: &ResourceLocator,
    registry: &TypeRegistry<T>,
    interface: &str,
) -> Vec<Provider<T>> {
    find_service_names(locator, interface)
        .into_iter()
        .filter_map(|name| {
            let instance = registry.instantiate(&name)?;
            Some(Provider { name, instance })
        })
        .collect()
}

/// Like [`find_services`], but `default()` when no provider resolves.
pub fn find_services_or_else<T: ?Sized>(
    locator: &ResourceLocator,
    registry: &TypeRegistry<T>,
    interface: &str,
    default: impl FnOnce() -> Vec<Provider<T>>,
) -> Vec<Provider<T>> {
    let providers = find_services(locator, registry, interface);
    if providers.is_empty() { default() } else { providers }
}

pub fn find_services_or<T: ?Sized>(
    locator: &ResourceLocator,
    registry: &TypeRegistry<T>,
    interface: &str,
    default: Vec<Provider<T>>,
) -> Vec<Provider<T>> {
    find_services_or_else(locator, registry, interface, || default)
}
