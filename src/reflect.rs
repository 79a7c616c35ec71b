//! Runtime type helpers.
//!
//! Rust has no class loader to ask for "the type called `x`", so name-based creation goes
//! through a [`TypeRegistry`]: the program registers a factory per name up front, and
//! lookups by name either produce a fresh instance or fall back to a default.

use std::any::Any;
use std::fmt;

use indexmap::IndexMap;

/// The type name of `value`, as reported by [`std::any::type_name`].
pub fn type_name_of<T: ?Sized>(_value: &T) -> &'static str {
    std::any::type_name::<T>()
}

/// `value` as a `T`, if that is its concrete type.
pub fn downcast_ref<T: Any>(value: &dyn Any) -> Option<&T> {
    value.downcast_ref()
}

pub fn downcast_or<'a, T: Any>(value: &'a dyn Any, default: &'a T) -> &'a T {
    downcast_ref(value).unwrap_or(default)
}

/// Take a boxed value out as a `T`, if that is its concrete type.
pub fn downcast_box<T: Any>(value: Box<dyn Any>) -> Option<T> {
    match value.downcast::<T>() {
        Ok(value) => Some(*value),
        Err(_) => {
            log::debug!("Value is not a {}", std::any::type_name::<T>());
            None
        }
    }
}

/// The first item whose concrete type is `T`.
pub fn first_instance_of<T: Any>(items: &[Box<dyn Any>]) -> Option<&T> {
    items.iter().find_map(|item| item.downcast_ref::<T>())
}

/// A fresh default value of `T`.
pub fn new_instance<T: Default>() -> T {
    T::default()
}

type Factory<T> = Box<dyn Fn() -> Box<T> + Send + Sync>;

/// Named factories producing boxed `T` (usually a trait object).
///
/// ```
/// use uwutils::reflect::TypeRegistry;
///
/// trait Greeter { fn greet(&self) -> String; }
/// struct English;
/// impl Greeter for English { fn greet(&self) -> String { "hello".into() } }
///
/// let mut registry = TypeRegistry::<dyn Greeter>::new();
/// registry.register("english", || Box::new(English));
///
/// let greeter = registry.instantiate("english").unwrap();
/// assert_eq!(greeter.greet(), "hello");
/// assert!(registry.instantiate("klingon").is_none());
/// ```
pub struct TypeRegistry<T: ?Sized> {
    factories: IndexMap<String, Factory<T>>,
}

impl<T: ?Sized> TypeRegistry<T> {
    pub fn new() -> Self {
        Self {
            factories: IndexMap::new(),
        }
    }

    /// Register a factory under `name`, replacing any earlier one.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        factory: impl Fn() -> Box<T> + Send + Sync + 'static,
    ) -> &mut Self {
        self.factories.insert(name.into(), Box::new(factory));
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    pub fn instantiate(&self, name: &str) -> Option<Box<T>> {
        match self.factories.get(name) {
            Some(factory) => Some(factory()),
            None => {
                log::debug!("No type registered as {name:?}");
                None
            }
        }
    }

    pub fn instantiate_or_else(&self, name: &str, default: impl FnOnce() -> Box<T>) -> Box<T> {
        self.instantiate(name).unwrap_or_else(default)
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl<T: ?Sized> Default for TypeRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for TypeRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Shape {
        fn sides(&self) -> u32;
    }

    #[derive(Default)]
    struct Triangle;

    impl Shape for Triangle {
        fn sides(&self) -> u32 {
            3
        }
    }

    struct Square;

    impl Shape for Square {
        fn sides(&self) -> u32 {
            4
        }
    }

    fn registry() -> TypeRegistry<dyn Shape> {
        let mut registry = TypeRegistry::<dyn Shape>::new();
        registry
            .register("triangle", || Box::new(Triangle))
            .register("square", || Box::new(Square));
        registry
    }

    #[test]
    fn test_type_name_of() {
        assert_eq!(type_name_of(&1u8), "u8");
        assert!(type_name_of(&Triangle).ends_with("Triangle"));
        assert_eq!(type_name_of("text"), "str");
    }

    #[test]
    fn test_downcasts() {
        let value: Box<dyn Any> = Box::new(5i32);
        assert_eq!(downcast_ref::<i32>(&*value), Some(&5));
        assert_eq!(downcast_ref::<u32>(&*value), None);
        assert_eq!(*downcast_or::<u32>(&*value, &9), 9);

        assert_eq!(downcast_box::<String>(Box::new(String::from("s"))), Some("s".to_string()));
        assert_eq!(downcast_box::<String>(Box::new(1u8)), None);
    }

    #[test]
    fn test_first_instance_of() {
        let items: Vec<Box<dyn Any>> = vec![Box::new(1u8), Box::new("a"), Box::new(2u8), Box::new("b")];
        assert_eq!(first_instance_of::<&str>(&items), Some(&"a"));
        assert_eq!(first_instance_of::<u8>(&items), Some(&1));
        assert_eq!(first_instance_of::<f64>(&items), None);
    }

    #[test]
    fn test_registry() {
        let registry = registry();
        assert!(registry.contains("square"));
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["triangle", "square"]);
        assert_eq!(registry.instantiate("square").map(|s| s.sides()), Some(4));
        assert!(registry.instantiate("circle").is_none());
        assert_eq!(
            registry
                .instantiate_or_else("circle", || Box::new(Triangle))
                .sides(),
            3
        );
    }

    #[test]
    fn test_new_instance() {
        assert_eq!(new_instance::<Triangle>().sides(), 3);
        assert_eq!(new_instance::<Vec<u8>>(), Vec::<u8>::new());
    }
}
