//! Container helpers: lookups with defaults and collection builders.

pub mod map;
pub mod set;

pub use map::MapLookup;
