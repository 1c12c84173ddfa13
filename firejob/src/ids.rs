//! Identifier allocation for job entities.
//!
//! Every entity in a job carries a string id made of a per-kind prefix and a
//! counter (`ign0`, `ign1`, `scen0`, ...). Counters live in an [`IdAllocator`]
//! owned by the [`Job`](crate::model::Job) being built, so two jobs assembled
//! side by side never share numbering state.
//!
//! Ids travel inside pipe-delimited payload lines, so user supplied names pass
//! through [`sanitize_name`] before they replace an allocated id.

use std::collections::HashMap;

/// Field separator used by composite payload lines.
pub const FIELD_SEPARATOR: char = '|';

/// Entity kinds that receive allocated ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    GridFile,
    WeatherPatch,
    WeatherGrid,
    FuelPatch,
    FuelBreak,
    WeatherStation,
    WeatherStream,
    Ignition,
    Asset,
    Scenario,
}

impl EntityKind {
    /// Prefix prepended to the counter value.
    pub fn prefix(self) -> &'static str {
        match self {
            EntityKind::GridFile => "grdfl",
            EntityKind::WeatherPatch => "wthrptch",
            EntityKind::WeatherGrid => "wthrgrd",
            EntityKind::FuelPatch => "flptch",
            EntityKind::FuelBreak => "flbrk",
            EntityKind::WeatherStation => "wthrstn",
            EntityKind::WeatherStream => "wthrstrm",
            EntityKind::Ignition => "ign",
            EntityKind::Asset => "asset",
            EntityKind::Scenario => "scen",
        }
    }
}

/// Source of the numeric part of allocated ids.
///
/// The default [`SequentialIds`] counts up from zero per kind. Tests can
/// swap in their own source to pin ids.
pub trait IdSource: Send {
    /// Return the next counter value for `kind`.
    fn next(&mut self, kind: EntityKind) -> u64;
}

/// Monotonic per-kind counters starting at zero.
#[derive(Debug, Default, Clone)]
pub struct SequentialIds {
    counters: HashMap<EntityKind, u64>,
}

impl IdSource for SequentialIds {
    fn next(&mut self, kind: EntityKind) -> u64 {
        let counter = self.counters.entry(kind).or_insert(0);
        let value = *counter;
        *counter += 1;
        value
    }
}

/// Issues unique ids for every entity kind.
pub struct IdAllocator {
    source: Box<dyn IdSource>,
}

impl IdAllocator {
    /// Create an allocator with sequential counters.
    pub fn new() -> Self {
        Self::with_source(SequentialIds::default())
    }

    /// Create an allocator backed by a custom counter source.
    pub fn with_source(source: impl IdSource + 'static) -> Self {
        Self {
            source: Box::new(source),
        }
    }

    /// Allocate the next id for `kind`.
    pub fn allocate(&mut self, kind: EntityKind) -> String {
        let value = self.source.next(kind);
        format!("{}{}", kind.prefix(), value)
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for IdAllocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdAllocator").finish_non_exhaustive()
    }
}

/// Remove every field separator from a user supplied name.
pub fn sanitize_name(name: &str) -> String {
    name.chars().filter(|c| *c != FIELD_SEPARATOR).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids_per_kind() {
        let mut ids = IdAllocator::new();
        assert_eq!(ids.allocate(EntityKind::Ignition), "ign0");
        assert_eq!(ids.allocate(EntityKind::Ignition), "ign1");
        assert_eq!(ids.allocate(EntityKind::Scenario), "scen0");
        assert_eq!(ids.allocate(EntityKind::WeatherStream), "wthrstrm0");
        assert_eq!(ids.allocate(EntityKind::Ignition), "ign2");
    }

    #[test]
    fn test_allocators_are_independent() {
        let mut first = IdAllocator::new();
        let mut second = IdAllocator::new();
        assert_eq!(first.allocate(EntityKind::Asset), "asset0");
        assert_eq!(first.allocate(EntityKind::Asset), "asset1");
        assert_eq!(second.allocate(EntityKind::Asset), "asset0");
    }

    #[test]
    fn test_custom_source() {
        struct Fixed(u64);
        impl IdSource for Fixed {
            fn next(&mut self, _kind: EntityKind) -> u64 {
                self.0
            }
        }

        let mut ids = IdAllocator::with_source(Fixed(42));
        assert_eq!(ids.allocate(EntityKind::FuelBreak), "flbrk42");
        assert_eq!(ids.allocate(EntityKind::GridFile), "grdfl42");
    }

    #[test]
    fn test_sanitize_removes_every_separator() {
        assert_eq!(sanitize_name("a|b||c|"), "abc");
        assert_eq!(sanitize_name("plain"), "plain");
        assert_eq!(sanitize_name("|||"), "");
    }

    #[test]
    fn test_prefixes() {
        assert_eq!(EntityKind::GridFile.prefix(), "grdfl");
        assert_eq!(EntityKind::WeatherPatch.prefix(), "wthrptch");
        assert_eq!(EntityKind::WeatherGrid.prefix(), "wthrgrd");
        assert_eq!(EntityKind::FuelPatch.prefix(), "flptch");
        assert_eq!(EntityKind::WeatherStation.prefix(), "wthrstn");
    }
}
