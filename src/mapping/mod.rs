/// Rule sources: in-memory and TOON files on disk.
pub mod generator;
/// Typed rules compiled from a component's rule resource.
pub mod rules;
