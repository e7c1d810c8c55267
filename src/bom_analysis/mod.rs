/// BOM analysis domain layer
///
/// Pure business logic: value objects describing BOM snapshots and analysis
/// results, policies, and the four analysis services. Nothing here performs
/// I/O except through the collaborator ports passed in by the caller.
pub mod domain;
pub mod policies;
pub mod services;
