/// Adapters layer - Infrastructure implementations
///
/// This layer contains concrete implementations of the ports,
/// providing the actual integration with catalog files, the console
/// and report output.
pub mod outbound;
