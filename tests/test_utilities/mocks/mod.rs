/// Mock implementations for testing
mod mock_bom_writer;
mod mock_component_resolver;
mod mock_progress_reporter;
mod mock_snapshot_reader;

pub use mock_bom_writer::MockBomWriter;
pub use mock_component_resolver::MockComponentResolver;
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_snapshot_reader::MockSnapshotReader;
