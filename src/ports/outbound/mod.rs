/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces the engine and the application core use
/// to reach the persistence layer, the console and output destinations.
pub mod bom_snapshot_reader;
pub mod bom_writer;
pub mod component_resolver;
pub mod formatter;
pub mod output_presenter;
pub mod progress_reporter;

pub use bom_snapshot_reader::BomSnapshotReader;
pub use bom_writer::BomWriter;
pub use component_resolver::ComponentResolver;
pub use formatter::ReportFormatter;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
