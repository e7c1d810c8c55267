/// Filesystem adapters for catalogs and report output
mod catalog_format;
mod catalog_reader;
mod catalog_writer;
mod file_writer;

pub use catalog_format::{BomCatalog, CatalogFormat};
pub use catalog_reader::CatalogFileReader;
pub use catalog_writer::CatalogFileWriter;
pub use file_writer::{FileSystemWriter, StdoutPresenter};
