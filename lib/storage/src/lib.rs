pub mod memory;
pub mod sink;
pub mod source;
pub mod warehouse;

pub use memory::MemorySink;
pub use sink::{Destination, TableSink, WriteMode, WriteSummary};
pub use source::CsvSource;
pub use warehouse::{OutputFormat, WarehouseSink};
