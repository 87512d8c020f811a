//! Data module - CSV loading, parsing and column classification

mod classifier;
mod loader;
mod parser;
mod sample;
mod value;

pub use classifier::{classify, ColumnClassification, SAMPLE_ROWS};
pub use loader::{parse_file, DataError, DataLoader};
pub use parser::{parse, DelimitedParser, Delimiter};
pub use sample::{SAMPLE_CSV, SAMPLE_NAME};
pub use value::{CellValue, Dataset, Record};
