//! CSV storage for the listing table and the template files.
//!
//! Every column is read as text so identifiers, phone numbers and postal
//! codes survive unchanged; type inference would strip leading zeros and
//! turn `+49 ...` into garbage.

mod reader;
mod writer;

pub use reader::{column_values, load_business_table, read_text_csv};
pub use writer::{save_business_table, table_to_dataframe, write_csv};
