//! Convert spectroscopy fit results from the current dataset schema to the
//! legacy variable names and layouts that plotting tools read.
//!
//! ```no_run
//! use glotaran_compat::{convert_dataset, data::loader};
//! use glotaran_compat::Convertible;
//!
//! # fn main() -> anyhow::Result<()> {
//! if let Convertible::Dataset(ds) = loader::load_file("dataset.json".as_ref())? {
//!     let legacy = convert_dataset(&ds, true)?;
//!     println!("{:?}", legacy.variable_names());
//! }
//! # Ok(())
//! # }
//! ```

pub mod compat;
pub mod data;
pub mod error;

pub use compat::{convert, convert_dataset, convert_result, convert_value};
pub use data::model::{
    AttrValue, Convertible, DataArray, Dataset, Parameter, ParameterCollection, ResultContainer,
};
pub use error::CompatError;
