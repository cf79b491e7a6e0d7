//! sakematrix - Sake and cuisine compatibility matrix converter
//!
//! This crate reads the "お酒とお料理相性マトリックス" workbook and produces the
//! data files consumed by the sake recommendation web application:
//!
//! - product records (`ProductRecord`) as JSON, either from the fixed-column
//!   spec sheet (taste scores derived from 日本酒度 / 酸度 / 度数) or from a
//!   headed catalog sheet (scores read as-is)
//! - per-cuisine dish compatibility (`DishMatrix`) as JSON and as a
//!   TypeScript data module
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::fs::File;
//! use std::path::Path;
//! use sakematrix::ConverterBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let converter = ConverterBuilder::new().build()?;
//!
//!     let input = File::open("お酒とお料理相性マトリックス.xlsx")?;
//!     let products = converter.convert_products(input)?;
//!
//!     let json = sakematrix::output::render_json(&products)?;
//!     sakematrix::output::write_output(Path::new("sake-data-excel.json"), &json)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Dish Matrix
//!
//! ```rust,no_run
//! use std::path::Path;
//! use sakematrix::output::{render_dishes, write_output, OutputFormatter};
//! use sakematrix::ConverterBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let converter = ConverterBuilder::new().build()?;
//!     let matrix = converter.extract_dishes_path(Path::new("お酒とお料理相性マトリックス.xlsx"))?;
//!
//!     let ts = render_dishes(&matrix, OutputFormatter::TypeScript)?;
//!     write_output(Path::new("lib/data/dish-compatibility-matrix.ts"), &ts)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Custom Layout
//!
//! Every layout is plain data, so the mappers also work on in-memory tables:
//!
//! ```rust
//! use sakematrix::{CellValue, PositionalLayout, ProductSettings, RowWindow, SheetTable};
//!
//! let layout = PositionalLayout {
//!     window: RowWindow::new(1, None),
//!     ..PositionalLayout::default()
//! };
//! let table = SheetTable::new(
//!     "お酒データ",
//!     vec![
//!         vec![],
//!         vec![CellValue::Empty, "〇〇正宗".into(), "純米酒".into(), (-2.0).into()],
//!     ],
//! );
//!
//! let records = layout.convert(&table, &ProductSettings::default());
//! assert_eq!(records[0].brewery, "正宗酒造");
//! ```

mod api;
mod builder;
pub mod dish;
mod error;
pub mod inspect;
mod lookup;
mod mapping;
pub mod output;
mod parser;
pub mod product;
mod types;

// 公開API
pub use api::{ColumnLocator, HeaderRule, RowWindow, SheetSelector};
pub use builder::{Converter, ConverterBuilder};
pub use dish::{Compatibility, CuisineSheet, CuisineType, DishLayout, DishMatrix, DishRecord};
pub use error::{MatrixError, Result};
pub use inspect::{inspect_sheet, SheetReport, WorkbookReport};
pub use lookup::OrderedLookup;
pub use mapping::{FieldMap, MappedRow, ResolvedColumns, RowMapper};
pub use parser::{WorkbookParser, DEFAULT_MAX_INPUT_SIZE};
pub use product::{
    HeaderLayout, PositionalLayout, ProductRecord, ProductSettings, SweetnessBand, Tag,
    TasteProfile,
};
pub use types::{CellValue, SheetTable};
