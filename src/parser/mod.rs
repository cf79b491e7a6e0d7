//! Parser Module
//!
//! calamineを使用したワークブック読み込みの実装。
//! シートの解決と、シート全体のテーブルへの展開を担当します。

mod workbook;

pub use workbook::{WorkbookParser, DEFAULT_MAX_INPUT_SIZE};
