//! Workbook Module
//!
//! calamineのラッパーとして、ワークブックを開き、シートを解決し、
//! シート全体を`SheetTable`に展開します。

use calamine::{open_workbook_auto_from_rs, Reader, Sheets};
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;

use tracing::{debug, warn};

use crate::api::SheetSelector;
use crate::error::{MatrixError, Result};
use crate::types::SheetTable;

/// 入力ファイルサイズの上限のデフォルト値（256MiB）
pub const DEFAULT_MAX_INPUT_SIZE: u64 = 268_435_456;

/// ワークブックパーサー
///
/// 入力全体をメモリに読み込んでから calamine で開きます。
/// XLSX / XLS / ODS のいずれの形式も受け付けます。
pub struct WorkbookParser {
    /// calamineのワークブック
    workbook: Sheets<Cursor<Vec<u8>>>,
}

impl WorkbookParser {
    /// ワークブックを開く
    ///
    /// # 引数
    ///
    /// * `reader` - ワークブックを読み込むためのリーダー
    /// * `max_input_size` - 入力サイズの上限（バイト）
    ///
    /// # 戻り値
    ///
    /// * `Ok(WorkbookParser)` - 読み込みに成功した場合
    /// * `Err(MatrixError::SecurityViolation)` - 入力サイズが上限を超えた場合
    /// * `Err(MatrixError::Parse)` - ワークブックとして解析できない場合
    pub fn open<R: Read>(reader: R, max_input_size: u64) -> Result<Self> {
        // 上限+1バイトまで読み、超過を検出する
        let mut buffer = Vec::new();
        let bytes_read = reader
            .take(max_input_size.saturating_add(1))
            .read_to_end(&mut buffer)?;

        if bytes_read as u64 > max_input_size {
            return Err(MatrixError::SecurityViolation(format!(
                "Input file size exceeds maximum: more than {} bytes",
                max_input_size
            )));
        }

        let workbook = open_workbook_auto_from_rs(Cursor::new(buffer))?;
        debug!(bytes = bytes_read, "workbook opened");

        Ok(Self { workbook })
    }

    /// ファイルパスからワークブックを開く
    ///
    /// ファイルが存在しない場合は、読み込みを試みる前に
    /// `MatrixError::InputNotFound`を返します。
    pub fn open_path(path: &Path, max_input_size: u64) -> Result<Self> {
        if !path.exists() {
            return Err(MatrixError::InputNotFound(path.to_path_buf()));
        }

        let file = File::open(path)?;
        Self::open(file, max_input_size)
    }

    /// すべてのシート名を取得（ワークブック内の順序）
    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names()
    }

    /// シート名が存在するか
    pub fn has_sheet(&self, name: &str) -> bool {
        self.sheet_names().iter().any(|s| s == name)
    }

    /// セレクターに基づいて使用するシート名を決定
    ///
    /// 主シートが存在しない場合は代替シート、最初のシートの順に
    /// フォールバックし、その旨をログに出力します。
    ///
    /// # 戻り値
    ///
    /// * `Ok(String)` - 使用するシート名
    /// * `Err(MatrixError::SheetNotFound)` - ワークブックにシートが1つもない場合
    pub fn resolve_sheet(&self, selector: &SheetSelector) -> Result<String> {
        let available = self.sheet_names();

        let resolved = selector
            .resolve(&available)
            .map(str::to_string)
            .ok_or_else(|| MatrixError::SheetNotFound {
                requested: selector.primary.clone(),
                available: available.clone(),
            })?;

        if resolved != selector.primary {
            warn!(
                requested = %selector.primary,
                using = %resolved,
                "sheet not found, falling back"
            );
        }

        Ok(resolved)
    }

    /// シート全体をテーブルとして読み込む
    ///
    /// # 戻り値
    ///
    /// * `Ok(SheetTable)` - 読み込みに成功した場合
    /// * `Err(MatrixError::SheetNotFound)` - シート名が存在しない場合
    /// * `Err(MatrixError::Parse)` - シートの解析に失敗した場合
    pub fn read_table(&mut self, sheet_name: &str) -> Result<SheetTable> {
        if !self.has_sheet(sheet_name) {
            return Err(MatrixError::SheetNotFound {
                requested: sheet_name.to_string(),
                available: self.sheet_names(),
            });
        }

        let range = self.workbook.worksheet_range(sheet_name)?;
        let table = SheetTable::from_range(sheet_name, &range);
        debug!(
            sheet = sheet_name,
            rows = table.height(),
            cols = table.width(),
            "sheet loaded"
        );

        Ok(table)
    }

    /// セレクターでシートを解決して読み込む
    pub fn read_selected(&mut self, selector: &SheetSelector) -> Result<SheetTable> {
        let name = self.resolve_sheet(selector)?;
        self.read_table(&name)
    }
}
