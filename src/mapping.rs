//! Row Mapper Module
//!
//! フィールド → 列の位置指定を見出し行に対して解決し、指定された行範囲を
//! 走査してフィールド単位でセルを参照できるようにするモジュール。
//!
//! 変換ロジック（スコア計算やタグ付け）は持たず、どの行のどの列を読むかだけを
//! 扱います。ラベル列が空の行は黙ってスキップされます。

use crate::api::{ColumnLocator, RowWindow};
use crate::types::{CellValue, SheetTable};

/// フィールド → 列の位置指定の順序付きマップ
///
/// 見出しルールで解決する場合、宣言順が優先順位になります。
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMap<F> {
    entries: Vec<(F, ColumnLocator)>,
}

impl<F: Copy + PartialEq> FieldMap<F> {
    /// 空のマップを生成
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// フィールドの位置指定を追加（ビルダー形式）
    pub fn with(mut self, field: F, locator: ColumnLocator) -> Self {
        self.set(field, locator);
        self
    }

    /// フィールドの位置指定を設定
    ///
    /// 既に登録されているフィールドは宣言位置を保ったまま置き換えます。
    pub fn set(&mut self, field: F, locator: ColumnLocator) {
        match self.entries.iter_mut().find(|(f, _)| *f == field) {
            Some(entry) => entry.1 = locator,
            None => self.entries.push((field, locator)),
        }
    }

    /// フィールドの位置指定を取得
    pub fn locator(&self, field: F) -> Option<&ColumnLocator> {
        self.entries
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, locator)| locator)
    }

    /// 見出し行に対して位置指定を解決し、フィールド → 列インデックスの対応を返す
    ///
    /// 見出し行を左から走査し、各列を最初に一致したフィールドに割り当てます。
    /// 同じフィールドに複数の列が一致した場合は右側の列が採用されます。
    /// 固定インデックスの位置指定はそのまま使用します。
    pub fn resolve(&self, header: &[CellValue]) -> ResolvedColumns<F> {
        let mut columns: Vec<(F, usize)> = self
            .entries
            .iter()
            .filter_map(|(field, locator)| match locator {
                ColumnLocator::Index(col) => Some((*field, *col)),
                ColumnLocator::Header(_) => None,
            })
            .collect();

        for (col, cell) in header.iter().enumerate() {
            let text = match cell.as_text() {
                Some(text) => text,
                None => continue,
            };

            let matched = self.entries.iter().find(|(_, locator)| match locator {
                ColumnLocator::Header(rule) => rule.matches(&text),
                ColumnLocator::Index(_) => false,
            });

            if let Some((field, _)) = matched {
                match columns.iter_mut().find(|(f, _)| f == field) {
                    Some(entry) => entry.1 = col,
                    None => columns.push((*field, col)),
                }
            }
        }

        ResolvedColumns { columns }
    }
}

impl<F: Copy + PartialEq> Default for FieldMap<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// 解決済みのフィールド → 列インデックスの対応
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedColumns<F> {
    columns: Vec<(F, usize)>,
}

impl<F: Copy + PartialEq> ResolvedColumns<F> {
    /// フィールドの列インデックスを取得
    pub fn column(&self, field: F) -> Option<usize> {
        self.columns
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, col)| *col)
    }

    /// フィールドが列に解決されたか
    pub fn contains(&self, field: F) -> bool {
        self.column(field).is_some()
    }
}

/// 行範囲を走査してフィールド単位の行ビューを生成するマッパー
#[derive(Debug, Clone)]
pub struct RowMapper<F> {
    /// フィールド → 列の位置指定
    fields: FieldMap<F>,

    /// 処理対象の行範囲
    window: RowWindow,

    /// 見出し行（見出しルールの解決に使用）
    header_row: usize,

    /// 空の場合に行をスキップするラベルフィールド
    label: Option<F>,
}

impl<F: Copy + PartialEq> RowMapper<F> {
    /// 新しいマッパーを生成
    pub fn new(fields: FieldMap<F>, window: RowWindow) -> Self {
        Self {
            fields,
            window,
            header_row: 0,
            label: None,
        }
    }

    /// 見出し行を指定
    pub fn with_header_row(mut self, row: usize) -> Self {
        self.header_row = row;
        self
    }

    /// ラベルフィールドを指定（空の行はスキップ）
    pub fn with_label(mut self, field: F) -> Self {
        self.label = Some(field);
        self
    }

    /// テーブルに対して列を解決し、対象行のビューを返す
    ///
    /// ラベルフィールドが空の行はスキップされます。ラベルフィールドが
    /// どの列にも解決されない場合はスキップを行いません。
    pub fn rows<'t>(&self, table: &'t SheetTable) -> Vec<MappedRow<'t, F>> {
        let columns = self.fields.resolve(table.row(self.header_row));

        self.window
            .clip(table.height())
            .enumerate()
            .map(|(ordinal, row)| MappedRow {
                table,
                row,
                ordinal,
                columns: columns.clone(),
            })
            .filter(|mapped| match self.label {
                Some(label) if mapped.columns.contains(label) => !mapped.get(label).is_empty(),
                _ => true,
            })
            .collect()
    }
}

/// 1行分のフィールド単位ビュー
#[derive(Debug, Clone)]
pub struct MappedRow<'t, F> {
    table: &'t SheetTable,
    row: usize,
    ordinal: usize,
    columns: ResolvedColumns<F>,
}

/// 解決されていないフィールドの参照結果
static UNRESOLVED: CellValue = CellValue::Empty;

impl<'t, F: Copy + PartialEq> MappedRow<'t, F> {
    /// シート上の行インデックス（0始まり）
    pub fn index(&self) -> usize {
        self.row
    }

    /// 行範囲内での順番（スキップ前の位置、0始まり）
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// フィールドのセル値を取得（未解決のフィールドは空セル）
    pub fn get(&self, field: F) -> &'t CellValue {
        match self.columns.column(field) {
            Some(col) => self.table.get(self.row, col),
            None => &UNRESOLVED,
        }
    }

    /// フィールドが列に解決されているか
    pub fn has(&self, field: F) -> bool {
        self.columns.contains(field)
    }

    /// 数値として取得し、失敗した場合はデフォルト値を返す
    pub fn number_or(&self, field: F, default: f64) -> f64 {
        self.get(field).as_number().unwrap_or(default)
    }

    /// 文字列として取得し、失敗した場合はデフォルト値を返す
    pub fn text_or(&self, field: F, default: &str) -> String {
        self.get(field)
            .as_text()
            .unwrap_or_else(|| default.to_string())
    }
}
