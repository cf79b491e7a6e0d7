//! Sheet Inspection Module
//!
//! シートの先頭行と列ごとの値を一覧表示し、レイアウト（行範囲・列位置）を
//! 決める際の確認に使うモジュール。

use crate::error::Result;
use crate::types::SheetTable;
use std::io::Write;
use unicode_width::UnicodeWidthStr;

/// 列ごとの値の一覧
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    /// 列インデックス（0始まり）
    pub index: usize,

    /// 空でない値（上から順）
    pub values: Vec<String>,
}

/// シートの確認結果
#[derive(Debug, Clone, PartialEq)]
pub struct SheetReport {
    pub name: String,
    pub height: usize,
    pub width: usize,

    /// 先頭行（全列、表示用の文字列）
    pub rows: Vec<Vec<String>>,

    /// 先頭の列の値一覧
    pub columns: Vec<ColumnSummary>,
}

/// ワークブック全体の確認結果
#[derive(Debug, Clone, PartialEq)]
pub struct WorkbookReport {
    /// ワークブック内のすべてのシート名（順序どおり）
    pub sheet_names: Vec<String>,

    /// 対象シートの確認結果
    pub sheets: Vec<SheetReport>,
}

impl WorkbookReport {
    /// シート一覧と各シートの確認結果を出力
    pub fn render<W: Write>(&self, writer: &mut W) -> Result<()> {
        writeln!(writer, "sheets: [{}]", self.sheet_names.join(", "))?;
        for sheet in &self.sheets {
            writeln!(writer)?;
            sheet.render(writer)?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// シートの先頭`max_rows`行と、先頭`max_cols`列の値一覧を収集
pub fn inspect_sheet(table: &SheetTable, max_rows: usize, max_cols: usize) -> SheetReport {
    let width = table.width();

    let rows = (0..table.height().min(max_rows))
        .map(|r| {
            (0..width)
                .map(|c| display_text(&table.get(r, c).as_raw_string()))
                .collect()
        })
        .collect();

    let columns = (0..width.min(max_cols))
        .map(|index| ColumnSummary {
            index,
            values: table
                .column_values(index)
                .into_iter()
                .map(|v| display_text(&v.as_raw_string()))
                .collect(),
        })
        .collect();

    SheetReport {
        name: table.name().to_string(),
        height: table.height(),
        width,
        rows,
        columns,
    }
}

/// 表の1セルに収まるように改行とパイプを置き換える
fn display_text(raw: &str) -> String {
    raw.trim().replace(['\r', '\n'], " ").replace('|', "\\|")
}

impl SheetReport {
    /// 確認結果を出力
    pub fn render<W: Write>(&self, writer: &mut W) -> Result<()> {
        writeln!(writer, "## {}", self.name)?;
        writeln!(writer)?;
        writeln!(writer, "size: {} rows x {} cols", self.height, self.width)?;
        writeln!(writer)?;

        self.render_markdown(writer)?;

        if !self.columns.is_empty() {
            writeln!(writer)?;
            for column in &self.columns {
                writeln!(writer, "col {}: [{}]", column.index, column.values.join(", "))?;
            }
        }

        writer.flush()?;
        Ok(())
    }

    /// 先頭行を行番号付きのMarkdownテーブルとして出力
    ///
    /// 全角文字の表示幅を考慮して列を揃えます。
    pub fn render_markdown<W: Write>(&self, writer: &mut W) -> Result<()> {
        if self.rows.is_empty() || self.width == 0 {
            return Ok(());
        }

        let header: Vec<String> = std::iter::once("#".to_string())
            .chain((0..self.width).map(|c| c.to_string()))
            .collect();
        let body: Vec<Vec<String>> = self
            .rows
            .iter()
            .enumerate()
            .map(|(r, row)| std::iter::once(r.to_string()).chain(row.iter().cloned()).collect())
            .collect();

        let widths = column_widths(std::iter::once(&header).chain(body.iter()));

        write_row(writer, &header, &widths)?;
        writeln!(writer, "{}", separator(&widths))?;
        for row in &body {
            write_row(writer, row, &widths)?;
        }
        Ok(())
    }
}

/// 列ごとの最大表示幅（最小3）
fn column_widths<'a>(rows: impl Iterator<Item = &'a Vec<String>>) -> Vec<usize> {
    let mut widths: Vec<usize> = Vec::new();
    for row in rows {
        if widths.len() < row.len() {
            widths.resize(row.len(), 3);
        }
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.width());
        }
    }
    widths
}

/// 区切り行（セル前後のスペース分を含む）
fn separator(widths: &[usize]) -> String {
    let mut line = String::from("|");
    for &width in widths {
        line.push_str(&"-".repeat(width + 2));
        line.push('|');
    }
    line
}

fn write_row<W: Write>(writer: &mut W, cells: &[String], widths: &[usize]) -> Result<()> {
    write!(writer, "|")?;
    for (i, &width) in widths.iter().enumerate() {
        let content = cells.get(i).map(String::as_str).unwrap_or("");
        let padding = width.saturating_sub(content.width());
        write!(writer, " {}{} |", content, " ".repeat(padding))?;
    }
    writeln!(writer)?;
    Ok(())
}
