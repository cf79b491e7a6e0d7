//! Output Format Module
//!
//! 変換結果をJSON・TypeScriptとして出力するモジュール。
//!
//! 出力は一度メモリ上に描画してからファイルを作成するため、変換に失敗した
//! 場合に書きかけのファイルが残ることはありません。

mod formatters;

use crate::dish::DishMatrix;
use crate::error::Result;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::info;

pub use formatters::*;

/// 料理データの出力フォーマッター（Strategy Pattern）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatter {
    Json,
    TypeScript,
}

impl OutputFormatter {
    /// 拡張子からフォーマッターを選択（`.ts`以外はJSON）
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("ts") => OutputFormatter::TypeScript,
            _ => OutputFormatter::Json,
        }
    }

    /// 料理マトリックスを指定されたフォーマットで出力する
    pub fn render<W: Write>(&self, matrix: &DishMatrix, writer: &mut W) -> Result<()> {
        match self {
            OutputFormatter::Json => JsonFormatter.render(matrix, writer),
            OutputFormatter::TypeScript => TypeScriptFormatter.render(matrix, writer),
        }
    }
}

/// 値をJSONとしてメモリ上に描画
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    JsonFormatter.render(value, &mut buffer)?;
    Ok(buffer)
}

/// 料理マトリックスをメモリ上に描画
pub fn render_dishes(matrix: &DishMatrix, formatter: OutputFormatter) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    formatter.render(matrix, &mut buffer)?;
    Ok(buffer)
}

/// 描画済みの内容をファイルに書き込む（親ディレクトリがなければ作成）
pub fn write_output(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    info!(path = %path.display(), bytes = contents.len(), "output written");
    Ok(())
}
