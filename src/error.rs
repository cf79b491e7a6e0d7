//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use std::path::PathBuf;

use thiserror::Error;

/// sakematrixクレート全体で使用するエラー型
///
/// ワークブックの読み込み、シート解決、レコード変換、出力処理中に発生する
/// すべてのエラーを統一的に扱うために使用されます。
///
/// セル単位の変換失敗（数値として読めない価格など）はエラーにならず、
/// フィールドのデフォルト値で置き換えられます。
///
/// # 使用例
///
/// ```rust,no_run
/// use sakematrix::MatrixError;
/// use std::fs::File;
///
/// fn open_matrix(path: &str) -> Result<File, MatrixError> {
///     let file = File::open(path)?;  // Ioエラーが自動的に変換される
///     Ok(file)
/// }
/// ```
#[derive(Error, Debug)]
pub enum MatrixError {
    /// I/O操作中に発生したエラー
    ///
    /// `#[from]`属性により、`std::io::Error`から自動的に変換されます。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ワークブックの解析中に発生したエラー（calamine由来）
    #[error("Failed to parse Excel file: {0}")]
    Parse(#[from] calamine::Error),

    /// JSONのシリアライズ・デシリアライズエラー
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// 入力ファイルが存在しない
    ///
    /// 変換処理を開始する前に検出され、CLIは非ゼロで終了します。
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// 指定したシートがワークブックに存在しない
    ///
    /// シート選択では代替シートへのフォールバックが行われるため、
    /// このエラーはシートを1つも持たないワークブックか、
    /// 名前を直接指定した読み込みでのみ発生します。
    #[error("Sheet '{requested}' not found (available: {available:?})")]
    SheetNotFound {
        /// 要求されたシート名
        requested: String,
        /// ワークブックに存在するシート名
        available: Vec<String>,
    },

    /// 設定の検証に失敗したエラー
    ///
    /// `ConverterBuilder::build()`時に設定を検証し、無効な設定が検出された
    /// 場合に発生します。
    ///
    /// ```rust,no_run
    /// use sakematrix::{ConverterBuilder, MatrixError, RowWindow};
    ///
    /// let result = ConverterBuilder::new()
    ///     .with_product_window(RowWindow::new(5, Some(2)))  // 無効な範囲
    ///     .build();
    ///
    /// if let Err(MatrixError::Config(msg)) = result {
    ///     println!("設定エラー: {}", msg);
    /// }
    /// ```
    #[error("Configuration error: {0}")]
    Config(String),

    /// セキュリティ制限に違反したエラー（入力サイズ上限など）
    #[error("Security violation: {0}")]
    SecurityViolation(String),
}

/// クレート内で使用するResult型
pub type Result<T> = std::result::Result<T, MatrixError>;
