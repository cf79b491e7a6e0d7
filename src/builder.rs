//! Builder Module
//!
//! Fluent Builder APIを提供し、`Converter`インスタンスを段階的に構築する。

use crate::api::{RowWindow, SheetSelector};
use crate::dish::{default_cuisine_sheets, CuisineSheet, DishLayout, DishMatrix};
use crate::error::{MatrixError, Result};
use crate::inspect::{inspect_sheet, WorkbookReport};
use crate::lookup::OrderedLookup;
use crate::parser::{WorkbookParser, DEFAULT_MAX_INPUT_SIZE};
use crate::product::{HeaderLayout, PositionalLayout, ProductRecord, ProductSettings};
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

/// シート確認で一覧表示する列数
const INSPECT_MAX_COLS: usize = 10;

/// 変換処理の設定を保持する内部構造体
#[derive(Debug, Clone)]
pub(crate) struct ConversionConfig {
    /// お酒データシートの選択方式
    pub product_sheet: SheetSelector,

    /// 固定列レイアウト
    pub positional: PositionalLayout,

    /// 見出しレイアウト
    pub header: HeaderLayout,

    /// ECサイトURLのベースと産地推定表
    pub settings: ProductSettings,

    /// 料理ジャンル別シート（出力順）
    pub cuisine_sheets: Vec<CuisineSheet>,

    /// 料理シートのレイアウト
    pub dish: DishLayout,

    /// 入力ファイルサイズの上限（バイト）
    pub max_input_size: u64,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            product_sheet: SheetSelector::default(),
            positional: PositionalLayout::default(),
            header: HeaderLayout::default(),
            settings: ProductSettings::default(),
            cuisine_sheets: default_cuisine_sheets(),
            dish: DishLayout::default(),
            max_input_size: DEFAULT_MAX_INPUT_SIZE,
        }
    }
}

/// Fluent Builder APIを提供する構造体
///
/// `Converter`インスタンスを段階的に構築するためのビルダーです。
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use sakematrix::{ConverterBuilder, SheetSelector};
///
/// # fn main() -> Result<(), sakematrix::MatrixError> {
/// let converter = ConverterBuilder::new()
///     .with_product_sheet(SheetSelector::named("お酒データ"))
///     .with_ec_base("https://shop.example.com")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConverterBuilder {
    /// 内部設定（構築中）
    config: ConversionConfig,
}

impl Default for ConverterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConverterBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - お酒データシート: `お酒データ`（代替: 酒データ、データ、Sheet1、data）
    /// - 固定列レイアウト: 行2〜4、列1〜8
    /// - 料理シート: 和食・中華・洋食、行2〜5
    /// - ECサイトURL: `https://example-ec.com`
    /// - 入力サイズ上限: 256MiB
    pub fn new() -> Self {
        Self {
            config: ConversionConfig::default(),
        }
    }

    /// お酒データシートの選択方式を指定する
    pub fn with_product_sheet(mut self, selector: SheetSelector) -> Self {
        self.config.product_sheet = selector;
        self
    }

    /// 固定列レイアウトの行範囲を指定する
    ///
    /// # 制約
    ///
    /// * 終了行を指定する場合、開始行 <= 終了行 でなければならない
    /// * 制約違反の場合、`build()`時に`MatrixError::Config`を返す
    pub fn with_product_window(mut self, window: RowWindow) -> Self {
        self.config.positional.window = window;
        self
    }

    /// 固定列レイアウト全体を差し替える
    pub fn with_positional_layout(mut self, layout: PositionalLayout) -> Self {
        self.config.positional = layout;
        self
    }

    /// 見出しレイアウト全体を差し替える
    pub fn with_header_layout(mut self, layout: HeaderLayout) -> Self {
        self.config.header = layout;
        self
    }

    /// ECサイトURLのベースを指定する
    ///
    /// 商品URLは `{base}/{id}` になります。
    pub fn with_ec_base(mut self, base: impl Into<String>) -> Self {
        self.config.settings.ec_base = base.into();
        self
    }

    /// 銘柄名 → 都道府県の推定表を差し替える（宣言順に評価）
    pub fn with_region_table(mut self, regions: OrderedLookup<String>) -> Self {
        self.config.settings.regions = regions;
        self
    }

    /// 料理ジャンル別シートを指定する
    pub fn with_cuisine_sheets(mut self, sheets: Vec<CuisineSheet>) -> Self {
        self.config.cuisine_sheets = sheets;
        self
    }

    /// 料理シートの行範囲を指定する
    pub fn with_dish_window(mut self, window: RowWindow) -> Self {
        self.config.dish.window = window;
        self
    }

    /// 料理シートのレイアウト全体を差し替える
    pub fn with_dish_layout(mut self, layout: DishLayout) -> Self {
        self.config.dish = layout;
        self
    }

    /// 入力ファイルサイズの上限（バイト）を指定する
    pub fn with_max_input_size(mut self, bytes: u64) -> Self {
        self.config.max_input_size = bytes;
        self
    }

    /// 設定を検証し、`Converter`インスタンスを生成する
    ///
    /// # 発生し得るエラー
    ///
    /// * `MatrixError::Config(String)`: 設定の検証に失敗した場合
    ///   * 行範囲の開始行が終了行より大きい
    ///   * 料理シートが1つも指定されていない
    ///   * ECサイトURLのベースが空
    ///   * 入力サイズ上限が0
    pub fn build(self) -> Result<Converter> {
        // 1. 行範囲の検証
        validate_window("product", &self.config.positional.window)?;
        validate_window("dish", &self.config.dish.window)?;

        // 2. シートの検証
        if self.config.cuisine_sheets.is_empty() {
            return Err(MatrixError::Config(
                "At least one cuisine sheet is required".to_string(),
            ));
        }
        if self.config.product_sheet.primary.trim().is_empty() {
            return Err(MatrixError::Config(
                "Product sheet name must not be empty".to_string(),
            ));
        }

        // 3. 出力設定の検証
        if self.config.settings.ec_base.trim().is_empty() {
            return Err(MatrixError::Config("EC base URL must not be empty".to_string()));
        }
        if self.config.max_input_size == 0 {
            return Err(MatrixError::Config(
                "Maximum input size must be greater than zero".to_string(),
            ));
        }

        Ok(Converter::new(self.config))
    }
}

fn validate_window(label: &str, window: &RowWindow) -> Result<()> {
    match window.end {
        Some(end) if window.start > end => Err(MatrixError::Config(format!(
            "Invalid {} window: start row ({}) > end row ({})",
            label, window.start, end
        ))),
        _ => Ok(()),
    }
}

/// 変換処理のファサード
///
/// 相性マトリックスのワークブックから商品データ・料理データを抽出するための
/// メインエントリーポイントです。入力はすべてメモリ上で変換され、
/// 結果は値として返されます（ファイル出力は`output`モジュールの担当）。
///
/// # 使用例
///
/// ```rust,no_run
/// use sakematrix::ConverterBuilder;
/// use std::fs::File;
///
/// # fn main() -> Result<(), sakematrix::MatrixError> {
/// let converter = ConverterBuilder::new().build()?;
/// let input = File::open("お酒とお料理相性マトリックス.xlsx")?;
/// let products = converter.convert_products(input)?;
/// println!("{} products", products.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Converter {
    /// 変換設定
    config: ConversionConfig,
}

impl Converter {
    pub(crate) fn new(config: ConversionConfig) -> Self {
        Self { config }
    }

    fn open<R: Read>(&self, input: R) -> Result<WorkbookParser> {
        WorkbookParser::open(input, self.config.max_input_size)
    }

    fn open_path(&self, path: &Path) -> Result<WorkbookParser> {
        WorkbookParser::open_path(path, self.config.max_input_size)
    }

    /// 固定列レイアウトで商品レコードを生成
    ///
    /// # 処理フロー
    ///
    /// 1. ワークブックを開く
    /// 2. お酒データシートを解決（代替シートへのフォールバックを含む）
    /// 3. 行範囲の各行を変換
    pub fn convert_products<R: Read>(&self, input: R) -> Result<Vec<ProductRecord>> {
        let mut parser = self.open(input)?;
        self.products_from(&mut parser)
    }

    /// ファイルパスから固定列レイアウトで商品レコードを生成
    pub fn convert_products_path(&self, path: &Path) -> Result<Vec<ProductRecord>> {
        let mut parser = self.open_path(path)?;
        self.products_from(&mut parser)
    }

    /// 見出しレイアウトで商品レコードを生成
    pub fn convert_catalog<R: Read>(&self, input: R) -> Result<Vec<ProductRecord>> {
        let mut parser = self.open(input)?;
        self.catalog_from(&mut parser)
    }

    /// ファイルパスから見出しレイアウトで商品レコードを生成
    pub fn convert_catalog_path(&self, path: &Path) -> Result<Vec<ProductRecord>> {
        let mut parser = self.open_path(path)?;
        self.catalog_from(&mut parser)
    }

    /// 料理ジャンル別シートから料理データを抽出
    ///
    /// 存在しないシートは警告を出してスキップし、そのジャンルは空のままになります。
    pub fn extract_dishes<R: Read>(&self, input: R) -> Result<DishMatrix> {
        let mut parser = self.open(input)?;
        self.dishes_from(&mut parser)
    }

    /// ファイルパスから料理データを抽出
    pub fn extract_dishes_path(&self, path: &Path) -> Result<DishMatrix> {
        let mut parser = self.open_path(path)?;
        self.dishes_from(&mut parser)
    }

    /// シート一覧と、シートの先頭行・列ごとの値を収集
    ///
    /// `sheets`が空の場合は、料理シートとお酒データシートを対象にします。
    /// 存在しないシートは警告を出してスキップします。
    pub fn inspect<R: Read>(
        &self,
        input: R,
        sheets: &[String],
        max_rows: usize,
    ) -> Result<WorkbookReport> {
        let mut parser = self.open(input)?;
        self.inspect_from(&mut parser, sheets, max_rows)
    }

    /// ファイルパスからシートの先頭行と列ごとの値を収集
    pub fn inspect_path(
        &self,
        path: &Path,
        sheets: &[String],
        max_rows: usize,
    ) -> Result<WorkbookReport> {
        let mut parser = self.open_path(path)?;
        self.inspect_from(&mut parser, sheets, max_rows)
    }

    fn products_from(&self, parser: &mut WorkbookParser) -> Result<Vec<ProductRecord>> {
        let table = parser.read_selected(&self.config.product_sheet)?;
        let records = self.config.positional.convert(&table, &self.config.settings);
        info!(sheet = table.name(), records = records.len(), "products converted");
        Ok(records)
    }

    fn catalog_from(&self, parser: &mut WorkbookParser) -> Result<Vec<ProductRecord>> {
        let table = parser.read_selected(&self.config.product_sheet)?;
        let records = self.config.header.convert(&table, &self.config.settings);
        info!(sheet = table.name(), records = records.len(), "catalog converted");
        Ok(records)
    }

    fn dishes_from(&self, parser: &mut WorkbookParser) -> Result<DishMatrix> {
        let mut matrix = DishMatrix::default();

        for entry in &self.config.cuisine_sheets {
            if !parser.has_sheet(&entry.sheet) {
                warn!(sheet = %entry.sheet, cuisine = %entry.cuisine, "cuisine sheet not found, skipping");
                continue;
            }

            let table = parser.read_table(&entry.sheet)?;
            let dishes = self.config.dish.convert(&table, entry.cuisine);
            info!(sheet = %entry.sheet, cuisine = %entry.cuisine, dishes = dishes.len(), "cuisine sheet extracted");
            matrix.extend(entry.cuisine, dishes);
        }

        Ok(matrix)
    }

    fn inspect_from(
        &self,
        parser: &mut WorkbookParser,
        sheets: &[String],
        max_rows: usize,
    ) -> Result<WorkbookReport> {
        let sheet_names = parser.sheet_names();
        let targets: Vec<String> = if sheets.is_empty() {
            let mut defaults: Vec<String> = self
                .config
                .cuisine_sheets
                .iter()
                .map(|entry| entry.sheet.clone())
                .collect();
            if let Some(product) = self.config.product_sheet.resolve(&sheet_names) {
                defaults.push(product.to_string());
            }
            defaults
        } else {
            sheets.to_vec()
        };

        let mut reports = Vec::new();
        for name in &targets {
            if !parser.has_sheet(name) {
                warn!(sheet = %name, available = ?sheet_names, "sheet not found, skipping");
                continue;
            }
            let table = parser.read_table(name)?;
            reports.push(inspect_sheet(&table, max_rows, INSPECT_MAX_COLS));
        }

        Ok(WorkbookReport {
            sheet_names,
            sheets: reports,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_default() {
        let converter = ConverterBuilder::new().build();
        assert!(converter.is_ok());
    }

    #[test]
    fn test_builder_rejects_inverted_product_window() {
        let result = ConverterBuilder::new()
            .with_product_window(RowWindow::new(5, Some(2)))
            .build();
        assert!(matches!(result, Err(MatrixError::Config(_))));
    }

    #[test]
    fn test_builder_rejects_inverted_dish_window() {
        let result = ConverterBuilder::new()
            .with_dish_window(RowWindow::new(7, Some(1)))
            .build();
        match result {
            Err(MatrixError::Config(msg)) => assert!(msg.contains("dish")),
            _ => panic!("Expected Config error"),
        }
    }

    #[test]
    fn test_builder_accepts_open_ended_window() {
        let result = ConverterBuilder::new()
            .with_product_window(RowWindow::new(2, None))
            .build();
        assert!(result.is_ok());
    }

    #[test]
    fn test_builder_rejects_empty_cuisine_sheets() {
        let result = ConverterBuilder::new().with_cuisine_sheets(Vec::new()).build();
        assert!(matches!(result, Err(MatrixError::Config(_))));
    }

    #[test]
    fn test_builder_rejects_empty_ec_base() {
        let result = ConverterBuilder::new().with_ec_base("  ").build();
        assert!(matches!(result, Err(MatrixError::Config(_))));
    }

    #[test]
    fn test_builder_rejects_zero_input_size() {
        let result = ConverterBuilder::new().with_max_input_size(0).build();
        assert!(matches!(result, Err(MatrixError::Config(_))));
    }

    #[test]
    fn test_builder_method_chaining() {
        let converter = ConverterBuilder::new()
            .with_product_sheet(SheetSelector::named("データ"))
            .with_ec_base("https://shop.example/")
            .with_region_table(OrderedLookup::new([("獺祭", "山口県".to_string())]))
            .with_max_input_size(1024)
            .build()
            .unwrap();

        assert_eq!(converter.config.product_sheet.primary, "データ");
        assert_eq!(converter.config.settings.ec_url("sake001"), "https://shop.example/sake001");
        assert_eq!(converter.config.max_input_size, 1024);
    }

    #[test]
    fn test_convert_rejects_oversized_input() {
        let converter = ConverterBuilder::new().with_max_input_size(8).build().unwrap();
        let result = converter.convert_products(std::io::Cursor::new(vec![0u8; 32]));
        assert!(matches!(result, Err(MatrixError::SecurityViolation(_))));
    }

    #[test]
    fn test_convert_missing_path() {
        let converter = ConverterBuilder::new().build().unwrap();
        let result = converter.extract_dishes_path(Path::new("/nonexistent/matrix.xlsx"));
        assert!(matches!(result, Err(MatrixError::InputNotFound(_))));
    }
}
