//! Public API Types
//!
//! 公開APIで使用する設定用の型を定義するモジュール。
//! シート選択・列の位置指定・行ウィンドウはすべて値として注入でき、
//! 実際のワークブックなしでマッパーをテストできます。

use serde::{Deserialize, Serialize};

/// 変換元シートの選択方式
///
/// 主シート名が見つからない場合、代替シート名を宣言順に探し、
/// それも見つからなければワークブックの最初のシートを使用します。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetSelector {
    /// 主シート名
    pub primary: String,

    /// 代替シート名（宣言順に探索）
    #[serde(default)]
    pub fallbacks: Vec<String>,
}

impl SheetSelector {
    /// 代替シートなしのセレクターを生成
    pub fn named(primary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            fallbacks: Vec::new(),
        }
    }

    /// 代替シート名を設定
    pub fn with_fallbacks<I, S>(mut self, fallbacks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fallbacks = fallbacks.into_iter().map(Into::into).collect();
        self
    }

    /// 存在するシート名のリストから使用するシートを決定
    ///
    /// # 戻り値
    ///
    /// * `Some(name)` - 主シート、最初に見つかった代替シート、または最初のシート
    /// * `None` - ワークブックにシートが1つもない場合
    pub fn resolve<'a>(&self, available: &'a [String]) -> Option<&'a str> {
        let find = |name: &str| available.iter().find(|s| s.as_str() == name);

        find(&self.primary)
            .or_else(|| self.fallbacks.iter().find_map(|f| find(f.as_str())))
            .or_else(|| available.first())
            .map(String::as_str)
    }
}

impl Default for SheetSelector {
    /// お酒データシート（代替: 酒データ、データ、Sheet1、data）
    fn default() -> Self {
        Self::named("お酒データ").with_fallbacks(["お酒データ", "酒データ", "データ", "Sheet1", "data"])
    }
}

/// 見出しテキストの部分一致ルール
///
/// `local`の語は大文字小文字を区別する部分一致、`latin`の語は
/// 見出しを小文字化したうえでの部分一致で判定します。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HeaderRule {
    /// 完全な部分一致で判定する語（日本語の見出し語）
    #[serde(default)]
    pub local: Vec<String>,

    /// 小文字化して部分一致で判定する語（英字の見出し語）
    #[serde(default)]
    pub latin: Vec<String>,
}

impl HeaderRule {
    /// 見出し語からルールを生成
    pub fn new(local: &[&str], latin: &[&str]) -> Self {
        Self {
            local: local.iter().map(|s| s.to_string()).collect(),
            latin: latin.iter().map(|s| s.to_lowercase()).collect(),
        }
    }

    /// 見出しテキストがルールに一致するか判定
    pub fn matches(&self, header: &str) -> bool {
        if self.local.iter().any(|term| header.contains(term.as_str())) {
            return true;
        }

        let lowered = header.to_lowercase();
        self.latin
            .iter()
            .any(|term| lowered.contains(&term.to_lowercase()))
    }
}

/// 列の位置指定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnLocator {
    /// 固定の列インデックス（0始まり）
    Index(usize),

    /// 見出し行の部分一致ルール
    Header(HeaderRule),
}

/// 処理対象の行範囲（半開区間 `[start, end)`）
///
/// `end`が`None`の場合はシートの最終行までを対象とします。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowWindow {
    /// 開始行（0始まり、含む）
    pub start: usize,

    /// 終了行（含まない）
    pub end: Option<usize>,
}

impl RowWindow {
    /// 新しい行範囲を生成
    pub fn new(start: usize, end: Option<usize>) -> Self {
        Self { start, end }
    }

    /// テーブルの行数で切り詰めた範囲を取得
    pub fn clip(&self, height: usize) -> std::ops::Range<usize> {
        let end = self.end.map_or(height, |end| end.min(height));
        self.start.min(end)..end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_resolve_primary() {
        let selector = SheetSelector::default();
        let available = names(&["和食", "お酒データ"]);
        assert_eq!(selector.resolve(&available), Some("お酒データ"));
    }

    #[test]
    fn test_resolve_fallback_before_first_sheet() {
        let selector = SheetSelector::default();
        let available = names(&["和食", "中華", "データ"]);
        assert_eq!(selector.resolve(&available), Some("データ"));
    }

    #[test]
    fn test_resolve_fallback_declaration_order() {
        let selector = SheetSelector::default();
        // "Sheet1"は"データ"より後に宣言されている
        let available = names(&["Sheet1", "データ"]);
        assert_eq!(selector.resolve(&available), Some("データ"));
    }

    #[test]
    fn test_resolve_first_sheet_when_nothing_matches() {
        let selector = SheetSelector::default();
        let available = names(&["和食", "中華"]);
        assert_eq!(selector.resolve(&available), Some("和食"));
    }

    #[test]
    fn test_resolve_empty_workbook() {
        let selector = SheetSelector::named("x");
        assert_eq!(selector.resolve(&[]), None);
    }

    #[test]
    fn test_header_rule_local_is_exact_substring() {
        let rule = HeaderRule::new(&["価格"], &["price"]);
        assert!(rule.matches("価格（税込）"));
        assert!(!rule.matches("価"));
    }

    #[test]
    fn test_header_rule_latin_is_case_insensitive() {
        let rule = HeaderRule::new(&["価格"], &["Price"]);
        assert!(rule.matches("PRICE"));
        assert!(rule.matches("Unit price"));
        assert!(!rule.matches("cost"));
    }

    #[test]
    fn test_row_window_clip() {
        assert_eq!(RowWindow::new(2, Some(5)).clip(10), 2..5);
        assert_eq!(RowWindow::new(2, Some(5)).clip(4), 2..4);
        assert_eq!(RowWindow::new(2, None).clip(7), 2..7);
        assert_eq!(RowWindow::new(6, Some(8)).clip(3), 3..3);
    }

    #[test]
    fn test_column_locator_deserialize() {
        let locator: ColumnLocator = serde_json::from_str(r#"{"index": 3}"#).unwrap();
        assert_eq!(locator, ColumnLocator::Index(3));

        let locator: ColumnLocator =
            serde_json::from_str(r#"{"header": {"local": ["価格"], "latin": ["price"]}}"#)
                .unwrap();
        assert!(matches!(locator, ColumnLocator::Header(ref rule) if rule.matches("price")));
    }
}
