//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。

use calamine::{Data, Range};

/// セルの値を表す列挙型
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// 数値（f64）
    Number(f64),

    /// 文字列
    String(String),

    /// 論理値
    Bool(bool),

    /// エラー値（例: #DIV/0!）
    Error(String),

    /// 空セル
    #[default]
    Empty,
}

/// 数値変換の前に取り除く記号（通貨記号・桁区切り・パーセント）
const NUMERIC_NOISE: [char; 4] = ['¥', '￥', ',', '%'];

impl CellValue {
    /// 値が空かどうかを判定
    ///
    /// 空白のみの文字列も空として扱います。
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::String(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// 数値として取得（ベストエフォート）
    ///
    /// 文字列の場合は`¥1,500`や`15%`のような表記から記号を取り除いてから
    /// 解析します。解析できない場合は`None`を返します。
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) if n.is_finite() => Some(*n),
            CellValue::String(s) => {
                let cleaned: String = s
                    .trim()
                    .chars()
                    .filter(|c| !NUMERIC_NOISE.contains(c))
                    .collect();
                cleaned.trim().parse::<f64>().ok().filter(|n| n.is_finite())
            }
            _ => None,
        }
    }

    /// 文字列として取得
    ///
    /// 整数値の数値は小数点なしで表記します（`1500.0` → `"1500"`）。
    /// 空セル・エラー値は`None`を返します。
    pub fn as_text(&self) -> Option<String> {
        match self {
            CellValue::String(s) if !s.trim().is_empty() => Some(s.clone()),
            CellValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    Some(format!("{}", *n as i64))
                } else {
                    Some(n.to_string())
                }
            }
            CellValue::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// 値を表示用の文字列として取得（書式適用前）
    pub fn as_raw_string(&self) -> String {
        match self {
            CellValue::Error(e) => e.clone(),
            other => other.as_text().unwrap_or_default(),
        }
    }
}

impl From<&Data> for CellValue {
    fn from(cell: &Data) -> Self {
        match cell {
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Float(f) => CellValue::Number(*f),
            Data::String(s) => CellValue::String(s.clone()),
            Data::Bool(b) => CellValue::Bool(*b),
            Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
            Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::String(s.clone()),
            Data::Error(e) => CellValue::Error(format!("{:?}", e)),
            Data::Empty => CellValue::Empty,
            #[allow(unreachable_patterns)]
            _ => CellValue::Empty,
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

/// シート全体をメモリ上に展開したテーブル
///
/// 行・列のインデックスはシート原点（A1）からの絶対位置です。
/// 使用範囲が B3 から始まるシートでも、`get(0, 0)` は A1 を指します。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SheetTable {
    /// シート名
    name: String,

    /// セルデータ（行 × 列）
    rows: Vec<Vec<CellValue>>,
}

/// 範囲外アクセス時に返す空セル
static EMPTY_CELL: CellValue = CellValue::Empty;

impl SheetTable {
    /// 行データからテーブルを生成
    pub fn new(name: impl Into<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// calamineの範囲データからテーブルを生成
    pub(crate) fn from_range(name: &str, range: &Range<Data>) -> Self {
        let (row_offset, col_offset) = match range.start() {
            Some((row, col)) => (row as usize, col as usize),
            None => return Self::new(name, Vec::new()),
        };

        let mut rows: Vec<Vec<CellValue>> = vec![Vec::new(); row_offset];
        for row in range.rows() {
            let mut values = vec![CellValue::Empty; col_offset];
            values.extend(row.iter().map(CellValue::from));
            rows.push(values);
        }

        Self::new(name, rows)
    }

    /// シート名を取得
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 行数を取得
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// 最大列数を取得
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// 指定した行を取得（範囲外は空スライス）
    pub fn row(&self, row: usize) -> &[CellValue] {
        self.rows.get(row).map(Vec::as_slice).unwrap_or(&[])
    }

    /// 指定したセルを取得（範囲外は空セル）
    pub fn get(&self, row: usize, col: usize) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY_CELL)
    }

    /// 指定した列の空でない値を上から順に取得
    pub fn column_values(&self, col: usize) -> Vec<&CellValue> {
        self.rows
            .iter()
            .filter_map(|r| r.get(col))
            .filter(|v| !v.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_number_strips_currency_and_separators() {
        assert_eq!(CellValue::from("¥1,500").as_number(), Some(1500.0));
        assert_eq!(CellValue::from("￥2,980").as_number(), Some(2980.0));
        assert_eq!(CellValue::from(" 15% ").as_number(), Some(15.0));
        assert_eq!(CellValue::from("-2").as_number(), Some(-2.0));
    }

    #[test]
    fn test_as_number_rejects_text() {
        assert_eq!(CellValue::from("純米酒").as_number(), None);
        assert_eq!(CellValue::from("").as_number(), None);
        assert_eq!(CellValue::Empty.as_number(), None);
        assert_eq!(CellValue::Bool(true).as_number(), None);
        assert_eq!(CellValue::Number(f64::NAN).as_number(), None);
    }

    #[test]
    fn test_as_text_integral_numbers() {
        assert_eq!(CellValue::Number(1500.0).as_text(), Some("1500".to_string()));
        assert_eq!(CellValue::Number(1.5).as_text(), Some("1.5".to_string()));
        assert_eq!(CellValue::from("  ").as_text(), None);
        assert_eq!(CellValue::Empty.as_text(), None);
    }

    #[test]
    fn test_is_empty() {
        assert!(CellValue::Empty.is_empty());
        assert!(CellValue::from("   ").is_empty());
        assert!(!CellValue::Number(0.0).is_empty());
        assert!(!CellValue::from("A").is_empty());
    }

    #[test]
    fn test_from_calamine_data() {
        assert_eq!(CellValue::from(&Data::Int(3)), CellValue::Number(3.0));
        assert_eq!(
            CellValue::from(&Data::String("錦".to_string())),
            CellValue::from("錦")
        );
        assert_eq!(CellValue::from(&Data::Empty), CellValue::Empty);
    }

    #[test]
    fn test_sheet_table_out_of_range_is_empty() {
        let table = SheetTable::new("t", vec![vec![CellValue::from("a")]]);
        assert_eq!(table.get(0, 0), &CellValue::from("a"));
        assert_eq!(table.get(0, 5), &CellValue::Empty);
        assert_eq!(table.get(9, 0), &CellValue::Empty);
        assert!(table.row(9).is_empty());
    }

    #[test]
    fn test_from_range_keeps_absolute_positions() {
        let mut range: Range<Data> = Range::new((2, 1), (3, 2));
        range.set_value((2, 1), Data::String("銘柄".to_string()));
        range.set_value((3, 2), Data::Float(1.5));

        let table = SheetTable::from_range("s", &range);
        assert_eq!(table.get(2, 1), &CellValue::from("銘柄"));
        assert_eq!(table.get(3, 2), &CellValue::Number(1.5));
        assert_eq!(table.get(0, 0), &CellValue::Empty);
        assert_eq!(table.height(), 4);
        assert_eq!(table.width(), 3);
    }

    #[test]
    fn test_column_values_skips_empty() {
        let table = SheetTable::new(
            "t",
            vec![
                vec![CellValue::from("h")],
                vec![CellValue::Empty],
                vec![CellValue::Number(2.0)],
            ],
        );
        assert_eq!(table.column_values(0).len(), 2);
        assert!(table.column_values(3).is_empty());
    }
}
