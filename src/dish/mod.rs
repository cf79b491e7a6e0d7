//! Dish Module
//!
//! 料理ジャンル別シート（和食・中華・洋食）から料理ごとの相性条件を
//! 抽出するモジュール。
//!
//! 各シートは同じ固定列レイアウトを持ち、行2〜5に料理が並びます。
//! 数値として読めないセルは既定の範囲（日本酒度 0〜10、酸度 0〜2、
//! 度数 10〜18）で置き換えます。

mod ids;

pub use ids::{default_id_table, dish_id, match_bonus};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::{ColumnLocator, RowWindow};
use crate::lookup::OrderedLookup;
use crate::mapping::{FieldMap, RowMapper};
use crate::types::SheetTable;

/// 料理ジャンル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CuisineType {
    Japanese,
    Chinese,
    Western,
}

impl CuisineType {
    /// 出力順のすべてのジャンル
    pub const ALL: [CuisineType; 3] = [
        CuisineType::Japanese,
        CuisineType::Chinese,
        CuisineType::Western,
    ];

    /// 出力用のキー
    pub fn as_str(&self) -> &'static str {
        match self {
            CuisineType::Japanese => "japanese",
            CuisineType::Chinese => "chinese",
            CuisineType::Western => "western",
        }
    }
}

impl std::fmt::Display for CuisineType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// ジャンルとシート名の対応
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CuisineSheet {
    /// シート名
    pub sheet: String,

    /// ジャンル
    pub cuisine: CuisineType,
}

impl CuisineSheet {
    pub fn new(sheet: impl Into<String>, cuisine: CuisineType) -> Self {
        Self {
            sheet: sheet.into(),
            cuisine,
        }
    }
}

/// 和食 → 中華 → 洋食の順のシート対応
pub fn default_cuisine_sheets() -> Vec<CuisineSheet> {
    vec![
        CuisineSheet::new("和食", CuisineType::Japanese),
        CuisineSheet::new("中華", CuisineType::Chinese),
        CuisineSheet::new("洋食", CuisineType::Western),
    ]
}

/// 料理に合う日本酒の条件
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Compatibility {
    pub sake_min_level: f64,
    pub sake_max_level: f64,
    pub acidity_min: f64,
    pub acidity_max: f64,
    pub alcohol_min: f64,
    pub alcohol_max: f64,
}

/// 料理レコード（JSONのキーはsnake_case）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DishRecord {
    pub id: String,
    pub name: String,
    pub cuisine_type: CuisineType,
    pub compatibility: Compatibility,
    pub type_class1: String,
    pub type_class2: String,
    pub match_bonus: f64,
}

/// ジャンル別の料理一覧
///
/// JSONでは`japanese`・`chinese`・`western`の順のキーを持つオブジェクトに
/// なります。料理がないジャンルも空配列として出力されます。
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DishMatrix {
    japanese: Vec<DishRecord>,
    chinese: Vec<DishRecord>,
    western: Vec<DishRecord>,
}

impl DishMatrix {
    /// ジャンルの料理一覧
    pub fn get(&self, cuisine: CuisineType) -> &[DishRecord] {
        match cuisine {
            CuisineType::Japanese => &self.japanese,
            CuisineType::Chinese => &self.chinese,
            CuisineType::Western => &self.western,
        }
    }

    /// ジャンルに料理を追加
    pub fn extend(&mut self, cuisine: CuisineType, dishes: impl IntoIterator<Item = DishRecord>) {
        let target = match cuisine {
            CuisineType::Japanese => &mut self.japanese,
            CuisineType::Chinese => &mut self.chinese,
            CuisineType::Western => &mut self.western,
        };
        target.extend(dishes);
    }

    /// ジャンル順にすべての料理を走査
    pub fn dishes(&self) -> impl Iterator<Item = &DishRecord> {
        CuisineType::ALL
            .into_iter()
            .flat_map(move |cuisine| self.get(cuisine).iter())
    }

    /// 料理の総数
    pub fn len(&self) -> usize {
        self.japanese.len() + self.chinese.len() + self.western.len()
    }

    /// 料理が1つもないか
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 料理シートの列
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DishField {
    Name,
    SakeMin,
    SakeMax,
    AcidityMin,
    AcidityMax,
    AlcoholMin,
    AlcoholMax,
    TypeClass1,
    TypeClass2,
}

/// 料理シートのレイアウト
#[derive(Debug, Clone, PartialEq)]
pub struct DishLayout {
    /// 処理対象の行範囲
    pub window: RowWindow,

    /// 列の位置指定
    pub columns: FieldMap<DishField>,

    /// 料理名 → 料理IDの対応表
    pub ids: OrderedLookup<&'static str>,
}

impl Default for DishLayout {
    /// 行2〜5、列1〜9
    fn default() -> Self {
        let columns = [
            (DishField::Name, 1),
            (DishField::SakeMin, 2),
            (DishField::SakeMax, 3),
            (DishField::AcidityMin, 4),
            (DishField::AcidityMax, 5),
            (DishField::AlcoholMin, 6),
            (DishField::AlcoholMax, 7),
            (DishField::TypeClass1, 8),
            (DishField::TypeClass2, 9),
        ]
        .into_iter()
        .fold(FieldMap::new(), |map, (field, col)| {
            map.with(field, ColumnLocator::Index(col))
        });

        Self {
            window: RowWindow::new(2, Some(6)),
            columns,
            ids: default_id_table(),
        }
    }
}

impl DishLayout {
    /// シートから料理レコードを抽出
    ///
    /// 料理名が空の行はスキップします。
    pub fn convert(&self, table: &SheetTable, cuisine: CuisineType) -> Vec<DishRecord> {
        let mapper = RowMapper::new(self.columns.clone(), self.window).with_label(DishField::Name);

        mapper
            .rows(table)
            .iter()
            .map(|row| {
                let name = row.text_or(DishField::Name, "");
                let id = dish_id(&self.ids, &name, cuisine);
                debug!(row = row.index(), %cuisine, %id, %name, "dish row mapped");

                DishRecord {
                    compatibility: Compatibility {
                        sake_min_level: row.number_or(DishField::SakeMin, 0.0),
                        sake_max_level: row.number_or(DishField::SakeMax, 10.0),
                        acidity_min: row.number_or(DishField::AcidityMin, 0.0),
                        acidity_max: row.number_or(DishField::AcidityMax, 2.0),
                        alcohol_min: row.number_or(DishField::AlcoholMin, 10.0),
                        alcohol_max: row.number_or(DishField::AlcoholMax, 18.0),
                    },
                    type_class1: row.text_or(DishField::TypeClass1, "A"),
                    type_class2: row.text_or(DishField::TypeClass2, "B"),
                    match_bonus: match_bonus(cuisine, &name),
                    cuisine_type: cuisine,
                    id,
                    name,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CellValue;

    fn s(text: &str) -> CellValue {
        CellValue::from(text)
    }

    fn n(value: f64) -> CellValue {
        CellValue::Number(value)
    }

    fn dish_row(name: &str, values: [f64; 6], classes: [&str; 2]) -> Vec<CellValue> {
        let mut row = vec![CellValue::Empty, s(name)];
        row.extend(values.iter().map(|v| n(*v)));
        row.extend(classes.iter().map(|c| s(c)));
        row
    }

    fn chinese_sheet() -> SheetTable {
        SheetTable::new(
            "中華",
            vec![
                vec![s("中華")],
                vec![CellValue::Empty, s("料理"), s("日本酒度(下限)")],
                dish_row("天津", [0.0, 5.0, 0.0, 2.0, 10.0, 16.0], ["A", "B"]),
                dish_row("揚げ物", [-3.0, 10.0, 1.0, 2.0, 15.0, 18.0], ["C", "D"]),
                vec![CellValue::Empty, CellValue::Empty, n(1.0)],
                vec![CellValue::Empty, s("薄味")],
                dish_row("範囲外", [0.0, 0.0, 0.0, 0.0, 0.0, 0.0], ["A", "A"]),
            ],
        )
    }

    #[test]
    fn test_convert_reads_window_only() {
        let dishes = DishLayout::default().convert(&chinese_sheet(), CuisineType::Chinese);
        let ids: Vec<&str> = dishes.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["tenshin", "chinese_fried", "light_taste"]);
    }

    #[test]
    fn test_convert_values() {
        let dishes = DishLayout::default().convert(&chinese_sheet(), CuisineType::Chinese);
        let fried = &dishes[1];

        assert_eq!(fried.name, "揚げ物");
        assert_eq!(fried.cuisine_type, CuisineType::Chinese);
        assert_eq!(fried.compatibility.sake_min_level, -3.0);
        assert_eq!(fried.compatibility.alcohol_min, 15.0);
        assert_eq!(fried.type_class1, "C");
        assert_eq!(fried.type_class2, "D");
        assert_eq!(fried.match_bonus, 1.5);
    }

    #[test]
    fn test_missing_cells_use_defaults() {
        let dishes = DishLayout::default().convert(&chinese_sheet(), CuisineType::Chinese);
        let light = &dishes[2];

        assert_eq!(
            light.compatibility,
            Compatibility {
                sake_min_level: 0.0,
                sake_max_level: 10.0,
                acidity_min: 0.0,
                acidity_max: 2.0,
                alcohol_min: 10.0,
                alcohol_max: 18.0,
            }
        );
        assert_eq!(light.type_class1, "A");
        assert_eq!(light.type_class2, "B");
    }

    #[test]
    fn test_matrix_serializes_all_keys_in_order() {
        let mut matrix = DishMatrix::default();
        matrix.extend(
            CuisineType::Chinese,
            DishLayout::default().convert(&chinese_sheet(), CuisineType::Chinese),
        );

        let json = serde_json::to_string(&matrix).unwrap();
        let japanese = json.find("\"japanese\":[]").unwrap();
        let chinese = json.find("\"chinese\":[").unwrap();
        let western = json.find("\"western\":[]").unwrap();
        assert!(japanese < chinese && chinese < western);
        assert!(json.contains("\"cuisine_type\":\"chinese\""));
        assert!(json.contains("\"sake_min_level\":-3.0"));
        assert_eq!(matrix.len(), 3);
    }

    #[test]
    fn test_dishes_iterates_in_cuisine_order() {
        let record = |id: &str, cuisine| DishRecord {
            id: id.to_string(),
            name: id.to_string(),
            cuisine_type: cuisine,
            compatibility: Compatibility {
                sake_min_level: 0.0,
                sake_max_level: 10.0,
                acidity_min: 0.0,
                acidity_max: 2.0,
                alcohol_min: 10.0,
                alcohol_max: 18.0,
            },
            type_class1: "A".to_string(),
            type_class2: "B".to_string(),
            match_bonus: 1.0,
        };

        let mut matrix = DishMatrix::default();
        matrix.extend(CuisineType::Western, [record("w", CuisineType::Western)]);
        matrix.extend(CuisineType::Japanese, [record("j", CuisineType::Japanese)]);

        let ids: Vec<&str> = matrix.dishes().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["j", "w"]);
        assert!(matrix.get(CuisineType::Chinese).is_empty());
    }
}
