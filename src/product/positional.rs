//! Positional Layout Module
//!
//! 固定の列位置からスペック値を読み、味わいスコアを算出するレイアウト。

use tracing::debug;

use crate::api::{ColumnLocator, RowWindow};
use crate::mapping::{FieldMap, RowMapper};
use crate::product::tags::{brewery_from_name, derive_tags, guess_region};
use crate::product::taste::TasteProfile;
use crate::product::{ProductRecord, ProductSettings};
use crate::types::SheetTable;

/// スペック表の列
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecField {
    /// 銘柄名
    Name,
    /// カテゴリー（純米酒・吟醸酒など）
    Category,
    /// 日本酒度
    SakeLevel,
    /// 酸度
    Acidity,
    /// 度数
    Alcohol,
    /// ４タイプ分類
    TypeClass,
    /// 価格帯
    PriceRange,
    /// 価格
    Price,
}

/// 固定列レイアウト
#[derive(Debug, Clone, PartialEq)]
pub struct PositionalLayout {
    /// 処理対象の行範囲
    pub window: RowWindow,

    /// 列の位置指定
    pub columns: FieldMap<SpecField>,
}

impl Default for PositionalLayout {
    /// 行2〜4、列1〜8（行1は見出し）
    fn default() -> Self {
        let columns = [
            (SpecField::Name, 1),
            (SpecField::Category, 2),
            (SpecField::SakeLevel, 3),
            (SpecField::Acidity, 4),
            (SpecField::Alcohol, 5),
            (SpecField::TypeClass, 6),
            (SpecField::PriceRange, 7),
            (SpecField::Price, 8),
        ]
        .into_iter()
        .fold(FieldMap::new(), |map, (field, col)| {
            map.with(field, ColumnLocator::Index(col))
        });

        Self {
            window: RowWindow::new(2, Some(5)),
            columns,
        }
    }
}

impl PositionalLayout {
    /// テーブルから商品レコードを生成
    ///
    /// 商品IDは行範囲の先頭行を`sake001`とした行位置の連番です。
    /// 銘柄名が空の行はスキップします。数値として読めないセルは
    /// デフォルト値（日本酒度 0、酸度 1、度数 15、価格 3000）で置き換えます。
    pub fn convert(&self, table: &SheetTable, settings: &ProductSettings) -> Vec<ProductRecord> {
        let mapper =
            RowMapper::new(self.columns.clone(), self.window).with_label(SpecField::Name);

        mapper
            .rows(table)
            .iter()
            .map(|row| {
                let name = row.text_or(SpecField::Name, "");
                let category = row.text_or(SpecField::Category, "");
                let sake_level = row.number_or(SpecField::SakeLevel, 0.0);
                let acidity = row.number_or(SpecField::Acidity, 1.0);
                let alcohol = row.number_or(SpecField::Alcohol, 15.0);
                let type_class = row.text_or(SpecField::TypeClass, "A");
                let price_range = row.text_or(SpecField::PriceRange, "M");
                let price = row.number_or(SpecField::Price, 3000.0).trunc() as i64;

                let profile = TasteProfile::derive(sake_level, acidity, alcohol, &category);
                let id = ProductSettings::product_id(row.ordinal() + 1);
                debug!(
                    row = row.index(),
                    %id,
                    %name,
                    price_range = %price_range,
                    band = ?profile.band,
                    "product row mapped"
                );

                ProductRecord {
                    ec_url: settings.ec_url(&id),
                    id,
                    brewery: brewery_from_name(&name),
                    prefecture: guess_region(&settings.regions, &name),
                    price,
                    alcohol_content: alcohol,
                    rice_milling: if category.contains("吟醸") { 55 } else { 70 },
                    sweetness: profile.sweetness,
                    richness: profile.richness,
                    acidity: profile.acidity,
                    aroma: profile.aroma,
                    description: format!(
                        "{}の特徴を活かした、{}タイプの日本酒です。",
                        category, type_class
                    ),
                    tags: derive_tags(profile.band, price, &category),
                    band: profile.band,
                    category,
                    name,
                }
            })
            .collect()
    }
}
