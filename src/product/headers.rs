//! Header Layout Module
//!
//! 見出し行の語彙で列を探し、スコアをそのまま読み込むレイアウト。
//! 一致する見出しがないフィールドはデフォルト値のままになります。

use tracing::debug;

use crate::api::{ColumnLocator, HeaderRule, RowWindow};
use crate::mapping::{FieldMap, RowMapper};
use crate::product::tags::{derive_tags, UNSET_REGION};
use crate::product::taste::TasteProfile;
use crate::product::{ProductRecord, ProductSettings};
use crate::types::{CellValue, SheetTable};

/// 見出しで探すフィールド（宣言順が一致の優先順位）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogField {
    Name,
    Price,
    Brewery,
    Alcohol,
    Milling,
    Sweetness,
    Richness,
    Aroma,
    Acidity,
    Type,
    Prefecture,
    Description,
}

/// 見出しレイアウト
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderLayout {
    /// 見出し行（0始まり）
    pub header_row: usize,

    /// 銘柄名の列見出し（完全一致、宣言順に探索）
    pub name_headers: Vec<String>,

    /// フィールドの見出しルール
    pub fields: FieldMap<CatalogField>,
}

impl Default for HeaderLayout {
    fn default() -> Self {
        let rules: [(CatalogField, &[&str], &[&str]); 11] = [
            (CatalogField::Price, &["価格"], &["price"]),
            (CatalogField::Brewery, &["酒蔵", "蔵元"], &["brewery"]),
            (CatalogField::Alcohol, &["アルコール"], &["alcohol"]),
            (CatalogField::Milling, &["精米"], &["milling"]),
            (CatalogField::Sweetness, &["甘"], &["sweet"]),
            (CatalogField::Richness, &["コク", "濃"], &["rich"]),
            (CatalogField::Aroma, &["香り"], &["aroma"]),
            (CatalogField::Acidity, &["酸"], &["acid"]),
            (CatalogField::Type, &["種類", "分類"], &["type"]),
            (CatalogField::Prefecture, &["都道府県", "県"], &["prefecture"]),
            (CatalogField::Description, &["説明", "特徴"], &["description"]),
        ];

        let fields = rules
            .into_iter()
            .fold(FieldMap::new(), |map, (field, local, latin)| {
                map.with(field, ColumnLocator::Header(HeaderRule::new(local, latin)))
            });

        Self {
            header_row: 0,
            name_headers: ["名前", "銘柄", "商品名", "name", "Name", "日本酒名"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            fields,
        }
    }
}

impl HeaderLayout {
    /// 銘柄名の列を探す（語彙の宣言順に完全一致）
    fn name_column(&self, header: &[CellValue]) -> Option<usize> {
        self.name_headers.iter().find_map(|wanted| {
            header
                .iter()
                .position(|cell| cell.as_text().as_deref() == Some(wanted.as_str()))
        })
    }

    /// テーブルから商品レコードを生成
    ///
    /// 見出し行より下のすべての行を対象とします。銘柄名の列がある場合、
    /// 銘柄名が空の行はスキップします。銘柄名の列がない場合は
    /// `日本酒_{n}`という名前を付けます。
    pub fn convert(&self, table: &SheetTable, settings: &ProductSettings) -> Vec<ProductRecord> {
        let mut fields = self.fields.clone();
        let name_column = self.name_column(table.row(self.header_row));
        if let Some(col) = name_column {
            fields.set(CatalogField::Name, ColumnLocator::Index(col));
        }

        let mapper = RowMapper::new(fields, RowWindow::new(self.header_row + 1, None))
            .with_header_row(self.header_row)
            .with_label(CatalogField::Name);

        mapper
            .rows(table)
            .iter()
            .map(|row| {
                let number = row.ordinal() + 1;
                let id = ProductSettings::product_id(number);
                let name = if row.has(CatalogField::Name) {
                    row.text_or(CatalogField::Name, "")
                } else {
                    format!("日本酒_{}", number)
                };

                let price = row.number_or(CatalogField::Price, 3000.0).trunc() as i64;
                let category = row.text_or(CatalogField::Type, "純米");
                let profile = TasteProfile::from_scores(
                    row.number_or(CatalogField::Sweetness, 5.0),
                    row.number_or(CatalogField::Richness, 5.0),
                    row.number_or(CatalogField::Acidity, 5.0),
                    row.number_or(CatalogField::Aroma, 5.0),
                );
                debug!(row = row.index(), %id, %name, band = ?profile.band, "catalog row mapped");

                ProductRecord {
                    ec_url: settings.ec_url(&id),
                    id,
                    name,
                    brewery: row.text_or(CatalogField::Brewery, UNSET_REGION),
                    price,
                    alcohol_content: row.number_or(CatalogField::Alcohol, 15.0),
                    rice_milling: row.number_or(CatalogField::Milling, 60.0).trunc() as i64,
                    sweetness: profile.sweetness,
                    richness: profile.richness,
                    acidity: profile.acidity,
                    aroma: profile.aroma,
                    prefecture: row.text_or(CatalogField::Prefecture, UNSET_REGION),
                    description: row.text_or(CatalogField::Description, "美味しい日本酒です。"),
                    tags: derive_tags(profile.band, price, &category),
                    band: profile.band,
                    category,
                }
            })
            .collect()
    }
}
