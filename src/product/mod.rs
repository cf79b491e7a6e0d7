//! Product Module
//!
//! お酒データシートから商品レコード（`ProductRecord`）を生成するモジュール。
//!
//! 2種類のレイアウトをサポートします。
//!
//! - [`PositionalLayout`]: 固定列からスペック値（日本酒度・酸度・度数）を読み、
//!   味わいスコアを算出する
//! - [`HeaderLayout`]: 見出し語で列を探し、スコアをそのまま読み込む

mod headers;
mod positional;
pub mod tags;
pub mod taste;

pub use headers::{CatalogField, HeaderLayout};
pub use positional::{PositionalLayout, SpecField};
pub use tags::Tag;
pub use taste::{SweetnessBand, TasteProfile};

use serde::{Serialize, Serializer};

use crate::lookup::OrderedLookup;

/// ECサイトURLのデフォルトのベース
pub const DEFAULT_EC_BASE: &str = "https://example-ec.com";

/// 商品レコード（Webアプリの`SakeProfile`に対応）
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
    pub brewery: String,
    pub price: i64,
    pub alcohol_content: f64,
    pub rice_milling: i64,
    pub sweetness: f64,
    pub richness: f64,
    pub acidity: f64,
    #[serde(serialize_with = "serialize_step")]
    pub aroma: f64,
    #[serde(rename = "type")]
    pub category: String,
    pub prefecture: String,
    pub description: String,
    pub ec_url: String,
    pub tags: Vec<Tag>,

    /// タグ付けに使った甘辛の区分
    #[serde(skip)]
    pub(crate) band: SweetnessBand,
}

impl ProductRecord {
    /// 甘辛の区分（タグと同じ判定結果）
    pub fn sweetness_band(&self) -> SweetnessBand {
        self.band
    }
}

/// 整数値のスコアは整数として出力（`8.0` → `8`）
fn serialize_step<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

/// 両レイアウトで共有する変換設定
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSettings {
    /// ECサイトURLのベース（末尾のスラッシュなし）
    pub ec_base: String,

    /// 銘柄名 → 都道府県の推定表
    pub regions: OrderedLookup<String>,
}

impl ProductSettings {
    /// 連番の商品IDを生成（例: `sake001`）
    pub fn product_id(number: usize) -> String {
        format!("sake{:03}", number)
    }

    /// 商品IDからECサイトURLを生成
    pub fn ec_url(&self, id: &str) -> String {
        format!("{}/{}", self.ec_base.trim_end_matches('/'), id)
    }
}

impl Default for ProductSettings {
    fn default() -> Self {
        Self {
            ec_base: DEFAULT_EC_BASE.to_string(),
            regions: tags::default_region_table(),
        }
    }
}
