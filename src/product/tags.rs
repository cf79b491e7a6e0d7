//! Tag Module
//!
//! 甘辛区分・価格・カテゴリーからタグを付与し、銘柄名から産地を推定する。

use serde::{Serialize, Serializer};

use crate::lookup::OrderedLookup;
use crate::product::taste::SweetnessBand;

/// 「コスパ良」となる価格の上限（含まない）
pub const BARGAIN_BELOW: i64 = 1500;

/// 「高級」となる価格の下限（含まない）
pub const PREMIUM_ABOVE: i64 = 2500;

/// 産地が推定できない場合の値
pub const UNSET_REGION: &str = "未設定";

/// 商品タグ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Sweet,
    Dry,
    Bargain,
    Premium,
    Fruity,
    Floral,
    Recommended,
}

impl Tag {
    /// 出力用のタグ文字列
    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::Sweet => "甘口",
            Tag::Dry => "辛口",
            Tag::Bargain => "コスパ良",
            Tag::Premium => "高級",
            Tag::Fruity => "フルーティー",
            Tag::Floral => "華やか",
            Tag::Recommended => "おすすめ",
        }
    }
}

impl Serialize for Tag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// タグを付与する
///
/// 甘辛 → 価格 → カテゴリーの順に判定し、どれにも該当しない場合は
/// 「おすすめ」のみを返します。戻り値が空になることはありません。
pub fn derive_tags(band: SweetnessBand, price: i64, category: &str) -> Vec<Tag> {
    let mut tags = Vec::new();

    match band {
        SweetnessBand::Sweet => tags.push(Tag::Sweet),
        SweetnessBand::Dry => tags.push(Tag::Dry),
        SweetnessBand::Mid => {}
    }

    if price < BARGAIN_BELOW {
        tags.push(Tag::Bargain);
    } else if price > PREMIUM_ABOVE {
        tags.push(Tag::Premium);
    }

    if category.contains("吟醸") {
        tags.push(Tag::Fruity);
        tags.push(Tag::Floral);
    }

    if tags.is_empty() {
        tags.push(Tag::Recommended);
    }

    tags
}

/// 銘柄名の部分文字列 → 都道府県の推定表
pub fn default_region_table() -> OrderedLookup<String> {
    OrderedLookup::new([
        ("正宗", "新潟県".to_string()),
        ("錦", "京都府".to_string()),
        ("男山", "北海道".to_string()),
    ])
}

/// 銘柄名から都道府県を推定（一致しなければ「未設定」）
pub fn guess_region(table: &OrderedLookup<String>, name: &str) -> String {
    table
        .first_contained_in(name)
        .cloned()
        .unwrap_or_else(|| UNSET_REGION.to_string())
}

/// 銘柄名から取り除く伏せ字
const PLACEHOLDER_MARKS: [&str; 3] = ["〇〇", "××", "△△"];

/// 銘柄名から酒蔵名を生成
pub fn brewery_from_name(name: &str) -> String {
    let stem = PLACEHOLDER_MARKS
        .iter()
        .fold(name.to_string(), |acc, mark| acc.replace(mark, ""));
    format!("{}酒造", stem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sweet_and_bargain() {
        let tags = derive_tags(SweetnessBand::Sweet, 1200, "純米酒");
        assert_eq!(tags, vec![Tag::Sweet, Tag::Bargain]);
    }

    #[test]
    fn test_bargain_boundary_is_exclusive() {
        let tags = derive_tags(SweetnessBand::Sweet, 1500, "純米酒");
        assert_eq!(tags, vec![Tag::Sweet]);
        assert!(!tags.contains(&Tag::Bargain));
    }

    #[test]
    fn test_premium_boundary_is_exclusive() {
        assert_eq!(
            derive_tags(SweetnessBand::Mid, 2500, "純米酒"),
            vec![Tag::Recommended]
        );
        assert_eq!(
            derive_tags(SweetnessBand::Mid, 2501, "純米酒"),
            vec![Tag::Premium]
        );
    }

    #[test]
    fn test_ginjo_adds_two_tags() {
        let tags = derive_tags(SweetnessBand::Dry, 2000, "吟醸酒");
        assert_eq!(tags, vec![Tag::Dry, Tag::Fruity, Tag::Floral]);
    }

    #[test]
    fn test_recommended_only_when_alone() {
        let tags = derive_tags(SweetnessBand::Mid, 2000, "普通酒");
        assert_eq!(tags, vec![Tag::Recommended]);
    }

    #[test]
    fn test_tag_serializes_as_label() {
        let json = serde_json::to_string(&vec![Tag::Bargain, Tag::Recommended]).unwrap();
        assert_eq!(json, r#"["コスパ良","おすすめ"]"#);
    }

    #[test]
    fn test_guess_region() {
        let table = default_region_table();
        assert_eq!(guess_region(&table, "〇〇正宗"), "新潟県");
        assert_eq!(guess_region(&table, "××錦"), "京都府");
        assert_eq!(guess_region(&table, "△△男山"), "北海道");
        assert_eq!(guess_region(&table, "白鶴"), UNSET_REGION);
    }

    #[test]
    fn test_brewery_from_name() {
        assert_eq!(brewery_from_name("〇〇正宗"), "正宗酒造");
        assert_eq!(brewery_from_name("××錦"), "錦酒造");
        assert_eq!(brewery_from_name("獺祭"), "獺祭酒造");
    }
}
