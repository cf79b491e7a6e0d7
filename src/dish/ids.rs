//! Dish Identifier Module
//!
//! 料理名から安定した料理IDとマッチボーナスを決める。

use crate::dish::CuisineType;
use crate::lookup::OrderedLookup;

/// 料理名 → 料理IDの対応表（完全一致）
pub fn default_id_table() -> OrderedLookup<&'static str> {
    OrderedLookup::new([
        ("刺身/寿司", "sashimi_sushi"),
        ("煮物", "nimono"),
        ("焼き物", "yakimono"),
        ("揚げ物", "agemono"),
        ("天津", "tenshin"),
        ("濃い味", "strong_taste"),
        ("薄味", "light_taste"),
        ("カルパッチョ/生牡蠣", "carpaccio_oyster"),
        ("肉料理", "meat_dish"),
        ("魚料理", "fish_dish"),
        ("ジビエ", "gibier"),
    ])
}

/// 料理IDを生成
///
/// 中華の「揚げ物」は和食と区別して`chinese_fried`になります。
/// 対応表にない料理名は小文字化し、`/`と空白を`_`に置き換えます。
pub fn dish_id(table: &OrderedLookup<&'static str>, name: &str, cuisine: CuisineType) -> String {
    if name == "揚げ物" && cuisine == CuisineType::Chinese {
        return "chinese_fried".to_string();
    }

    match table.exact(name) {
        Some(id) => id.to_string(),
        None => name.to_lowercase().replace(['/', ' '], "_"),
    }
}

/// 追加ボーナスの対象となる料理
const SIGNATURE_DISHES: [&str; 2] = ["刺身/寿司", "カルパッチョ/生牡蠣"];

/// 看板料理の追加ボーナス
const SIGNATURE_BONUS: f64 = 0.5;

/// マッチボーナスを算出
pub fn match_bonus(cuisine: CuisineType, name: &str) -> f64 {
    let base = match cuisine {
        CuisineType::Japanese => 2.0,
        CuisineType::Chinese => 1.5,
        CuisineType::Western => 1.8,
    };

    if SIGNATURE_DISHES.contains(&name) {
        base + SIGNATURE_BONUS
    } else {
        base
    }
}
