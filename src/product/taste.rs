//! Taste Profile Module
//!
//! 日本酒度・酸度・度数・カテゴリーから味わいスコア（甘辛・コク・酸味・香り）を
//! 算出するモジュール。すべてのスコアは [1, 10] に収まります。

use serde::Serialize;

/// スコアの下限
pub const SCORE_MIN: f64 = 1.0;

/// スコアの上限
pub const SCORE_MAX: f64 = 10.0;

/// 辛口判定に必要な日本酒度の下限（含む）
pub const DRY_LEVEL: f64 = 3.5;

/// 辛口判定に必要な酸度の下限（含む）
pub const DRY_ACIDITY: f64 = 1.6;

/// 甘口判定となる日本酒度の上限（含む）
pub const SWEET_LEVEL: f64 = -3.5;

/// 辛口ブランチの甘辛スコアの上限
pub const DRY_CEILING: f64 = 3.0;

/// 甘口ブランチの甘辛スコアの下限
pub const SWEET_FLOOR: f64 = 7.5;

/// 甘口とみなすスコアの下限（含まない）
pub const SWEET_SCORE_ABOVE: f64 = 7.0;

/// 辛口とみなすスコアの上限（含まない）
pub const DRY_SCORE_BELOW: f64 = 4.0;

/// 中間ブランチの甘辛スコアの範囲
const MID_RANGE: (f64, f64) = (3.5, 7.0);

/// ブランチ内で日本酒度1あたりに動くスコア量
const BRANCH_SLOPE: f64 = 0.2;

/// 甘辛の区分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SweetnessBand {
    /// 辛口（日本酒度・酸度がともに高い）
    Dry,

    /// 中間
    Mid,

    /// 甘口（日本酒度が低い）
    Sweet,
}

impl SweetnessBand {
    /// 日本酒度と酸度から区分を判定
    pub fn classify(sake_level: f64, acidity: f64) -> Self {
        if sake_level >= DRY_LEVEL && acidity >= DRY_ACIDITY {
            SweetnessBand::Dry
        } else if sake_level <= SWEET_LEVEL {
            SweetnessBand::Sweet
        } else {
            SweetnessBand::Mid
        }
    }

    /// スコア化済みの甘辛値から区分を判定（7超で甘口、4未満で辛口）
    ///
    /// スペック値から算出したスコアには使わず、`sweetness()`が返す
    /// ブランチの区分を使います。
    pub fn of_score(score: f64) -> Self {
        if score > SWEET_SCORE_ABOVE {
            SweetnessBand::Sweet
        } else if score < DRY_SCORE_BELOW {
            SweetnessBand::Dry
        } else {
            SweetnessBand::Mid
        }
    }
}

/// 値を [min, max] に収める
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        return min;
    }
    value.max(min).min(max)
}

/// 小数第1位に丸める
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// スコアを [1, 10] に収め、小数第1位に丸める
pub fn score(value: f64) -> f64 {
    round1(clamp(value, SCORE_MIN, SCORE_MAX))
}

/// 甘辛スコアを算出（区分と丸め済みスコア）
///
/// * 辛口: `3.0 − (日本酒度 − 3.5) × 0.2` を [1.0, 3.0] に収める
/// * 甘口: `7.5 + (−3.5 − 日本酒度) × 0.2` を [7.5, 10.0] に収める
/// * 中間: `5.5 − 日本酒度 / 2` を [3.5, 7.0] に収める
pub fn sweetness(sake_level: f64, acidity: f64) -> (SweetnessBand, f64) {
    let band = SweetnessBand::classify(sake_level, acidity);
    let raw = match band {
        SweetnessBand::Dry => clamp(
            DRY_CEILING - (sake_level - DRY_LEVEL) * BRANCH_SLOPE,
            SCORE_MIN,
            DRY_CEILING,
        ),
        SweetnessBand::Sweet => clamp(
            SWEET_FLOOR + (SWEET_LEVEL - sake_level) * BRANCH_SLOPE,
            SWEET_FLOOR,
            SCORE_MAX,
        ),
        SweetnessBand::Mid => clamp(5.5 - sake_level / 2.0, MID_RANGE.0, MID_RANGE.1),
    };
    (band, round1(raw))
}

/// コクのスコア（度数から推定）
pub fn richness(alcohol: f64) -> f64 {
    score((alcohol - 10.0) / 2.0 + 5.0)
}

/// 酸味のスコア（酸度から推定）
pub fn acidity_score(acidity: f64) -> f64 {
    score(acidity * 3.0)
}

/// 香りのスコア（カテゴリーから推定、丸めなし）
pub fn aroma(category: &str) -> f64 {
    if category.contains("吟醸") {
        8.0
    } else if category.contains("純米") {
        6.0
    } else {
        4.0
    }
}

/// 味わいの4要素
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TasteProfile {
    pub sweetness: f64,
    pub richness: f64,
    pub acidity: f64,
    pub aroma: f64,
    pub band: SweetnessBand,
}

impl TasteProfile {
    /// スペック値から味わいを算出
    pub fn derive(sake_level: f64, acidity: f64, alcohol: f64, category: &str) -> Self {
        let (band, sweetness) = sweetness(sake_level, acidity);
        Self {
            sweetness,
            richness: richness(alcohol),
            acidity: acidity_score(acidity),
            aroma: aroma(category),
            band,
        }
    }

    /// 既にスコア化された値から味わいを構築（値は [1, 10] に収める）
    pub fn from_scores(sweetness: f64, richness: f64, acidity: f64, aroma: f64) -> Self {
        let sweetness = score(sweetness);
        Self {
            sweetness,
            richness: score(richness),
            acidity: score(acidity),
            aroma: score(aroma),
            band: SweetnessBand::of_score(sweetness),
        }
    }
}
