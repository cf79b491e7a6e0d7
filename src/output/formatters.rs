//! Output Formatters Implementation
//!
//! 各出力フォーマットの実装を提供するモジュール。

use crate::dish::{DishMatrix, DishRecord};
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

/// JSON形式のフォーマッター
pub struct JsonFormatter;

impl JsonFormatter {
    /// 値をインデント付きJSONで出力（非ASCII文字はそのまま、末尾に改行）
    pub fn render<T, W>(&self, value: &T, writer: &mut W) -> Result<()>
    where
        T: Serialize + ?Sized,
        W: Write,
    {
        serde_json::to_writer_pretty(&mut *writer, value)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}

/// TypeScript形式のフォーマッター
///
/// `DishCompatibilityDetail`インターフェース、全料理の配列
/// `dishCompatibilityData`、参照用のヘルパー関数を出力します。
pub struct TypeScriptFormatter;

const TS_PREAMBLE: &str = "\
// お酒とお料理相性マトリックスから抽出した詳細料理データ

export interface DishCompatibilityDetail {
  id: string;
  name: string;
  cuisineType: 'japanese' | 'chinese' | 'western';
  compatibility: {
    sakeMinLevel: number;
    sakeMaxLevel: number;
    acidityMin: number;
    acidityMax: number;
    alcoholMin: number;
    alcoholMax: number;
  };
  typeClass1: string;
  typeClass2: string;
  matchBonus: number;
}

export const dishCompatibilityData: DishCompatibilityDetail[] = [
";

const TS_HELPERS: &str = "
// 料理IDから表示名を取得
export function getDishDisplayName(dishId: string): string {
  const dish = dishCompatibilityData.find(d => d.id === dishId);
  return dish ? dish.name : dishId;
}

// 料理タイプから該当料理一覧を取得
export function getDishesByCuisineType(cuisineType: 'japanese' | 'chinese' | 'western'): DishCompatibilityDetail[] {
  return dishCompatibilityData.filter(d => d.cuisineType === cuisineType);
}
";

impl TypeScriptFormatter {
    pub fn render<W: Write>(&self, matrix: &DishMatrix, writer: &mut W) -> Result<()> {
        writer.write_all(TS_PREAMBLE.as_bytes())?;

        for (i, dish) in matrix.dishes().enumerate() {
            if i > 0 {
                writeln!(writer, ",")?;
            }
            write_dish(dish, writer)?;
        }
        if !matrix.is_empty() {
            writeln!(writer)?;
        }
        writeln!(writer, "];")?;

        writer.write_all(TS_HELPERS.as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}

/// 料理1件分のオブジェクトリテラル（末尾の改行なし）
fn write_dish<W: Write>(dish: &DishRecord, writer: &mut W) -> Result<()> {
    let c = &dish.compatibility;

    writeln!(writer, "  {{")?;
    writeln!(writer, "    id: {},", ts_string(&dish.id)?)?;
    writeln!(writer, "    name: {},", ts_string(&dish.name)?)?;
    writeln!(writer, "    cuisineType: {},", ts_string(dish.cuisine_type.as_str())?)?;
    writeln!(writer, "    compatibility: {{")?;
    writeln!(writer, "      sakeMinLevel: {},", ts_number(c.sake_min_level))?;
    writeln!(writer, "      sakeMaxLevel: {},", ts_number(c.sake_max_level))?;
    writeln!(writer, "      acidityMin: {},", ts_number(c.acidity_min))?;
    writeln!(writer, "      acidityMax: {},", ts_number(c.acidity_max))?;
    writeln!(writer, "      alcoholMin: {},", ts_number(c.alcohol_min))?;
    writeln!(writer, "      alcoholMax: {},", ts_number(c.alcohol_max))?;
    writeln!(writer, "    }},")?;
    writeln!(writer, "    typeClass1: {},", ts_string(&dish.type_class1)?)?;
    writeln!(writer, "    typeClass2: {},", ts_string(&dish.type_class2)?)?;
    writeln!(writer, "    matchBonus: {}", ts_number(dish.match_bonus))?;
    write!(writer, "  }}")?;
    Ok(())
}

/// 文字列リテラル（JSON文字列としてエスケープ）
fn ts_string(value: &str) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

/// 数値リテラル（整数値も`2.0`のように小数点付きで表記）
fn ts_number(value: f64) -> String {
    format!("{:?}", value)
}
