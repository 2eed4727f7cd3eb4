//! Row Classifier Module
//!
//! シートの行を規則表に照らして分類し、`PriceCatalog`を構築するモジュール。
//!
//! ## 分類モード
//!
//! - **コード一致**（材料費シート）: ラベルが規則のコードと完全一致し、価格が正なら格納
//! - **説明文一致**（労務費シート）: 正規化したラベルにキーワードが含まれる最初の規則を採用
//!
//! どちらのモードでも、同じ位置・フィールドへの再設定は後勝ちです。
//! 不正なセルはエラーにせず既定値で扱い、診断情報として記録します。

use std::fmt;

use crate::catalog::{Location, PriceCatalog, Surface};
use crate::normalize::normalize_label;
use crate::rules::{
    matching_rules, CodeIndex, Rule, CERAMIC_FIELD, CERAMIC_KEYWORD, GROUT_FIELD, GROUT_KEYWORD,
};
use crate::types::Row;

/// 分類中に観測された事象（カタログの内容には影響しない）
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// 空でない価格セルを数値として解釈できなかった（0.0として扱った）
    UnparseablePrice { row: u32, raw: String },

    /// 説明文が複数のキーワードに一致した（宣言順で最初の規則を採用）
    AmbiguousKeyword {
        row: u32,
        label: String,
        chosen: &'static str,
        shadowed: Vec<&'static str>,
    },

    /// 先の行で設定された価格を上書きした
    Overwritten {
        row: u32,
        location: Location,
        field: &'static str,
        previous: f64,
        price: f64,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnparseablePrice { row, raw } => {
                write!(f, "row {}: price '{}' is not a number, treated as 0", row, raw)
            }
            Diagnostic::AmbiguousKeyword {
                row,
                label,
                chosen,
                shadowed,
            } => write!(
                f,
                "row {}: '{}' matches several keywords, using '{}' over {:?}",
                row, label, chosen, shadowed
            ),
            Diagnostic::Overwritten {
                row,
                location,
                field,
                previous,
                price,
            } => write!(
                f,
                "row {}: {}.{} overwritten ({} -> {})",
                row, location, field, previous, price
            ),
        }
    }
}

/// 分類結果
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Extraction {
    pub catalog: PriceCatalog,
    pub diagnostics: Vec<Diagnostic>,
}

impl Extraction {
    fn assign(&mut self, row: u32, location: Location, field: &'static str, price: f64) {
        if let Some(previous) = self.catalog.insert(location, field, price) {
            self.diagnostics.push(Diagnostic::Overwritten {
                row,
                location,
                field,
                previous,
                price,
            });
        }
    }
}

/// 価格セルを読む（不正値は0.0、診断を記録）
fn read_price(row: &Row, diagnostics: &mut Vec<Diagnostic>) -> f64 {
    match row.price.parse_price() {
        Some(price) => price,
        None => {
            if !row.price.is_empty() {
                diagnostics.push(Diagnostic::UnparseablePrice {
                    row: row.number,
                    raw: row.price.as_label(),
                });
            }
            0.0
        }
    }
}

/// コード一致モードで分類する
///
/// # 引数
///
/// * `rows` - シートの行
/// * `index` - コード → 規則の索引
///
/// # 使用例
///
/// ```rust
/// use casa_precos::{classify_by_code, Category, Location, Row, MATERIAL_INDEX};
///
/// let rows = Row::numbered(7, vec![("3.1.1", 10.0), ("3.1.1", 20.0)]);
/// let extraction = classify_by_code(rows, &MATERIAL_INDEX);
///
/// let loc = Location::flat(Category::MovimentoTerra);
/// assert_eq!(extraction.catalog.get(loc, "escavacaoValasBaldrame"), Some(20.0));
/// ```
pub fn classify_by_code<I>(rows: I, index: &CodeIndex<'_>) -> Extraction
where
    I: IntoIterator<Item = Row>,
{
    let mut extraction = Extraction::default();

    for row in rows {
        let code = row.label.as_label();
        let Some(rule) = index.get(&code) else {
            continue;
        };

        let price = read_price(&row, &mut extraction.diagnostics);
        if price > 0.0 {
            extraction.assign(row.number, rule.location, rule.field, price);
        }
    }

    extraction
}

/// 説明文一致モードで分類する
///
/// 各行は次の順で評価されます。
///
/// 1. ラベルが空の行はスキップ
/// 2. ラベルを正規化
/// 3. 価格が正でない行はスキップ（センチネル行も含む）
/// 4. センチネル（`parede` / `teto` / `pisos`）なら現在のサブカテゴリを切り替えて次の行へ
/// 5. サブカテゴリが決まっていれば、セラミック・目地のキーワードを現在のサブカテゴリへ格納
/// 6. 規則表を宣言順に走査し、最初に一致した規則で格納
///
/// # 使用例
///
/// ```rust
/// use casa_precos::{classify_by_description, Location, Row, Surface, LABOR_RULES};
///
/// let rows = Row::numbered(7, vec![
///     ("Parede", 1.0),
///     ("Revestimento Cerâmico", 15.0),
///     ("Teto", 1.0),
///     ("Revestimento Cerâmico", 8.0),
/// ]);
/// let extraction = classify_by_description(rows, LABOR_RULES);
///
/// let parede = Location::surface(Surface::Parede);
/// let teto = Location::surface(Surface::Teto);
/// assert_eq!(extraction.catalog.get(parede, "revestimentoCeramico"), Some(15.0));
/// assert_eq!(extraction.catalog.get(teto, "revestimentoCeramico"), Some(8.0));
/// ```
pub fn classify_by_description<I>(rows: I, rules: &[Rule]) -> Extraction
where
    I: IntoIterator<Item = Row>,
{
    let mut extraction = Extraction::default();
    let mut current_surface: Option<Surface> = None;

    for row in rows {
        let original = row.label.as_label();
        if original.is_empty() {
            continue;
        }

        let label = normalize_label(&original);
        let price = read_price(&row, &mut extraction.diagnostics);
        if price.is_nan() || price <= 0.0 {
            continue;
        }

        if let Some(surface) = Surface::from_sentinel(&label) {
            current_surface = Some(surface);
            continue;
        }

        if let Some(surface) = current_surface {
            let special = if label.contains(CERAMIC_KEYWORD) {
                Some(CERAMIC_FIELD)
            } else if label.contains(GROUT_KEYWORD) {
                Some(GROUT_FIELD)
            } else {
                None
            };
            if let Some(field) = special {
                extraction.assign(row.number, Location::surface(surface), field, price);
                continue;
            }
        }

        let mut matches = matching_rules(rules, &label);
        if let Some(rule) = matches.next() {
            let shadowed: Vec<&'static str> = matches.map(|r| r.key).collect();
            if !shadowed.is_empty() {
                extraction.diagnostics.push(Diagnostic::AmbiguousKeyword {
                    row: row.number,
                    label: label.clone(),
                    chosen: rule.key,
                    shadowed,
                });
            }
            extraction.assign(row.number, rule.location, rule.field, price);
        }
    }

    extraction
}
