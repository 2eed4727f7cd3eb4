//! 価格表の共通定数

/// 材料価格の調整係数（0.79%）
pub const MATERIAL_ADJUSTMENT_FACTOR: f64 = 0.0079;

/// BDI（間接費・利益）率（%）
pub const BDI_PERCENT: f64 = 14.40;

/// 基準価格に調整係数を適用する
///
/// ```rust
/// use casa_precos::constants::apply_adjustment;
///
/// assert!((apply_adjustment(100.0) - 100.79).abs() < 1e-9);
/// ```
pub fn apply_adjustment(base_price: f64) -> f64 {
    base_price * (1.0 + MATERIAL_ADJUSTMENT_FACTOR)
}
