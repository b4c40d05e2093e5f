//! 付加価値税（VAT）の計算
//!
//! 税率は 15% 固定。

use serde::Serialize;

/// VAT 税率
pub const VAT_RATE: f64 = 0.15;

/// 税抜額・税額・税込額の内訳
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VatBreakdown {
    pub subtotal: f64,
    pub vat: f64,
    pub total: f64,
}

impl VatBreakdown {
    /// 税抜額から内訳を計算
    pub fn from_amount(subtotal: f64) -> Self {
        let vat = subtotal * VAT_RATE;
        Self {
            subtotal,
            vat,
            total: subtotal + vat,
        }
    }

    /// 単価と数量から内訳を計算
    pub fn for_units(unit_price: f64, count: u32) -> Self {
        Self::from_amount(unit_price * f64::from(count))
    }
}
