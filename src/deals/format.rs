use super::DealRecord;

/// Store that matches competitors' flyer prices
pub const ANCHOR_MERCHANT: &str = "Maxi";

/// Action shown for deals listed by the anchor store itself
pub const ANCHOR_LABEL: &str = "Prix Maxi";

/// Display-ready view of a `DealRecord`
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedDeal {
    pub product_name: String,
    pub merchant: String,
    pub price_label: String,
    pub original_price_label: String,
    pub discount_percent: u32,
    /// True when the deal has to be price-matched at the anchor store
    pub is_match: bool,
    pub action_label: String,
}

impl From<&DealRecord> for FormattedDeal {
    fn from(deal: &DealRecord) -> Self {
        let is_match = deal.merchant != ANCHOR_MERCHANT;
        let action_label = if is_match {
            format!("Via {}", deal.merchant)
        } else {
            ANCHOR_LABEL.to_string()
        };

        FormattedDeal {
            product_name: deal.product_name.clone(),
            merchant: deal.merchant.clone(),
            price_label: price_label(deal.price),
            original_price_label: price_label(deal.original_price),
            discount_percent: discount_percent(deal.price, deal.original_price),
            is_match,
            action_label,
        }
    }
}

/// Format every deal and collect the discounted product names, both in input order
pub fn format_deals(deals: &[DealRecord]) -> (Vec<String>, Vec<FormattedDeal>) {
    let items = deals.iter().map(|deal| deal.product_name.clone()).collect();
    let formatted = deals.iter().map(FormattedDeal::from).collect();
    (items, formatted)
}

fn price_label(amount: f64) -> String {
    format!("{:.2} $", amount)
}

/// Rounded percentage saved, 0 for rows without a usable original price
fn discount_percent(price: f64, original_price: f64) -> u32 {
    if original_price <= 0.0 || !price.is_finite() || !original_price.is_finite() {
        return 0;
    }
    let percent = ((1.0 - price / original_price) * 100.0).round();
    percent.clamp(0.0, 100.0) as u32
}
