use bigdecimal::BigDecimal;
use chrono::NaiveDate;

/// Prefix of the barcode assumed for items that carry none.
pub const FALLBACK_BARCODE_PREFIX: &str = "BC-";

/// Expiry shown for items without an expiration date.
pub const FALLBACK_EXPIRY: &str = "2024-12-31";

/// One product entry on an order. Immutable once the order is loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub id: String,
    pub name: String,
    pub price: BigDecimal,
    pub quantity: u32,
    pub barcode: Option<String>,
    pub expires_on: Option<NaiveDate>,
}

impl LineItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: BigDecimal, quantity: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            quantity,
            barcode: None,
            expires_on: None,
        }
    }

    pub fn with_barcode(mut self, barcode: impl Into<String>) -> Self {
        self.barcode = Some(barcode.into());
        self
    }

    pub fn with_expiry(mut self, expires_on: NaiveDate) -> Self {
        self.expires_on = Some(expires_on);
        self
    }

    /// The barcode a scanned unit must match: the item's own barcode, or
    /// `BC-<item id>` when it has none.
    pub fn expected_barcode(&self) -> String {
        match &self.barcode {
            Some(barcode) => barcode.clone(),
            None => format!("{}{}", FALLBACK_BARCODE_PREFIX, self.id),
        }
    }

    /// Expiration date as `YYYY-MM-DD`.
    pub fn expiry_label(&self) -> String {
        self.expires_on
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| FALLBACK_EXPIRY.to_string())
    }

    pub fn line_total(&self) -> BigDecimal {
        &self.price * BigDecimal::from(self.quantity)
    }
}
