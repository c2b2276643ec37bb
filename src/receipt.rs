//! Receipt

use std::io;

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    orders::{OrderDraft, OrderLine},
    pricing::{PricingError, line_subtotal, total_price},
};

/// Errors that can occur when building or writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Error calculating line subtotals or the total.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// IO error
    #[error("IO error")]
    IO(#[source] io::Error),
}

/// One printed line of a receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptLine {
    /// Item name
    pub name: String,

    /// Units bought
    pub quantity: u32,

    /// Price paid per unit
    pub unit_price: Decimal,
}

impl<K> From<&OrderLine<K>> for ReceiptLine {
    fn from(line: &OrderLine<K>) -> Self {
        Self {
            name: line.name.clone(),
            quantity: line.quantity,
            unit_price: line.price_at_purchase,
        }
    }
}

/// Printable summary of a placed order.
#[derive(Debug, Clone)]
pub struct Receipt {
    reference: Option<String>,
    lines: Vec<ReceiptLine>,
    total: Decimal,
    currency: &'static Currency,
}

impl Receipt {
    /// Build a receipt, totalling the lines.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError`] if a subtotal or the total overflows.
    pub fn new(
        lines: impl Into<Vec<ReceiptLine>>,
        currency: &'static Currency,
    ) -> Result<Self, ReceiptError> {
        let lines = lines.into();

        let subtotals = lines
            .iter()
            .map(|line| line_subtotal(line.unit_price, line.quantity))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            reference: None,
            total: total_price(subtotals)?,
            lines,
            currency,
        })
    }

    /// Build a receipt for an unpersisted order draft.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError`] if a subtotal or the total overflows.
    pub fn from_draft<K>(
        draft: &OrderDraft<K>,
        currency: &'static Currency,
    ) -> Result<Self, ReceiptError> {
        Self::new(
            draft.lines().iter().map(ReceiptLine::from).collect::<Vec<_>>(),
            currency,
        )
    }

    /// Attach an order reference printed above the table.
    #[must_use]
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Lines on the receipt
    #[must_use]
    pub fn lines(&self) -> &[ReceiptLine] {
        &self.lines
    }

    /// Total amount paid
    #[must_use]
    pub fn total(&self) -> Money<'static, Currency> {
        Money::from_decimal(self.total, self.currency)
    }

    /// Currency used for all monetary values.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Writes the receipt as a table.
    ///
    /// # Errors
    ///
    /// Returns an error if a subtotal overflows or the output cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["", "Item", "Qty", "Unit Price", "Subtotal"]);

        for (idx, line) in self.lines.iter().enumerate() {
            let subtotal = line_subtotal(line.unit_price, line.quantity)?;

            builder.push_record([
                format!("#{:<3}", idx + 1),
                line.name.clone(),
                line.quantity.to_string(),
                self.money(line.unit_price).to_string(),
                self.money(subtotal).to_string(),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(2..5), Alignment::right());

        if let Some(reference) = &self.reference {
            writeln!(out, "Order {reference}").map_err(ReceiptError::IO)?;
        }

        writeln!(out, "{table}").map_err(ReceiptError::IO)?;
        writeln!(out, " Total: {}", self.total()).map_err(ReceiptError::IO)
    }

    fn money(&self, amount: Decimal) -> Money<'static, Currency> {
        Money::from_decimal(amount, self.currency)
    }
}
