//! Receipt

use std::io;

use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::{Cart, CartError},
    items::LineItem,
    orders::Order,
    pricing::{Quote, TotalPriceError, format_amount},
};

/// Errors that can occur when building or printing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// The cart could not be priced.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// A line total could not be calculated.
    #[error(transparent)]
    TotalPrice(#[from] TotalPriceError),

    /// IO error
    #[error("IO error")]
    IO,
}

/// One priced line on a receipt.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptLine<'a> {
    /// Product name
    pub name: String,

    /// Units ordered
    pub quantity: u32,

    /// Price of one unit
    pub unit_price: Money<'a, Currency>,

    /// `unit_price × quantity`
    pub total: Money<'a, Currency>,
}

impl<'a> ReceiptLine<'a> {
    fn from_line_item(item: &LineItem<'a>) -> Result<Self, TotalPriceError> {
        Ok(Self {
            name: item.name().to_string(),
            quantity: item.quantity(),
            unit_price: *item.unit_price(),
            total: item.total()?,
        })
    }
}

/// Printable summary of a cart or a placed order.
#[derive(Debug, Clone)]
pub struct Receipt<'a> {
    lines: SmallVec<[ReceiptLine<'a>; 8]>,
    quote: Quote<'a>,
    coupon_code: Option<String>,
}

impl<'a> Receipt<'a> {
    /// Price a cart with the given delivery fee.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError`] if the cart cannot be quoted or a line total overflows.
    pub fn from_cart(cart: &Cart<'a>, delivery_fee: Money<'a, Currency>) -> Result<Self, ReceiptError> {
        let quote = cart.quote(delivery_fee)?;

        Ok(Self {
            lines: lines_for(cart.items())?,
            quote,
            coupon_code: cart.coupon().map(|coupon| coupon.code().to_string()),
        })
    }

    /// Receipt for an order, using the totals frozen at placement.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiptError::TotalPrice`] if a line total overflows.
    pub fn from_order(order: &Order<'a>) -> Result<Self, ReceiptError> {
        Ok(Self {
            lines: lines_for(order.items())?,
            quote: *order.quote(),
            coupon_code: order.coupon_code().map(str::to_string),
        })
    }

    /// Priced lines
    pub fn lines(&self) -> &[ReceiptLine<'a>] {
        &self.lines
    }

    /// Totals
    pub fn quote(&self) -> &Quote<'a> {
        &self.quote
    }

    /// Code of the applied coupon
    pub fn coupon_code(&self) -> Option<&str> {
        self.coupon_code.as_deref()
    }

    /// Prints the receipt.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiptError::IO`] if the receipt cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["", "Item", "Qty", "Unit Price", "Total"]);

        for (idx, line) in self.lines.iter().enumerate() {
            builder.push_record([
                format!("{:>2}", idx + 1),
                line.name.clone(),
                line.quantity.to_string(),
                format_amount(&line.unit_price),
                format_amount(&line.total),
            ]);
        }

        write_receipt_table(&mut out, builder)?;

        write_receipt_summary(&mut out, self)
    }
}

fn lines_for<'a>(items: &[LineItem<'a>]) -> Result<SmallVec<[ReceiptLine<'a>; 8]>, TotalPriceError> {
    items.iter().map(ReceiptLine::from_line_item).collect()
}

fn write_receipt_table(out: &mut impl io::Write, builder: Builder) -> Result<(), ReceiptError> {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(
        1,
        HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤')),
    );

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::first(), color_dark_grey());
    table.modify(Columns::new(2..5), Alignment::right());

    let table_str = shade_borders(&table.to_string());

    writeln!(out, "\n{table_str}").map_err(|_err| ReceiptError::IO)
}

fn write_receipt_summary(out: &mut impl io::Write, receipt: &Receipt<'_>) -> Result<(), ReceiptError> {
    let quote = receipt.quote();

    let delivery_fee = if quote.delivery_fee().is_zero() {
        "Free".to_string()
    } else {
        format_amount(&quote.delivery_fee())
    };

    let discount_label = match receipt.coupon_code() {
        Some(code) => format!(" Discount ({code}):"),
        None => " Discount:".to_string(),
    };

    let rows = [
        (" Subtotal:".to_string(), format_amount(&quote.subtotal()), false),
        (" Delivery fee:".to_string(), delivery_fee, false),
        (discount_label, format!("-{}", format_amount(&quote.discount())), false),
        (" Total:".to_string(), format_amount(&quote.total()), true),
    ];

    let label_width = rows
        .iter()
        .map(|(label, ..)| label.chars().count())
        .max()
        .unwrap_or_default();

    let value_width = rows
        .iter()
        .map(|(_, value, _)| value.chars().count())
        .max()
        .unwrap_or_default();

    for (label, value, bold) in &rows {
        let label = format!("{label:>label_width$}");
        let value = format!("{value:>value_width$}");

        if *bold {
            writeln!(out, "{BOLD}{label}{RESET}  {BOLD}{value}{RESET}  ")
        } else {
            writeln!(out, "{label}  {value}  ")
        }
        .map_err(|_err| ReceiptError::IO)?;
    }

    writeln!(out).map_err(|_err| ReceiptError::IO)
}

const GREY: &str = "\x1b[90m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

fn is_box_drawing(ch: char) -> bool {
    matches!(ch, '\u{2500}'..='\u{257F}')
}

/// Greys out every run of box-drawing characters in a rendered table.
fn shade_borders(table: &str) -> String {
    let mut shaded = String::with_capacity(table.len() * 2);
    let mut chars = table.chars().peekable();

    while let Some(ch) = chars.next() {
        if !is_box_drawing(ch) {
            shaded.push(ch);
            continue;
        }

        shaded.push_str(GREY);
        shaded.push(ch);

        while let Some(border) = chars.next_if(|next| is_box_drawing(*next)) {
            shaded.push(border);
        }

        shaded.push_str(RESET);
    }

    shaded
}

fn color_dark_grey() -> Color {
    Color::new(GREY, RESET)
}
