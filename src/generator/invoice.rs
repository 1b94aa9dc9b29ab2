// file: src/generator/invoice.rs
// description: sample invoice data and its page layout
// reference: A4 single-page invoice template

use crate::error::Result;
use crate::generator::canvas::{Align, Cell, PdfCanvas};
use crate::generator::fonts::FontStyle;
use crate::generator::templates::{self, CLIENT_ADDRESS, CLIENTS, COMPANY_ADDRESS};
use crate::models::Language;
use crate::utils::format::format_usd;
use chrono::{Duration, NaiveDate};
use rand::Rng;
use rand::seq::SliceRandom;

#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceLine {
    pub description: String,
    pub quantity: u32,
    pub unit_price: f64,
}

impl InvoiceLine {
    pub fn total(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }
}

#[derive(Debug, Clone)]
pub struct Invoice {
    pub language: Language,
    pub number: u32,
    pub invoice_date: NaiveDate,
    pub due_date: NaiveDate,
    pub client: String,
    pub lines: Vec<InvoiceLine>,
}

impl Invoice {
    pub const TAX_RATE: f64 = 0.08;
    pub const PAYMENT_TERM_DAYS: i64 = 30;

    pub fn sample<R: Rng + ?Sized>(
        language: Language,
        number: u32,
        today: NaiveDate,
        rng: &mut R,
    ) -> Self {
        let labels = templates::invoice_labels(language);
        let invoice_date = today - Duration::days(rng.gen_range(1..=60));
        let client = CLIENTS.choose(rng).copied().unwrap_or(CLIENTS[0]);

        Self {
            language,
            number,
            invoice_date,
            due_date: invoice_date + Duration::days(Self::PAYMENT_TERM_DAYS),
            client: client.to_string(),
            lines: labels
                .items
                .iter()
                .map(|(description, quantity, unit_price)| InvoiceLine {
                    description: description.to_string(),
                    quantity: *quantity,
                    unit_price: *unit_price,
                })
                .collect(),
        }
    }

    /// `INV-2024-0007`
    pub fn invoice_code(&self) -> String {
        format!("INV-2024-{:04}", self.number)
    }

    pub fn subtotal(&self) -> f64 {
        self.lines.iter().map(InvoiceLine::total).sum()
    }

    pub fn tax(&self) -> f64 {
        self.subtotal() * Self::TAX_RATE
    }

    pub fn grand_total(&self) -> f64 {
        self.subtotal() + self.tax()
    }

    pub fn render(&self) -> Result<PdfCanvas> {
        let labels = templates::invoice_labels(self.language);
        let mut pdf = PdfCanvas::new();
        pdf.add_page();

        pdf.set_font(FontStyle::Bold, 24.0);
        pdf.cell(0.0, 15.0, labels.title, Cell::line().align(Align::Center));

        pdf.set_font(FontStyle::Regular, 10.0);
        pdf.cell(0.0, 8.0, labels.company, Cell::line().align(Align::Center));
        pdf.cell(0.0, 5.0, COMPANY_ADDRESS, Cell::line().align(Align::Center));
        pdf.ln(Some(10.0));

        pdf.set_font(FontStyle::Bold, 11.0);
        pdf.cell(
            95.0,
            8.0,
            &format!("{}: {}", labels.invoice_number, self.invoice_code()),
            Cell::plain(),
        );
        pdf.cell(
            95.0,
            8.0,
            &format!("{}: {}", labels.date, self.invoice_date.format("%Y-%m-%d")),
            Cell::line().align(Align::Right),
        );
        pdf.cell(
            95.0,
            8.0,
            &format!("{}: {}", labels.due_date, self.due_date.format("%Y-%m-%d")),
            Cell::line().align(Align::Right),
        );
        pdf.ln(Some(5.0));

        pdf.set_font(FontStyle::Bold, 11.0);
        pdf.cell(0.0, 8.0, &format!("{}:", labels.bill_to), Cell::line());
        pdf.set_font(FontStyle::Regular, 10.0);
        pdf.cell(0.0, 6.0, &self.client, Cell::line());
        for line in CLIENT_ADDRESS {
            pdf.cell(0.0, 6.0, line, Cell::line());
        }
        pdf.ln(Some(10.0));

        pdf.set_font(FontStyle::Bold, 10.0);
        pdf.set_fill_gray(240);
        let header = Cell::plain().bordered().filled();
        pdf.cell(80.0, 8.0, labels.description, header);
        pdf.cell(25.0, 8.0, labels.quantity, header.align(Align::Center));
        pdf.cell(40.0, 8.0, labels.unit_price, header.align(Align::Right));
        pdf.cell(45.0, 8.0, labels.total, header.align(Align::Right).newline());

        pdf.set_font(FontStyle::Regular, 10.0);
        let row = Cell::plain().bordered();
        for line in &self.lines {
            pdf.cell(80.0, 7.0, &line.description, row);
            pdf.cell(25.0, 7.0, &line.quantity.to_string(), row.align(Align::Center));
            pdf.cell(40.0, 7.0, &format_usd(line.unit_price), row.align(Align::Right));
            pdf.cell(
                45.0,
                7.0,
                &format_usd(line.total()),
                row.align(Align::Right).newline(),
            );
        }

        pdf.ln(Some(5.0));
        pdf.set_font(FontStyle::Regular, 10.0);
        let label = Cell::plain().align(Align::Right);
        let value = Cell::line().align(Align::Right);
        pdf.cell(145.0, 7.0, &format!("{}:", labels.subtotal), label);
        pdf.cell(45.0, 7.0, &format_usd(self.subtotal()), value);
        pdf.cell(145.0, 7.0, &format!("{}:", labels.tax), label);
        pdf.cell(45.0, 7.0, &format_usd(self.tax()), value);
        pdf.set_font(FontStyle::Bold, 11.0);
        pdf.cell(145.0, 8.0, &format!("{}:", labels.grand_total), label);
        pdf.cell(45.0, 8.0, &format_usd(self.grand_total()), value);

        pdf.ln(Some(15.0));
        pdf.set_font(FontStyle::Italic, 10.0);
        pdf.cell(0.0, 8.0, labels.payment_terms, Cell::line().align(Align::Center));
        pdf.cell(0.0, 8.0, labels.thank_you, Cell::line().align(Align::Center));

        Ok(pdf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 24).unwrap()
    }

    #[test]
    fn test_totals_include_eight_percent_tax() {
        let mut rng = StdRng::seed_from_u64(1);
        let invoice = Invoice::sample(Language::En, 1, today(), &mut rng);

        let line_sum: f64 = invoice
            .lines
            .iter()
            .map(|l| l.quantity as f64 * l.unit_price)
            .sum();
        assert_eq!(invoice.subtotal(), line_sum);
        assert_eq!(invoice.subtotal(), 13400.0);
        assert!((invoice.grand_total() - invoice.subtotal() * 1.08).abs() < 1e-9);
        assert!((invoice.grand_total() - 14472.0).abs() < 1e-9);
    }

    #[test]
    fn test_dates_within_window() {
        let mut rng = StdRng::seed_from_u64(99);
        for n in 1..=20 {
            let invoice = Invoice::sample(Language::Es, n, today(), &mut rng);
            let age = (today() - invoice.invoice_date).num_days();
            assert!((1..=60).contains(&age));
            assert_eq!((invoice.due_date - invoice.invoice_date).num_days(), 30);
            assert!(CLIENTS.contains(&invoice.client.as_str()));
        }
    }

    #[test]
    fn test_invoice_code_padding() {
        let mut rng = StdRng::seed_from_u64(3);
        let invoice = Invoice::sample(Language::De, 5, today(), &mut rng);
        assert_eq!(invoice.invoice_code(), "INV-2024-0005");
    }

    #[test]
    fn test_render_places_localized_text() {
        let mut rng = StdRng::seed_from_u64(7);
        let invoice = Invoice::sample(Language::Pt, 6, today(), &mut rng);
        let canvas = invoice.render().unwrap();

        let texts: Vec<_> = canvas.placed_text().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts[0], "FATURA");
        assert!(texts.contains(&"Total Geral:"));
        assert!(texts.contains(&"$14,472.00"));
        assert!(texts.contains(&"$1,072.00"));
        assert_eq!(canvas.page_count(), 1);
    }
}
