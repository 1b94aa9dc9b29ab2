// file: src/generator/royalty.rs
// description: sample royalty statement data and its page layout
// reference: quarterly royalty statement template

use crate::error::{PipelineError, Result};
use crate::generator::canvas::{Align, Cell, PdfCanvas};
use crate::generator::fonts::FontStyle;
use crate::generator::templates::{self, PAYEES, ROYALTY_TITLES};
use crate::models::Language;
use crate::utils::format::{format_thousands, format_usd};
use chrono::{Duration, NaiveDate};
use rand::Rng;
use rand::seq::SliceRandom;

const QUARTER_START_MONTHS: [u32; 4] = [1, 4, 7, 10];

#[derive(Debug, Clone, PartialEq)]
pub struct RoyaltyLine {
    pub title: String,
    pub units: u32,
    pub rate: f64,
}

impl RoyaltyLine {
    pub fn amount(&self) -> f64 {
        self.units as f64 * self.rate
    }
}

#[derive(Debug, Clone)]
pub struct RoyaltyStatement {
    pub language: Language,
    pub number: u32,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub territory: String,
    pub payee: String,
    pub lines: Vec<RoyaltyLine>,
}

impl RoyaltyStatement {
    pub const PERIOD_DAYS: i64 = 89;
    pub const PAYMENT_DELAY_DAYS: i64 = 45;

    pub fn sample<R: Rng + ?Sized>(language: Language, number: u32, rng: &mut R) -> Result<Self> {
        let labels = templates::royalty_labels(language);
        let month = QUARTER_START_MONTHS.choose(rng).copied().unwrap_or(1);
        let period_start = NaiveDate::from_ymd_opt(2024, month, 1).ok_or_else(|| {
            PipelineError::Generation(format!("Invalid reporting month {}", month))
        })?;

        let territory = labels
            .territories
            .choose(rng)
            .copied()
            .unwrap_or(labels.territories[0]);
        let payee = PAYEES.choose(rng).copied().unwrap_or(PAYEES[0]);

        let lines = ROYALTY_TITLES
            .iter()
            .map(|(title, (low, high), rate)| RoyaltyLine {
                title: title.to_string(),
                units: rng.gen_range(*low..=*high),
                rate: *rate,
            })
            .collect();

        Ok(Self {
            language,
            number,
            period_start,
            period_end: period_start + Duration::days(Self::PERIOD_DAYS),
            territory: territory.to_string(),
            payee: payee.to_string(),
            lines,
        })
    }

    pub fn total(&self) -> f64 {
        self.lines.iter().map(RoyaltyLine::amount).sum()
    }

    pub fn payment_date(&self) -> NaiveDate {
        self.period_end + Duration::days(Self::PAYMENT_DELAY_DAYS)
    }

    pub fn render(&self) -> Result<PdfCanvas> {
        let labels = templates::royalty_labels(self.language);
        let mut pdf = PdfCanvas::new();
        pdf.add_page();

        pdf.set_font(FontStyle::Bold, 20.0);
        pdf.cell(0.0, 12.0, labels.title, Cell::line().align(Align::Center));
        pdf.set_font(FontStyle::Regular, 10.0);
        pdf.cell(0.0, 6.0, labels.company, Cell::line().align(Align::Center));
        pdf.ln(Some(10.0));

        let period = format!(
            "{} to {}",
            self.period_start.format("%Y-%m-%d"),
            self.period_end.format("%Y-%m-%d")
        );
        let details = [
            (labels.period, period.as_str()),
            (labels.territory, self.territory.as_str()),
            (labels.recipient, self.payee.as_str()),
        ];
        for (label, value) in details {
            pdf.set_font(FontStyle::Bold, 11.0);
            pdf.cell(50.0, 8.0, &format!("{}:", label), Cell::plain());
            pdf.set_font(FontStyle::Regular, 11.0);
            pdf.cell(0.0, 8.0, value, Cell::line());
        }
        pdf.ln(Some(10.0));

        pdf.set_font(FontStyle::Bold, 10.0);
        pdf.set_fill_gray(240);
        let header = Cell::plain().bordered().filled();
        pdf.cell(70.0, 8.0, labels.title_col, header);
        pdf.cell(35.0, 8.0, labels.units, header.align(Align::Center));
        pdf.cell(40.0, 8.0, labels.rate, header.align(Align::Right));
        pdf.cell(45.0, 8.0, labels.amount, header.align(Align::Right).newline());

        pdf.set_font(FontStyle::Regular, 10.0);
        let row = Cell::plain().bordered();
        for line in &self.lines {
            pdf.cell(70.0, 7.0, &line.title, row);
            pdf.cell(
                35.0,
                7.0,
                &format_thousands(line.units as i64),
                row.align(Align::Center),
            );
            pdf.cell(40.0, 7.0, &format!("${:.2}", line.rate), row.align(Align::Right));
            pdf.cell(
                45.0,
                7.0,
                &format_usd(line.amount()),
                row.align(Align::Right).newline(),
            );
        }

        pdf.ln(Some(5.0));
        pdf.set_font(FontStyle::Bold, 12.0);
        pdf.cell(
            145.0,
            10.0,
            &format!("{}:", labels.total_royalties),
            Cell::plain().align(Align::Right),
        );
        pdf.cell(
            45.0,
            10.0,
            &format_usd(self.total()),
            Cell::line().align(Align::Right),
        );

        pdf.ln(Some(5.0));
        pdf.set_font(FontStyle::Regular, 10.0);
        pdf.cell(
            0.0,
            8.0,
            &format!(
                "{}: {}",
                labels.payment_date,
                self.payment_date().format("%Y-%m-%d")
            ),
            Cell::line(),
        );

        Ok(pdf)
    }
}
