// file: src/generator/contract.rs
// description: sample licensing agreement data and its page layout
// reference: content licensing agreement template

use crate::error::Result;
use crate::generator::canvas::{Align, Cell, PdfCanvas};
use crate::generator::fonts::FontStyle;
use crate::generator::templates::{
    self, CONTRACT_TERM_YEARS, CONTRACT_TERRITORIES, LICENSEES, LICENSORS,
};
use crate::models::Language;
use crate::utils::format::format_thousands;
use chrono::{Duration, NaiveDate};
use rand::Rng;
use rand::seq::SliceRandom;

const SIGNATURE_LINE_LEN: usize = 35;

#[derive(Debug, Clone)]
pub struct Contract {
    pub language: Language,
    pub number: u32,
    pub licensor: String,
    pub licensee: String,
    pub effective_date: NaiveDate,
    pub term_years: u32,
    pub territory: String,
    /// Whole US dollars, always a multiple of 10,000.
    pub consideration_usd: u64,
}

impl Contract {
    pub fn sample<R: Rng + ?Sized>(
        language: Language,
        number: u32,
        today: NaiveDate,
        rng: &mut R,
    ) -> Self {
        let licensor = LICENSORS.choose(rng).copied().unwrap_or(LICENSORS[0]);
        let licensee = LICENSEES.choose(rng).copied().unwrap_or(LICENSEES[0]);
        let effective_date = today - Duration::days(rng.gen_range(1..=180));
        let term_years = CONTRACT_TERM_YEARS.choose(rng).copied().unwrap_or(1);
        let territory = CONTRACT_TERRITORIES
            .choose(rng)
            .copied()
            .unwrap_or(CONTRACT_TERRITORIES[0]);
        let consideration_usd = rng.gen_range(50u64..=500) * 10_000;

        Self {
            language,
            number,
            licensor: licensor.to_string(),
            licensee: licensee.to_string(),
            effective_date,
            term_years,
            territory: territory.to_string(),
            consideration_usd,
        }
    }

    pub fn render(&self) -> Result<PdfCanvas> {
        let labels = templates::contract_labels(self.language);
        let mut pdf = PdfCanvas::new();
        pdf.add_page();

        pdf.set_font(FontStyle::Bold, 18.0);
        pdf.cell(0.0, 12.0, labels.title, Cell::line().align(Align::Center));
        pdf.ln(Some(5.0));

        pdf.set_font(FontStyle::Bold, 12.0);
        pdf.cell(0.0, 8.0, labels.parties, Cell::line());
        pdf.set_font(FontStyle::Regular, 10.0);
        pdf.cell(50.0, 7.0, &format!("{}:", labels.party_a), Cell::plain());
        pdf.cell(0.0, 7.0, &self.licensor, Cell::line());
        pdf.cell(50.0, 7.0, &format!("{}:", labels.party_b), Cell::plain());
        pdf.cell(0.0, 7.0, &self.licensee, Cell::line());
        pdf.ln(Some(5.0));

        let effective = self.effective_date.format("%Y-%m-%d").to_string();
        let term = format!("{} year(s)", self.term_years);
        let consideration = format!(
            "${} USD",
            format_thousands(self.consideration_usd as i64)
        );
        let details = [
            (labels.effective_date, effective.as_str()),
            (labels.term, term.as_str()),
            (labels.territory, self.territory.as_str()),
            (labels.consideration, consideration.as_str()),
        ];
        for (label, value) in details {
            pdf.set_font(FontStyle::Bold, 10.0);
            pdf.cell(50.0, 7.0, &format!("{}:", label), Cell::plain());
            pdf.set_font(FontStyle::Regular, 10.0);
            pdf.cell(0.0, 7.0, value, Cell::line());
        }
        pdf.ln(Some(10.0));

        pdf.set_font(FontStyle::Bold, 12.0);
        pdf.cell(0.0, 8.0, labels.terms_title, Cell::line());
        pdf.ln(Some(3.0));

        pdf.set_font(FontStyle::Regular, 9.0);
        for clause in labels.terms {
            pdf.multi_cell(0.0, 5.0, clause);
            pdf.ln(Some(2.0));
        }

        pdf.ln(Some(10.0));
        pdf.set_font(FontStyle::Bold, 12.0);
        pdf.cell(0.0, 8.0, labels.signature, Cell::line());
        pdf.ln(Some(15.0));

        pdf.set_font(FontStyle::Regular, 10.0);
        let rule = "_".repeat(SIGNATURE_LINE_LEN);
        pdf.cell(90.0, 5.0, &rule, Cell::plain());
        pdf.cell(10.0, 5.0, "", Cell::plain());
        pdf.cell(90.0, 5.0, &rule, Cell::line());
        pdf.cell(90.0, 5.0, labels.party_a, Cell::plain());
        pdf.cell(10.0, 5.0, "", Cell::plain());
        pdf.cell(90.0, 5.0, labels.party_b, Cell::line());

        Ok(pdf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 1).unwrap()
    }

    #[test]
    fn test_sample_value_ranges() {
        let mut rng = StdRng::seed_from_u64(42);
        for n in 1..=30 {
            let contract = Contract::sample(Language::En, n, today(), &mut rng);
            assert_eq!(contract.consideration_usd % 10_000, 0);
            assert!((500_000..=5_000_000).contains(&contract.consideration_usd));
            assert!(CONTRACT_TERM_YEARS.contains(&contract.term_years));
            let age = (today() - contract.effective_date).num_days();
            assert!((1..=180).contains(&age));
            assert!(LICENSORS.contains(&contract.licensor.as_str()));
            assert!(LICENSEES.contains(&contract.licensee.as_str()));
        }
    }

    #[test]
    fn test_same_seed_same_contract() {
        let a = Contract::sample(Language::De, 5, today(), &mut StdRng::seed_from_u64(8));
        let b = Contract::sample(Language::De, 5, today(), &mut StdRng::seed_from_u64(8));
        assert_eq!(a.licensor, b.licensor);
        assert_eq!(a.consideration_usd, b.consideration_usd);
        assert_eq!(a.effective_date, b.effective_date);
    }

    #[test]
    fn test_render_includes_terms_and_signatures() {
        let contract = Contract {
            language: Language::Es,
            number: 3,
            licensor: "Universal Content Group".to_string(),
            licensee: "HBO Max Global".to_string(),
            effective_date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            term_years: 3,
            territory: "Europe".to_string(),
            consideration_usd: 1_230_000,
        };
        let canvas = contract.render().unwrap();
        let texts: Vec<_> = canvas.placed_text().iter().map(|t| t.text.clone()).collect();

        assert_eq!(texts[0], "ACUERDO DE LICENCIA");
        assert!(texts.contains(&"$1,230,000 USD".to_string()));
        assert!(texts.contains(&"3 year(s)".to_string()));
        assert!(texts.contains(&"FIRMAS".to_string()));
        assert_eq!(texts.iter().filter(|t| t.chars().all(|c| c == '_')).count(), 2);
        assert!(texts.iter().any(|t| t.starts_with("1. OTORGAMIENTO DE LICENCIA")));
    }
}
