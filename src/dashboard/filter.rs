// file: src/dashboard/filter.rs
// description: dashboard filter state applied to the insights query
// reference: sidebar filters of the insights dashboard

use crate::error::{PipelineError, Result};
use crate::models::{DocumentType, Priority};
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardFilter {
    pub document_types: Vec<DocumentType>,
    pub priorities: Vec<Priority>,
    pub review_only: bool,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl Default for DashboardFilter {
    fn default() -> Self {
        Self {
            document_types: DocumentType::INSIGHT_TYPES.to_vec(),
            priorities: Priority::ALL.to_vec(),
            review_only: false,
            date_from: None,
            date_to: None,
        }
    }
}

impl DashboardFilter {
    /// Build a filter from CLI selections; empty selections fall back to "all".
    pub fn from_selection(
        document_types: Vec<DocumentType>,
        priorities: Vec<Priority>,
        review_only: bool,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
    ) -> Result<Self> {
        if let (Some(from), Some(to)) = (date_from, date_to)
            && from > to
        {
            return Err(PipelineError::Validation(format!(
                "Date range start {} is after end {}",
                from, to
            )));
        }

        let defaults = Self::default();

        Ok(Self {
            document_types: if document_types.is_empty() {
                defaults.document_types
            } else {
                document_types
            },
            priorities: if priorities.is_empty() {
                defaults.priorities
            } else {
                priorities
            },
            review_only,
            date_from,
            date_to,
        })
    }

    pub fn type_labels(&self) -> Vec<&'static str> {
        self.document_types.iter().map(|t| t.label()).collect()
    }

    pub fn priority_labels(&self) -> Vec<&'static str> {
        self.priorities.iter().map(|p| p.label()).collect()
    }
}
