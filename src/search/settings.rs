//! Search index settings.

use serde::{Deserialize, Serialize};

use crate::config::{
    COLUMN_ABBREVIATIONS, COLUMN_ALTERNATIVES, COLUMN_NAME, HITS_PER_PAGE, INDEX_LANGUAGE,
    PAGINATION_LIMITED_TO,
};

/// How the secondary searchable attributes are declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchableAttributes {
    /// `["name", "abbreviations", "alternatives"]`
    #[default]
    Separate,
    /// `["name", "abbreviations,alternatives"]`, the layout older indexes were
    /// configured with. The service reads the comma-joined entry as attributes
    /// of equal rank.
    Combined,
}

impl SearchableAttributes {
    pub fn attribute_names(self) -> Vec<String> {
        match self {
            SearchableAttributes::Separate => vec![
                COLUMN_NAME.to_string(),
                COLUMN_ABBREVIATIONS.to_string(),
                COLUMN_ALTERNATIVES.to_string(),
            ],
            SearchableAttributes::Combined => vec![
                COLUMN_NAME.to_string(),
                format!("{},{}", COLUMN_ABBREVIATIONS, COLUMN_ALTERNATIVES),
            ],
        }
    }
}

/// The settings object sent when an index is initialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexSettings {
    pub searchable_attributes: Vec<String>,
    pub index_languages: Vec<String>,
    pub query_languages: Vec<String>,
    pub hits_per_page: u32,
    pub pagination_limited_to: u32,
}

impl IndexSettings {
    /// Settings for the schools index: English only, five hits per page,
    /// pagination capped at fifty hits.
    pub fn schools(layout: SearchableAttributes) -> Self {
        Self {
            searchable_attributes: layout.attribute_names(),
            index_languages: vec![INDEX_LANGUAGE.to_string()],
            query_languages: vec![INDEX_LANGUAGE.to_string()],
            hits_per_page: HITS_PER_PAGE,
            pagination_limited_to: PAGINATION_LIMITED_TO,
        }
    }
}
