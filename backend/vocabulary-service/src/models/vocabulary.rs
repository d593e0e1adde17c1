use crate::error::{Result, VocabularyError};
use chrono::{DateTime, NaiveDate, Utc};
use grpc_contracts::vocabulary as pb;
use std::collections::HashMap;

/// Calendar dates on the wire are `YYYY-MM-DD`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Status given to entries created without one
pub const DEFAULT_STATUS: &str = "review_needed";

pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        VocabularyError::InvalidArgument("Invalid date format. Use YYYY-MM-DD".to_string())
    })
}

/// A word a user is learning. Always scoped to exactly one owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    pub id: u64,
    pub user_id: u32,
    pub word: String,
    pub meaning: String,
    pub example: String,
    /// Day the word was studied, chosen by the user
    pub date: NaiveDate,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vocabulary {
    pub fn to_message(&self) -> pb::Vocabulary {
        pb::Vocabulary {
            id: self.id,
            user_id: self.user_id,
            word: self.word.clone(),
            meaning: self.meaning.clone(),
            example: self.example.clone(),
            date: self.date.format(DATE_FORMAT).to_string(),
            status: self.status.clone(),
            created_at: self.created_at.to_rfc3339(),
            updated_at: self.updated_at.to_rfc3339(),
        }
    }

    fn matches(&self, needle: &str) -> bool {
        self.word.to_lowercase().contains(needle) || self.meaning.to_lowercase().contains(needle)
    }
}

#[derive(Debug, Clone)]
pub struct NewVocabulary {
    pub word: String,
    pub meaning: String,
    pub example: String,
    pub date: NaiveDate,
    pub status: String,
}

impl NewVocabulary {
    pub fn from_request(req: pb::CreateVocabularyRequest) -> Result<Self> {
        let word = req.word.trim().to_string();
        let meaning = req.meaning.trim().to_string();
        if word.is_empty() || meaning.is_empty() {
            return Err(VocabularyError::InvalidArgument(
                "Word and meaning are required".to_string(),
            ));
        }

        let status = match req.status.trim() {
            "" => DEFAULT_STATUS.to_string(),
            status => status.to_string(),
        };

        Ok(Self {
            word,
            meaning,
            example: req.example,
            date: parse_date(&req.date)?,
            status,
        })
    }
}

/// Partial update. Empty fields on the wire mean "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VocabularyChanges {
    pub word: Option<String>,
    pub meaning: Option<String>,
    pub example: Option<String>,
    pub status: Option<String>,
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

impl VocabularyChanges {
    pub fn from_request(req: pb::UpdateVocabularyRequest) -> Self {
        Self {
            word: non_empty(req.word),
            meaning: non_empty(req.meaning),
            example: non_empty(req.example),
            status: non_empty(req.status),
        }
    }

    pub fn apply(self, entry: &mut Vocabulary) {
        if let Some(word) = self.word {
            entry.word = word;
        }
        if let Some(meaning) = self.meaning {
            entry.meaning = meaning;
        }
        if let Some(example) = self.example {
            entry.example = example;
        }
        if let Some(status) = self.status {
            entry.status = status;
        }
    }
}

/// Listing criteria. `limit` of `None` returns every match.
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub date: Option<NaiveDate>,
    /// Lowercased substring matched against word and meaning
    pub search: Option<String>,
    pub limit: Option<usize>,
    pub offset: usize,
}

impl ListFilter {
    pub fn from_request(req: &pb::ListVocabulariesRequest) -> Result<Self> {
        let date = match req.date.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(value) => Some(parse_date(value)?),
        };
        let search = req
            .search
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());

        Ok(Self {
            date,
            search,
            limit: (req.limit > 0).then_some(req.limit as usize),
            offset: req.offset as usize,
        })
    }

    pub fn matches(&self, entry: &Vocabulary) -> bool {
        self.date.map_or(true, |date| entry.date == date)
            && self.search.as_deref().map_or(true, |needle| entry.matches(needle))
    }
}

#[derive(Debug, Clone, Default)]
pub struct VocabularyPage {
    pub items: Vec<Vocabulary>,
    /// Matches before pagination
    pub total: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VocabularyStats {
    pub total_words: u32,
    pub words_this_week: u32,
    pub words_this_month: u32,
    pub status_counts: HashMap<String, u32>,
    /// Oldest first, one entry per day
    pub daily_counts: Vec<(NaiveDate, u32)>,
}

impl VocabularyStats {
    pub fn to_message(&self) -> pb::VocabularyStats {
        pb::VocabularyStats {
            total_words: self.total_words,
            words_this_week: self.words_this_week,
            words_this_month: self.words_this_month,
            status_counts: self.status_counts.clone(),
            daily_counts: self
                .daily_counts
                .iter()
                .map(|(date, count)| pb::DailyCount {
                    date: date.format(DATE_FORMAT).to_string(),
                    count: *count,
                })
                .collect(),
        }
    }
}
