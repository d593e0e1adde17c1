//! REST API request/response models
//!
//! JSON shapes the web client sends and receives. Conversions from the gRPC
//! messages live here so handlers stay thin.

use grpc_contracts::identity as identity_pb;
use grpc_contracts::vocabulary as vocabulary_pb;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Page size used when the client does not send `limit`
pub const DEFAULT_PAGE_SIZE: u32 = 50;

// ============================================================================
// Error Model
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: None,
        }
    }

    pub fn with_message(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: Some(message.into()),
        }
    }
}

// ============================================================================
// Authentication Models
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: u32,
    pub email: String,
}

impl From<identity_pb::Principal> for UserSummary {
    fn from(principal: identity_pb::Principal) -> Self {
        Self {
            id: principal.id,
            email: principal.email,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
    pub token: String,
    pub user: Option<UserSummary>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub valid: bool,
    pub message: String,
    pub user: Option<UserSummary>,
}

// ============================================================================
// User Models
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: u32,
    pub email: String,
    pub created_at: String,
}

impl From<identity_pb::UserProfile> for UserProfile {
    fn from(profile: identity_pb::UserProfile) -> Self {
        Self {
            id: profile.id,
            email: profile.email,
            created_at: profile.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub success: bool,
    pub message: String,
    pub user: Option<UserProfile>,
}

// ============================================================================
// Vocabulary Models
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    pub id: u64,
    pub user_id: u32,
    pub word: String,
    pub meaning: String,
    pub example: String,
    pub date: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<vocabulary_pb::Vocabulary> for Vocabulary {
    fn from(v: vocabulary_pb::Vocabulary) -> Self {
        Self {
            id: v.id,
            user_id: v.user_id,
            word: v.word,
            meaning: v.meaning,
            example: v.example,
            date: v.date,
            status: v.status,
            created_at: v.created_at,
            updated_at: v.updated_at,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct VocabularyListQuery {
    pub date: Option<String>,
    pub search: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl VocabularyListQuery {
    pub fn into_request(self, target_user_id: u32) -> vocabulary_pb::ListVocabulariesRequest {
        vocabulary_pb::ListVocabulariesRequest {
            target_user_id,
            date: self.date.filter(|d| !d.is_empty()),
            search: self.search.filter(|s| !s.is_empty()),
            limit: self.limit.unwrap_or(DEFAULT_PAGE_SIZE),
            offset: self.offset.unwrap_or(0),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VocabularyListResponse {
    pub success: bool,
    pub message: String,
    pub vocabularies: Vec<Vocabulary>,
    pub count: u32,
    pub total: u32,
}

#[derive(Debug, Deserialize)]
pub struct CreateVocabularyRequest {
    pub word: String,
    pub meaning: String,
    #[serde(default)]
    pub example: String,
    pub date: String,
    #[serde(default)]
    pub status: String,
}

/// Omitted fields stay unchanged
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateVocabularyRequest {
    pub word: String,
    pub meaning: String,
    pub example: String,
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VocabularyResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary: Option<Vocabulary>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DailyCount {
    pub date: String,
    pub count: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VocabularyStats {
    pub total_words: u32,
    pub words_this_week: u32,
    pub words_this_month: u32,
    pub status_counts: HashMap<String, u32>,
    pub daily_counts: Vec<DailyCount>,
}

impl From<vocabulary_pb::VocabularyStats> for VocabularyStats {
    fn from(stats: vocabulary_pb::VocabularyStats) -> Self {
        Self {
            total_words: stats.total_words,
            words_this_week: stats.words_this_week,
            words_this_month: stats.words_this_month,
            status_counts: stats.status_counts,
            daily_counts: stats
                .daily_counts
                .into_iter()
                .map(|d| DailyCount {
                    date: d.date,
                    count: d.count,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    pub success: bool,
    pub message: String,
    pub stats: Option<VocabularyStats>,
}
