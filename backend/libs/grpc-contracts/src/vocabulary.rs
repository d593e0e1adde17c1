//! `vocaltracker.vocabulary` messages and the generated `VocabularyService` stubs.
//!
//! Every request names the user whose entries it touches in `target_user_id`.
//! The server compares it with the authenticated principal before doing
//! anything else.

use std::collections::HashMap;

pub use crate::common::ResultCode;

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Vocabulary {
    #[prost(uint64, tag = "1")]
    pub id: u64,
    #[prost(uint32, tag = "2")]
    pub user_id: u32,
    #[prost(string, tag = "3")]
    pub word: String,
    #[prost(string, tag = "4")]
    pub meaning: String,
    #[prost(string, tag = "5")]
    pub example: String,
    /// YYYY-MM-DD
    #[prost(string, tag = "6")]
    pub date: String,
    #[prost(string, tag = "7")]
    pub status: String,
    #[prost(string, tag = "8")]
    pub created_at: String,
    #[prost(string, tag = "9")]
    pub updated_at: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListVocabulariesRequest {
    #[prost(uint32, tag = "1")]
    pub target_user_id: u32,
    #[prost(string, optional, tag = "2")]
    pub date: Option<String>,
    #[prost(string, optional, tag = "3")]
    pub search: Option<String>,
    #[prost(uint32, tag = "4")]
    pub limit: u32,
    #[prost(uint32, tag = "5")]
    pub offset: u32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListVocabulariesResponse {
    #[prost(bool, tag = "1")]
    pub success: bool,
    #[prost(string, tag = "2")]
    pub message: String,
    #[prost(enumeration = "ResultCode", tag = "3")]
    pub code: i32,
    #[prost(message, repeated, tag = "4")]
    pub vocabularies: Vec<Vocabulary>,
    /// Entries in this page
    #[prost(uint32, tag = "5")]
    pub count: u32,
    /// Entries matching the filters, across all pages
    #[prost(uint32, tag = "6")]
    pub total: u32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetVocabularyRequest {
    #[prost(uint32, tag = "1")]
    pub target_user_id: u32,
    #[prost(uint64, tag = "2")]
    pub vocabulary_id: u64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CreateVocabularyRequest {
    #[prost(uint32, tag = "1")]
    pub target_user_id: u32,
    #[prost(string, tag = "2")]
    pub word: String,
    #[prost(string, tag = "3")]
    pub meaning: String,
    #[prost(string, tag = "4")]
    pub example: String,
    #[prost(string, tag = "5")]
    pub date: String,
    /// Empty means `review_needed`
    #[prost(string, tag = "6")]
    pub status: String,
}

/// Empty string fields leave the stored value unchanged.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UpdateVocabularyRequest {
    #[prost(uint32, tag = "1")]
    pub target_user_id: u32,
    #[prost(uint64, tag = "2")]
    pub vocabulary_id: u64,
    #[prost(string, tag = "3")]
    pub word: String,
    #[prost(string, tag = "4")]
    pub meaning: String,
    #[prost(string, tag = "5")]
    pub example: String,
    #[prost(string, tag = "6")]
    pub status: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct VocabularyResponse {
    #[prost(bool, tag = "1")]
    pub success: bool,
    #[prost(string, tag = "2")]
    pub message: String,
    #[prost(enumeration = "ResultCode", tag = "3")]
    pub code: i32,
    #[prost(message, optional, tag = "4")]
    pub vocabulary: Option<Vocabulary>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DeleteVocabularyRequest {
    #[prost(uint32, tag = "1")]
    pub target_user_id: u32,
    #[prost(uint64, tag = "2")]
    pub vocabulary_id: u64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DeleteVocabularyResponse {
    #[prost(bool, tag = "1")]
    pub success: bool,
    #[prost(string, tag = "2")]
    pub message: String,
    #[prost(enumeration = "ResultCode", tag = "3")]
    pub code: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetVocabularyStatsRequest {
    #[prost(uint32, tag = "1")]
    pub target_user_id: u32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DailyCount {
    #[prost(string, tag = "1")]
    pub date: String,
    #[prost(uint32, tag = "2")]
    pub count: u32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct VocabularyStats {
    #[prost(uint32, tag = "1")]
    pub total_words: u32,
    #[prost(uint32, tag = "2")]
    pub words_this_week: u32,
    #[prost(uint32, tag = "3")]
    pub words_this_month: u32,
    #[prost(map = "string, uint32", tag = "4")]
    pub status_counts: HashMap<String, u32>,
    /// Oldest first, one entry per day
    #[prost(message, repeated, tag = "5")]
    pub daily_counts: Vec<DailyCount>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetVocabularyStatsResponse {
    #[prost(bool, tag = "1")]
    pub success: bool,
    #[prost(string, tag = "2")]
    pub message: String,
    #[prost(enumeration = "ResultCode", tag = "3")]
    pub code: i32,
    #[prost(message, optional, tag = "4")]
    pub stats: Option<VocabularyStats>,
}

include!(concat!(
    env!("OUT_DIR"),
    "/vocaltracker.vocabulary.VocabularyService.rs"
));
