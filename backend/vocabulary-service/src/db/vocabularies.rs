/// In-memory vocabulary repository
///
/// Every method takes the owner id and only ever sees that owner's entries.
/// An id belonging to someone else is indistinguishable from a missing one.
use crate::error::{Result, VocabularyError};
use crate::models::{
    ListFilter, NewVocabulary, Vocabulary, VocabularyChanges, VocabularyPage, VocabularyStats,
};
use chrono::{DateTime, Datelike, Duration, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Days covered by the daily activity series
pub const DAILY_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Default)]
struct Entries {
    by_id: BTreeMap<u64, Vocabulary>,
    last_id: u64,
}

impl Entries {
    fn owned_by(&self, owner: u32) -> impl Iterator<Item = &Vocabulary> {
        self.by_id.values().filter(move |v| v.user_id == owner)
    }

    fn get_owned_mut(&mut self, owner: u32, id: u64) -> Option<&mut Vocabulary> {
        self.by_id.get_mut(&id).filter(|v| v.user_id == owner)
    }
}

#[derive(Debug, Clone, Default)]
pub struct VocabularyStore {
    inner: Arc<RwLock<Entries>>,
}

impl VocabularyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Newest first, then paginated. `total` counts matches before paging.
    pub async fn list(&self, owner: u32, filter: &ListFilter) -> VocabularyPage {
        let entries = self.inner.read().await;

        let mut matches: Vec<&Vocabulary> = entries
            .owned_by(owner)
            .filter(|v| filter.matches(v))
            .collect();
        matches.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));

        let total = matches.len();
        let items = matches
            .into_iter()
            .skip(filter.offset)
            .take(filter.limit.unwrap_or(usize::MAX))
            .cloned()
            .collect();

        VocabularyPage { items, total }
    }

    pub async fn get(&self, owner: u32, id: u64) -> Option<Vocabulary> {
        let entries = self.inner.read().await;
        entries.by_id.get(&id).filter(|v| v.user_id == owner).cloned()
    }

    pub async fn create(&self, owner: u32, new: NewVocabulary) -> Result<Vocabulary> {
        let mut entries = self.inner.write().await;

        let id = entries
            .last_id
            .checked_add(1)
            .ok_or_else(|| VocabularyError::Internal("vocabulary id space exhausted".to_string()))?;

        let now = Utc::now();
        let entry = Vocabulary {
            id,
            user_id: owner,
            word: new.word,
            meaning: new.meaning,
            example: new.example,
            date: new.date,
            status: new.status,
            created_at: now,
            updated_at: now,
        };

        entries.last_id = id;
        entries.by_id.insert(id, entry.clone());
        Ok(entry)
    }

    pub async fn update(
        &self,
        owner: u32,
        id: u64,
        changes: VocabularyChanges,
    ) -> Result<Vocabulary> {
        let mut entries = self.inner.write().await;
        let entry = entries
            .get_owned_mut(owner, id)
            .ok_or(VocabularyError::NotFound)?;

        changes.apply(entry);
        entry.updated_at = Utc::now();
        Ok(entry.clone())
    }

    pub async fn delete(&self, owner: u32, id: u64) -> Result<()> {
        let mut entries = self.inner.write().await;
        if entries.get_owned_mut(owner, id).is_none() {
            return Err(VocabularyError::NotFound);
        }
        entries.by_id.remove(&id);
        Ok(())
    }

    pub async fn stats(&self, owner: u32) -> VocabularyStats {
        self.stats_at(owner, Utc::now()).await
    }

    /// Statistics relative to `now`. Weeks start on Sunday; buckets use the
    /// UTC day an entry was created.
    pub async fn stats_at(&self, owner: u32, now: DateTime<Utc>) -> VocabularyStats {
        let entries = self.inner.read().await;

        let today = now.date_naive();
        let week_start = today - Duration::days(i64::from(today.weekday().num_days_from_sunday()));
        let month_start = today - Duration::days(i64::from(today.day0()));
        let window_start = today - Duration::days(DAILY_WINDOW_DAYS - 1);

        let mut stats = VocabularyStats::default();
        let mut daily: BTreeMap<_, u32> = (0..DAILY_WINDOW_DAYS)
            .map(|offset| (window_start + Duration::days(offset), 0))
            .collect();

        for entry in entries.owned_by(owner) {
            let created = entry.created_at.date_naive();

            stats.total_words += 1;
            if created >= week_start {
                stats.words_this_week += 1;
            }
            if created >= month_start {
                stats.words_this_month += 1;
            }
            *stats.status_counts.entry(entry.status.clone()).or_default() += 1;
            if let Some(count) = daily.get_mut(&created) {
                *count += 1;
            }
        }

        stats.daily_counts = daily.into_iter().collect();
        stats
    }

    /// Entries across all owners
    pub async fn count(&self) -> usize {
        self.inner.read().await.by_id.len()
    }

    #[cfg(test)]
    async fn backdate(&self, id: u64, created_at: DateTime<Utc>) {
        if let Some(entry) = self.inner.write().await.by_id.get_mut(&id) {
            entry.created_at = created_at;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DEFAULT_STATUS;
    use chrono::{NaiveDate, TimeZone};

    fn new_word(word: &str, meaning: &str, date: &str) -> NewVocabulary {
        NewVocabulary {
            word: word.to_string(),
            meaning: meaning.to_string(),
            example: String::new(),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            status: DEFAULT_STATUS.to_string(),
        }
    }

    async fn seeded() -> VocabularyStore {
        let store = VocabularyStore::new();
        store.create(5, new_word("apple", "a fruit", "2024-03-01")).await.unwrap();
        store.create(5, new_word("banana", "yellow fruit", "2024-03-02")).await.unwrap();
        store.create(5, new_word("cherry", "small red", "2024-03-02")).await.unwrap();
        store.create(7, new_word("durian", "smelly fruit", "2024-03-02")).await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_list_newest_first_scoped_to_owner() {
        let store = seeded().await;
        let page = store.list(5, &ListFilter::default()).await;

        let words: Vec<_> = page.items.iter().map(|v| v.word.as_str()).collect();
        assert_eq!(words, ["cherry", "banana", "apple"]);
        assert_eq!(page.total, 3);
    }

    #[tokio::test]
    async fn test_list_filters_and_pagination() {
        let store = seeded().await;

        let by_date = ListFilter {
            date: NaiveDate::from_ymd_opt(2024, 3, 2),
            ..Default::default()
        };
        assert_eq!(store.list(5, &by_date).await.total, 2);

        let by_search = ListFilter {
            search: Some("fruit".to_string()),
            ..Default::default()
        };
        let page = store.list(5, &by_search).await;
        assert_eq!(page.total, 2);
        assert!(page.items.iter().all(|v| v.user_id == 5));

        let paged = ListFilter {
            limit: Some(1),
            offset: 1,
            ..Default::default()
        };
        let page = store.list(5, &paged).await;
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].word, "banana");
        assert_eq!(page.total, 3);
    }

    #[tokio::test]
    async fn test_other_owner_entry_is_not_found() {
        let store = seeded().await;
        // id 4 belongs to user 7
        assert!(store.get(7, 4).await.is_some());
        assert!(store.get(5, 4).await.is_none());

        let update = store
            .update(5, 4, VocabularyChanges {
                word: Some("hijacked".to_string()),
                ..Default::default()
            })
            .await;
        assert!(matches!(update, Err(VocabularyError::NotFound)));
        assert!(matches!(store.delete(5, 4).await, Err(VocabularyError::NotFound)));

        assert_eq!(store.get(7, 4).await.unwrap().word, "durian");
        assert_eq!(store.count().await, 4);
    }

    #[tokio::test]
    async fn test_update_only_changes_given_fields() {
        let store = seeded().await;
        let updated = store
            .update(5, 1, VocabularyChanges {
                status: Some("learned".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(updated.word, "apple");
        assert_eq!(updated.meaning, "a fruit");
        assert_eq!(updated.status, "learned");
        assert!(updated.updated_at >= updated.created_at);
    }

    #[tokio::test]
    async fn test_delete() {
        let store = seeded().await;
        store.delete(5, 2).await.unwrap();

        assert!(store.get(5, 2).await.is_none());
        assert!(matches!(store.delete(5, 2).await, Err(VocabularyError::NotFound)));
        assert_eq!(store.count().await, 3);
    }

    #[tokio::test]
    async fn test_stats_windows() {
        let store = VocabularyStore::new();
        // Wednesday 2024-03-13
        let now = Utc.with_ymd_and_hms(2024, 3, 13, 12, 0, 0).unwrap();

        for (word, created) in [
            ("today", now),
            ("sunday", Utc.with_ymd_and_hms(2024, 3, 10, 8, 0, 0).unwrap()),
            ("saturday", Utc.with_ymd_and_hms(2024, 3, 9, 8, 0, 0).unwrap()),
            ("february", Utc.with_ymd_and_hms(2024, 2, 20, 8, 0, 0).unwrap()),
            ("ancient", Utc.with_ymd_and_hms(2023, 1, 1, 8, 0, 0).unwrap()),
        ] {
            let entry = store.create(5, new_word(word, "m", "2024-03-01")).await.unwrap();
            store.backdate(entry.id, created).await;
        }
        store.create(7, new_word("other", "m", "2024-03-01")).await.unwrap();

        let stats = store.stats_at(5, now).await;
        assert_eq!(stats.total_words, 5);
        assert_eq!(stats.words_this_week, 2);
        assert_eq!(stats.words_this_month, 3);
        assert_eq!(stats.status_counts.get(DEFAULT_STATUS), Some(&5));

        assert_eq!(stats.daily_counts.len(), DAILY_WINDOW_DAYS as usize);
        assert_eq!(
            stats.daily_counts.first().unwrap().0,
            NaiveDate::from_ymd_opt(2024, 2, 13).unwrap()
        );
        assert_eq!(
            stats.daily_counts.last().unwrap(),
            &(NaiveDate::from_ymd_opt(2024, 3, 13).unwrap(), 1)
        );
        let counted: u32 = stats.daily_counts.iter().map(|(_, c)| c).sum();
        assert_eq!(counted, 4);
    }

    #[tokio::test]
    async fn test_stats_for_empty_owner() {
        let store = seeded().await;
        let stats = store.stats(42).await;
        assert_eq!(stats.total_words, 0);
        assert!(stats.status_counts.is_empty());
        assert!(stats.daily_counts.iter().all(|(_, c)| *c == 0));
    }
}
