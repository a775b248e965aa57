//! Sample data for an empty catalog

use chrono::NaiveDate;

use crate::{
    error::AppResult,
    models::{NewAuthor, NewGenre},
    repository::CatalogStore,
};

/// Insert a few authors and genres when the catalog has no authors yet.
/// Returns whether anything was inserted.
pub async fn seed_sample_catalog(store: &dyn CatalogStore) -> AppResult<bool> {
    if store.count_authors().await? > 0 {
        return Ok(false);
    }

    let authors = [
        (
            "Frank",
            "Herbert",
            NaiveDate::from_ymd_opt(1920, 10, 8),
            NaiveDate::from_ymd_opt(1986, 2, 11),
        ),
        (
            "Ursula",
            "Le Guin",
            NaiveDate::from_ymd_opt(1929, 10, 21),
            NaiveDate::from_ymd_opt(2018, 1, 22),
        ),
    ];
    for (first_name, family_name, date_of_birth, date_of_death) in authors {
        store
            .insert_author(&NewAuthor {
                first_name: first_name.to_string(),
                family_name: family_name.to_string(),
                date_of_birth,
                date_of_death,
            })
            .await?;
    }

    for name in ["Science Fiction", "Fantasy", "Poetry"] {
        store
            .insert_genre(&NewGenre {
                name: name.to_string(),
            })
            .await?;
    }

    tracing::info!("Seeded sample authors and genres");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryStore;

    #[tokio::test]
    async fn test_seed_only_once() {
        let store = MemoryStore::new();
        assert!(seed_sample_catalog(&store).await.unwrap());
        assert!(!seed_sample_catalog(&store).await.unwrap());

        assert_eq!(store.count_authors().await.unwrap(), 2);
        assert_eq!(store.count_genres().await.unwrap(), 3);
    }
}
