use crate::domain::model::{LocalizedName, RecommendationDetail};
use crate::domain::ports::RecommendationRepository;
use crate::domain::reference::ReferenceData;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Serves lookups from reference tables held in memory.
#[derive(Debug, Clone)]
pub struct InMemoryRepository {
    data: ReferenceData,
}

impl InMemoryRepository {
    pub fn new(data: ReferenceData) -> Self {
        Self { data }
    }
}

#[async_trait]
impl RecommendationRepository for InMemoryRepository {
    async fn list_crops(&self) -> Result<Vec<LocalizedName>> {
        Ok(self.data.crop_names())
    }

    async fn list_pests_for_crop(&self, crop_name_en: &str) -> Result<Vec<LocalizedName>> {
        Ok(self
            .data
            .pests_for_crop(crop_name_en)
            .into_iter()
            .map(LocalizedName::from)
            .collect())
    }

    async fn find_recommendation(
        &self,
        crop_name_en: &str,
        pest_disease_name_en: &str,
    ) -> Result<Option<RecommendationDetail>> {
        Ok(self
            .data
            .find_recommendation(crop_name_en, pest_disease_name_en))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::reference::fixtures::rice_and_wheat;

    #[tokio::test]
    async fn test_lists_crops_in_table_order() {
        let repo = InMemoryRepository::new(rice_and_wheat());
        let crops = repo.list_crops().await.unwrap();
        assert_eq!(crops.len(), 2);
        assert_eq!(crops[0].name_en, "Rice");
        assert_eq!(crops[1].name_hi, "गेहूं");
    }

    #[tokio::test]
    async fn test_pests_for_unknown_crop_is_empty() {
        let repo = InMemoryRepository::new(rice_and_wheat());
        assert!(repo.list_pests_for_crop("Cotton").await.unwrap().is_empty());
        let pests = repo.list_pests_for_crop("Wheat").await.unwrap();
        assert_eq!(pests[0].name_en, "Rust");
    }
}
