use crate::domain::model::{Language, LocalizedName, RecommendationDetail};
use crate::domain::units::{AreaUnit, DoseUnit};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn data_dir(&self) -> &str;
    fn default_area_unit(&self) -> AreaUnit;
    fn default_output_unit(&self) -> DoseUnit;
    fn default_language(&self) -> Language;
}

#[async_trait]
pub trait RecommendationRepository: Send + Sync {
    async fn list_crops(&self) -> Result<Vec<LocalizedName>>;
    async fn list_pests_for_crop(&self, crop_name_en: &str) -> Result<Vec<LocalizedName>>;
    async fn find_recommendation(
        &self,
        crop_name_en: &str,
        pest_disease_name_en: &str,
    ) -> Result<Option<RecommendationDetail>>;
}
