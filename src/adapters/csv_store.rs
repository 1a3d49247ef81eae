use crate::adapters::memory::InMemoryRepository;
use crate::domain::model::{LocalizedName, RecommendationDetail};
use crate::domain::ports::{RecommendationRepository, Storage};
use crate::domain::reference::ReferenceData;
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::de::DeserializeOwned;

pub const CROPS_FILE: &str = "crops.csv";
pub const PESTS_FILE: &str = "pests_diseases.csv";
pub const CHEMICALS_FILE: &str = "chemicals.csv";
pub const RECOMMENDATIONS_FILE: &str = "recommendations.csv";

fn parse_table<T: DeserializeOwned>(name: &str, bytes: &[u8]) -> Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let rows = reader
        .deserialize()
        .collect::<std::result::Result<Vec<T>, csv::Error>>()?;
    tracing::debug!("Parsed {} rows from {}", rows.len(), name);
    Ok(rows)
}

async fn load_table<S: Storage, T: DeserializeOwned>(storage: &S, name: &str) -> Result<Vec<T>> {
    let bytes = storage.read_file(name).await?;
    parse_table(name, &bytes)
}

/// Reference tables loaded once from CSV files, then served from memory.
#[derive(Debug, Clone)]
pub struct CsvRepository {
    inner: InMemoryRepository,
}

impl CsvRepository {
    pub async fn load<S: Storage>(storage: &S) -> Result<Self> {
        let crops = load_table(storage, CROPS_FILE).await?;
        let pests = load_table(storage, PESTS_FILE).await?;
        let chemicals = load_table(storage, CHEMICALS_FILE).await?;
        let recommendations = load_table(storage, RECOMMENDATIONS_FILE).await?;

        let data = ReferenceData::new(crops, pests, chemicals, recommendations)?;
        tracing::info!(
            "Loaded {} crops and {} recommendations",
            data.crops().len(),
            data.recommendations().len()
        );

        Ok(Self {
            inner: InMemoryRepository::new(data),
        })
    }
}

#[async_trait]
impl RecommendationRepository for CsvRepository {
    async fn list_crops(&self) -> Result<Vec<LocalizedName>> {
        self.inner.list_crops().await
    }

    async fn list_pests_for_crop(&self, crop_name_en: &str) -> Result<Vec<LocalizedName>> {
        self.inner.list_pests_for_crop(crop_name_en).await
    }

    async fn find_recommendation(
        &self,
        crop_name_en: &str,
        pest_disease_name_en: &str,
    ) -> Result<Option<RecommendationDetail>> {
        self.inner
            .find_recommendation(crop_name_en, pest_disease_name_en)
            .await
    }
}
