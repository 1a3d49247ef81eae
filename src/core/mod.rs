pub mod calculator;
pub mod converter;

pub use crate::domain::model::{DoseRequest, DoseResponse};
pub use crate::domain::ports::{ConfigProvider, RecommendationRepository, Storage};
pub use crate::utils::error::Result;
