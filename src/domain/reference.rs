use crate::domain::model::{
    Chemical, Crop, LocalizedName, PestDisease, Recommendation, RecommendationDetail,
};
use crate::utils::error::{DoseError, Result};
use std::collections::{HashMap, HashSet};

/// The four reference tables, checked for unique keys and resolvable
/// foreign keys on construction.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    crops: Vec<Crop>,
    pests: Vec<PestDisease>,
    chemicals: Vec<Chemical>,
    recommendations: Vec<Recommendation>,
    pest_index: HashMap<i64, usize>,
    chemical_index: HashMap<i64, usize>,
}

fn integrity(table: &str, message: String) -> DoseError {
    DoseError::DataIntegrityError {
        table: table.to_string(),
        message,
    }
}

/// Builds an id -> position index, rejecting duplicate ids and names.
fn index_table<'a, T>(
    table: &str,
    rows: &'a [T],
    key: impl Fn(&'a T) -> (i64, &'a str, &'a str),
) -> Result<HashMap<i64, usize>> {
    let mut index = HashMap::with_capacity(rows.len());
    let mut names_en = HashSet::new();
    let mut names_hi = HashSet::new();

    for (pos, row) in rows.iter().enumerate() {
        let (id, name_en, name_hi) = key(row);
        if index.insert(id, pos).is_some() {
            return Err(integrity(table, format!("duplicate id {}", id)));
        }
        if !names_en.insert(name_en) {
            return Err(integrity(table, format!("duplicate English name '{}'", name_en)));
        }
        if !names_hi.insert(name_hi) {
            return Err(integrity(table, format!("duplicate Hindi name '{}'", name_hi)));
        }
    }

    Ok(index)
}

impl ReferenceData {
    pub fn new(
        crops: Vec<Crop>,
        pests: Vec<PestDisease>,
        chemicals: Vec<Chemical>,
        recommendations: Vec<Recommendation>,
    ) -> Result<Self> {
        let crop_index = index_table("crops", &crops, |c| {
            (c.crop_id, c.crop_name_en.as_str(), c.crop_name_hi.as_str())
        })?;
        let pest_index = index_table("pests_diseases", &pests, |p| {
            (
                p.pest_disease_id,
                p.pest_disease_name_en.as_str(),
                p.pest_disease_name_hi.as_str(),
            )
        })?;
        let chemical_index = index_table("chemicals", &chemicals, |c| {
            (
                c.chemical_id,
                c.chemical_name_en.as_str(),
                c.chemical_name_hi.as_str(),
            )
        })?;

        let mut recommendation_ids = HashSet::new();
        for rec in &recommendations {
            let id = rec.recommendation_id;
            if !recommendation_ids.insert(id) {
                return Err(integrity("recommendations", format!("duplicate id {}", id)));
            }
            if !crop_index.contains_key(&rec.crop_id) {
                return Err(integrity(
                    "recommendations",
                    format!("recommendation {} references unknown crop_id {}", id, rec.crop_id),
                ));
            }
            if !pest_index.contains_key(&rec.pest_disease_id) {
                return Err(integrity(
                    "recommendations",
                    format!(
                        "recommendation {} references unknown pest_disease_id {}",
                        id, rec.pest_disease_id
                    ),
                ));
            }
            if !chemical_index.contains_key(&rec.chemical_id) {
                return Err(integrity(
                    "recommendations",
                    format!(
                        "recommendation {} references unknown chemical_id {}",
                        id, rec.chemical_id
                    ),
                ));
            }
        }

        Ok(Self {
            crops,
            pests,
            chemicals,
            recommendations,
            pest_index,
            chemical_index,
        })
    }

    pub fn crops(&self) -> &[Crop] {
        &self.crops
    }

    pub fn recommendations(&self) -> &[Recommendation] {
        &self.recommendations
    }

    fn crop_by_name(&self, name_en: &str) -> Option<&Crop> {
        self.crops.iter().find(|c| c.crop_name_en == name_en)
    }

    fn pest_by_name(&self, name_en: &str) -> Option<&PestDisease> {
        self.pests.iter().find(|p| p.pest_disease_name_en == name_en)
    }

    /// Pests/diseases with at least one recommendation for the crop, in the
    /// order they first appear in the recommendation table.
    pub fn pests_for_crop(&self, crop_name_en: &str) -> Vec<&PestDisease> {
        let Some(crop) = self.crop_by_name(crop_name_en) else {
            return Vec::new();
        };

        let mut seen = HashSet::new();
        self.recommendations
            .iter()
            .filter(|r| r.crop_id == crop.crop_id)
            .filter(|r| seen.insert(r.pest_disease_id))
            .filter_map(|r| self.pest_index.get(&r.pest_disease_id))
            .map(|&pos| &self.pests[pos])
            .collect()
    }

    pub fn find_recommendation(
        &self,
        crop_name_en: &str,
        pest_disease_name_en: &str,
    ) -> Option<RecommendationDetail> {
        let crop = self.crop_by_name(crop_name_en)?;
        let pest = self.pest_by_name(pest_disease_name_en)?;

        let rec = self
            .recommendations
            .iter()
            .find(|r| r.crop_id == crop.crop_id && r.pest_disease_id == pest.pest_disease_id)?;
        let chemical = &self.chemicals[*self.chemical_index.get(&rec.chemical_id)?];

        Some(RecommendationDetail {
            chemical_name_en: chemical.chemical_name_en.clone(),
            chemical_name_hi: chemical.chemical_name_hi.clone(),
            recommended_dose: rec.recommended_dose,
            unit: rec.unit.clone(),
            source: rec.source.clone(),
        })
    }

    pub fn crop_names(&self) -> Vec<LocalizedName> {
        self.crops.iter().map(LocalizedName::from).collect()
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_find_recommendation_joins_chemical() {
        let data = rice_and_wheat();
        let detail = data.find_recommendation("Rice", "Stem Borer").unwrap();
        assert_eq!(detail.chemical_name_en, "Chlorpyrifos");
        assert_eq!(detail.recommended_dose, 0.5);
        assert_eq!(detail.unit, "liter/acre");
        assert_eq!(detail.source.as_deref(), Some("Example Source 1"));
    }

    #[test]
    fn test_find_recommendation_requires_pair() {
        let data = rice_and_wheat();
        assert!(data.find_recommendation("Rice", "Rust").is_none());
        assert!(data.find_recommendation("rice", "Stem Borer").is_none());
        assert!(data.find_recommendation("Maize", "Stem Borer").is_none());
    }

    #[test]
    fn test_pests_for_crop_are_distinct() {
        let data = ReferenceData::new(
            vec![crop(1, "Rice", "चावल")],
            vec![pest(1, "Stem Borer", "तना छेदक"), pest(2, "Blast", "झोंका")],
            vec![chemical(1, "Chlorpyrifos", "क्लोरपायरीफॉस")],
            vec![
                recommendation(1, 1, 2, 1, 1.0, "ml/acre"),
                recommendation(2, 1, 1, 1, 2.0, "ml/acre"),
                recommendation(3, 1, 2, 1, 3.0, "ml/acre"),
            ],
        )
        .unwrap();

        let names: Vec<_> = data
            .pests_for_crop("Rice")
            .iter()
            .map(|p| p.pest_disease_name_en.as_str())
            .collect();
        assert_eq!(names, vec!["Blast", "Stem Borer"]);
        assert!(data.pests_for_crop("Wheat").is_empty());
    }

    #[test]
    fn test_rejects_dangling_foreign_key() {
        let result = ReferenceData::new(
            vec![crop(1, "Rice", "चावल")],
            vec![pest(1, "Stem Borer", "तना छेदक")],
            vec![chemical(1, "Chlorpyrifos", "क्लोरपायरीफॉस")],
            vec![recommendation(1, 1, 1, 7, 0.5, "liter/acre")],
        );
        match result {
            Err(DoseError::DataIntegrityError { table, message }) => {
                assert_eq!(table, "recommendations");
                assert!(message.contains("chemical_id 7"));
            }
            other => panic!("expected integrity error, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let result = ReferenceData::new(
            vec![crop(1, "Rice", "चावल"), crop(2, "Rice", "धान")],
            vec![],
            vec![],
            vec![],
        );
        assert!(matches!(result, Err(DoseError::DataIntegrityError { .. })));
    }
}
