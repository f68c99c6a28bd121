//! Farmer registry service

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{round2, CropProfile, FarmerRecord, Region};
use validator::{Validate, ValidationError};

use crate::error::{AppError, AppResult};
use crate::repository::{DataProvider, FarmerUpdate, NewFarmer};

/// Default assignments for the MVP's single district and crop
const DEFAULT_REGION_ID: &str = "DIST001";
const DEFAULT_CROP_ID: &str = "TOMATO";

/// Farmer service for registration and readiness updates
pub struct FarmerService {
    provider: Arc<dyn DataProvider>,
}

/// Input for registering a farmer
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterFarmerInput {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    pub region_id: Option<String>,
    pub crop_id: Option<String>,
    pub sowing_date: NaiveDate,
    #[validate(custom = "validate_positive")]
    pub cultivated_area: Decimal,
    /// Defaults to 0.5 when the farmer has not reported readiness yet
    #[validate(custom = "validate_unit_interval")]
    pub readiness_score: Option<Decimal>,
    pub contact: Option<String>,
}

/// Input for updating a farmer's declaration
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateFarmerInput {
    #[validate(custom = "validate_unit_interval")]
    pub readiness_score: Option<Decimal>,
    #[validate(custom = "validate_positive")]
    pub cultivated_area: Option<Decimal>,
    pub sowing_date: Option<NaiveDate>,
}

fn validate_positive(value: &Decimal) -> Result<(), ValidationError> {
    if *value <= Decimal::ZERO {
        let mut error = ValidationError::new("range");
        error.message = Some("must be greater than 0".into());
        return Err(error);
    }
    Ok(())
}

fn validate_unit_interval(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO || *value > Decimal::ONE {
        let mut error = ValidationError::new("range");
        error.message = Some("must be between 0 and 1".into());
        return Err(error);
    }
    Ok(())
}

/// Registry roll-up for the farmer list endpoint
#[derive(Debug, Serialize)]
pub struct FarmerListSummary {
    pub count: usize,
    pub total_cultivated_area: Decimal,
    pub average_readiness_score: Decimal,
    pub farmers: Vec<FarmerRecord>,
}

/// A farmer with the crop and region records it references
#[derive(Debug, Serialize)]
pub struct FarmerDetail {
    #[serde(flatten)]
    pub farmer: FarmerRecord,
    pub crop_details: Option<CropProfile>,
    pub region_details: Option<Region>,
}

impl FarmerService {
    pub fn new(provider: Arc<dyn DataProvider>) -> Self {
        Self { provider }
    }

    /// List every registered farmer with registry totals.
    pub fn list(&self) -> FarmerListSummary {
        let farmers = self.provider.farmers();
        let total_cultivated_area: Decimal =
            farmers.iter().map(|f| f.cultivated_area).sum();
        let average_readiness_score = if farmers.is_empty() {
            Decimal::ZERO
        } else {
            let readiness_sum: Decimal = farmers.iter().map(|f| f.readiness_score).sum();
            round2(readiness_sum / Decimal::from(farmers.len() as u64))
        };

        FarmerListSummary {
            count: farmers.len(),
            total_cultivated_area,
            average_readiness_score,
            farmers,
        }
    }

    /// Fetch one farmer with its crop and region reference data.
    pub fn get(&self, farmer_id: &str) -> AppResult<FarmerDetail> {
        let farmer = self
            .provider
            .farmer(farmer_id)
            .ok_or_else(|| AppError::NotFound(format!("Farmer {}", farmer_id.to_uppercase())))?;

        let crop_details = self.provider.crop(&farmer.crop_id);
        let region_details = self.provider.region(&farmer.region_id);

        Ok(FarmerDetail {
            farmer,
            crop_details,
            region_details,
        })
    }

    /// Register a new farmer. Region and crop references must exist; they
    /// are never silently substituted.
    pub fn register(&self, input: RegisterFarmerInput) -> AppResult<FarmerRecord> {
        input.validate()?;

        let region_id = input
            .region_id
            .unwrap_or_else(|| DEFAULT_REGION_ID.to_string());
        let crop_id = input.crop_id.unwrap_or_else(|| DEFAULT_CROP_ID.to_string());

        if self.provider.region(&region_id).is_none() {
            return Err(AppError::NotFound(format!(
                "Region {}",
                region_id.to_uppercase()
            )));
        }
        if self.provider.crop(&crop_id).is_none() {
            return Err(AppError::NotFound(format!(
                "Crop {}",
                crop_id.to_uppercase()
            )));
        }

        let record = self.provider.register_farmer(NewFarmer {
            name: input.name,
            region_id,
            crop_id,
            sowing_date: input.sowing_date,
            cultivated_area: input.cultivated_area,
            readiness_score: input.readiness_score.unwrap_or_else(|| Decimal::new(5, 1)),
            contact: input.contact,
        });

        tracing::info!(farmer_id = %record.farmer_id, "registered farmer");
        Ok(record)
    }

    /// Update a farmer's readiness, area, or sowing date.
    pub fn update(&self, farmer_id: &str, input: UpdateFarmerInput) -> AppResult<FarmerRecord> {
        input.validate()?;

        self.provider
            .update_farmer(
                farmer_id,
                FarmerUpdate {
                    readiness_score: input.readiness_score,
                    cultivated_area: input.cultivated_area,
                    sowing_date: input.sowing_date,
                },
            )
            .ok_or_else(|| AppError::NotFound(format!("Farmer {}", farmer_id.to_uppercase())))
    }
}
