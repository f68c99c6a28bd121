//! Data provider abstraction
//!
//! The calculators consume already-resolved records; this trait is the seam
//! between them and wherever those records actually live. The in-memory
//! implementation serves the bundled sample data and owns the only mutable
//! state in the process (the farmer registry).

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use shared::{CropProfile, FarmerRecord, Region, StorageFacility, WeatherSignal};

use crate::data;

/// A farmer registration that has passed input validation
#[derive(Debug, Clone)]
pub struct NewFarmer {
    pub name: String,
    pub region_id: String,
    pub crop_id: String,
    pub sowing_date: NaiveDate,
    pub cultivated_area: Decimal,
    pub readiness_score: Decimal,
    pub contact: Option<String>,
}

/// Fields of a farmer record that may change after registration
#[derive(Debug, Clone, Default)]
pub struct FarmerUpdate {
    pub readiness_score: Option<Decimal>,
    pub cultivated_area: Option<Decimal>,
    pub sowing_date: Option<NaiveDate>,
}

/// Read/write access to coordination records
pub trait DataProvider: Send + Sync {
    fn crops(&self) -> Vec<CropProfile>;
    fn crop(&self, crop_id: &str) -> Option<CropProfile>;

    fn regions(&self) -> Vec<Region>;
    fn region(&self, region_id: &str) -> Option<Region>;

    fn farmers(&self) -> Vec<FarmerRecord>;
    fn farmer(&self, farmer_id: &str) -> Option<FarmerRecord>;
    fn register_farmer(&self, input: NewFarmer) -> FarmerRecord;
    fn update_farmer(&self, farmer_id: &str, update: FarmerUpdate) -> Option<FarmerRecord>;

    fn facilities(&self) -> Vec<StorageFacility>;
    fn facility(&self, storage_id: &str) -> Option<StorageFacility>;
    fn facilities_in_region(&self, region_id: &str) -> Vec<StorageFacility>;

    fn weather(&self, region_id: &str) -> Option<WeatherSignal>;
    fn weather_by_region(&self) -> HashMap<String, WeatherSignal>;
}

/// In-memory provider seeded with the sample fixtures
pub struct InMemoryProvider {
    crops: Vec<CropProfile>,
    regions: Vec<Region>,
    farmers: RwLock<Vec<FarmerRecord>>,
    facilities: Vec<StorageFacility>,
    weather: HashMap<String, WeatherSignal>,
}

impl InMemoryProvider {
    pub fn with_sample_data() -> Self {
        Self {
            crops: data::sample_crops(),
            regions: data::sample_regions(),
            farmers: RwLock::new(data::sample_farmers()),
            facilities: data::sample_facilities(),
            weather: data::sample_weather()
                .into_iter()
                .map(|signal| (signal.region_id.clone(), signal))
                .collect(),
        }
    }
}

impl DataProvider for InMemoryProvider {
    fn crops(&self) -> Vec<CropProfile> {
        self.crops.clone()
    }

    fn crop(&self, crop_id: &str) -> Option<CropProfile> {
        self.crops
            .iter()
            .find(|c| c.crop_id.eq_ignore_ascii_case(crop_id))
            .cloned()
    }

    fn regions(&self) -> Vec<Region> {
        self.regions.clone()
    }

    fn region(&self, region_id: &str) -> Option<Region> {
        self.regions
            .iter()
            .find(|r| r.region_id.eq_ignore_ascii_case(region_id))
            .cloned()
    }

    fn farmers(&self) -> Vec<FarmerRecord> {
        self.farmers.read().expect("farmer registry poisoned").clone()
    }

    fn farmer(&self, farmer_id: &str) -> Option<FarmerRecord> {
        self.farmers
            .read()
            .expect("farmer registry poisoned")
            .iter()
            .find(|f| f.farmer_id.eq_ignore_ascii_case(farmer_id))
            .cloned()
    }

    fn register_farmer(&self, input: NewFarmer) -> FarmerRecord {
        let mut farmers = self.farmers.write().expect("farmer registry poisoned");
        let now = Utc::now();
        let record = FarmerRecord {
            farmer_id: format!("F{:03}", farmers.len() + 1),
            name: input.name,
            region_id: input.region_id.to_uppercase(),
            crop_id: input.crop_id.to_uppercase(),
            sowing_date: input.sowing_date,
            cultivated_area: input.cultivated_area,
            readiness_score: input.readiness_score,
            contact: input.contact,
            created_at: now,
            updated_at: now,
        };
        farmers.push(record.clone());
        record
    }

    fn update_farmer(&self, farmer_id: &str, update: FarmerUpdate) -> Option<FarmerRecord> {
        let mut farmers = self.farmers.write().expect("farmer registry poisoned");
        let record = farmers
            .iter_mut()
            .find(|f| f.farmer_id.eq_ignore_ascii_case(farmer_id))?;

        if let Some(readiness) = update.readiness_score {
            record.readiness_score = readiness;
        }
        if let Some(area) = update.cultivated_area {
            record.cultivated_area = area;
        }
        if let Some(sowing) = update.sowing_date {
            record.sowing_date = sowing;
        }
        record.updated_at = Utc::now();

        Some(record.clone())
    }

    fn facilities(&self) -> Vec<StorageFacility> {
        self.facilities.clone()
    }

    fn facility(&self, storage_id: &str) -> Option<StorageFacility> {
        self.facilities
            .iter()
            .find(|f| f.storage_id.eq_ignore_ascii_case(storage_id))
            .cloned()
    }

    fn facilities_in_region(&self, region_id: &str) -> Vec<StorageFacility> {
        self.facilities
            .iter()
            .filter(|f| f.region_id.eq_ignore_ascii_case(region_id))
            .cloned()
            .collect()
    }

    fn weather(&self, region_id: &str) -> Option<WeatherSignal> {
        self.weather.get(&region_id.to_uppercase()).cloned()
    }

    fn weather_by_region(&self) -> HashMap<String, WeatherSignal> {
        self.weather.clone()
    }
}
