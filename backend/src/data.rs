//! Sample reference data for the MVP demo
//!
//! Single crop (tomato), single district, three farmers, two cold-storage
//! facilities. Stands in for whatever upstream system owns these records.

use chrono::Utc;
use rust_decimal::Decimal;
use shared::{
    CropProfile, FarmerRecord, PerishabilityCategory, Region, StorageFacility, WeatherDeviation,
    WeatherSignal,
};

pub fn sample_crops() -> Vec<CropProfile> {
    vec![CropProfile {
        crop_id: "TOMATO".to_string(),
        crop_type: "Tomato".to_string(),
        avg_maturity_days: 90,
        avg_yield_per_hectare: Decimal::from(25),
        category: PerishabilityCategory::Perishable,
        shelf_life_days: 7,
    }]
}

pub fn sample_regions() -> Vec<Region> {
    vec![Region {
        region_id: "DIST001".to_string(),
        name: "Nashik District".to_string(),
        state: "Maharashtra".to_string(),
        transport_capacity_per_day: Decimal::from(100),
        typical_harvest_window: "Oct-Feb".to_string(),
    }]
}

pub fn sample_farmers() -> Vec<FarmerRecord> {
    let seeded_at = Utc::now();
    let farmer = |id: &str, name: &str, sowing: &str, area: &str, readiness: &str, contact: &str| {
        FarmerRecord {
            farmer_id: id.to_string(),
            name: name.to_string(),
            region_id: "DIST001".to_string(),
            crop_id: "TOMATO".to_string(),
            sowing_date: sowing.parse().expect("valid sample sowing date"),
            cultivated_area: area.parse().expect("valid sample area"),
            readiness_score: readiness.parse().expect("valid sample readiness"),
            contact: Some(contact.to_string()),
            created_at: seeded_at,
            updated_at: seeded_at,
        }
    };

    vec![
        farmer("F001", "Ramesh Patil", "2025-10-15", "2.5", "0.85", "+91-9876543210"),
        farmer("F002", "Suresh Jadhav", "2025-10-20", "1.8", "0.70", "+91-9876543211"),
        farmer("F003", "Vijay Shinde", "2025-10-10", "3.2", "0.95", "+91-9876543212"),
    ]
}

pub fn sample_facilities() -> Vec<StorageFacility> {
    vec![
        StorageFacility {
            storage_id: "CS001".to_string(),
            name: "Nashik Cold Storage Hub".to_string(),
            region_id: "DIST001".to_string(),
            total_capacity: Decimal::from(500),
            current_usage: Decimal::from(150),
            facility_type: "Cold Storage".to_string(),
            temperature_range: "4-8°C".to_string(),
        },
        StorageFacility {
            storage_id: "CS002".to_string(),
            name: "Sinnar Agri Warehouse".to_string(),
            region_id: "DIST001".to_string(),
            total_capacity: Decimal::from(300),
            current_usage: Decimal::from(100),
            facility_type: "Cold Storage".to_string(),
            temperature_range: "4-8°C".to_string(),
        },
    ]
}

pub fn sample_weather() -> Vec<WeatherSignal> {
    vec![WeatherSignal {
        region_id: "DIST001".to_string(),
        deviation_flag: WeatherDeviation::Normal,
        forecast: "Normal conditions expected for next 5 days".to_string(),
        temperature_avg: Decimal::from(28),
        humidity_avg: 65,
    }]
}
