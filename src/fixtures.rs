//! Seed data the session starts from
use crate::auction::{Amount, Category, Lot, LotId};
use crate::catalog::{CatalogItem, ItemStatus};
use anyhow::{format_err, Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

pub const CATEGORIES: [&str; 5] = [
    "Антиквариат",
    "Искусство",
    "Коллекционирование",
    "Ювелирные изделия",
    "Мебель",
];

const POCKET_WATCH_IMAGE: &str = "https://cdn.poehali.dev/projects/9d2405f6-0257-4f1c-8e8a-d3737645461a/files/b69ed555-2d56-4a7d-8422-967764df084e.jpg";
const PAINTING_IMAGE: &str = "https://cdn.poehali.dev/projects/9d2405f6-0257-4f1c-8e8a-d3737645461a/files/b6e62610-6225-4686-99fa-fc40f849833d.jpg";
const FOUNTAIN_PEN_IMAGE: &str = "https://cdn.poehali.dev/projects/9d2405f6-0257-4f1c-8e8a-d3737645461a/files/5e208aa4-6b85-4a34-bbe2-595ee543767c.jpg";

/// A lot as written in a config file: the deadline is relative to start-up
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotSeed {
    pub id: LotId,
    pub title: String,
    pub category: Category,
    pub current_bid: Amount,
    pub min_increment: Amount,
    pub ends_in_secs: i64,
    #[serde(default)]
    pub bid_count: u64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
}

impl LotSeed {
    pub fn into_lot(self, started_at: DateTime<Utc>) -> Result<Lot> {
        let end_time = Duration::try_seconds(self.ends_in_secs)
            .and_then(|ends_in| started_at.checked_add_signed(ends_in))
            .ok_or_else(|| format_err!("ends_in_secs {} out of range", self.ends_in_secs))
            .with_context(|| format!("lot {}", self.id))?;

        Ok(Lot {
            id: self.id,
            title: self.title,
            category: self.category,
            current_bid: self.current_bid,
            min_increment: self.min_increment,
            end_time,
            bid_count: self.bid_count,
            description: self.description,
            image: self.image,
        })
    }
}

pub fn seed_lots(seeds: Vec<LotSeed>, started_at: DateTime<Utc>) -> Result<Vec<Lot>> {
    seeds
        .into_iter()
        .map(|seed| seed.into_lot(started_at))
        .collect()
}

pub fn default_lot_seeds() -> Vec<LotSeed> {
    vec![
        LotSeed {
            id: 1,
            title: "Карманные часы XVIII века".to_owned(),
            category: CATEGORIES[0].to_owned(),
            current_bid: 85_000,
            min_increment: 5_000,
            ends_in_secs: 2 * 3600,
            bid_count: 12,
            description: "Изысканные золотые карманные часы с гравировкой".to_owned(),
            image: POCKET_WATCH_IMAGE.to_owned(),
        },
        LotSeed {
            id: 2,
            title: "Картина эпохи Возрождения".to_owned(),
            category: CATEGORIES[1].to_owned(),
            current_bid: 1_250_000,
            min_increment: 50_000,
            ends_in_secs: 5 * 3600,
            bid_count: 28,
            description: "Пейзаж европейской школы в оригинальной раме".to_owned(),
            image: PAINTING_IMAGE.to_owned(),
        },
        LotSeed {
            id: 3,
            title: "Винтажная перьевая ручка".to_owned(),
            category: CATEGORIES[2].to_owned(),
            current_bid: 42_000,
            min_increment: 2_000,
            ends_in_secs: 3600,
            bid_count: 8,
            description: "Роскошная ручка с золотыми деталями".to_owned(),
            image: FOUNTAIN_PEN_IMAGE.to_owned(),
        },
    ]
}

pub fn default_catalog() -> Vec<CatalogItem> {
    vec![
        CatalogItem {
            id: 1,
            title: "Карманные часы XVIII века".to_owned(),
            category: CATEGORIES[0].to_owned(),
            price: 85_000,
            year: "1780".to_owned(),
            status: ItemStatus::Available,
            image: POCKET_WATCH_IMAGE.to_owned(),
        },
        CatalogItem {
            id: 2,
            title: "Картина эпохи Возрождения".to_owned(),
            category: CATEGORIES[1].to_owned(),
            price: 1_250_000,
            year: "1650".to_owned(),
            status: ItemStatus::Available,
            image: PAINTING_IMAGE.to_owned(),
        },
        CatalogItem {
            id: 3,
            title: "Винтажная перьевая ручка".to_owned(),
            category: CATEGORIES[2].to_owned(),
            price: 42_000,
            year: "1920".to_owned(),
            status: ItemStatus::Sold,
            image: FOUNTAIN_PEN_IMAGE.to_owned(),
        },
    ]
}
