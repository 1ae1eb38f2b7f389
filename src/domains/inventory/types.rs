use crate::errors::DomainResult;
use crate::validation::{Validate, ValidationBuilder};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

/// Item condition enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemCondition {
    Good,
    Damaged,
    UnderRepair,
}

impl ItemCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemCondition::Good => "good",
            ItemCondition::Damaged => "damaged",
            ItemCondition::UnderRepair => "under_repair",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "good" => Some(ItemCondition::Good),
            "damaged" => Some(ItemCondition::Damaged),
            "under_repair" => Some(ItemCondition::UnderRepair),
            _ => None,
        }
    }

    pub fn all_variants() -> Vec<&'static str> {
        vec!["good", "damaged", "under_repair"]
    }
}

impl fmt::Display for ItemCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Inventory item entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: i64,
    pub sequence_number: i64,
    pub name: String,
    pub quantity: i64,
    pub condition: String,
    pub location: String,
}

impl InventoryItem {
    pub fn parsed_condition(&self) -> Option<ItemCondition> {
        ItemCondition::from_str(&self.condition)
    }
}

/// Database row for an inventory item
#[derive(Debug, Clone, FromRow)]
pub struct InventoryItemRow {
    pub id: i64,
    pub sequence_number: i64,
    pub name: String,
    pub quantity: i64,
    pub condition: String,
    pub location: String,
}

impl From<InventoryItemRow> for InventoryItem {
    fn from(row: InventoryItemRow) -> Self {
        InventoryItem {
            id: row.id,
            sequence_number: row.sequence_number,
            name: row.name,
            quantity: row.quantity,
            condition: row.condition,
            location: row.location,
        }
    }
}

/// DTO for creating an inventory item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewInventoryItem {
    pub name: String,
    pub quantity: i64,
    pub condition: String,
    #[serde(default)]
    pub location: String,
}

impl Validate for NewInventoryItem {
    fn validate(&self) -> DomainResult<()> {
        ValidationBuilder::new("name", Some(self.name.clone()))
            .required()
            .max_length(255)
            .validate()?;
        ValidationBuilder::new("quantity", Some(self.quantity))
            .min(0)
            .validate()?;
        ValidationBuilder::new("condition", Some(self.condition.clone()))
            .one_of(&ItemCondition::all_variants(), None)
            .validate()
    }
}

/// DTO for updating an inventory item
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateInventoryItem {
    pub name: Option<String>,
    pub quantity: Option<i64>,
    pub condition: Option<String>,
    pub location: Option<String>,
}

impl Validate for UpdateInventoryItem {
    fn validate(&self) -> DomainResult<()> {
        ValidationBuilder::new("name", self.name.clone())
            .min_length(1)
            .max_length(255)
            .validate()?;
        ValidationBuilder::new("quantity", self.quantity)
            .min(0)
            .validate()?;
        ValidationBuilder::new("condition", self.condition.clone())
            .one_of(&ItemCondition::all_variants(), None)
            .validate()
    }
}
