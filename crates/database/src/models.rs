//! Database models for Partsbin

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An electronic component in inventory
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Component {
    pub id: i64,
    pub code: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub part_number: Option<String>,
    pub category: Option<String>,
    pub maker: Option<String>,
    pub stock: i64,
    pub price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Auxiliary spec-sheet record for a component
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ComponentDetail {
    pub id: i64,
    pub component_id: i64,
    pub datasheet: Option<String>,
    pub material: Option<String>,
    pub length: Option<f64>,
    pub width: Option<f64>,
    pub weight: Option<f64>,
}

/// Bipolar-transistor extension fields for a component
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct BipolarTransistor {
    pub id: i64,
    pub component_id: i64,
    pub transistor_type: Option<String>,
    pub collector_emitter_voltage: Option<f64>,
    pub collector_base_voltage: Option<f64>,
    pub emitter_base_voltage: Option<f64>,
    pub collector_current: Option<f64>,
    pub power_dissipation: Option<f64>,
}

/// Input for creating a component. Only `code` is required.
#[derive(Debug, Clone, Deserialize)]
pub struct NewComponent {
    pub code: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub part_number: Option<String>,
    pub category: Option<String>,
    pub maker: Option<String>,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub price: f64,
}

/// Input for a partial component update. Absent fields keep their value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateComponent {
    pub id: Option<i64>,
    pub code: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub part_number: Option<String>,
    pub category: Option<String>,
    pub maker: Option<String>,
    pub stock: Option<i64>,
    pub price: Option<f64>,
}

/// Input for creating a component detail record
#[derive(Debug, Clone, Deserialize)]
pub struct NewComponentDetail {
    pub component_id: i64,
    pub datasheet: Option<String>,
    pub material: Option<String>,
    pub length: Option<f64>,
    pub width: Option<f64>,
    pub weight: Option<f64>,
}

/// Input for creating a bipolar-transistor record
#[derive(Debug, Clone, Deserialize)]
pub struct NewBipolarTransistor {
    pub component_id: i64,
    pub transistor_type: Option<String>,
    pub collector_emitter_voltage: Option<f64>,
    pub collector_base_voltage: Option<f64>,
    pub emitter_base_voltage: Option<f64>,
    pub collector_current: Option<f64>,
    pub power_dissipation: Option<f64>,
}

/// A component joined with its detail records
#[derive(Debug, Clone, Serialize)]
pub struct ComponentWithDetails {
    #[serde(flatten)]
    pub component: Component,
    pub details: Vec<ComponentDetail>,
}

/// A component joined with its bipolar-transistor records
#[derive(Debug, Clone, Serialize)]
pub struct ComponentWithTransistors {
    #[serde(flatten)]
    pub component: Component,
    pub bipolar_transistors: Vec<BipolarTransistor>,
}

/// A component joined with every related model
#[derive(Debug, Clone, Serialize)]
pub struct ComponentFull {
    #[serde(flatten)]
    pub component: Component,
    pub details: Vec<ComponentDetail>,
    pub bipolar_transistors: Vec<BipolarTransistor>,
}

/// Optional LIKE filters applied across component attributes
#[derive(Debug, Clone, Default)]
pub struct AttributeFilter {
    pub code: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub part_number: Option<String>,
    pub category: Option<String>,
    pub maker: Option<String>,
}
