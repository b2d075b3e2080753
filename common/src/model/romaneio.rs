use serde::{Deserialize, Serialize};

/// Header row of one order block in a romaneio (delivery note) report.
///
/// Values are kept as the text printed in the report; the layout mixes
/// Brazilian number formats and dates that are only ever displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RomaneioHeader {
    pub order_number: String,
    pub client_order_ref: String,
    pub order_type: String,
    pub employee: String,
    pub order_date: String,
    pub delivery_date: String,
    pub weight: String,
    pub area: String,
    pub total: String,
    pub customer: String,
}

/// One product line of an order block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RomaneioProduct {
    pub code: String,
    pub description: String,
    pub os_number: String,
    pub dimensions: String,
    pub quantity: String,
    pub area: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RomaneioRecord {
    pub header: RomaneioHeader,
    pub products: Vec<RomaneioProduct>,
}
