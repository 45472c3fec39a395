use crate::EstimateError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A priced material.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaterialItem {
    pub id: String,
    pub name: String,
    pub unit: String,
    /// Rupees per unit.
    pub price: f64,
    /// Suggested quantity for a typical house.
    #[serde(default)]
    pub default_quantity: f64,
}

impl MaterialItem {
    fn new(id: &str, name: &str, unit: &str, price: f64, default_quantity: f64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            unit: unit.to_string(),
            price,
            default_quantity,
        }
    }
}

/// Ordered price list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaterialCatalog {
    pub items: Vec<MaterialItem>,
}

impl Default for MaterialCatalog {
    fn default() -> Self {
        Self {
            items: vec![
                MaterialItem::new("cement", "Cement (bag)", "bag", 380.0, 100.0),
                MaterialItem::new("steel", "Steel (kg)", "kg", 72.0, 500.0),
                MaterialItem::new("sand", "Sand (cft)", "cft", 55.0, 200.0),
                MaterialItem::new("bricks", "Bricks (unit)", "pc", 9.0, 5000.0),
                MaterialItem::new("tiles", "Tiles (sq ft)", "sq ft", 45.0, 800.0),
            ],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaterialLine {
    pub id: String,
    pub name: String,
    pub unit: String,
    pub price: f64,
    pub quantity: f64,
    pub total: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaterialEstimate {
    pub lines: Vec<MaterialLine>,
    pub grand_total: f64,
}

impl MaterialCatalog {
    pub fn get(&self, id: &str) -> Option<&MaterialItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn default_quantities(&self) -> BTreeMap<String, f64> {
        self.items
            .iter()
            .map(|item| (item.id.clone(), item.default_quantity))
            .collect()
    }

    /// Price `quantities` against the catalog. Items without a quantity
    /// count as zero.
    pub fn estimate(&self, quantities: &BTreeMap<String, f64>) -> Result<MaterialEstimate, EstimateError> {
        if let Some(unknown) = quantities.keys().find(|id| self.get(id).is_none()) {
            return Err(EstimateError::UnknownMaterial(unknown.clone()));
        }

        let mut lines = Vec::with_capacity(self.items.len());
        for item in &self.items {
            let quantity = quantities.get(&item.id).copied().unwrap_or(0.0);
            if !quantity.is_finite() || quantity < 0.0 {
                return Err(EstimateError::InvalidQuantity(item.id.clone()));
            }
            lines.push(MaterialLine {
                id: item.id.clone(),
                name: item.name.clone(),
                unit: item.unit.clone(),
                price: item.price,
                quantity,
                total: quantity * item.price,
            });
        }

        let grand_total = lines.iter().map(|line| line.total).sum();
        Ok(MaterialEstimate { lines, grand_total })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_quantities_total() {
        let catalog = MaterialCatalog::default();
        let estimate = catalog.estimate(&catalog.default_quantities()).unwrap();

        let totals: Vec<_> = estimate.lines.iter().map(|l| l.total).collect();
        assert_eq!(totals, vec![38_000.0, 36_000.0, 11_000.0, 45_000.0, 36_000.0]);
        assert_eq!(estimate.grand_total, 166_000.0);
    }

    #[test]
    fn missing_quantities_count_as_zero() {
        let catalog = MaterialCatalog::default();
        let quantities = BTreeMap::from([("steel".to_string(), 10.0)]);
        let estimate = catalog.estimate(&quantities).unwrap();

        assert_eq!(estimate.lines.len(), 5);
        assert_eq!(estimate.lines[0].quantity, 0.0);
        assert_eq!(estimate.grand_total, 720.0);
    }

    #[test]
    fn rejects_bad_quantities() {
        let catalog = MaterialCatalog::default();
        let negative = BTreeMap::from([("sand".to_string(), -1.0)]);
        assert_eq!(
            catalog.estimate(&negative),
            Err(EstimateError::InvalidQuantity("sand".into()))
        );

        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let quantities = BTreeMap::from([("cement".to_string(), bad)]);
            assert_eq!(
                catalog.estimate(&quantities),
                Err(EstimateError::InvalidQuantity("cement".into()))
            );
        }

        let unknown = BTreeMap::from([("glass".to_string(), 3.0)]);
        assert_eq!(
            catalog.estimate(&unknown),
            Err(EstimateError::UnknownMaterial("glass".into()))
        );
    }
}
