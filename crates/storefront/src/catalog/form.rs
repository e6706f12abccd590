//! Add-plant form validation.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use urvann_core::Price;

use super::types::NewPlant;

/// Largest accepted image upload.
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

/// Form fields that can carry an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PlantField {
    Name,
    Price,
    StockCount,
    Description,
    Image,
}

impl fmt::Display for PlantField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Name => "name",
            Self::Price => "price",
            Self::StockCount => "stockCount",
            Self::Description => "description",
            Self::Image => "image",
        })
    }
}

/// Per-field validation messages.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", render(.errors))]
pub struct PlantFormError {
    pub errors: BTreeMap<PlantField, String>,
}

impl PlantFormError {
    /// Message for one field, if it failed.
    #[must_use]
    pub fn get(&self, field: PlantField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }
}

fn render(errors: &BTreeMap<PlantField, String>) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("{field}: {message}"))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Raw form input, as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlantForm {
    pub name: String,
    pub price: String,
    pub description: String,
    pub stock_count: String,
    pub availability: bool,
    pub categories: Vec<String>,
    pub image: Option<PathBuf>,
}

impl Default for PlantForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            price: String::new(),
            description: String::new(),
            stock_count: String::new(),
            availability: true,
            categories: Vec::new(),
            image: None,
        }
    }
}

impl PlantForm {
    /// Select `category` if unselected, deselect it otherwise.
    pub fn toggle_category(&mut self, category: &str) {
        if let Some(pos) = self.categories.iter().position(|c| c == category) {
            self.categories.remove(pos);
        } else {
            self.categories.push(category.to_string());
        }
    }

    /// Validate every field and produce the plant to submit.
    ///
    /// # Errors
    ///
    /// Returns [`PlantFormError`] listing each field that failed.
    pub fn validate(&self) -> Result<NewPlant, PlantFormError> {
        let mut errors = BTreeMap::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.insert(PlantField::Name, "Plant name is required".to_string());
        }

        let price = Price::parse(&self.price).ok().filter(|p| !p.is_zero());
        if price.is_none() {
            errors.insert(PlantField::Price, "Valid price is required".to_string());
        }

        let stock_count = self.stock_count.trim().parse::<u32>().ok();
        if stock_count.is_none() {
            errors.insert(
                PlantField::StockCount,
                "Valid stock count is required".to_string(),
            );
        }

        let description = self.description.trim();
        if description.is_empty() {
            errors.insert(
                PlantField::Description,
                "Description is required".to_string(),
            );
        }

        if let Some(path) = &self.image {
            match std::fs::metadata(path) {
                Ok(meta) if meta.len() > MAX_IMAGE_BYTES => {
                    errors.insert(
                        PlantField::Image,
                        "Image size should be less than 5MB".to_string(),
                    );
                }
                Ok(_) => {}
                Err(_) => {
                    errors.insert(PlantField::Image, "Image could not be read".to_string());
                }
            }
        }

        match (price, stock_count) {
            (Some(price), Some(stock_count)) if errors.is_empty() => Ok(NewPlant {
                name: name.to_string(),
                price,
                description: description.to_string(),
                stock_count,
                availability: self.availability,
                categories: self.categories.clone(),
                image: self.image.clone(),
            }),
            _ => Err(PlantFormError { errors }),
        }
    }
}
