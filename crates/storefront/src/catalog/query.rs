//! Local search, filtering, and sorting of fetched plants.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use urvann_core::Price;

use super::types::{ALL_CATEGORIES, Plant};

/// Stock filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AvailabilityFilter {
    #[default]
    All,
    InStock,
    OutOfStock,
}

impl AvailabilityFilter {
    fn matches(self, plant: &Plant) -> bool {
        match self {
            Self::All => true,
            Self::InStock => plant.availability,
            Self::OutOfStock => !plant.availability,
        }
    }
}

impl FromStr for AvailabilityFilter {
    type Err = QueryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "true" | "in-stock" | "in_stock" => Ok(Self::InStock),
            "false" | "out-of-stock" | "out_of_stock" => Ok(Self::OutOfStock),
            other => Err(QueryParseError(format!("unknown availability filter {other:?}"))),
        }
    }
}

/// Listing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    NewestFirst,
    NameAsc,
    PriceAsc,
    PriceDesc,
    /// In-stock first, then by stock count descending.
    MostPopular,
    BestRating,
}

impl SortOrder {
    /// All orders, in the order the sort menu lists them.
    pub const ALL: [Self; 6] = [
        Self::NewestFirst,
        Self::NameAsc,
        Self::PriceAsc,
        Self::PriceDesc,
        Self::MostPopular,
        Self::BestRating,
    ];

    /// Menu label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NewestFirst => "Newest First",
            Self::NameAsc => "Name A-Z",
            Self::PriceAsc => "Price Low to High",
            Self::PriceDesc => "Price High to Low",
            Self::MostPopular => "Most Popular",
            Self::BestRating => "Best Rating",
        }
    }

    fn compare(self, a: &Plant, b: &Plant) -> Ordering {
        match self {
            Self::NewestFirst => b.created_at.cmp(&a.created_at),
            Self::NameAsc => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            Self::PriceAsc => a.price.cmp(&b.price),
            Self::PriceDesc => b.price.cmp(&a.price),
            Self::MostPopular => b
                .availability
                .cmp(&a.availability)
                .then_with(|| b.stock_count.cmp(&a.stock_count)),
            Self::BestRating => b
                .rating
                .unwrap_or(0.0)
                .total_cmp(&a.rating.unwrap_or(0.0)),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SortOrder {
    type Err = QueryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        if let Some(order) = Self::ALL
            .into_iter()
            .find(|order| order.label().eq_ignore_ascii_case(wanted))
        {
            return Ok(order);
        }
        match wanted.to_ascii_lowercase().as_str() {
            "newest" => Ok(Self::NewestFirst),
            "name" => Ok(Self::NameAsc),
            "price-asc" | "price" => Ok(Self::PriceAsc),
            "price-desc" => Ok(Self::PriceDesc),
            "popular" => Ok(Self::MostPopular),
            "rating" => Ok(Self::BestRating),
            other => Err(QueryParseError(format!("unknown sort order {other:?}"))),
        }
    }
}

/// Unrecognized filter or sort text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct QueryParseError(String);

/// What the shopper asked to see.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogQuery {
    /// Free-text search over name and description.
    pub search: Option<String>,
    /// Category label; `None` or [`ALL_CATEGORIES`] means any.
    pub category: Option<String>,
    pub availability: AvailabilityFilter,
    pub sort: SortOrder,
}

impl CatalogQuery {
    /// Trimmed, non-empty search text.
    #[must_use]
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }

    /// Category to filter by, if any.
    #[must_use]
    pub fn category_filter(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|category| !category.is_empty() && *category != ALL_CATEGORIES)
    }

    /// `true` when nothing would be filtered or reordered, i.e. there is
    /// nothing for "clear filters" to do.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.search_term().is_none()
            && self.category_filter().is_none()
            && self.availability == AvailabilityFilter::All
            && self.sort == SortOrder::NewestFirst
    }

    /// Does `plant` pass the search, category, and availability filters?
    #[must_use]
    pub fn matches(&self, plant: &Plant) -> bool {
        let search_ok = self.search_term().is_none_or(|term| {
            let term = term.to_lowercase();
            plant.name.to_lowercase().contains(&term)
                || plant.description.to_lowercase().contains(&term)
        });
        let category_ok = self
            .category_filter()
            .is_none_or(|category| plant.categories.iter().any(|c| c == category));

        search_ok && category_ok && self.availability.matches(plant)
    }

    /// Filter and sort `plants`. Sorting is stable.
    #[must_use]
    pub fn apply(&self, plants: &[Plant]) -> Vec<Plant> {
        let mut result: Vec<Plant> = plants
            .iter()
            .filter(|plant| self.matches(plant))
            .cloned()
            .collect();
        result.sort_by(|a, b| self.sort.compare(a, b));
        result
    }
}

/// Headline numbers for a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSummary {
    pub count: usize,
    pub available: usize,
    /// Cheapest and dearest price, absent for an empty listing.
    pub price_range: Option<(Price, Price)>,
}

impl CatalogSummary {
    #[must_use]
    pub fn of(plants: &[Plant]) -> Self {
        let min = plants.iter().map(|p| p.price).min();
        let max = plants.iter().map(|p| p.price).max();
        Self {
            count: plants.len(),
            available: plants.iter().filter(|p| p.availability).count(),
            price_range: min.zip(max),
        }
    }
}
