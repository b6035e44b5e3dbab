use super::types::{SearchCriteria, SearchResult};
use crate::models::Property;
use crate::normalize::join_location;
use std::cmp::Ordering;
use tracing::debug;

/// Filters, orders and paginates a property collection.
///
/// All supplied criteria must hold for a property to match. Matches are ordered
/// by [`listing_order`] and the page window is taken from the ordered matches;
/// `total` counts every match.
pub fn filter(properties: &[Property], criteria: &SearchCriteria) -> SearchResult {
    let mut matched: Vec<&Property> = properties
        .iter()
        .filter(|property| criteria.matches(property))
        .collect();
    matched.sort_by(|a, b| listing_order(a, b));

    let total = matched.len();
    let items: Vec<Property> = match page_window(criteria) {
        Some((offset, size)) => matched.into_iter().skip(offset).take(size).cloned().collect(),
        None => matched.into_iter().cloned().collect(),
    };

    debug!(
        "Search matched {} of {} properties, returning {}",
        total,
        properties.len(),
        items.len()
    );

    SearchResult { items, total }
}

/// Featured listings first, then newest first, then by id.
///
/// Listings without a creation date sort after dated ones.
pub fn listing_order(a: &Property, b: &Property) -> Ordering {
    b.is_featured
        .cmp(&a.is_featured)
        .then_with(|| match (&a.created_at, &b.created_at) {
            (Some(a), Some(b)) => b.cmp(a),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| a.id.cmp(&b.id))
}

/// Offset and size of the requested page, or `None` when unpaginated.
fn page_window(criteria: &SearchCriteria) -> Option<(usize, usize)> {
    let limit = criteria.limit.filter(|limit| *limit > 0)? as usize;
    let page = criteria.page.filter(|page| *page > 0).unwrap_or(1) as usize;
    Some(((page - 1).saturating_mul(limit), limit))
}

impl SearchCriteria {
    /// Whether a single property satisfies every supplied criterion.
    pub fn matches(&self, property: &Property) -> bool {
        if let Some(needle) = non_blank(&self.location) {
            let haystack = if property.location.is_empty() {
                join_location(&[property.city.as_str(), property.country.as_str()])
            } else {
                property.location.clone()
            };
            if !contains_ignore_case(&haystack, needle) {
                return false;
            }
        }

        if let Some(needle) = non_blank(&self.keywords) {
            if !contains_ignore_case(&property.title, needle)
                && !contains_ignore_case(&property.description, needle)
            {
                return false;
            }
        }

        if let Some(needle) = non_blank(&self.city) {
            if !contains_ignore_case(&property.city, needle) {
                return false;
            }
        }

        if let Some(country) = non_blank(&self.country) {
            if !property.country.trim().eq_ignore_ascii_case(country) {
                return false;
            }
        }

        if let Some(property_type) = self.property_type {
            if property.property_type != property_type {
                return false;
            }
        }

        if let Some(min) = finite(self.min_price) {
            if property.price < min {
                return false;
            }
        }
        if let Some(max) = finite(self.max_price) {
            if property.price > max {
                return false;
            }
        }

        if let Some(min) = self.min_bedrooms {
            if property.bedrooms < min {
                return false;
            }
        }
        if let Some(max) = self.max_bedrooms {
            if property.bedrooms > max {
                return false;
            }
        }
        if let Some(min) = self.min_bathrooms {
            if property.bathrooms < min {
                return false;
            }
        }

        if let Some(min) = finite(self.min_area_sqm) {
            if property.area_sqm < min {
                return false;
            }
        }
        if let Some(max) = finite(self.max_area_sqm) {
            if property.area_sqm > max {
                return false;
            }
        }

        if let Some(status) = self.status {
            if property.status != status {
                return false;
            }
        }
        if let Some(ad_type) = self.ad_type {
            if property.ad_type != ad_type {
                return false;
            }
        }
        if let Some(is_featured) = self.is_featured {
            if property.is_featured != is_featured {
                return false;
            }
        }

        if self.pets_allowed == Some(true) && !property.features.pets_allowed() {
            return false;
        }
        if self.furnished == Some(true) && !property.features.furnished() {
            return false;
        }

        if let Some(wanted) = self.available_from {
            if property.availability_date.is_some_and(|available| available > wanted) {
                return false;
            }
        }

        true
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
