//! Common types used across the platform

use serde::{Deserialize, Deserializer, Serialize};

/// Sort direction for list views
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Apply this direction to an ascending comparison
    pub fn apply(self, ordering: std::cmp::Ordering) -> std::cmp::Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

/// Product fields a product list can be sorted by
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum ProductSortField {
    #[default]
    Name,
    Stock,
    Price,
    LastUpdated,
}

/// Movement list view: only the most recent entries, or everything
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MovementView {
    Recent,
    #[default]
    All,
}

/// Deserialize a nullable field of a partial update.
///
/// Absent field => `None` (leave unchanged), `null` => `Some(None)` (clear),
/// value => `Some(Some(v))`. Use together with `#[serde(default)]`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cmp::Ordering;

    #[derive(Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "double_option")]
        notes: Option<Option<String>>,
    }

    #[test]
    fn test_double_option_distinguishes_absent_and_null() {
        let absent: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.notes, None);

        let null: Patch = serde_json::from_str(r#"{"notes": null}"#).unwrap();
        assert_eq!(null.notes, Some(None));

        let value: Patch = serde_json::from_str(r#"{"notes": "fragile"}"#).unwrap();
        assert_eq!(value.notes, Some(Some("fragile".to_string())));
    }

    #[test]
    fn test_sort_order_apply() {
        assert_eq!(SortOrder::Asc.apply(Ordering::Less), Ordering::Less);
        assert_eq!(SortOrder::Desc.apply(Ordering::Less), Ordering::Greater);
    }

    #[test]
    fn test_sort_field_names() {
        let field: ProductSortField = serde_json::from_str(r#""lastUpdated""#).unwrap();
        assert_eq!(field, ProductSortField::LastUpdated);
    }
}
