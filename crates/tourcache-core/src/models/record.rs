use chrono::{DateTime, Utc};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Column holding the derived contact link
pub const WHATSAPP_LINK_FIELD: &str = "WhatsAppLink";

/// Sheet column that may carry an explicit tour identifier
pub const ID_FIELD: &str = "ID";

/// One tour row from the sheet.
///
/// Columns are whatever the header row declares, kept in header order.
/// Known columns (Name, Price, Phone, ...) are looked up by key.
#[derive(Debug, Clone, PartialEq)]
pub struct TourRecord {
    /// 1-based data row position in the sheet (the header is row 0)
    pub id: usize,
    pub last_updated: DateTime<Utc>,
    fields: Vec<(String, String)>,
}

impl TourRecord {
    pub fn new(id: usize, last_updated: DateTime<Utc>) -> Self {
        Self {
            id,
            last_updated,
            fields: Vec::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Value of `key`, or `default` when absent or blank
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        match self.get(key) {
            Some(value) if !value.is_empty() => value,
            _ => default,
        }
    }

    /// Set a column value. Re-setting an existing key replaces its value in place.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn whatsapp_link(&self) -> Option<&str> {
        self.get(WHATSAPP_LINK_FIELD)
    }

    /// True when `id` names this record, either by row position or by its `ID` column.
    pub fn matches_id(&self, id: &str) -> bool {
        self.id.to_string() == id || self.get(ID_FIELD) == Some(id)
    }
}

// Flat object: sheet columns plus `_id` and `_lastUpdated`, the shape the site front end reads.
impl Serialize for TourRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 2))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.serialize_entry("_id", &self.id.to_string())?;
        map.serialize_entry("_lastUpdated", &self.last_updated.to_rfc3339())?;
        map.end()
    }
}
