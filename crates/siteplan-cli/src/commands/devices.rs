use siteplan_core::device::{CatalogEntry, catalog};

pub fn list() -> Vec<CatalogEntry> {
    catalog()
}
