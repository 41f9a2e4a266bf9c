use crate::types::SheetData;
use std::collections::BTreeMap;

/// Sheets currently available for export, keyed by sequence number.
///
/// Front-ends register a sheet when it is mounted and deregister it when it
/// goes away. Bulk exports read the registry in sequence order, so the
/// insertion order never matters.
#[derive(Debug, Clone, Default)]
pub struct ExportRegistry {
    sheets: BTreeMap<usize, SheetData>,
}

impl ExportRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a sheet, replacing any previous sheet with the same id
    pub fn register(&mut self, sheet: SheetData) {
        self.sheets.insert(sheet.id, sheet);
    }

    /// Drop a sheet. Returns `false` if it was not registered.
    pub fn deregister(&mut self, id: usize) -> bool {
        self.sheets.remove(&id).is_some()
    }

    /// Make the registry match `sheets` exactly.
    ///
    /// Sheets not in the list are deregistered; every listed sheet is
    /// (re-)registered with its current contents.
    pub fn sync(&mut self, sheets: &[SheetData]) {
        self.sheets
            .retain(|id, _| sheets.iter().any(|sheet| sheet.id == *id));
        for sheet in sheets {
            self.register(sheet.clone());
        }
    }

    /// Registered sheets in ascending sequence order
    pub fn surfaces(&self) -> impl Iterator<Item = &SheetData> {
        self.sheets.values()
    }

    /// Owned copy of the registered sheets, in sequence order
    pub fn snapshot(&self) -> Vec<SheetData> {
        self.surfaces().cloned().collect()
    }

    pub fn get(&self, id: usize) -> Option<&SheetData> {
        self.sheets.get(&id)
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(id: usize) -> SheetData {
        SheetData {
            id,
            images: Vec::new(),
        }
    }

    #[test]
    fn test_surfaces_are_in_sequence_order() {
        let mut registry = ExportRegistry::new();
        registry.register(sheet(3));
        registry.register(sheet(1));
        registry.register(sheet(2));

        let ids: Vec<_> = registry.surfaces().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_deregister() {
        let mut registry = ExportRegistry::new();
        registry.register(sheet(1));
        assert!(registry.deregister(1));
        assert!(!registry.deregister(1));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_sync_drops_unmounted_sheets() {
        let mut registry = ExportRegistry::new();
        registry.sync(&[sheet(1), sheet(2), sheet(3)]);
        assert_eq!(registry.len(), 3);

        registry.sync(&[sheet(1)]);
        assert_eq!(registry.len(), 1);
        assert!(registry.get(1).is_some());
        assert!(registry.get(2).is_none());

        registry.sync(&[]);
        assert!(registry.is_empty());
    }
}
