use skyweave_core::alloc::HashMap;

/// Lookup of localized strings by resource id.
///
/// Layers name themselves by id; the application supplies the table.
pub trait StringLookup: Send + Sync {
    fn string(&self, id: u32) -> Option<String>;
}

impl StringLookup for HashMap<u32, String> {
    fn string(&self, id: u32) -> Option<String> {
        self.get(&id).cloned()
    }
}

impl StringLookup for std::collections::HashMap<u32, String> {
    fn string(&self, id: u32) -> Option<String> {
        self.get(&id).cloned()
    }
}
