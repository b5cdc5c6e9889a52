//! File identifiers

/// Identifies one loaded source file.
///
/// Ids are handed out by the loader in load order and are only meaningful
/// within the [`SymbolIndex`](crate::hir::SymbolIndex) that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FileId(pub u32);

impl FileId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for FileId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}
