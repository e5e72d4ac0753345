/// Points to a block in the backing store.
///
/// Stored on disk as a signed 64 bit number. Anything at or below zero means
/// the pointer goes nowhere (end of chain, or never set).
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) struct BlockPointer(i64);

impl BlockPointer {
    /// Written at the end of every chain.
    pub(crate) const END: BlockPointer = BlockPointer(-1);

    pub(crate) fn to_bytes(self) -> [u8; 8] {
        self.0.to_le_bytes()
    }
    pub(crate) fn from_bytes(bytes: [u8; 8]) -> Self {
        Self(i64::from_le_bytes(bytes))
    }

    /// Points at a real block.
    pub(crate) fn from_index(index: u64) -> Self {
        // Stores are capped well below i64::MAX blocks.
        Self(i64::try_from(index).unwrap_or(i64::MAX))
    }

    /// The block this points to, if any.
    pub(crate) fn to_index(self) -> Option<u64> {
        if self.0 <= 0 {
            return None;
        }
        u64::try_from(self.0).ok()
    }

    pub(crate) fn is_end(self) -> bool {
        self.0 <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::BlockPointer;
    use test_log::test;

    #[test]
    fn sentinels_are_end_of_chain() {
        assert!(BlockPointer::END.is_end());
        assert!(BlockPointer::from_bytes([0u8; 8]).is_end());
        assert_eq!(BlockPointer::END.to_index(), None);
    }

    #[test]
    fn real_blocks_point_somewhere() {
        let pointer = BlockPointer::from_index(42);
        assert!(!pointer.is_end());
        assert_eq!(pointer.to_index(), Some(42));
        assert_eq!(BlockPointer::from_bytes(pointer.to_bytes()), pointer);
    }
}
