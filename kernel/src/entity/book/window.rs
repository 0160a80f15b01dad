use error_stack::Report;

use crate::entity::book::BookId;
use crate::entity::common::PageSize;
use crate::KernelError;

/// Half-open id range `[floor, before)` scanned by the window strategy.
///
/// The floor is a guess (`before - page_size`), not the real minimum of the
/// matched rows.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BookIdWindow {
    before: BookId,
    floor: BookId,
}

impl BookIdWindow {
    pub fn new(before: Option<BookId>, size: &PageSize) -> error_stack::Result<Self, KernelError> {
        let before = before.ok_or_else(|| {
            Report::new(KernelError::InvalidArgument)
                .attach_printable("window pagination requires the last seen book id")
        })?;
        let floor = BookId::new(before.as_ref() - size.as_ref());
        Ok(Self { before, floor })
    }

    pub fn before(&self) -> &BookId {
        &self.before
    }

    pub fn floor(&self) -> &BookId {
        &self.floor
    }
}
