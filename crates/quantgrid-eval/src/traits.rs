//! Collaborator seams the engine evaluates against.

use quantgrid_common::CellAddress;

/// Pure, synchronous lookup of grid cell display text.
///
/// The engine only ever reads through this trait; an absent cell is the
/// empty string. Implementations must not block or perform I/O — they are
/// called from inside the recompute pass.
pub trait CellResolver {
    fn cell_text(&self, addr: CellAddress) -> String;
}

/// Resolver for documents with no backing grid (report canvases, tests):
/// every cell is absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyGrid;

impl CellResolver for EmptyGrid {
    fn cell_text(&self, _addr: CellAddress) -> String {
        String::new()
    }
}

impl<F> CellResolver for F
where
    F: Fn(CellAddress) -> String,
{
    fn cell_text(&self, addr: CellAddress) -> String {
        self(addr)
    }
}
