//=========================================================================
// Catalog
//=========================================================================
//
// Product records and their grid rendering.
//
//=========================================================================

mod grid;
mod product;

pub use grid::{render_grid, GRID_ID};
pub use product::{Catalog, CatalogError, Product};
