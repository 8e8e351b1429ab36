// ---------------------------------------------------------------------------
// PopulateError: precondition failures of grid population
// ---------------------------------------------------------------------------

use std::fmt;

/// Reasons a building grid cannot be populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopulateError {
    /// The model delivered no meshes to clone.
    NoTemplates,
    /// No `SharedBuildingMaterial` was set up before the templates arrived.
    MissingMaterial,
    /// One of the grid dimensions is zero.
    EmptyGrid { cols: u32, rows: u32 },
    /// The grid was already populated; instances are never rebuilt.
    AlreadyPopulated,
}

impl fmt::Display for PopulateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PopulateError::NoTemplates => write!(f, "No building templates to clone"),
            PopulateError::MissingMaterial => write!(f, "Shared building material is missing"),
            PopulateError::EmptyGrid { cols, rows } => {
                write!(f, "Grid has no cells ({cols}x{rows})")
            }
            PopulateError::AlreadyPopulated => write!(f, "Building grid is already populated"),
        }
    }
}

impl std::error::Error for PopulateError {}
