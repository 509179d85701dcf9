//! Seasoning Calculator Common Library
//!
//! CLIとWeb(WASM)で共有されるレシピカタログと調味料計算エンジン
//!
//! ```
//! use seasoning_common::format_one_decimal;
//!
//! assert_eq!(format_one_decimal(16.0), "16.0");
//! ```

pub mod catalog;
pub mod engine;
pub mod error;
pub mod expr;
pub mod formula;
pub mod number;
pub mod salt;
pub mod state;
pub mod types;

pub use catalog::{load_catalog, Catalog, Condiment, FormulaDiagnostic, Recipe, RecipeFilter};
pub use engine::{evaluate, placeholder, CondimentResult, EvaluationContext, EvaluationResult};
pub use error::{Error, EvaluationError, FormulaError, LoadError, Result};
pub use formula::{CompiledFormula, FormulaOutput};
pub use number::{format_one_decimal, parse_leading_number};
pub use salt::SaltInfo;
pub use state::{AppState, CatalogStatus, Ingredient, DEFAULT_RECIPE, MAX_INGREDIENTS};
pub use types::{CondimentRecord, Cuisine, DependencyMode, RecipeRecord, Role};
