//! Types library for the training portal
//!
//! This library provides the core type definitions shared by the portal
//! computation layer and the HTTP gateway, ensuring type safety and
//! deterministic decimal arithmetic.
//!
//! # Version
//! v1.0.0
//!
//! # Modules
//! - `ids`: Identifiers (CourseId, LessonKey)
//! - `numeric`: Fixed-point decimal newtypes (Price, Percentage, Balance, LotSize)
//! - `course`: Course outline types (Course, CourseModule, Lesson)
//! - `trade`: Trade parameter input for the risk calculator
//! - `errors`: Error taxonomy

// Public modules
pub mod ids;
pub mod numeric;
pub mod course;
pub mod trade;
pub mod errors;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ids::*;
    pub use crate::numeric::*;
    pub use crate::course::*;
    pub use crate::trade::*;
    pub use crate::errors::*;
}
