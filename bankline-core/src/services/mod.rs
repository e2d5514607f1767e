//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions. Each service
//! focuses on a specific use case or feature area.

pub mod category;
pub mod import;

pub use category::{guess_category, CategoryRule, Matcher, RULES};
pub use import::{
    detect_statement, import_batch, parse_statement, Detection, ImportOptions, ImportService,
    ParsedStatement, StatementFile,
};
