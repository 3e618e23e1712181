//! Condense processing: upload validation, PDF text extraction, and the
//! summary block renderer.

pub mod extract;
pub mod render;
pub mod validator;

pub use extract::{extract_from_bytes, join_pages, ExtractError, PdfTextExtractor};
pub use render::{parse_summary, Block, Inline, HEADING_EMOJIS};
pub use validator::{sanitize_filename, UploadValidator, ValidationError};
