pub mod pagination;
pub mod response;

pub use pagination::{PaginationInfo, normalize_pagination};
pub use response::{ApiResponse, FieldErrors, storage_error_response, validation_error_response};
