pub mod requests;
pub mod responses;

pub use requests::{LoginRequest, RegisterRequest, UpdateProfileRequest};
pub use responses::{LoginResponse, UserInfoResponse};
