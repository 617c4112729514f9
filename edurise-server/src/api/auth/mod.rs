pub mod auth;
pub mod login_request;
pub mod logout_request;
pub mod logout_response;
pub mod me_response;
pub mod password_reset_request;
pub mod password_reset_response;
pub mod refresh_request;
pub mod refresh_response;
pub mod register_request;
pub mod session_response;
pub mod token_pair_dto;
pub mod user_dto;
