pub mod api_response;
pub mod authz;
pub mod base64_util;
pub mod jwt_utils;
pub mod validated_wrapper;
pub mod validator_utils;
