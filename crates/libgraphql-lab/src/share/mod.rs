//! Compact URL-safe tokens that carry an operation from one playground to
//! another.

mod share_token;

pub use share_token::SHARE_QUERY_PARAM;
pub use share_token::ShareError;
pub use share_token::SharedOperation;
pub use share_token::decode_share;
pub use share_token::encode_share;
pub use share_token::share_url;
pub use share_token::shared_operation_from_url;
