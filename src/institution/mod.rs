pub mod fetch;
pub mod normalize;
pub mod types;

pub use fetch::{fetch_institution, insecure_client};
pub use normalize::{decode_fee_record, normalize_institution};
pub use types::{FeeRecord, Institution};
