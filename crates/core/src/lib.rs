pub mod error;
pub mod keys;
pub mod keyset;
pub mod model;
pub mod role;
pub mod signing;

pub use error::AuthError;
pub use keys::{PrivateKey, PublicKey};
pub use keyset::KeySet;
pub use model::{NOT_RECORDED_HEADER, ScreenTime};
pub use role::KeyType;
pub use signing::{
    LogicalRequest, RequestSigner, SignatureData, VerificationOutcome, resolve_role, sign,
    verify,
};
