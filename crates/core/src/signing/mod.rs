mod canonical;
mod ed25519;
mod envelope;
mod request;
mod signer;
mod verifier;

pub use canonical::{SEPARATOR, format_timestamp, signing_payload};
pub use ed25519::SIGNATURE_LENGTH;
pub use envelope::{SignatureData, unix_now};
pub use request::LogicalRequest;
pub use signer::RequestSigner;
pub use verifier::{
    REPLAY_WINDOW_SECS, VerificationOutcome, resolve_role, resolve_role_at, verify, verify_at,
};

use crate::error::AuthError;

/// Signs a request at the current wall-clock time.
///
/// `components` is the method followed by the raw path segments; the
/// timestamp is appended by the payload builder. Two calls with the same
/// input yield different envelopes.
pub fn sign<S: AsRef<str>>(
    components: &[S],
    body: Option<&[u8]>,
    signer: &dyn RequestSigner,
) -> Result<SignatureData, AuthError> {
    sign_at(components, body, signer, unix_now())
}

/// Signs a request as if the clock read `timestamp`.
pub fn sign_at<S: AsRef<str>>(
    components: &[S],
    body: Option<&[u8]>,
    signer: &dyn RequestSigner,
    timestamp: f64,
) -> Result<SignatureData, AuthError> {
    let payload = signing_payload(components, timestamp, body);
    let signature = signer.sign(&payload)?;
    Ok(SignatureData {
        timestamp,
        signature,
    })
}
