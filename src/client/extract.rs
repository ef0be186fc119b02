//! Decoding adapter responses on the client side.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::client::error::Error;
use crate::client::response::ClientResponse;
use crate::server::StatusCode;

/// Wire shape of an error response.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Read the whole body of `response` and decode it.
///
/// A `200` body decodes as `T`. Any other status is expected to carry
/// `{"message": ...}` and becomes [`Error::Remote`]; a body that is not in
/// that shape becomes [`Error::MalformedErrorBody`].
pub async fn extract_payload<T, B>(response: ClientResponse<B>) -> Result<T, Error>
where
    T: DeserializeOwned,
    B: AsyncRead + Unpin,
{
    let ClientResponse { status, mut body, .. } = response;

    let mut bytes = Vec::new();
    body.read_to_end(&mut bytes).await.map_err(Error::Body)?;

    decode_payload(status, &bytes)
}

/// The decoding half of [`extract_payload`], for bodies already in memory.
pub fn decode_payload<T: DeserializeOwned>(status: u16, body: &[u8]) -> Result<T, Error> {
    if status != StatusCode::Ok.as_u16() {
        let error: ErrorBody = serde_json::from_slice(body).map_err(|source| Error::MalformedErrorBody {
            status,
            body: String::from_utf8_lossy(body).into_owned(),
            source,
        })?;
        return Err(Error::Remote {
            status,
            message: error.message,
        });
    }

    serde_json::from_slice(body).map_err(Error::Decode)
}
