use reqwest::Client;

use crate::prelude::*;

/// Build a default client.
///
/// No overall timeout: only the requests with a fallback set their own, see
/// [`crate::api::backend::SHORT_TIMEOUT`].
pub fn try_new() -> Result<Client> {
    Ok(Client::builder().user_agent(concat!("dectech/", env!("CARGO_PKG_VERSION"))).build()?)
}
