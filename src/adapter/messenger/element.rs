//! Element (Matrix) messenger.
//!
//! Sends plain-text room messages through the Matrix client-server API:
//! `PUT /_matrix/client/v3/rooms/{room}/send/m.room.message/{txn}`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use url::Url;
use uuid::Uuid;

use crate::config::ElementConfig;
use crate::error::{ConfigError, MessengerError, Result};
use crate::port::Messenger;

/// Upper bound on a single send.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Matrix room messenger.
#[derive(Debug)]
pub struct ElementMessenger {
    client: Client,
    homeserver: Url,
    access_token: String,
    room_id: String,
}

#[derive(Serialize)]
struct RoomMessage<'a> {
    msgtype: &'static str,
    body: &'a str,
}

impl ElementMessenger {
    /// Create a messenger from a validated configuration section.
    ///
    /// # Errors
    ///
    /// Returns an error if the section is incomplete or the HTTP client
    /// cannot be built.
    #[allow(clippy::result_large_err)]
    pub fn new(config: &ElementConfig) -> Result<Self> {
        config.validate()?;

        let homeserver = Url::parse(&config.homeserver_url)?;
        if homeserver.cannot_be_a_base() {
            return Err(ConfigError::InvalidValue {
                field: "element.homeserver_url",
                reason: "must be an http(s) URL".into(),
            }
            .into());
        }

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(MessengerError::from)?;

        Ok(Self {
            client,
            homeserver,
            access_token: config.access_token.clone(),
            room_id: config.room_id.clone(),
        })
    }

    fn message_url(&self, txn_id: &str) -> std::result::Result<Url, MessengerError> {
        let mut url = self.homeserver.clone();
        url.path_segments_mut()
            .map_err(|()| MessengerError::Rejected("homeserver URL cannot be a base".into()))?
            .pop_if_empty()
            .extend([
                "_matrix",
                "client",
                "v3",
                "rooms",
                self.room_id.as_str(),
                "send",
                "m.room.message",
                txn_id,
            ]);
        Ok(url)
    }
}

#[async_trait]
impl Messenger for ElementMessenger {
    fn name(&self) -> &str {
        "element"
    }

    async fn send_message(&self, text: &str) -> std::result::Result<(), MessengerError> {
        let url = self.message_url(&Uuid::new_v4().simple().to_string())?;

        let response = self
            .client
            .put(url)
            .bearer_auth(&self.access_token)
            .json(&RoomMessage {
                msgtype: "m.text",
                body: text,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MessengerError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}
