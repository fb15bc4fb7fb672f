//! AWS SES v2 notifier.
//!
//! Credentials resolve through the standard SDK chain (environment
//! variables, instance profile, shared credentials file); only the region
//! can be overridden explicitly.

use async_trait::async_trait;
use aws_sdk_sesv2::types::{Body, Content, Destination, EmailContent, Message};
use aws_sdk_sesv2::Client;
use tracing::debug;

use super::{EmailError, EmailNotifier};

const SUBJECT: &str = "One last step to complete your registration";

/// Sends the verification email through AWS SES.
pub struct SesNotifier {
    client: Client,
    from_address: String,
    from_name: String,
    verification_base_url: String,
}

impl SesNotifier {
    pub fn new(
        client: Client,
        from_address: impl Into<String>,
        from_name: impl Into<String>,
        verification_base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            from_address: from_address.into(),
            from_name: from_name.into(),
            verification_base_url: verification_base_url.into(),
        }
    }

    /// Build a notifier from the default AWS credential chain, optionally
    /// pinning the region.
    pub async fn connect(
        region: Option<String>,
        from_address: impl Into<String>,
        from_name: impl Into<String>,
        verification_base_url: impl Into<String>,
    ) -> Self {
        let mut loader = aws_config::from_env();
        if let Some(region) = region {
            loader = loader.region(aws_config::Region::new(region));
        }
        let config = loader.load().await;
        Self::new(Client::new(&config), from_address, from_name, verification_base_url)
    }

    fn verification_link(&self, token: &str) -> String {
        format!("{}?token={}", self.verification_base_url, token)
    }

    fn from_header(&self) -> String {
        if self.from_name.is_empty() {
            self.from_address.clone()
        } else {
            format!("{} <{}>", self.from_name, self.from_address)
        }
    }

    fn html_body(&self, first_name: &str, token: &str) -> String {
        format!(
            "<h1>Please verify your email address</h1>\
             <p>Hi {first_name}, thank you for registering. To complete the registration \
             process and be able to log in, click on the following link: \
             <a href='{link}'>Final step to complete your registration</a></p>",
            first_name = first_name,
            link = self.verification_link(token),
        )
    }

    fn text_body(&self, first_name: &str, token: &str) -> String {
        format!(
            "Hi {}, please verify your email address. To complete the registration \
             process and be able to log in, open the following URL in your browser: {}",
            first_name,
            self.verification_link(token),
        )
    }
}

fn utf8_content(data: String) -> Result<Content, EmailError> {
    Content::builder()
        .data(data)
        .charset("UTF-8")
        .build()
        .map_err(|e| EmailError::Build(e.to_string()))
}

#[async_trait]
impl EmailNotifier for SesNotifier {
    async fn send_verification_email(
        &self,
        recipient: &str,
        first_name: &str,
        token: &str,
    ) -> Result<(), EmailError> {
        let destination = Destination::builder().to_addresses(recipient).build();

        let body = Body::builder()
            .html(utf8_content(self.html_body(first_name, token))?)
            .text(utf8_content(self.text_body(first_name, token))?)
            .build();

        let message = Message::builder()
            .subject(utf8_content(SUBJECT.to_string())?)
            .body(body)
            .build();

        self.client
            .send_email()
            .from_email_address(self.from_header())
            .destination(destination)
            .content(EmailContent::builder().simple(message).build())
            .send()
            .await
            .map_err(|e| EmailError::Send(e.to_string()))?;

        debug!(%recipient, "verification email sent");
        Ok(())
    }
}
