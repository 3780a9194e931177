#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Sends a single email through SparkPost

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use sparkpost_mailer::{
    domain::communication::{
        backend::SparkPostBackend,
        mailer::{EmailMessage, Mailer, ProviderOverride, HTML_MIMETYPE},
    },
    infrastructure::sparkpost::{SparkPostClient, SparkPostConfig},
};
use tracing::info;

/// Command-line arguments / environment variables
#[derive(Debug, Parser)]
pub struct Args {
    /// The SparkPost configuration
    #[clap(flatten)]
    pub sparkpost: SparkPostConfig,

    /// The sender address
    #[clap(long, env = "MAIL_FROM")]
    pub from: String,

    /// A recipient address, may be repeated
    #[clap(long = "to", required = true)]
    pub to: Vec<String>,

    /// The subject
    #[clap(long, default_value = "")]
    pub subject: String,

    /// The plain text body
    #[clap(long, default_value = "")]
    pub body: String,

    /// An HTML rendering of the body
    #[clap(long)]
    pub html: Option<String>,

    /// A stored template to send instead of the body
    #[clap(long)]
    pub template: Option<String>,

    /// Don't fail when SparkPost rejects the message
    #[clap(long)]
    pub fail_silently: bool,
}

impl Args {
    fn message(&self) -> EmailMessage {
        let mut message = EmailMessage::new(
            self.subject.as_str(),
            self.body.as_str(),
            self.from.as_str(),
            self.to.iter().cloned(),
        );

        if let Some(html) = &self.html {
            message = message.with_alternative(html.as_str(), HTML_MIMETYPE);
        }

        if let Some(template) = &self.template {
            message = message.with_sparkpost(ProviderOverride::new().with("template", template.as_str()));
        }

        message
    }
}

#[mutants::skip]
#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let client = SparkPostClient::new(args.sparkpost.clone())?;
    let backend = SparkPostBackend::with_fail_silently(Arc::new(client), args.fail_silently);

    let accepted = backend.send_messages(&[args.message()]).await?;

    info!(accepted, "done");
    println!("{accepted}");

    Ok(())
}
