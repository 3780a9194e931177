//! Email message

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The MIME type of the only alternative content part SparkPost accepts
pub const HTML_MIMETYPE: &str = "text/html";

/// A message recipient
///
/// Either a bare address (`"to@example.com"`) or a structured SparkPost
/// recipient object, which may carry per-recipient `substitution_data`:
///
/// ```json
/// {"address": {"email": "to@example.com"}, "substitution_data": {"name": "Jo"}}
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Recipient {
    /// A bare email address
    Address(String),

    /// A structured recipient object, passed to SparkPost verbatim
    Structured(Map<String, Value>),
}

impl From<&str> for Recipient {
    fn from(address: &str) -> Self {
        Recipient::Address(address.to_string())
    }
}

impl From<String> for Recipient {
    fn from(address: String) -> Self {
        Recipient::Address(address)
    }
}

impl From<Map<String, Value>> for Recipient {
    fn from(object: Map<String, Value>) -> Self {
        Recipient::Structured(object)
    }
}

/// An alternative content part, e.g. the HTML rendering of the body
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alternative {
    /// The content of the part
    pub content: String,

    /// The MIME type of the part
    pub mimetype: String,
}

impl Alternative {
    /// Create a new alternative content part
    pub fn new(content: impl Into<String>, mimetype: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            mimetype: mimetype.into(),
        }
    }

    /// Whether this part is HTML
    pub fn is_html(&self) -> bool {
        self.mimetype == HTML_MIMETYPE
    }
}

/// A file attached to a message
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// The file name
    pub filename: Option<String>,

    /// The raw content
    pub content: Vec<u8>,

    /// The MIME type
    pub mimetype: Option<String>,
}

/// SparkPost-specific parameters supplied alongside a message
///
/// Keys are merged over the parameters derived from the message, so anything
/// set here (`template`, `substitution_data`, `campaign`, inline `html` and
/// `text`, ...) wins over the derived value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderOverride(Map<String, Value>);

impl ProviderOverride {
    /// Create an empty override
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a key, returning the override for chaining
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Set a key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Get the value for a key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Whether a key is present, regardless of its value
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Whether the override references a stored template.
    ///
    /// Null, `false`, zero, empty strings and empty containers don't count.
    pub fn has_stored_template(&self) -> bool {
        match self.0.get("template") {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(a)) => !a.is_empty(),
            Some(Value::Object(o)) => !o.is_empty(),
            Some(Value::Number(n)) => n.as_f64() != Some(0.0),
        }
    }

    /// Whether the override has no keys
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the keys and values
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

impl From<Map<String, Value>> for ProviderOverride {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// An outbound email message
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EmailMessage {
    /// The recipients of the email
    pub to: Vec<Recipient>,

    /// The sender of the email
    pub from_email: String,

    /// The subject of the email
    pub subject: String,

    /// The plain text body of the email
    pub body: String,

    /// Alternative content parts
    #[serde(default)]
    pub alternatives: Vec<Alternative>,

    /// Attachments (not supported by this backend)
    #[serde(default)]
    pub attachments: Vec<Attachment>,

    /// Carbon copy recipients (not supported by this backend)
    #[serde(default)]
    pub cc: Vec<String>,

    /// Blind carbon copy recipients (not supported by this backend)
    #[serde(default)]
    pub bcc: Vec<String>,

    /// Reply-to addresses (not supported by this backend)
    #[serde(default)]
    pub reply_to: Vec<String>,

    /// SparkPost-specific parameters
    #[serde(default)]
    pub sparkpost: Option<ProviderOverride>,
}

impl EmailMessage {
    /// Create a new message with a plain text body
    pub fn new<R>(
        subject: impl Into<String>,
        body: impl Into<String>,
        from_email: impl Into<String>,
        to: impl IntoIterator<Item = R>,
    ) -> Self
    where
        R: Into<Recipient>,
    {
        Self {
            to: to.into_iter().map(Into::into).collect(),
            from_email: from_email.into(),
            subject: subject.into(),
            body: body.into(),
            ..Default::default()
        }
    }

    /// Add an alternative content part
    #[must_use]
    pub fn with_alternative(
        mut self,
        content: impl Into<String>,
        mimetype: impl Into<String>,
    ) -> Self {
        self.alternatives.push(Alternative::new(content, mimetype));
        self
    }

    /// Add an attachment
    #[must_use]
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Set the carbon copy recipients
    #[must_use]
    pub fn with_cc<S: Into<String>>(mut self, cc: impl IntoIterator<Item = S>) -> Self {
        self.cc = cc.into_iter().map(Into::into).collect();
        self
    }

    /// Set the blind carbon copy recipients
    #[must_use]
    pub fn with_bcc<S: Into<String>>(mut self, bcc: impl IntoIterator<Item = S>) -> Self {
        self.bcc = bcc.into_iter().map(Into::into).collect();
        self
    }

    /// Set the reply-to addresses
    #[must_use]
    pub fn with_reply_to<S: Into<String>>(mut self, reply_to: impl IntoIterator<Item = S>) -> Self {
        self.reply_to = reply_to.into_iter().map(Into::into).collect();
        self
    }

    /// Attach SparkPost-specific parameters
    #[must_use]
    pub fn with_sparkpost(mut self, sparkpost: ProviderOverride) -> Self {
        self.sparkpost = Some(sparkpost);
        self
    }
}
