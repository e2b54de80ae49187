//! XML helpers shared by the package and WordprocessingML layers.

mod element;
mod escape;

pub use element::{XML_DECLARATION, XmlDocument, XmlElement, XmlNode};
pub use escape::{escape_attr, escape_text};

use thiserror::Error;

/// Errors raised while reading an XML part.
#[derive(Error, Debug)]
pub enum XmlError {
    #[error("XML parse error: {0}")]
    Parse(String),

    #[error("invalid UTF-8 in XML: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("closing tag without a matching opening tag")]
    UnbalancedEnd,

    #[error("XML part has no root element")]
    MissingRoot,
}

pub type Result<T> = std::result::Result<T, XmlError>;
