use crate::{Attribute, Bandwidth, ConnectionInformation, MediaName};
use bytesstr::BytesStr;
use std::fmt;

/// One media block of a [`SessionDescription`](crate::SessionDescription),
/// introduced by an `m=` line and running until the next one
///
/// [RFC4566](https://www.rfc-editor.org/rfc/rfc4566.html#section-5.14)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaDescription {
    /// The block's `m=` line
    pub name: MediaName,

    /// Optional media title (i field)
    pub title: Option<BytesStr>,

    /// Optional connection (c field), required here if absent at session level
    pub connection: Option<ConnectionInformation>,

    /// Bandwidths (b fields)
    pub bandwidths: Vec<Bandwidth>,

    /// Optional encryption key (k field), stored verbatim
    pub encryption_key: Option<BytesStr>,

    /// Media level attributes (a fields)
    pub attributes: Vec<Attribute>,
}

impl fmt::Display for MediaDescription {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)?;

        if let Some(title) = &self.title {
            write!(f, "\ni={title}")?;
        }

        if let Some(connection) = &self.connection {
            write!(f, "\n{connection}")?;
        }

        for bandwidth in &self.bandwidths {
            write!(f, "\n{bandwidth}")?;
        }

        if let Some(encryption_key) = &self.encryption_key {
            write!(f, "\nk={encryption_key}")?;
        }

        for attribute in &self.attributes {
            write!(f, "\n{attribute}")?;
        }

        Ok(())
    }
}
