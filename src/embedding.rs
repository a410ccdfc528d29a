// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Resolution of [`Attachment`] payloads into raw bytes.
//!
//! [`Attachment`]: crate::event::Attachment

use std::{fs, io, path::Path, str};

use base64::{
    alphabet,
    engine::{
        general_purpose::{GeneralPurpose, GeneralPurposeConfig},
        DecodePaddingMode,
    },
    Engine as _,
};
use derive_more::with_trait::{Display, Error, From};

/// Suffix of a MIME type marking its payload as [`base64`] encoded.
pub const BASE64_MARKER: &str = ";base64";

/// [`base64`] engine accepting unpadded and non-canonical input.
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Capability of reading files named by an [`Attachment`].
///
/// [`Attachment`]: crate::event::Attachment
pub trait ByteSource {
    /// Reads the whole regular file `name`.
    ///
    /// Returns [`None`] if there is no such file.
    ///
    /// # Errors
    ///
    /// If the file exists, but cannot be read.
    fn read_file(&self, name: &str) -> io::Result<Option<Vec<u8>>>;
}

/// [`ByteSource`] backed by the local file system.
#[derive(Clone, Copy, Debug, Default)]
pub struct FileSystem;

impl ByteSource for FileSystem {
    fn read_file(&self, name: &str) -> io::Result<Option<Vec<u8>>> {
        let path = Path::new(name);
        if path.is_file() {
            fs::read(path).map(Some)
        } else {
            Ok(None)
        }
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &S {
    fn read_file(&self, name: &str) -> io::Result<Option<Vec<u8>>> {
        (**self).read_file(name)
    }
}

/// Embedding with its payload resolved.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Embedding {
    /// MIME type with the [`BASE64_MARKER`] stripped.
    pub mime_type: String,

    pub data: Vec<u8>,
}

/// Error of resolving an [`Embedding`] payload.
#[derive(Debug, Display, Error, From)]
pub enum EmbeddingError {
    /// Named file exists, but cannot be read.
    #[display("Failed to read embedded file: {_0}")]
    Io(io::Error),

    /// Payload is marked as [`base64`], but isn't.
    #[display("Failed to decode base64 embedding: {_0}")]
    Base64(base64::DecodeError),
}

/// Resolves the payload of an embedding.
///
/// If `source` names an existing file, its contents are embedded. Otherwise,
/// if `mime_type` ends with [`BASE64_MARKER`], the marker is stripped and
/// `source` is decoded as [`base64`] (ignoring ASCII whitespace, missing
/// padding and non-zero trailing bits). Otherwise,
/// `source` itself is the payload.
///
/// # Errors
///
/// See [`EmbeddingError`] for details.
pub fn resolve(
    source: &[u8],
    mime_type: &str,
    files: &impl ByteSource,
) -> Result<Embedding, EmbeddingError> {
    if let Some(name) = str::from_utf8(source).ok().filter(|s| !s.is_empty()) {
        if let Some(data) = files.read_file(name)? {
            return Ok(Embedding {
                mime_type: mime_type.to_owned(),
                data,
            });
        }
    }

    if let Some(mime_type) = mime_type.strip_suffix(BASE64_MARKER) {
        let encoded = source
            .iter()
            .copied()
            .filter(|b| !b.is_ascii_whitespace())
            .collect::<Vec<_>>();
        let data = LENIENT_BASE64.decode(encoded)?;
        return Ok(Embedding {
            mime_type: mime_type.to_owned(),
            data,
        });
    }

    Ok(Embedding {
        mime_type: mime_type.to_owned(),
        data: source.to_vec(),
    })
}
