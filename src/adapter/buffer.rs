// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Buffering of output arriving before a step is opened.

use std::mem;

use crate::{embedding::Embedding, Formatter};

/// Console writes and [`Embedding`]s held back until a [`Formatter`] may
/// legally receive them.
///
/// Writes and [`Embedding`]s are kept in separate FIFO queues, and are
/// flushed in that order: all the writes first, then all the
/// [`Embedding`]s.
#[derive(Clone, Debug, Default)]
pub(crate) struct OutputBuffer {
    /// Pending console writes.
    writes: Vec<String>,

    /// Pending [`Embedding`]s.
    embeddings: Vec<Embedding>,
}

impl OutputBuffer {
    pub(crate) fn push_write(&mut self, text: String) {
        self.writes.push(text);
    }

    pub(crate) fn push_embedding(&mut self, embedding: Embedding) {
        self.embeddings.push(embedding);
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.writes.is_empty() && self.embeddings.is_empty()
    }

    /// Passes everything buffered to the given [`Formatter`] and clears this
    /// [`OutputBuffer`].
    ///
    /// Does nothing if this [`OutputBuffer`] is empty.
    pub(crate) fn flush(&mut self, formatter: &mut impl Formatter) {
        if self.is_empty() {
            return;
        }
        tracing::debug!(
            writes = self.writes.len(),
            embeddings = self.embeddings.len(),
            "flushing delayed output",
        );

        for text in mem::take(&mut self.writes) {
            formatter.write(&text);
        }
        for emb in mem::take(&mut self.embeddings) {
            formatter.embedding(&emb.mime_type, &emb.data);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::{Call, Recorder};

    fn embedding(data: &[u8]) -> Embedding {
        Embedding {
            mime_type: "text/plain".into(),
            data: data.to_vec(),
        }
    }

    #[test]
    fn flushes_writes_then_embeddings_in_fifo_order() {
        let mut buf = OutputBuffer::default();
        buf.push_embedding(embedding(b"1"));
        buf.push_write("a".into());
        buf.push_embedding(embedding(b"2"));
        buf.push_write("b".into());
        let mut rec = Recorder::new();

        buf.flush(&mut rec);

        assert_eq!(
            rec.into_calls(),
            [
                Call::Write("a".into()),
                Call::Write("b".into()),
                Call::Embedding {
                    mime_type: "text/plain".into(),
                    data: b"1".to_vec(),
                },
                Call::Embedding {
                    mime_type: "text/plain".into(),
                    data: b"2".to_vec(),
                },
            ],
        );
        assert!(buf.is_empty());
    }

    #[test]
    fn flushing_empty_buffer_is_noop() {
        let mut buf = OutputBuffer::default();
        let mut rec = Recorder::new();

        buf.flush(&mut rec);
        buf.push_write("once".into());
        buf.flush(&mut rec);
        buf.flush(&mut rec);

        assert_eq!(rec.into_calls(), [Call::Write("once".into())]);
    }
}
