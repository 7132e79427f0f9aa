//! DecisionReader: fetch a payload from a source and decode it.
//!
//! This is where logging happens. The decision value and the codec stay
//! silent; the reader reports what came in and how it was judged.

use tracing::{debug, info, warn};

use crate::domain::decision::TerminationDecision;
use crate::domain::errors::DecisionError;
use crate::ports::PayloadSource;
use crate::typed::{DecodeOptions, PayloadCodec, StructuredResponse};

pub struct DecisionReader<S> {
    source: S,
    codec: PayloadCodec,
}

impl<S: PayloadSource> DecisionReader<S> {
    pub fn new(source: S, options: DecodeOptions) -> Self {
        Self {
            source,
            codec: PayloadCodec::new(options),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn codec(&self) -> &PayloadCodec {
        &self.codec
    }

    /// Fetch one payload and decode it as a termination decision.
    pub async fn read(&self) -> Result<TerminationDecision, DecisionError> {
        let decision: TerminationDecision = self.read_as().await?;
        info!(
            source = %self.source.describe(),
            should_terminate = decision.should_terminate(),
            reason = decision.termination_reason(),
            "termination decision decoded"
        );
        Ok(decision)
    }

    /// Fetch one payload and decode it as any structured response.
    pub async fn read_as<T: StructuredResponse>(&self) -> Result<T, DecisionError> {
        let label = self.source.describe();
        let bytes = self.source.fetch().await.map_err(|e| {
            warn!(source = %label, error = %e, "payload source failed");
            DecisionError::from(e)
        })?;

        debug!(
            source = %label,
            response = T::NAME,
            bytes = bytes.len(),
            extraction = ?self.codec.options().extraction,
            "decoding payload"
        );

        self.codec.decode_slice(&bytes).map_err(|e| {
            warn!(
                source = %label,
                response = T::NAME,
                field = e.field(),
                error = %e,
                "malformed payload"
            );
            e
        })
    }
}
