//! Moving hypotheses and the registry through the exchange protocol.
//!
//! A registry frame carries one entry per hypothesis: the label is the name and
//! the payload is that hypothesis's own nested frame. The trailer is the name
//! of the current selection, if any.

use fixity_constraint::ConstraintKind;
use fixity_exchange::{
    decode_nested, encode_nested, Exchange, ExchangeConfig, ExchangeResult, FrameBody, FrameKind,
    RecvReport,
};

use crate::hypothesis::Hypothesis;
use crate::registry::HypothesisRegistry;

impl Exchange for Hypothesis {
    const KIND: FrameKind = FrameKind::Hypothesis;

    fn send_data(&self, config: &ExchangeConfig) -> ExchangeResult<FrameBody> {
        let constraints = self.constraints();
        let mut body = FrameBody::new(Self::KIND, self.tag().raw(), constraints.next_tag().raw());
        constraints.send_entries(&mut body, config)?;
        body.set_trailer_value(&(), config)?;
        Ok(body)
    }

    /// Fixities are added to this hypothesis; its own tag is kept, since the
    /// receiving registry issues hypothesis tags itself. The trailer must be empty.
    fn recv_data(
        &mut self,
        body: FrameBody,
        config: &ExchangeConfig,
    ) -> ExchangeResult<RecvReport> {
        body.trailer_value::<()>(config)?;
        let constraints = self.constraints_mut();
        let report = constraints.recv_entries(&body, &[ConstraintKind::SingleFreedom], config);
        constraints.advance_tag_counter(body.next_tag());
        Ok(report)
    }
}

impl Exchange for HypothesisRegistry {
    const KIND: FrameKind = FrameKind::Registry;

    fn send_data(&self, config: &ExchangeConfig) -> ExchangeResult<FrameBody> {
        let mut body = FrameBody::new(Self::KIND, self.tag(), self.next_tag().raw());
        for (name, hypothesis) in self.iter() {
            body.push_entry(name, encode_nested(hypothesis, config)?);
        }
        body.set_trailer_value(&self.current_name(), config)?;
        Ok(body)
    }

    fn recv_data(
        &mut self,
        body: FrameBody,
        config: &ExchangeConfig,
    ) -> ExchangeResult<RecvReport> {
        let current: Option<String> = body.trailer_value(config)?;

        self.set_tag(body.owner_tag());
        let mut report = RecvReport::new(body.len());

        for (i, name, payload) in body.entries() {
            let Some(hypothesis) = self.create(name) else {
                report.fail(Some(i), name, "no hypothesis could be created for this label");
                continue;
            };
            match decode_nested(hypothesis, payload, config) {
                Ok(nested) => report.absorb_nested(i, name, nested),
                Err(e) => report.fail(Some(i), name, e),
            }
        }

        self.advance_tag_counter(body.next_tag());

        match current {
            Some(name) => {
                if !self.set_current(&name) {
                    report.fail(None, name, "current hypothesis is not in the registry");
                }
            }
            None => self.clear_current(),
        }
        Ok(report)
    }
}
