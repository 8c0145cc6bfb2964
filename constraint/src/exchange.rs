//! Moving a constraint container through the exchange protocol.
//!
//! Entry `i` is labelled `<kind prefix>:<tag>` and its payload is the bincode
//! encoding of the constraint. Entries are written single-freedom first, then
//! multi-freedom, then multi-retained, each in ascending tag order, so the
//! receiver restores every constraint under the tag the sender issued.

use fixity_core::{ConstraintTag, PatternTag};
use fixity_exchange::{
    decode_payload, encode_payload, Exchange, ExchangeConfig, ExchangeResult, FrameBody,
    FrameKind, RecvReport,
};

use crate::constraint::{Constraint, ConstraintKind, ConstraintRef};
use crate::container::ConstraintContainer;

/// Label for one container entry.
pub fn entry_label(kind: ConstraintKind, tag: ConstraintTag) -> String {
    format!("{}:{}", kind.prefix(), tag.raw())
}

/// Inverse of [`entry_label`].
pub fn parse_entry_label(label: &str) -> Option<(ConstraintKind, ConstraintTag)> {
    let (prefix, tag) = label.split_once(':')?;
    let kind = ConstraintKind::from_prefix(prefix)?;
    let tag = tag.parse::<u64>().ok()?;
    Some((kind, ConstraintTag::new(tag)))
}

fn encode_constraint(
    constraint: ConstraintRef<'_>,
    config: &ExchangeConfig,
) -> ExchangeResult<Vec<u8>> {
    match constraint {
        ConstraintRef::Single(c) => encode_payload(c, config),
        ConstraintRef::Multi(c) => encode_payload(c, config),
        ConstraintRef::Retained(c) => encode_payload(c, config),
    }
}

fn decode_constraint(
    kind: ConstraintKind,
    payload: &[u8],
    config: &ExchangeConfig,
) -> ExchangeResult<Constraint> {
    Ok(match kind {
        ConstraintKind::SingleFreedom => Constraint::Single(decode_payload(payload, config)?),
        ConstraintKind::MultiFreedom => Constraint::Multi(decode_payload(payload, config)?),
        ConstraintKind::MultiRetained => Constraint::Retained(decode_payload(payload, config)?),
    })
}

impl ConstraintContainer {
    /// Append one entry per live constraint to `body`, in iteration order.
    pub fn send_entries(
        &self,
        body: &mut FrameBody,
        config: &ExchangeConfig,
    ) -> ExchangeResult<()> {
        for (tag, constraint) in self.iter() {
            let payload = encode_constraint(constraint, config)?;
            body.push_entry(entry_label(constraint.kind(), tag), payload);
        }
        Ok(())
    }

    /// Restore every entry of `body` whose kind is in `allowed`.
    ///
    /// Entries that cannot be rebuilt are recorded in the report and skipped;
    /// the remaining entries are still restored.
    pub fn recv_entries(
        &mut self,
        body: &FrameBody,
        allowed: &[ConstraintKind],
        config: &ExchangeConfig,
    ) -> RecvReport {
        let mut report = RecvReport::new(body.len());

        for (i, label, payload) in body.entries() {
            let Some((kind, tag)) = parse_entry_label(label) else {
                report.fail(Some(i), label, "malformed constraint label");
                continue;
            };
            if !allowed.contains(&kind) {
                report.fail(Some(i), label, format!("{} constraints are not accepted here", kind));
                continue;
            }

            let constraint = match decode_constraint(kind, payload, config) {
                Ok(c) => c,
                Err(e) => {
                    report.fail(Some(i), label, e);
                    continue;
                }
            };
            if let Err(e) = constraint
                .check_shape()
                .and_then(|()| self.restore(tag, constraint))
            {
                report.fail(Some(i), label, e);
            }
        }

        report
    }
}

impl Exchange for ConstraintContainer {
    const KIND: FrameKind = FrameKind::Container;

    fn send_data(&self, config: &ExchangeConfig) -> ExchangeResult<FrameBody> {
        let mut body = FrameBody::new(Self::KIND, self.tag(), self.next_tag().raw());
        self.send_entries(&mut body, config)?;

        let patterns: Vec<PatternTag> = self.active_patterns().collect();
        body.set_trailer_value(&patterns, config)?;
        Ok(body)
    }

    fn recv_data(
        &mut self,
        body: FrameBody,
        config: &ExchangeConfig,
    ) -> ExchangeResult<RecvReport> {
        // The trailer is decoded up front so a broken frame leaves the container untouched.
        let patterns: Vec<PatternTag> = body.trailer_value(config)?;

        self.set_tag(body.owner_tag());
        let report = self.recv_entries(&body, &ConstraintKind::ALL, config);
        self.advance_tag_counter(body.next_tag());
        self.set_active_patterns(patterns);
        Ok(report)
    }
}
