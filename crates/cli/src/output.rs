use ferrous_lookup_application::ports::{ResultSink, TransactionOutcome, TransactionReport};
use std::io::Write;
use std::sync::Mutex;

/// Prints each terminal notification as it arrives: results to `out`,
/// skipped-record faults to `err`.
pub struct PrintSink<W, E> {
    out: Mutex<W>,
    err: Mutex<E>,
}

impl<W: Write, E: Write> PrintSink<W, E> {
    pub fn new(out: W, err: E) -> Self {
        Self {
            out: Mutex::new(out),
            err: Mutex::new(err),
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> (W, E) {
        let out = self.out.into_inner().unwrap_or_else(|e| e.into_inner());
        let err = self.err.into_inner().unwrap_or_else(|e| e.into_inner());
        (out, err)
    }

    fn render(&self, name: &str, outcome: &TransactionOutcome) -> std::io::Result<()> {
        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());

        match outcome {
            TransactionOutcome::Addresses(addresses) if addresses.is_empty() => {
                writeln!(out, "OK: {} (no matching addresses)", name)?;
            }
            TransactionOutcome::Addresses(addresses) => {
                for address in addresses {
                    writeln!(
                        out,
                        "OK: {} {} {}",
                        name,
                        address.family,
                        address.presentation()
                    )?;
                }
            }
            TransactionOutcome::Records(decoded) => {
                for record in &decoded.records {
                    writeln!(
                        out,
                        "rrname={} rrtype={} rdata={}",
                        record.owner,
                        record.type_mnemonic(),
                        record.rdata_hex()
                    )?;
                }
                let mut err = self.err.lock().unwrap_or_else(|e| e.into_inner());
                for fault in &decoded.faults {
                    writeln!(err, "FAULT: {}: {}", name, fault)?;
                }
            }
            TransactionOutcome::Failed(failure) => {
                writeln!(out, "FAIL: {}: {}", name, failure)?;
            }
            TransactionOutcome::Cancelled => {
                writeln!(out, "FAIL: {}: cancelled", name)?;
            }
            TransactionOutcome::TransportError(failure) => {
                writeln!(out, "FAIL: {}: {}", name, failure)?;
            }
        }
        out.flush()
    }

    pub fn submission_failed(&self, name: &str, reason: &dyn std::fmt::Display) {
        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        let _ = writeln!(out, "FAIL: {}: {}", name, reason);
    }
}

impl<C, W: Write, E: Write> ResultSink<C> for PrintSink<W, E> {
    fn deliver(&self, report: TransactionReport<'_, C>) {
        if let Err(e) = self.render(&report.context.name, &report.outcome) {
            tracing::warn!(id = %report.id, error = %e, "Failed to print result");
        }
    }
}
