use ferrous_lookup_domain::name::wire_to_fqdn;
use ferrous_lookup_domain::response::fields;
use ferrous_lookup_domain::{
    DecodeFault, DecodedRecord, DecodedRecords, QueryFailure, RecordFault, ResponseValue,
};
use tracing::debug;

/// Decodes the answer section of every reply in `replies_tree`.
///
/// Only a missing or ill-typed `replies_tree` fails the whole decode. A reply
/// without a usable answer list, or a record missing one of its fields, is
/// skipped and recorded in `faults`; everything else is still decoded.
pub fn decode_records(raw: &ResponseValue) -> Result<DecodedRecords, QueryFailure> {
    let replies = raw.list_field(fields::REPLIES_TREE)?;
    let mut decoded = DecodedRecords::default();

    for (reply_index, reply) in replies.iter().enumerate() {
        let answers = match reply.list_field(fields::ANSWER) {
            Ok(answers) => answers,
            Err(fault) => {
                debug!(reply = reply_index, fault = %fault, "Skipping reply");
                decoded.faults.push(RecordFault {
                    reply: reply_index,
                    record: None,
                    fault,
                });
                continue;
            }
        };

        for (record_index, record) in answers.iter().enumerate() {
            match decode_record(record) {
                Ok(record) => decoded.records.push(record),
                Err(fault) => {
                    debug!(
                        reply = reply_index,
                        record = record_index,
                        fault = %fault,
                        "Skipping record"
                    );
                    decoded.faults.push(RecordFault {
                        reply: reply_index,
                        record: Some(record_index),
                        fault,
                    });
                }
            }
        }
    }

    Ok(decoded)
}

fn decode_record(record: &ResponseValue) -> Result<DecodedRecord, DecodeFault> {
    let owner = wire_to_fqdn(record.bytes_field(fields::NAME)?).map_err(DecodeFault::MalformedName)?;

    let type_value = record.int_field(fields::TYPE)?;
    let type_code = u16::try_from(type_value).map_err(|_| DecodeFault::OutOfRange {
        field: fields::TYPE,
        value: type_value,
    })?;

    let rdata = record
        .dict_field(fields::RDATA)?
        .bytes_field(fields::RDATA_RAW)?
        .to_vec();

    Ok(DecodedRecord {
        owner,
        type_code,
        rdata,
    })
}
