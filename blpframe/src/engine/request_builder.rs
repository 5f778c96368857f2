//! Translate a [`RequestSpec`] into a provider request object.

use blpframe_core::{Params, Request, RequestSpec, Service, Value, names};

/// Build the outbound request for `spec` on `service`.
///
/// No validation happens here; the entry points have already checked the
/// spec. Extra parameters are set verbatim (unknown keys fail on the provider
/// side), overrides are appended only for kinds that accept them.
#[must_use]
pub fn build(spec: &RequestSpec, service: &Service) -> Request {
    let mut req = service.create_request(spec.kind());
    match spec {
        RequestSpec::IntradayBar(s) => {
            req.set(names::REQ_SECURITY, s.security.as_str());
            req.set(names::REQ_EVENT_TYPE, s.event_type.as_str());
            req.set(names::REQ_INTERVAL, s.interval);
            req.set(names::REQ_START_DATE_TIME, s.start);
            req.set(names::REQ_END_DATE_TIME, s.end);
        }
        RequestSpec::IntradayTick(s) => {
            req.set(names::REQ_SECURITY, s.security.as_str());
            for event in s.event_types.iter() {
                req.append(names::REQ_EVENT_TYPES, event);
            }
            req.set(names::REQ_START_DATE_TIME, s.start);
            req.set(names::REQ_END_DATE_TIME, s.end);
            req.set(names::REQ_INCLUDE_CONDITION_CODES, s.include_condition_codes);
        }
        RequestSpec::ReferenceData(s) => {
            for sec in s.securities.iter() {
                req.append(names::REQ_SECURITIES, sec);
            }
            for field in s.fields.iter() {
                req.append(names::REQ_FIELDS, field);
            }
        }
        RequestSpec::HistoricalData(s) => {
            for sec in s.securities.iter() {
                req.append(names::REQ_SECURITIES, sec);
            }
            for field in s.fields.iter() {
                req.append(names::REQ_FIELDS, field);
            }
            req.set(names::REQ_START_DATE, s.start.format("%Y%m%d").to_string());
            req.set(names::REQ_END_DATE, s.end.format("%Y%m%d").to_string());
        }
    }

    for (key, value) in spec.extra_params().iter() {
        req.set(key, value.clone());
    }
    if let Some(overrides) = spec.overrides() {
        for (field_id, value) in overrides.iter() {
            req.append_override(field_id, value.clone());
        }
    }
    req
}

/// Extra tick columns implied by the request options.
///
/// `conditionCodes` comes first when condition codes are requested. Then, in
/// insertion order, every extra parameter named `include<Name>` whose value is
/// `true` adds `<name>` with its first character lower-cased. Each column
/// appears once.
#[must_use]
pub fn tick_extra_columns(include_condition_codes: bool, extra: &Params) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    if include_condition_codes {
        out.push(names::CONDITION_CODES.to_string());
    }
    for (key, value) in extra.iter() {
        if *value != Value::Bool(true) {
            continue;
        }
        let Some(rest) = key.strip_prefix("include") else {
            continue;
        };
        let mut chars = rest.chars();
        let Some(first) = chars.next() else {
            continue;
        };
        let name: String = first.to_lowercase().chain(chars).collect();
        if !out.contains(&name) {
            out.push(name);
        }
    }
    out
}
