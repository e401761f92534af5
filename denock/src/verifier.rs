use crate::{
    error::{Error, HeaderDifference, MismatchDifference},
    util, DenockOptions, RequestFacts,
};

const DEFAULT_METHOD: &str = "GET";

/// Checks an observed request against the interception options.
///
/// Dimensions are checked in a fixed order (URL, method, body, headers) and the first
/// one that differs is reported.
pub fn verify_match(
    target_url: &str,
    options: &DenockOptions,
    facts: &RequestFacts,
) -> Result<(), Error> {
    verify_url(target_url, facts)?;
    verify_method(options, facts)?;
    verify_body(options, facts)?;
    verify_headers(options, facts)
}

fn verify_url(target_url: &str, facts: &RequestFacts) -> Result<(), Error> {
    if facts.url != target_url {
        return Err(Error::Mismatch(MismatchDifference::Url {
            expected: target_url.into(),
            actual: facts.url.clone(),
        }));
    }

    Ok(())
}

// fetch sends a GET when no method was given
fn verify_method(options: &DenockOptions, facts: &RequestFacts) -> Result<(), Error> {
    let actual = facts.method.as_deref().unwrap_or(DEFAULT_METHOD);

    match options.method() {
        Some(expected) if actual != expected => Err(Error::Mismatch(MismatchDifference::Method {
            expected: expected.into(),
            actual: actual.into(),
        })),
        _ => Ok(()),
    }
}

fn verify_body(options: &DenockOptions, facts: &RequestFacts) -> Result<(), Error> {
    match options.body() {
        Some(expected) if facts.body.as_deref() != Some(expected) => {
            Err(Error::Mismatch(MismatchDifference::Body {
                expected: expected.into(),
                actual: facts.body.clone(),
            }))
        }
        _ => Ok(()),
    }
}

// Extra observed headers are fine, only the declared ones have to be there.
fn verify_headers(options: &DenockOptions, facts: &RequestFacts) -> Result<(), Error> {
    let expected_headers = match options.headers() {
        Some(headers) => headers,
        None => return Ok(()),
    };

    let observed = facts
        .headers
        .as_ref()
        .map(util::lowercase_names)
        .unwrap_or_default();

    let mut expected_headers = expected_headers.iter().collect::<Vec<_>>();
    expected_headers.sort();

    for (name, expected_value) in expected_headers {
        let actual_value = observed.get(&name.to_lowercase());

        if actual_value != Some(&expected_value) {
            return Err(Error::Mismatch(MismatchDifference::Header(
                HeaderDifference {
                    header_name: name.clone(),
                    expected_value: expected_value.clone(),
                    actual_value: actual_value.map(|value| String::from(value.as_str())),
                },
            )));
        }
    }

    Ok(())
}
