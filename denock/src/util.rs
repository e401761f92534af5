use crate::error::Error;
use hyper::{
    header::{HeaderName, HeaderValue},
    HeaderMap,
};
use std::collections::HashMap;

/// Flattens a `HeaderMap` into name/value pairs. Repeated names are joined with `", "`,
/// and opaque bytes are decoded lossily instead of dropping the header.
pub fn extract_headers(header_map: &HeaderMap) -> HashMap<String, String> {
    header_map
        .keys()
        .map(|name| {
            let joined = header_map
                .get_all(name)
                .iter()
                .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
                .collect::<Vec<_>>()
                .join(", ");

            (String::from(name.as_str()), joined)
        })
        .collect()
}

pub fn put_headers<'a, I: IntoIterator<Item = (&'a String, &'a String)>>(
    header_map: &mut HeaderMap<HeaderValue>,
    headers: I,
) -> Result<(), Error> {
    for (key, value) in headers {
        let header_name = HeaderName::from_lowercase(key.to_lowercase().as_bytes())?;
        let header_value = HeaderValue::from_str(value)?;
        header_map.append(header_name, header_value);
    }

    Ok(())
}

pub fn lowercase_names(headers: &HashMap<String, String>) -> HashMap<String, &String> {
    headers
        .iter()
        .map(|(name, value)| (name.to_lowercase(), value))
        .collect()
}
