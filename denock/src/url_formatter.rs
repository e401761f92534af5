use crate::DenockOptions;

/// Builds `protocol://host[:port]path[?k1=v1&k2=v2]` from the options.
///
/// Query values are inserted verbatim, nothing gets percent-encoded.
pub fn format_target_url(options: &DenockOptions) -> String {
    let query = options
        .query_params()
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("&");

    let mut url = format!("{}://{}", options.protocol(), options.host());

    if let Some(port) = options.port() {
        url.push_str(&format!(":{}", port));
    }

    url.push_str(options.path());

    if !query.is_empty() {
        url.push('?');
        url.push_str(&query);
    }

    url
}
