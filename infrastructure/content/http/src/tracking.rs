use analytics_command_handlers::TrackViewHandler;
use analytics_commands::TrackViewCommand;
use analytics_models::{ViewMetadata, ViewTarget};
use axum::http::HeaderMap;
use dao_utils::spawn_detached;

fn header_str(headers: &HeaderMap, name: &str) -> Option<String> {
    headers.get(name)?.to_str().ok().map(str::to_string)
}

/// Best-effort request metadata for a view event. The client address is the
/// first hop of `x-forwarded-for`, falling back to `x-real-ip`; country and
/// city come from the CDN's geo headers when present.
pub(crate) fn view_metadata(headers: &HeaderMap) -> ViewMetadata {
    let ip_address = header_str(headers, "x-forwarded-for")
        .and_then(|chain| {
            chain
                .split(',')
                .next()
                .map(str::trim)
                .filter(|ip| !ip.is_empty())
                .map(str::to_string)
        })
        .or_else(|| header_str(headers, "x-real-ip"));

    ViewMetadata {
        ip_address,
        user_agent: header_str(headers, "user-agent"),
        referrer: header_str(headers, "referer"),
        country: header_str(headers, "cf-ipcountry"),
        city: header_str(headers, "cf-ipcity"),
    }
}

/// Records the view on a detached task. The response never waits for the
/// recorder and never observes its failure.
pub(crate) fn dispatch_view(
    recorder: &TrackViewHandler, target: ViewTarget, headers: &HeaderMap,
) {
    let recorder = recorder.clone();
    let command = TrackViewCommand {
        target,
        metadata: view_metadata(headers),
    };
    spawn_detached("track-view", async move {
        recorder.execute(command).await
    });
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn forwarded_chain_yields_first_hop() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.9, 10.0.0.1"),
        );
        headers.insert("x-real-ip", HeaderValue::from_static("10.0.0.1"));

        let metadata = view_metadata(&headers);
        assert_eq!(metadata.ip_address.as_deref(), Some("203.0.113.9"));
    }

    #[test]
    fn real_ip_used_when_no_forwarded_header() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.4"));
        headers.insert("user-agent", HeaderValue::from_static("curl/8.5"));
        headers.insert("referer", HeaderValue::from_static("https://a.example"));

        let metadata = view_metadata(&headers);
        assert_eq!(metadata.ip_address.as_deref(), Some("198.51.100.4"));
        assert_eq!(metadata.user_agent.as_deref(), Some("curl/8.5"));
        assert_eq!(metadata.referrer.as_deref(), Some("https://a.example"));
    }

    #[test]
    fn bare_request_yields_empty_metadata() {
        let metadata = view_metadata(&HeaderMap::new());
        assert_eq!(metadata, ViewMetadata::default());
    }
}
