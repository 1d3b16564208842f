//! HTTPS connector using rustls.

use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::client::legacy::connect::HttpConnector;

use crate::config::PoolConfig;

/// Create the connector used by [`crate::HyperClient`].
///
/// TLS uses the Mozilla root certificates from `webpki-roots`. Plain HTTP
/// stays allowed so the client can target local mock servers; the default
/// API base URL is HTTPS. HTTP/1.1 and HTTP/2 are negotiated via ALPN.
#[must_use]
pub(crate) fn https_connector(pool: &PoolConfig) -> HttpsConnector<HttpConnector> {
    let roots: rustls::RootCertStore = webpki_roots::TLS_SERVER_ROOTS.iter().cloned().collect();
    let tls = rustls::ClientConfig::builder()
        .with_root_certificates(roots)
        .with_no_client_auth();

    // TCP keepalive follows the pool so idle sockets are probed before reuse
    let mut tcp = HttpConnector::new();
    tcp.enforce_http(false);
    tcp.set_nodelay(true);
    tcp.set_keepalive(Some(pool.idle_timeout));

    HttpsConnectorBuilder::new()
        .with_tls_config(tls)
        .https_or_http()
        .enable_http1()
        .enable_http2()
        .wrap_connector(tcp)
}

#[cfg(test)]
mod tests {
    use tower_service::Service;

    use super::*;

    #[test]
    fn connector_accepts_plain_http() {
        let mut connector = https_connector(&PoolConfig::default());
        let waker = futures_util::task::noop_waker();
        let mut cx = std::task::Context::from_waker(&waker);
        assert!(connector.poll_ready(&mut cx).is_ready());
    }
}
