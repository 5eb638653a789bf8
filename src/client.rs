// File: src/client.rs
use crate::config::Config;
use crate::feed::Snapshot;

use futures::future::BoxFuture;
use http::{Request, StatusCode, Uri, header};
use http_body_util::BodyExt;
use hyper_rustls::HttpsConnectorBuilder;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use std::sync::Arc;
use std::time::Duration;

type HttpsClient =
    Client<hyper_rustls::HttpsConnector<hyper_util::client::legacy::connect::HttpConnector>, String>;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("invalid feed URL: {0}")]
    InvalidUrl(String),
    #[error("TLS setup failed: {0}")]
    Tls(String),
    #[error("request failed: {0}")]
    Transport(String),
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("feed returned HTTP {0}")]
    Status(StatusCode),
    #[error("failed to read response body: {0}")]
    Body(String),
    #[error("malformed feed document: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Anything that can produce a fresh snapshot of the feed.
pub trait FeedSource: Send + Sync {
    fn fetch(&self) -> BoxFuture<'_, Result<Snapshot, FeedError>>;
}

impl<S: FeedSource + ?Sized> FeedSource for Arc<S> {
    fn fetch(&self) -> BoxFuture<'_, Result<Snapshot, FeedError>> {
        (**self).fetch()
    }
}

#[derive(Clone, Debug)]
pub struct FeedClient {
    uri: Uri,
    http: HttpsClient,
}

impl FeedClient {
    pub fn new(url: &str, insecure: bool) -> Result<Self, FeedError> {
        let uri: Uri = url
            .parse()
            .map_err(|e: http::uri::InvalidUri| FeedError::InvalidUrl(e.to_string()))?;
        if uri.host().is_none() {
            return Err(FeedError::InvalidUrl(format!("{} has no host", url)));
        }

        let https_connector = if insecure {
            let tls_config = rustls::ClientConfig::builder()
                .dangerous()
                .with_custom_certificate_verifier(Arc::new(NoVerifier))
                .with_no_client_auth();

            HttpsConnectorBuilder::new()
                .with_tls_config(tls_config)
                .https_or_http()
                .enable_http1()
                .build()
        } else {
            let mut root_store = rustls::RootCertStore::empty();
            let result = rustls_native_certs::load_native_certs();
            root_store.add_parsable_certificates(result.certs);

            if root_store.is_empty() {
                return Err(FeedError::Tls("No valid system certificates found.".to_string()));
            }

            let tls_config = rustls::ClientConfig::builder()
                .with_root_certificates(root_store)
                .with_no_client_auth();

            HttpsConnectorBuilder::new()
                .with_tls_config(tls_config)
                .https_or_http()
                .enable_http1()
                .build()
        };

        let http = Client::builder(TokioExecutor::new()).build(https_connector);
        Ok(Self { uri, http })
    }

    pub fn from_config(config: &Config) -> Result<Self, FeedError> {
        Self::new(&config.feed_url, config.allow_insecure_certs)
    }

    pub fn url(&self) -> &Uri {
        &self.uri
    }

    pub async fn get_snapshot(&self) -> Result<Snapshot, FeedError> {
        let req = Request::get(self.uri.clone())
            .header(header::ACCEPT, "application/geo+json, application/json")
            .header(
                header::USER_AGENT,
                concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")),
            )
            .body(String::new())
            .map_err(|e| FeedError::Transport(e.to_string()))?;

        let resp = tokio::time::timeout(REQUEST_TIMEOUT, self.http.request(req))
            .await
            .map_err(|_| FeedError::Timeout(REQUEST_TIMEOUT))?
            .map_err(|e| FeedError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FeedError::Status(status));
        }

        let body = resp
            .into_body()
            .collect()
            .await
            .map_err(|e| FeedError::Body(e.to_string()))?
            .to_bytes();

        let snapshot = Snapshot::from_json(&body)?;
        log::debug!(
            "Fetched {} events from {} ({} bytes)",
            snapshot.len(),
            self.uri,
            body.len()
        );
        Ok(snapshot)
    }
}

impl FeedSource for FeedClient {
    fn fetch(&self) -> BoxFuture<'_, Result<Snapshot, FeedError>> {
        Box::pin(self.get_snapshot())
    }
}

#[derive(Debug)]
struct NoVerifier;
impl rustls::client::danger::ServerCertVerifier for NoVerifier {
    fn verify_server_cert(
        &self,
        _: &rustls::pki_types::CertificateDer<'_>,
        _: &[rustls::pki_types::CertificateDer<'_>],
        _: &rustls::pki_types::ServerName<'_>,
        _: &[u8],
        _: rustls::pki_types::UnixTime,
    ) -> Result<rustls::client::danger::ServerCertVerified, rustls::Error> {
        Ok(rustls::client::danger::ServerCertVerified::assertion())
    }
    fn verify_tls12_signature(
        &self,
        _: &[u8],
        _: &rustls::pki_types::CertificateDer<'_>,
        _: &rustls::DigitallySignedStruct,
    ) -> Result<rustls::client::danger::HandshakeSignatureValid, rustls::Error> {
        Ok(rustls::client::danger::HandshakeSignatureValid::assertion())
    }
    fn verify_tls13_signature(
        &self,
        _: &[u8],
        _: &rustls::pki_types::CertificateDer<'_>,
        _: &rustls::DigitallySignedStruct,
    ) -> Result<rustls::client::danger::HandshakeSignatureValid, rustls::Error> {
        Ok(rustls::client::danger::HandshakeSignatureValid::assertion())
    }
    fn supported_verify_schemes(&self) -> Vec<rustls::SignatureScheme> {
        use rustls::SignatureScheme::*;
        vec![
            RSA_PKCS1_SHA256,
            RSA_PKCS1_SHA384,
            RSA_PKCS1_SHA512,
            ECDSA_NISTP256_SHA256,
            RSA_PSS_SHA256,
            ED25519,
        ]
    }
}
