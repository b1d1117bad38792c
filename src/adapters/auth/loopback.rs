use std::collections::HashMap;

use error_stack::{report, ResultExt};
use rand::{distributions::Alphanumeric, Rng};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use url::Url;

use crate::ports::credentials::AuthError;

const STATE_LEN: usize = 30;

const SUCCESS_RESPONSE: &str = "HTTP/1.1 200 OK\r\n\
    Content-Type: text/html\r\n\
    Connection: close\r\n\
    \r\n\
    <html><body>\
    <h1>Authorization complete</h1>\
    <p>You can close this window and return to the terminal.</p>\
    </body></html>";

const FAILURE_RESPONSE: &str = "HTTP/1.1 400 Bad Request\r\n\
    Content-Type: text/html\r\n\
    Connection: close\r\n\
    \r\n\
    <html><body><h1>Authorization failed</h1></body></html>";

const NOT_FOUND_RESPONSE: &str = "HTTP/1.1 404 Not Found\r\nConnection: close\r\n\r\n";

pub fn random_state() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(STATE_LEN)
        .map(char::from)
        .collect()
}

pub fn redirect_uri(port: u16) -> String {
    format!("http://localhost:{}/", port)
}

/// Google consent page for an installed application asking for offline access.
pub fn consent_url(
    auth_uri: &str,
    client_id: &str,
    redirect_uri: &str,
    scopes: &[String],
    state: &str,
) -> error_stack::Result<Url, AuthError> {
    let scope = scopes.join(" ");
    Url::parse_with_params(
        auth_uri,
        &[
            ("client_id", client_id),
            ("redirect_uri", redirect_uri),
            ("response_type", "code"),
            ("scope", scope.as_str()),
            ("access_type", "offline"),
            ("prompt", "consent"),
            ("state", state),
        ],
    )
    .change_context(AuthError::authorization_failed("invalid auth URI"))
    .attach_printable_lazy(|| format!("auth_uri: {}", auth_uri))
}

/// Extracts the authorization code from the request line of a redirect, e.g.
/// `GET /?state=..&code=.. HTTP/1.1`. Requests carrying neither a code nor an error (such as the
/// browser asking for a favicon) yield `None`.
pub fn parse_callback(
    request_line: &str,
    expected_state: &str,
) -> error_stack::Result<Option<String>, AuthError> {
    let target = request_line
        .split_whitespace()
        .nth(1)
        .ok_or_else(|| report!(AuthError::authorization_failed("invalid HTTP request")))?;

    let url = Url::parse(&format!("http://localhost{}", target))
        .change_context(AuthError::authorization_failed("invalid callback URL"))?;

    let params: HashMap<String, String> = url.query_pairs().into_owned().collect();

    if let Some(error) = params.get("error") {
        return Err(report!(AuthError::authorization_failed(format!(
            "consent refused: {}",
            error
        ))));
    }

    let Some(code) = params.get("code") else {
        return Ok(None);
    };

    if params.get("state").map(String::as_str) != Some(expected_state) {
        return Err(report!(AuthError::authorization_failed(
            "state mismatch in callback"
        )));
    }

    Ok(Some(code.clone()))
}

/// Serves redirects on `listener` until one carries the authorization code.
pub async fn wait_for_callback(
    listener: &TcpListener,
    expected_state: &str,
) -> error_stack::Result<String, AuthError> {
    loop {
        let (stream, _) = listener
            .accept()
            .await
            .change_context(AuthError::authorization_failed(
                "failed to accept callback",
            ))?;

        let mut reader = BufReader::new(stream);
        let mut request_line = String::new();
        reader
            .read_line(&mut request_line)
            .await
            .change_context(AuthError::authorization_failed(
                "failed to read callback request",
            ))?;

        let outcome = parse_callback(&request_line, expected_state);
        let response = match &outcome {
            Ok(Some(_)) => SUCCESS_RESPONSE,
            Ok(None) => NOT_FOUND_RESPONSE,
            Err(_) => FAILURE_RESPONSE,
        };

        let mut stream = reader.into_inner();
        if let Err(e) = stream.write_all(response.as_bytes()).await {
            tracing::warn!("Could not answer the browser: {}", e);
        }
        let _ = stream.flush().await;

        if let Some(code) = outcome? {
            return Ok(code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncReadExt;
    use tokio::net::TcpStream;

    #[test]
    fn test_random_state() {
        let state = random_state();
        assert_eq!(state.len(), STATE_LEN);
        assert!(state.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(state, random_state());
    }

    #[test]
    fn test_consent_url() {
        let url = consent_url(
            "https://accounts.google.com/o/oauth2/auth",
            "client.apps.googleusercontent.com",
            &redirect_uri(8080),
            &["https://www.googleapis.com/auth/spreadsheets".to_string()],
            "xyz",
        )
        .unwrap();

        let params: HashMap<String, String> = url.query_pairs().into_owned().collect();
        assert_eq!(url.host_str(), Some("accounts.google.com"));
        assert_eq!(params["redirect_uri"], "http://localhost:8080/");
        assert_eq!(params["response_type"], "code");
        assert_eq!(
            params["scope"],
            "https://www.googleapis.com/auth/spreadsheets"
        );
        assert_eq!(params["access_type"], "offline");
        assert_eq!(params["state"], "xyz");
    }

    #[test]
    fn test_consent_url_rejects_relative_auth_uri() {
        assert!(consent_url("not a url", "id", "http://localhost:1/", &[], "s").is_err());
    }

    #[test]
    fn test_parse_callback_code() {
        let code = parse_callback("GET /?state=abc&code=4%2F0Ab&scope=x HTTP/1.1\r\n", "abc")
            .unwrap();
        assert_eq!(code.as_deref(), Some("4/0Ab"));
    }

    #[test]
    fn test_parse_callback_ignores_other_requests() {
        assert_eq!(
            parse_callback("GET /favicon.ico HTTP/1.1\r\n", "abc").unwrap(),
            None
        );
    }

    #[test]
    fn test_parse_callback_state_mismatch() {
        assert!(parse_callback("GET /?state=evil&code=123 HTTP/1.1", "abc").is_err());
        assert!(parse_callback("GET /?code=123 HTTP/1.1", "abc").is_err());
    }

    #[test]
    fn test_parse_callback_consent_refused() {
        let report = parse_callback("GET /?error=access_denied&state=abc HTTP/1.1", "abc")
            .unwrap_err();
        assert!(format!("{}", report.current_context()).contains("access_denied"));
    }

    #[test]
    fn test_parse_callback_garbage() {
        assert!(parse_callback("", "abc").is_err());
    }

    #[tokio::test]
    async fn test_wait_for_callback_skips_favicon() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let browser = tokio::spawn(async move {
            let mut responses = Vec::new();
            for request in [
                "GET /favicon.ico HTTP/1.1\r\n\r\n",
                "GET /?state=s1&code=the-code HTTP/1.1\r\n\r\n",
            ] {
                let mut stream = TcpStream::connect(addr).await.unwrap();
                stream.write_all(request.as_bytes()).await.unwrap();
                let mut response = String::new();
                stream.read_to_string(&mut response).await.unwrap();
                responses.push(response);
            }
            responses
        });

        let code = wait_for_callback(&listener, "s1").await.unwrap();
        assert_eq!(code, "the-code");

        let responses = browser.await.unwrap();
        assert!(responses[0].starts_with("HTTP/1.1 404"));
        assert!(responses[1].starts_with("HTTP/1.1 200"));
    }
}
