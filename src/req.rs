use anyhow::{Context, Result};
use std::collections::HashMap;
use tokio::io::{AsyncRead, AsyncReadExt};

const MAX_REQUEST_BYTES: usize = 64 * 1024;

#[derive(Debug, PartialEq, Eq)]
pub enum Method {
    GET,
    POST,
    PUT,
    DELETE,
    /// Any method no route serves; it falls through to the 404 arm.
    Other(String),
}

impl From<&str> for Method {
    fn from(value: &str) -> Self {
        match value {
            "GET" => Method::GET,
            "POST" => Method::POST,
            "PUT" => Method::PUT,
            "DELETE" => Method::DELETE,
            other => Method::Other(other.to_string()),
        }
    }
}

pub struct Request {
    pub method: Method,
    pub path: String,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl Request {
    /// Reads a single request from `reader`, honouring `Content-Length` for the body.
    pub async fn new<Reader>(mut reader: Reader) -> Result<Self>
    where
        Reader: AsyncRead + Unpin,
    {
        let mut raw = Vec::new();
        let mut buffer = [0; 1024];
        loop {
            let size = reader.read(&mut buffer).await.context("Read Error")?;
            if size == 0 {
                break;
            }
            raw.extend_from_slice(&buffer[..size]);
            if let Some(expected) = expected_len(&raw)? {
                if raw.len() >= expected {
                    break;
                }
            }
            if raw.len() > MAX_REQUEST_BYTES {
                anyhow::bail!("Request too large");
            }
        }
        Self::parse(&String::from_utf8_lossy(&raw))
    }

    pub fn parse(request: &str) -> Result<Self> {
        let (head, body) = request.split_once("\r\n\r\n").unwrap_or((request, ""));

        // Method and path
        let mut head_line = head.lines();
        let first = head_line.next().context("Empty Request")?;
        let mut request_parts = first.split_whitespace();
        let method: Method = request_parts.next().context("Missing Method")?.into();
        let target = request_parts.next().context("No Path")?;
        let path = target.split('?').next().unwrap_or(target);

        // Headers
        let mut headers = HashMap::new();
        for line in head_line {
            if let Some((k, v)) = line.split_once(":") {
                headers.insert(k.trim().to_lowercase(), v.trim().to_string());
            }
        }
        Ok(Request {
            method,
            path: path.into(),
            headers,
            body: body.into(),
        })
    }
}

/// Total request size once the head is in, or `None` while headers are still arriving.
fn expected_len(raw: &[u8]) -> Result<Option<usize>> {
    let Some(head_end) = raw.windows(4).position(|w| w == b"\r\n\r\n") else {
        return Ok(None);
    };
    let head = String::from_utf8_lossy(&raw[..head_end]);
    let content_length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(k, _)| k.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.trim().parse::<usize>().ok())
        .unwrap_or(0);
    if content_length > MAX_REQUEST_BYTES {
        anyhow::bail!("Content-Length {} exceeds limit", content_length);
    }
    Ok(Some(head_end + 4 + content_length))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn parses_request_with_body() {
        let body = r#"{"firstName":"dan"}"#;
        let raw = format!(
            "POST /account?x=1 HTTP/1.1\r\nHost: localhost\r\nContent-Length: {}\r\n\r\n{}",
            body.len(),
            body
        );

        let request = Request::new(raw.as_bytes()).await.unwrap();

        assert_eq!(request.method, Method::POST);
        assert_eq!(request.path, "/account");
        assert_eq!(request.headers.get("host").unwrap(), "localhost");
        assert_eq!(request.body, body);
    }

    #[tokio::test]
    async fn parses_request_without_body() {
        let request = Request::new(&b"DELETE /account/3 HTTP/1.1\r\n\r\n"[..])
            .await
            .unwrap();

        assert_eq!(request.method, Method::DELETE);
        assert_eq!(request.path, "/account/3");
        assert!(request.body.is_empty());
    }

    #[tokio::test]
    async fn keeps_unknown_method() {
        let request = Request::new(&b"PATCH /account HTTP/1.1\r\n\r\n"[..])
            .await
            .unwrap();

        assert_eq!(request.method, Method::Other("PATCH".to_string()));
        assert_eq!(request.path, "/account");
    }

    #[tokio::test]
    async fn rejects_empty_request() {
        assert!(Request::new(&b""[..]).await.is_err());
    }

    #[test]
    fn expected_len_waits_for_declared_body() {
        assert_eq!(expected_len(b"GET / HTTP/1.1\r\n").unwrap(), None);

        let partial = b"POST / HTTP/1.1\r\nContent-Length: 4\r\n\r\nab";
        let expected = expected_len(partial).unwrap().unwrap();
        assert!(partial.len() < expected);
        assert_eq!(expected, partial.len() + 2);
    }

    #[test]
    fn oversized_content_length_is_rejected() {
        let raw = b"POST / HTTP/1.1\r\nContent-Length: 18446744073709551615\r\n\r\n";

        assert!(expected_len(raw).is_err());
    }

    #[tokio::test]
    async fn oversized_request_fails_to_read() {
        let raw = format!(
            "POST /account HTTP/1.1\r\nContent-Length: {}\r\n\r\n{{}}",
            MAX_REQUEST_BYTES + 1
        );

        assert!(Request::new(raw.as_bytes()).await.is_err());
    }
}
