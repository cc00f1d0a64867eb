use std::io;

use serde::Serialize;
use tokio::io::{AsyncRead, AsyncReadExt};

/// Largest request head accepted, terminator included.
pub const MAX_HEAD_BYTES: usize = 8 * 1024;

const HEAD_TERMINATOR: &[u8] = b"\r\n\r\n";

/// Response status codes used by the status server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200
    Ok,
    /// 204
    NoContent,
    /// 400
    BadRequest,
    /// 404
    NotFound,
    /// 405
    MethodNotAllowed,
    /// 500
    InternalServerError,
}

impl StatusCode {
    /// Numeric code.
    pub fn code(self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::NoContent => 204,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
            StatusCode::MethodNotAllowed => 405,
            StatusCode::InternalServerError => 500,
        }
    }

    /// Reason phrase for the status line.
    pub fn reason(self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::NoContent => "No Content",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
            StatusCode::MethodNotAllowed => "Method Not Allowed",
            StatusCode::InternalServerError => "Internal Server Error",
        }
    }
}

/// Result of reading a request head off a connection.
#[derive(Debug, PartialEq, Eq)]
pub enum Head {
    /// Everything up to and including the blank line.
    Complete(Vec<u8>),
    /// The peer closed before sending the blank line.
    Incomplete,
    /// The head grew past [`MAX_HEAD_BYTES`].
    TooLarge,
}

/// Reads until the end of the request head.
///
/// # Errors
/// Returns error if reading from the connection fails.
pub async fn read_head<R>(reader: &mut R) -> io::Result<Head>
where
    R: AsyncRead + Unpin,
{
    let mut head = Vec::with_capacity(1024);
    let mut chunk = [0u8; 1024];

    loop {
        let n = reader.read(&mut chunk).await?;
        if n == 0 {
            return Ok(Head::Incomplete);
        }

        let search_from = head.len().saturating_sub(HEAD_TERMINATOR.len() - 1);
        head.extend_from_slice(&chunk[..n]);

        if let Some(pos) = find_terminator(&head[search_from..]) {
            head.truncate(search_from + pos + HEAD_TERMINATOR.len());
            return Ok(Head::Complete(head));
        }

        if head.len() > MAX_HEAD_BYTES {
            return Ok(Head::TooLarge);
        }
    }
}

fn find_terminator(bytes: &[u8]) -> Option<usize> {
    bytes
        .windows(HEAD_TERMINATOR.len())
        .position(|window| window == HEAD_TERMINATOR)
}

/// The first line of an HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    /// Request method, e.g. `GET`
    pub method: String,
    /// Request target including any query string
    pub target: String,
    /// Protocol version token
    pub version: String,
}

impl RequestLine {
    /// Parses the request line out of a raw head.
    ///
    /// The head is decoded as ISO-8859-1, so any byte sequence parses into
    /// text; `None` means the line does not have three parts.
    pub fn parse(head: &[u8]) -> Option<Self> {
        let text: String = head.iter().map(|&byte| char::from(byte)).collect();
        let line = text.split("\r\n").next()?;

        let mut parts = line.splitn(3, ' ');
        let method = parts.next().filter(|method| !method.is_empty())?;
        let target = parts.next()?;
        let version = parts.next()?;

        Some(Self {
            method: method.to_string(),
            target: target.to_string(),
            version: version.to_string(),
        })
    }

    /// Target without its query string.
    pub fn path(&self) -> &str {
        self.target
            .split_once('?')
            .map_or(self.target.as_str(), |(path, _)| path)
    }
}

/// A complete response, always sent with `Connection: close`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: StatusCode,
    body: Vec<u8>,
}

impl Response {
    /// Response with no body.
    pub fn empty(status: StatusCode) -> Self {
        Self {
            status,
            body: Vec::new(),
        }
    }

    /// Response with a compact JSON body.
    pub fn json<T: Serialize>(status: StatusCode, value: &T) -> Self {
        Self::encoded(status, serde_json::to_vec(value))
    }

    /// Response with an indented JSON body.
    pub fn json_pretty<T: Serialize>(status: StatusCode, value: &T) -> Self {
        Self::encoded(status, serde_json::to_vec_pretty(value))
    }

    /// `{"error": message}` with the given status.
    pub fn error(status: StatusCode, message: &str) -> Self {
        Self::json(status, &serde_json::json!({ "error": message }))
    }

    /// Response status.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Response body.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Serializes status line, headers and body.
    pub fn to_bytes(&self) -> Vec<u8> {
        let head = format!(
            "HTTP/1.1 {} {}\r\n\
             Content-Type: application/json; charset=utf-8\r\n\
             Access-Control-Allow-Origin: *\r\n\
             Access-Control-Allow-Methods: GET, OPTIONS\r\n\
             Access-Control-Allow-Headers: Content-Type\r\n\
             Content-Length: {}\r\n\
             Connection: close\r\n\
             \r\n",
            self.status.code(),
            self.status.reason(),
            self.body.len()
        );

        let mut bytes = head.into_bytes();
        bytes.extend_from_slice(&self.body);
        bytes
    }

    fn encoded(status: StatusCode, body: serde_json::Result<Vec<u8>>) -> Self {
        match body {
            Ok(body) => Self { status, body },
            Err(_) => Self {
                status: StatusCode::InternalServerError,
                body: br#"{"error":"Internal server error"}"#.to_vec(),
            },
        }
    }
}
