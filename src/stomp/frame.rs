//! STOMP 1.2 frame model and text codec.

use std::fmt;
use std::str::FromStr;

use super::error::{Result, StompError};

/// A STOMP frame command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameCommand {
    // Connection frames
    Connect,
    Stomp,
    Connected,

    // Client frames
    Send,
    Subscribe,
    Unsubscribe,
    Ack,
    Nack,
    Begin,
    Commit,
    Abort,
    Disconnect,

    // Server frames
    Message,
    Receipt,
    Error,
}

impl FrameCommand {
    /// Every command, in protocol order.
    pub const ALL: [FrameCommand; 15] = [
        FrameCommand::Connect,
        FrameCommand::Stomp,
        FrameCommand::Connected,
        FrameCommand::Send,
        FrameCommand::Subscribe,
        FrameCommand::Unsubscribe,
        FrameCommand::Ack,
        FrameCommand::Nack,
        FrameCommand::Begin,
        FrameCommand::Commit,
        FrameCommand::Abort,
        FrameCommand::Disconnect,
        FrameCommand::Message,
        FrameCommand::Receipt,
        FrameCommand::Error,
    ];

    /// The wire name of the command.
    pub fn as_str(&self) -> &'static str {
        match self {
            FrameCommand::Connect => "CONNECT",
            FrameCommand::Stomp => "STOMP",
            FrameCommand::Connected => "CONNECTED",
            FrameCommand::Send => "SEND",
            FrameCommand::Subscribe => "SUBSCRIBE",
            FrameCommand::Unsubscribe => "UNSUBSCRIBE",
            FrameCommand::Ack => "ACK",
            FrameCommand::Nack => "NACK",
            FrameCommand::Begin => "BEGIN",
            FrameCommand::Commit => "COMMIT",
            FrameCommand::Abort => "ABORT",
            FrameCommand::Disconnect => "DISCONNECT",
            FrameCommand::Message => "MESSAGE",
            FrameCommand::Receipt => "RECEIPT",
            FrameCommand::Error => "ERROR",
        }
    }

    /// Whether header values are escaped for this command.
    ///
    /// CONNECT and CONNECTED frames are exempt.
    fn escapes_headers(&self) -> bool {
        !matches!(self, FrameCommand::Connect | FrameCommand::Connected)
    }
}

impl fmt::Display for FrameCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FrameCommand {
    type Err = StompError;

    fn from_str(s: &str) -> Result<Self> {
        FrameCommand::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| StompError::UnknownCommand(s.to_string()))
    }
}

/// A single STOMP frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// The frame command.
    pub command: FrameCommand,
    /// Headers in wire order. Repeated names are kept.
    pub headers: Vec<(String, String)>,
    /// The frame body.
    pub body: String,
}

impl Frame {
    /// Create a frame with no headers and an empty body.
    pub fn new(command: FrameCommand) -> Self {
        Self {
            command,
            headers: Vec::new(),
            body: String::new(),
        }
    }

    /// Append a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set the body.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Look up a header. The first occurrence wins.
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Headers joined as `name: value, ...` for display.
    pub fn headers_summary(&self) -> String {
        summarize_headers(&self.headers)
    }

    /// Encode the frame for the wire, including the trailing NUL.
    pub fn encode(&self) -> String {
        let escape = self.command.escapes_headers();
        let mut out = String::with_capacity(self.body.len() + 64);
        out.push_str(self.command.as_str());
        out.push('\n');
        for (name, value) in &self.headers {
            if escape {
                out.push_str(&escape_header(name));
                out.push(':');
                out.push_str(&escape_header(value));
            } else {
                out.push_str(name);
                out.push(':');
                out.push_str(value);
            }
            out.push('\n');
        }
        out.push('\n');
        out.push_str(&self.body);
        out.push('\0');
        out
    }

    /// Decode every frame in `input`, skipping heart-beat line endings.
    pub fn decode_all(input: &str) -> Result<Vec<Frame>> {
        let mut frames = Vec::new();
        let mut rest = input;
        loop {
            rest = rest.trim_start_matches(['\r', '\n']);
            if rest.is_empty() {
                return Ok(frames);
            }
            let (frame, remaining) = decode_one(rest)?;
            frames.push(frame);
            rest = remaining;
        }
    }
}

/// Join headers as `name: value, ...`.
pub fn summarize_headers(headers: &[(String, String)]) -> String {
    headers
        .iter()
        .map(|(k, v)| format!("{}: {}", k, v))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Split off one line, dropping the `\n` and an optional `\r`.
fn split_line(input: &str) -> Result<(&str, &str)> {
    let end = input
        .find('\n')
        .ok_or_else(|| StompError::MalformedFrame("unterminated line".to_string()))?;
    let line = &input[..end];
    Ok((line.strip_suffix('\r').unwrap_or(line), &input[end + 1..]))
}

fn decode_one(input: &str) -> Result<(Frame, &str)> {
    let (command_line, mut rest) = split_line(input)?;
    let command: FrameCommand = command_line.parse()?;
    let escape = command.escapes_headers();

    let mut headers = Vec::new();
    loop {
        let (line, remaining) = split_line(rest)?;
        rest = remaining;
        if line.is_empty() {
            break;
        }
        let (name, value) = line
            .split_once(':')
            .ok_or_else(|| StompError::MalformedFrame(format!("header without colon: {}", line)))?;
        if escape {
            headers.push((unescape_header(name)?, unescape_header(value)?));
        } else {
            headers.push((name.to_string(), value.to_string()));
        }
    }

    let content_length = headers
        .iter()
        .find(|(k, _)| k == "content-length")
        .map(|(_, v)| {
            v.trim()
                .parse::<usize>()
                .map_err(|_| StompError::MalformedFrame(format!("bad content-length: {}", v)))
        })
        .transpose()?;

    let (body, remaining) = match content_length {
        Some(len) => {
            let body = rest
                .get(..len)
                .ok_or_else(|| StompError::MalformedFrame("body shorter than content-length".to_string()))?;
            let after = &rest[len..];
            let remaining = after
                .strip_prefix('\0')
                .ok_or_else(|| StompError::MalformedFrame("missing NUL after body".to_string()))?;
            (body, remaining)
        }
        None => {
            let end = rest
                .find('\0')
                .ok_or_else(|| StompError::MalformedFrame("missing NUL terminator".to_string()))?;
            (&rest[..end], &rest[end + 1..])
        }
    };

    Ok((
        Frame {
            command,
            headers,
            body: body.to_string(),
        },
        remaining,
    ))
}

fn escape_header(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\r' => out.push_str("\\r"),
            '\n' => out.push_str("\\n"),
            ':' => out.push_str("\\c"),
            _ => out.push(c),
        }
    }
    out
}

fn unescape_header(value: &str) -> Result<String> {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('r') => out.push('\r'),
            Some('n') => out.push('\n'),
            Some('c') => out.push(':'),
            other => {
                return Err(StompError::MalformedFrame(format!(
                    "undefined escape sequence \\{}",
                    other.map(String::from).unwrap_or_default()
                )))
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_parse() {
        assert_eq!("MESSAGE".parse::<FrameCommand>().unwrap(), FrameCommand::Message);
        assert_eq!("UNSUBSCRIBE".parse::<FrameCommand>().unwrap(), FrameCommand::Unsubscribe);
        assert!("message".parse::<FrameCommand>().is_err());
    }

    #[test]
    fn test_all_commands_have_unique_names() {
        let mut names: Vec<&str> = FrameCommand::ALL.iter().map(|c| c.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 15);
    }

    #[test]
    fn test_encode_send_frame() {
        let frame = Frame::new(FrameCommand::Send)
            .header("destination", "/app/hello")
            .body("{\"name\":\"x\"}");
        assert_eq!(
            frame.encode(),
            "SEND\ndestination:/app/hello\n\n{\"name\":\"x\"}\0"
        );
    }

    #[test]
    fn test_encode_escapes_headers() {
        let frame = Frame::new(FrameCommand::Send).header("note", "a:b\nc\\d");
        assert_eq!(frame.encode(), "SEND\nnote:a\\cb\\nc\\\\d\n\n\0");
    }

    #[test]
    fn test_encode_connect_does_not_escape() {
        let frame = Frame::new(FrameCommand::Connect).header("host", "localhost:8080");
        assert_eq!(frame.encode(), "CONNECT\nhost:localhost:8080\n\n\0");
    }

    #[test]
    fn test_decode_message() {
        let input = "MESSAGE\r\nsubscription:sub-0\r\ndestination:/topic/greetings\r\n\r\nhello\0";
        let frames = Frame::decode_all(input).unwrap();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].command, FrameCommand::Message);
        assert_eq!(frames[0].get_header("destination"), Some("/topic/greetings"));
        assert_eq!(frames[0].body, "hello");
    }

    #[test]
    fn test_decode_repeated_header_first_wins() {
        let input = "MESSAGE\nfoo:first\nfoo:second\n\n\0";
        let frames = Frame::decode_all(input).unwrap();
        assert_eq!(frames[0].get_header("foo"), Some("first"));
        assert_eq!(frames[0].headers.len(), 2);
    }

    #[test]
    fn test_decode_content_length_allows_nul_in_body() {
        let input = "MESSAGE\ncontent-length:3\n\na\0b\0";
        let frames = Frame::decode_all(input).unwrap();
        assert_eq!(frames[0].body, "a\0b");
    }

    #[test]
    fn test_decode_skips_heartbeats_and_reads_multiple() {
        let input = "\n\nRECEIPT\nreceipt-id:1\n\n\0\nERROR\nmessage:bad\n\noops\0\n";
        let frames = Frame::decode_all(input).unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].command, FrameCommand::Receipt);
        assert_eq!(frames[1].command, FrameCommand::Error);
        assert_eq!(frames[1].body, "oops");
    }

    #[test]
    fn test_decode_heartbeat_only() {
        assert!(Frame::decode_all("\n").unwrap().is_empty());
    }

    #[test]
    fn test_decode_unescapes_headers() {
        let input = "MESSAGE\nnote:a\\cb\\nc\n\n\0";
        let frames = Frame::decode_all(input).unwrap();
        assert_eq!(frames[0].get_header("note"), Some("a:b\nc"));
    }

    #[test]
    fn test_decode_connected_keeps_raw_headers() {
        let input = "CONNECTED\nserver:broker\\c1\n\n\0";
        let frames = Frame::decode_all(input).unwrap();
        assert_eq!(frames[0].get_header("server"), Some("broker\\c1"));
    }

    #[test]
    fn test_decode_errors() {
        assert!(matches!(
            Frame::decode_all("PING\n\n\0"),
            Err(StompError::UnknownCommand(_))
        ));
        assert!(matches!(
            Frame::decode_all("MESSAGE\nbroken\n\n\0"),
            Err(StompError::MalformedFrame(_))
        ));
        assert!(matches!(
            Frame::decode_all("MESSAGE\n\nno terminator"),
            Err(StompError::MalformedFrame(_))
        ));
        assert!(matches!(
            Frame::decode_all("MESSAGE\nbad:\\t\n\n\0"),
            Err(StompError::MalformedFrame(_))
        ));
        assert!(matches!(
            Frame::decode_all("MESSAGE\ncontent-length:10\n\nabc\0"),
            Err(StompError::MalformedFrame(_))
        ));
    }

    #[test]
    fn test_headers_summary() {
        let frame = Frame::new(FrameCommand::Connected)
            .header("version", "1.2")
            .header("heart-beat", "0,0");
        assert_eq!(frame.headers_summary(), "version: 1.2, heart-beat: 0,0");
    }
}
