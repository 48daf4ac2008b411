//! Minimal STOMP 1.2 framing for the notification channel.
//!
//! The client only ever sends `CONNECT` and `SUBSCRIBE` and only ever
//! receives `CONNECTED` and `MESSAGE`, so this stays a small codec:
//! no transactions, no acks, no header escaping (none of the headers
//! we exchange contain reserved characters).

use serde::Deserialize;

pub const NULL: char = '\0';

/// Destination the file service publishes per-user notifications on.
pub fn notification_destination(username: &str) -> String {
    format!("/user/{username}/queue/notifications")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub command: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl Frame {
    pub fn new(command: &str) -> Self {
        Self {
            command: command.to_string(),
            headers: Vec::new(),
            body: String::new(),
        }
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Wire form: command line, header lines, blank line, body, NUL.
    pub fn encode(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.command);
        out.push('\n');
        for (name, value) in &self.headers {
            out.push_str(name);
            out.push(':');
            out.push_str(value);
            out.push('\n');
        }
        out.push('\n');
        out.push_str(&self.body);
        out.push(NULL);
        out
    }

    /// Parses one inbound frame. Returns `None` for heart-beats (bare
    /// newlines) and anything without a command line.
    pub fn parse(raw: &str) -> Option<Frame> {
        let raw = raw.trim_end_matches(NULL);
        let mut lines = raw.split('\n');
        let command = loop {
            match lines.next() {
                Some("") | Some("\r") => continue,
                Some(line) => break line.trim_end_matches('\r').to_string(),
                None => return None,
            }
        };

        let mut headers = Vec::new();
        for line in lines.by_ref() {
            let line = line.trim_end_matches('\r');
            if line.is_empty() {
                break;
            }
            let (name, value) = line.split_once(':')?;
            headers.push((name.to_string(), value.to_string()));
        }

        let body = lines.collect::<Vec<_>>().join("\n");
        Some(Frame {
            command,
            headers,
            body,
        })
    }
}

pub fn connect_frame() -> Frame {
    Frame::new("CONNECT")
        .header("accept-version", "1.2")
        .header("heart-beat", "0,0")
}

pub fn subscribe_frame(id: &str, destination: &str) -> Frame {
    Frame::new("SUBSCRIBE")
        .header("id", id)
        .header("destination", destination)
}

#[derive(Debug, Deserialize)]
struct Notification {
    status: Option<String>,
}

/// Best-effort look at a notification body: true when it is JSON with
/// `"status": "deleted"`. Anything else (junk included) is ignored.
pub fn is_deleted_notice(body: &str) -> bool {
    serde_json::from_str::<Notification>(body)
        .ok()
        .and_then(|notice| notice.status)
        .is_some_and(|status| status == "deleted")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_parse_round_trip() {
        for frame in [
            connect_frame(),
            subscribe_frame("sub-0", &notification_destination("maya")),
            Frame::new("MESSAGE")
                .header("destination", "/user/maya/queue/notifications")
                .header("message-id", "7"),
        ] {
            assert_eq!(Frame::parse(&frame.encode()), Some(frame));
        }
    }

    #[test]
    fn parse_extracts_body_before_nul() {
        let raw = "MESSAGE\ndestination:/user/maya/queue/notifications\n\n{\"status\":\"deleted\"}\0";
        let frame = Frame::parse(raw).unwrap();
        assert_eq!(frame.command, "MESSAGE");
        assert_eq!(frame.body, "{\"status\":\"deleted\"}");
        assert_eq!(
            frame.header_value("destination"),
            Some("/user/maya/queue/notifications")
        );
    }

    #[test]
    fn parse_tolerates_carriage_returns_and_leading_heartbeats() {
        let raw = "\n\nCONNECTED\r\nversion:1.2\r\n\r\n\0";
        let frame = Frame::parse(raw).unwrap();
        assert_eq!(frame.command, "CONNECTED");
        assert_eq!(frame.header_value("version"), Some("1.2"));
        assert_eq!(frame.body, "");
    }

    #[test]
    fn heartbeat_is_not_a_frame() {
        assert_eq!(Frame::parse("\n"), None);
        assert_eq!(Frame::parse(""), None);
    }

    #[test]
    fn missing_header_lookup_is_none() {
        let frame = connect_frame();
        assert_eq!(frame.header_value("receipt"), None);
    }

    #[test]
    fn deleted_notice_detection() {
        assert!(is_deleted_notice("{\"status\":\"deleted\",\"fileId\":3}"));
        assert!(!is_deleted_notice("{\"status\":\"printed\"}"));
        assert!(!is_deleted_notice("{}"));
        assert!(!is_deleted_notice("not json at all"));
    }

    #[test]
    fn destination_embeds_username() {
        assert_eq!(
            notification_destination("maya"),
            "/user/maya/queue/notifications"
        );
    }
}
