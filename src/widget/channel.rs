//! Cross-origin control channel.

use std::io::Write;

use serde_json::{json, Value};

use super::WidgetError;

/// Delivers a control message to an embedded widget frame.
///
/// Delivery is fire-and-forget: no acknowledgement is awaited.
pub trait MessageChannel {
    fn post(&mut self, message: &Value, target_origin: &str) -> Result<(), WidgetError>;
}

/// Writes each message as one JSON line.
///
/// Each line is an envelope `{"targetOrigin": ..., "message": ...}`, the
/// shape a webview bridge needs to forward it with `postMessage`.
#[derive(Debug)]
pub struct WriterChannel<W: Write> {
    writer: W,
}

impl<W: Write> WriterChannel<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> MessageChannel for WriterChannel<W> {
    fn post(&mut self, message: &Value, target_origin: &str) -> Result<(), WidgetError> {
        let envelope = json!({
            "targetOrigin": target_origin,
            "message": message,
        });
        serde_json::to_writer(&mut self.writer, &envelope)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writer_channel_writes_envelope_line() {
        let mut channel = WriterChannel::new(Vec::new());
        channel
            .post(&json!({"giscus": {"setConfig": {"theme": "dark"}}}), "https://giscus.app")
            .unwrap();
        channel.post(&json!({}), "https://giscus.app").unwrap();

        let out = String::from_utf8(channel.into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["targetOrigin"], "https://giscus.app");
        assert_eq!(first["message"]["giscus"]["setConfig"]["theme"], "dark");
    }
}
