//! Shared helpers for the data crate's integration tests.

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::sync::mpsc::{self, Receiver};
use std::thread;

/// A one-shot HTTP server answering a single request with a canned body.
pub struct CannedServer {
    /// Base URL of the server, without a trailing slash.
    pub url: String,
    request_line: Receiver<String>,
}

impl CannedServer {
    /// Start a server that answers the next request with `status` and the
    /// JSON `body`.
    pub fn start(status: u16, body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap_or_else(|err| {
            panic!("bind canned server: {err}");
        });
        let address = listener
            .local_addr()
            .unwrap_or_else(|err| panic!("read canned server address: {err}"));
        let (sender, receiver) = mpsc::channel();
        let response = format!(
            "HTTP/1.1 {status} Canned\r\nContent-Type: application/json\r\n\
             Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        thread::spawn(move || {
            let Ok((mut stream, _)) = listener.accept() else {
                return;
            };
            let mut reader = BufReader::new(match stream.try_clone() {
                Ok(read_half) => read_half,
                Err(_) => return,
            });
            let mut request_line = String::new();
            if reader.read_line(&mut request_line).is_err() {
                return;
            }
            let mut header = String::new();
            while reader.read_line(&mut header).is_ok_and(|read| read > 2) {
                header.clear();
            }
            let _ = stream.write_all(response.as_bytes());
            let _ = stream.flush();
            let _ = sender.send(request_line.trim_end().to_owned());
        });
        Self {
            url: format!("http://{address}"),
            request_line: receiver,
        }
    }

    /// Request line received by the server, such as
    /// `GET /geocode?place_id=abc HTTP/1.1`.
    pub fn request_line(&self) -> String {
        self.request_line
            .recv()
            .unwrap_or_else(|err| panic!("canned server did not record a request: {err}"))
    }
}
