use std::io::{BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::thread;

/// Canned behavior for one request path on the fixture server.
#[derive(Debug, Clone)]
pub enum Route {
    /// 200 with an HTML body.
    Html(String),
    /// Empty response with the given status code.
    Status(u16),
    /// Accept the connection and close it without answering.
    Abort,
}

/// Minimal blocking HTTP server for pipeline tests. Serves each connection
/// on its own thread so concurrent fetches do not serialize; unknown paths
/// get a 404.
pub struct FixtureServer {
    addr: SocketAddr,
}

impl FixtureServer {
    pub fn start(routes: Vec<(String, Route)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind fixture server");
        let addr = listener.local_addr().expect("fixture server addr");
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else {
                    continue;
                };
                let routes = routes.clone();
                thread::spawn(move || handle_connection(stream, &routes));
            }
        });
        Self { addr }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

fn handle_connection(mut stream: TcpStream, routes: &[(String, Route)]) {
    let Some(path) = read_request_path(&stream) else {
        return;
    };

    let route = routes
        .iter()
        .find(|(route_path, _)| *route_path == path)
        .map(|(_, route)| route.clone())
        .unwrap_or(Route::Status(404));

    match route {
        Route::Abort => {}
        Route::Status(code) => {
            let _ = stream.write_all(
                format!(
                    "HTTP/1.1 {code} Fixture\r\ncontent-length: 0\r\nconnection: close\r\n\r\n"
                )
                .as_bytes(),
            );
        }
        Route::Html(body) => {
            let _ = stream.write_all(
                format!(
                    "HTTP/1.1 200 OK\r\ncontent-type: text/html; charset=utf-8\r\n\
                     content-length: {}\r\nconnection: close\r\n\r\n{body}",
                    body.len()
                )
                .as_bytes(),
            );
        }
    }
    let _ = stream.flush();
}

fn read_request_path(stream: &TcpStream) -> Option<String> {
    let mut reader = BufReader::new(stream.try_clone().ok()?);
    let mut request_line = String::new();
    reader.read_line(&mut request_line).ok()?;
    let path = request_line.split_whitespace().nth(1)?.to_string();

    // Drain the headers so the client sees a complete exchange.
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).ok()? == 0 || line == "\r\n" || line == "\n" {
            break;
        }
    }

    Some(path)
}

/// An index page whose anchors point at the given profile hrefs.
pub fn index_page(hrefs: &[&str]) -> String {
    let anchors = hrefs
        .iter()
        .map(|href| format!("<a href=\"{href}\">link</a>"))
        .collect::<Vec<_>>()
        .join("\n");
    format!("<html><body><h1>Country Profiles</h1>\n{anchors}\n</body></html>")
}

pub fn profile_page(text: &str) -> String {
    format!("<html><body><main><p>{text}</p></main></body></html>")
}
