// src/http.rs

// dependencies
use crate::config::ServerConfig;
use crate::errors::ServeError;
use crate::static_server::{AssetResponse, StaticServer};
use std::io::Cursor;
use std::net::SocketAddr;
use std::sync::Arc;
use std::thread;
use tiny_http::{Header, Request, Response, Server};

/// HTTP front end for a [`StaticServer`].
///
/// Every request is answered on its own thread; handlers share nothing but the
/// read-only [`StaticServer`].
pub struct HttpServer {
    listener: Server,
    assets: Arc<StaticServer>,
    address: SocketAddr,
}

// methods for the HttpServer type
impl HttpServer {
    // bind the listener described by the configuration
    pub fn bind(config: ServerConfig) -> Result<Self, ServeError> {
        let listener =
            Server::http(config.address()).map_err(|err| ServeError::Bind(err.to_string()))?;

        Ok(HttpServer {
            listener,
            assets: Arc::new(StaticServer::from_config(&config)),
            address: config.address(),
        })
    }

    // the address actually bound, which differs from the configured one for port 0
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.listener.server_addr().to_ip()
    }

    /// Accepts requests until the listener shuts down.
    pub fn run(self) {
        let addr = self.local_addr().unwrap_or(self.address);
        log::info!(
            "Serving {} on http://{}",
            self.assets.root_dir().display(),
            addr
        );

        for request in self.listener.incoming_requests() {
            let assets = Arc::clone(&self.assets);
            thread::spawn(move || handle(&assets, request));
        }
    }
}

// answer a single request; write failures mean the client went away
fn handle(assets: &StaticServer, request: Request) {
    let response = assets.respond(request.url());
    let _ = request.respond(into_wire(response));
}

// convert an AssetResponse into a tiny_http response
fn into_wire(response: AssetResponse) -> Response<Cursor<Vec<u8>>> {
    let mut wire = Response::from_data(response.body).with_status_code(response.status);

    for (name, value) in &response.headers {
        if let Ok(header) = Header::from_bytes(name.as_bytes(), value.as_bytes()) {
            wire.add_header(header);
        }
    }

    wire
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_response_keeps_status_and_headers() {
        let response = AssetResponse {
            status: 404,
            headers: vec![
                ("Content-Type".to_string(), "text/plain".to_string()),
                ("Cache-Control".to_string(), "no-cache".to_string()),
            ],
            body: b"404 page not found".to_vec(),
        };

        let wire = into_wire(response);

        assert_eq!(wire.status_code().0, 404);
        assert!(
            wire.headers()
                .iter()
                .any(|h| h.field.equiv("Cache-Control") && h.value.as_str() == "no-cache")
        );
    }

    #[test]
    fn binding_a_taken_port_fails() {
        let config = ServerConfig::default()
            .with_host("127.0.0.1".parse().unwrap())
            .with_port(0);
        let first = HttpServer::bind(config.clone()).unwrap();
        let port = first.local_addr().unwrap().port();

        let second = HttpServer::bind(config.with_port(port));

        assert!(matches!(second, Err(ServeError::Bind(_))));
    }
}
