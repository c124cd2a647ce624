// src/static_server.rs

// dependencies
use crate::config::ServerConfig;
use crate::errors::ServeError;
use std::borrow::Cow;
use std::fs::canonicalize;
use std::path::{Path, PathBuf};

pub const WASM_MIME_TYPE: &str = "application/wasm";
const TEXT_MIME_TYPE: &str = "text/plain; charset=utf-8";
const HTML_MIME_TYPE: &str = "text/html; charset=utf-8";

// struct type which represents the static file server
#[derive(Debug, Clone)]
pub struct StaticServer {
    root_dir: PathBuf,
}

// struct type which represents the static file to be served
#[derive(Debug)]
pub struct StaticFile {
    pub body: Vec<u8>,
    pub mime_type: Cow<'static, str>,
}

/// What a request path resolves to under the serving root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    File(PathBuf),
    Listing(PathBuf),
    /// The request must be repeated at this location (trailing slash fixups).
    Redirect(String),
}

/// Everything the server can send back for a successfully resolved path.
#[derive(Debug)]
pub enum Asset {
    File(StaticFile),
    Listing(String),
    Redirect(String),
}

/// A fully formed answer to one request, independent of the HTTP transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl AssetResponse {
    fn new(status: u16, content_type: &str, body: Vec<u8>) -> Self {
        AssetResponse {
            status,
            headers: vec![("Content-Type".to_string(), content_type.to_string())],
            body,
        }
    }

    // insert or replace a header, matching names case-insensitively
    pub fn set_header(&mut self, name: &str, value: &str) {
        match self
            .headers
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
        {
            Some(slot) => slot.1 = value.to_string(),
            None => self.headers.push((name.to_string(), value.to_string())),
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

// methods for the StaticServer type
impl StaticServer {
    // create a static file server from it's configuration values
    pub fn from_config(config: &ServerConfig) -> Self {
        StaticServer {
            root_dir: config.root_dir.clone(),
        }
    }

    // resolve the incoming request path to a file, a directory listing or a redirect
    pub fn resolve(&self, request_path: &str) -> Result<Target, ServeError> {
        let decoded = decode_request_path(request_path)?;

        // `..` may only climb back out of segments it follows
        let mut segments: Vec<&str> = Vec::new();
        for segment in decoded.split('/') {
            match segment {
                "" | "." => continue,
                ".." => {
                    segments.pop().ok_or(ServeError::Forbidden)?;
                }
                _ => segments.push(segment),
            }
        }

        let canonical_root = canonicalize(&self.root_dir)?;
        let full_path = segments
            .iter()
            .fold(self.root_dir.clone(), |path, segment| path.join(segment));
        let canonical_full = confine(&canonical_root, &full_path)?;

        let raw_path = strip_query(request_path);
        let wants_dir = decoded.ends_with('/');

        if canonical_full.is_dir() {
            if !wants_dir {
                let location = redirect_location(request_path, &format!("{}/", raw_path));
                return Ok(Target::Redirect(location));
            }

            let index = canonical_full.join("index.html");
            if index.is_file() {
                return confine(&canonical_root, &index).map(Target::File);
            }
            return Ok(Target::Listing(canonical_full));
        }

        if !canonical_full.is_file() {
            return Err(ServeError::NotFound);
        }

        if wants_dir && !segments.is_empty() {
            let trimmed = raw_path.trim_end_matches('/');
            return Ok(Target::Redirect(redirect_location(request_path, trimmed)));
        }

        Ok(Target::File(canonical_full))
    }

    // resolve and load whatever the request path names
    pub fn serve(&self, request_path: &str) -> Result<Asset, ServeError> {
        match self.resolve(request_path)? {
            Target::File(path) => read_file(&path).map(Asset::File),
            Target::Listing(dir) => list_directory(&dir).map(Asset::Listing),
            Target::Redirect(location) => Ok(Asset::Redirect(location)),
        }
    }

    /// Serves `request_path` (the raw request target, query string allowed) and
    /// applies the response header policy: no caching, any origin, and
    /// `application/wasm` for `.wasm` files.
    pub fn respond(&self, request_path: &str) -> AssetResponse {
        let mut response = match self.serve(request_path) {
            Ok(Asset::File(file)) => {
                let mut response = AssetResponse::new(200, &file.mime_type, file.body);
                if is_wasm_path(request_path) {
                    response.set_header("Content-Type", WASM_MIME_TYPE);
                }
                response
            }
            Ok(Asset::Listing(html)) => {
                AssetResponse::new(200, HTML_MIME_TYPE, html.into_bytes())
            }
            Ok(Asset::Redirect(location)) => {
                let body = format!(
                    "<a href=\"{}\">Moved Permanently</a>.\n",
                    escape_html(&location)
                );
                let mut response = AssetResponse::new(301, HTML_MIME_TYPE, body.into_bytes());
                response.set_header("Location", &location);
                response
            }
            Err(err) => {
                AssetResponse::new(err.status(), TEXT_MIME_TYPE, err.to_string().into_bytes())
            }
        };

        response.set_header("Cache-Control", "no-cache");
        response.set_header("Access-Control-Allow-Origin", "*");
        response
    }

    // utility to return the root dir
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }
}

// canonicalize a path and make sure it did not leave the root, e.g. through a symlink
fn confine(canonical_root: &Path, path: &Path) -> Result<PathBuf, ServeError> {
    let canonical = canonicalize(path).map_err(|_| ServeError::NotFound)?;

    if canonical.starts_with(canonical_root) {
        Ok(canonical)
    } else {
        Err(ServeError::Forbidden)
    }
}

// read the file from disk
fn read_file(path: &Path) -> Result<StaticFile, ServeError> {
    let body = std::fs::read(path).map_err(ServeError::Io)?;

    Ok(StaticFile {
        body,
        mime_type: guess_mime_type(path),
    })
}

// render a bare listing of a directory, sorted by name, directories marked with a slash
fn list_directory(dir: &Path) -> Result<String, ServeError> {
    let mut names: Vec<String> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| {
            let mut name = entry.file_name().to_string_lossy().into_owned();
            if entry.path().is_dir() {
                name.push('/');
            }
            name
        })
        .collect();
    names.sort();

    let mut html = String::from("<!doctype html>\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width\">\n<pre>\n");
    for name in &names {
        html.push_str(&format!(
            "<a href=\"{}\">{}</a>\n",
            escape_html(&encode_path_segment(name)),
            escape_html(name)
        ));
    }
    html.push_str("</pre>\n");

    Ok(html)
}

// helper function to guess the mime type, text types are declared utf-8
pub fn guess_mime_type(path: &Path) -> Cow<'static, str> {
    let mime = mime_guess::from_path(path).first_or_octet_stream();

    let is_text = mime.type_() == mime_guess::mime::TEXT;
    if is_text && mime.get_param(mime_guess::mime::CHARSET).is_none() {
        Cow::Owned(format!("{}; charset=utf-8", mime))
    } else {
        Cow::Owned(mime.to_string())
    }
}

// true when the path part of the request target names a .wasm file
pub fn is_wasm_path(request_path: &str) -> bool {
    strip_query(request_path).ends_with(".wasm")
}

fn strip_query(request_path: &str) -> &str {
    request_path
        .split(['?', '#'])
        .next()
        .unwrap_or(request_path)
}

// keep the query string when sending the client elsewhere
fn redirect_location(request_path: &str, new_path: &str) -> String {
    let new_path = if new_path.is_empty() { "/" } else { new_path };

    match request_path.split_once('?') {
        Some((_, query)) => format!("{}?{}", new_path, query),
        None => new_path.to_string(),
    }
}

// helper function to percent-decode the path part of a request target
fn decode_request_path(request_path: &str) -> Result<String, ServeError> {
    let raw = strip_query(request_path).as_bytes();
    let mut decoded = Vec::with_capacity(raw.len());

    let mut i = 0;
    while i < raw.len() {
        if raw[i] == b'%' {
            let hex = raw
                .get(i + 1..i + 3)
                .filter(|hex| hex.iter().all(u8::is_ascii_hexdigit))
                .ok_or(ServeError::BadRequest)?;
            let hex = std::str::from_utf8(hex).map_err(|_| ServeError::BadRequest)?;
            let byte = u8::from_str_radix(hex, 16).map_err(|_| ServeError::BadRequest)?;
            decoded.push(byte);
            i += 3;
        } else {
            decoded.push(raw[i]);
            i += 1;
        }
    }

    String::from_utf8(decoded).map_err(|_| ServeError::BadRequest)
}

// percent-encode a listing entry so it is a single relative path segment
fn encode_path_segment(name: &str) -> String {
    let mut encoded = String::with_capacity(name.len());
    let (stem, slash) = match name.strip_suffix('/') {
        Some(stem) => (stem, "/"),
        None => (name, ""),
    };

    for byte in stem.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded.push_str(slash);

    // a name like "a:b" would otherwise read as a URL scheme
    if encoded.contains(':') {
        encoded.insert_str(0, "./");
    }
    encoded
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&#34;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
