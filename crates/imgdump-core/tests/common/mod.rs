#![allow(dead_code)]

pub mod image_server;

use image::{DynamicImage, ImageFormat, RgbImage};
use imgdump_core::fetch::{Endpoint, Session};
use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

/// A small valid PNG whose pixels depend on `seed`.
pub fn png(seed: u8) -> Vec<u8> {
    let img = RgbImage::from_fn(4, 4, |x, y| image::Rgb([seed, x as u8, y as u8]));
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img)
        .write_to(&mut out, ImageFormat::Png)
        .unwrap();
    out.into_inner()
}

/// First half of a valid PNG: what a truncated transfer looks like.
pub fn truncated_png(seed: u8) -> Vec<u8> {
    let mut bytes = png(seed);
    bytes.truncate(bytes.len() / 2);
    bytes
}

pub fn session(base_url: &str) -> Arc<Session> {
    let endpoint = Endpoint::parse(base_url, "ps2").unwrap();
    Arc::new(Session::new(
        endpoint,
        Duration::from_secs(5),
        Duration::from_secs(10),
    ))
}

/// URL of a local port with nothing listening on it.
pub fn dead_endpoint() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/", port)
}
