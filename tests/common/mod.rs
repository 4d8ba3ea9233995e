//! Shared fixtures for integration tests.
#![allow(dead_code)]

use image::{Rgba, RgbaImage};
use std::path::{Path, PathBuf};

/// Writes a solid-colour PNG.
pub fn write_png(path: &Path, width: u32, height: u32, color: [u8; 4]) -> PathBuf {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    RgbaImage::from_pixel(width, height, Rgba(color))
        .save(path)
        .unwrap();
    path.to_path_buf()
}

/// Writes a small executable script.
pub fn write_exe(path: &Path) -> PathBuf {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, b"#!/bin/sh\necho demo\n").unwrap();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }
    path.to_path_buf()
}

/// Writes a minimal (empty) WebAssembly module.
pub fn write_wasm(path: &Path) -> PathBuf {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, WASM_HEADER).unwrap();
    path.to_path_buf()
}

pub const WASM_HEADER: &[u8] = b"\0asm\x01\0\0\0";

/// Finds a port nothing is listening on.
pub fn free_port() -> u16 {
    let listener = std::net::TcpListener::bind(("0.0.0.0", 0)).unwrap();
    listener.local_addr().unwrap().port()
}

/// Whether `port` can currently be bound on all interfaces.
pub fn port_is_free(port: u16) -> bool {
    std::net::TcpListener::bind(("0.0.0.0", port)).is_ok()
}
