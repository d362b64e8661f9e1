//! テスト用画像の生成

#![allow(dead_code)]

use image::{DynamicImage, GrayImage, ImageFormat, Luma};
use qrcode::{Color, QrCode};
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// テキストを埋め込んだQRコードPNG
pub fn qr_png(text: &str) -> Vec<u8> {
    let code = QrCode::new(text.as_bytes()).expect("QRコード生成失敗");
    let modules = code.width();
    let colors = code.to_colors();
    let (scale, quiet) = (6u32, 4u32);
    let side = (modules as u32 + quiet * 2) * scale;

    let img = GrayImage::from_fn(side, side, |x, y| {
        let mx = (x / scale) as i64 - quiet as i64;
        let my = (y / scale) as i64 - quiet as i64;
        let dark = mx >= 0
            && my >= 0
            && (mx as usize) < modules
            && (my as usize) < modules
            && colors[my as usize * modules + mx as usize] == Color::Dark;
        Luma([if dark { 0 } else { 255 }])
    });

    encode_png(img)
}

/// QRコードのない白い画像
pub fn blank_png() -> Vec<u8> {
    encode_png(GrayImage::from_pixel(80, 80, Luma([255])))
}

fn encode_png(img: GrayImage) -> Vec<u8> {
    let mut buf = Vec::new();
    DynamicImage::ImageLuma8(img)
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .expect("PNGエンコード失敗");
    buf
}

pub fn write(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).expect("テストファイル書き込み失敗");
    path
}
