//! QRコード読取モジュール
//!
//! 画像ファイルを読み込み、グレースケールの描画面に展開してから
//! QRコードを検出する。描画面は1つをファイル間で使い回す。

use image::DynamicImage;
use meeting_qr_common::ScanError;
use std::path::Path;
use tracing::debug;

/// 描画面を持つQRデコーダ
///
/// `decode_*` は読み取ったテキストを所有Stringとして返すので、
/// 次のファイルで描画面を上書きしても結果は残る。
#[derive(Debug, Default)]
pub struct QrDecoder {
    surface: Vec<u8>,
    width: usize,
    height: usize,
}

impl QrDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// ファイルを非同期で読み込んでデコード
    pub async fn decode_file(&mut self, path: &Path) -> Result<String, ScanError> {
        let bytes = load_image_bytes(path).await?;
        self.decode_bytes(&bytes)
    }

    /// エンコード済み画像（PNG/JPEG等）をデコード
    pub fn decode_bytes(&mut self, bytes: &[u8]) -> Result<String, ScanError> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| ScanError::ImageLoadFailed(e.to_string()))?;
        self.draw(&img);
        self.detect()
    }

    fn draw(&mut self, img: &DynamicImage) {
        let luma = img.to_luma8();
        self.width = luma.width() as usize;
        self.height = luma.height() as usize;
        self.surface.clear();
        self.surface.extend_from_slice(luma.as_raw());
    }

    fn detect(&self) -> Result<String, ScanError> {
        let (width, height) = (self.width, self.height);
        if width == 0 || height == 0 {
            return Err(ScanError::DecodeNotFound);
        }

        let surface = &self.surface;
        let mut prepared =
            rqrr::PreparedImage::prepare_from_greyscale(width, height, |x, y| surface[y * width + x]);

        for grid in prepared.detect_grids() {
            match grid.decode() {
                Ok((_meta, content)) => return Ok(content),
                Err(e) => debug!(error = ?e, "QRグリッドのデコードに失敗"),
            }
        }

        Err(ScanError::DecodeNotFound)
    }
}

/// 画像ファイルの読み込み
pub async fn load_image_bytes(path: &Path) -> Result<Vec<u8>, ScanError> {
    tokio::fs::read(path)
        .await
        .map_err(|e| ScanError::ImageLoadFailed(format!("{}: {}", path.display(), e)))
}
