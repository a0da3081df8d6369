//! # Payment Code Encoder
//!
//! ESC/POS rendering of the bill's payment text as a QR code, plus saving
//! the result next to the other receipts.
//!
//! ## Byte Layout
//! ```text
//! ESC @                     initialise printer
//! ESC a 1                   centre
//! GS ( k  fn 165            model 2
//! GS ( k  fn 167            module size (1-16 dots)
//! GS ( k  fn 169            error correction L
//! GS ( k  fn 180 + data     store payment text (UTF-8)
//! GS ( k  fn 181            print
//! ESC d 3                   feed
//! GS V 1                    partial cut
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use bistro_core::{EncodedReceipt, ReceiptEncoder};
use tracing::info;

/// Media type of the encoded payload.
pub const ESCPOS_MEDIA_TYPE: &str = "application/vnd.escpos";

/// Encodes payment text as an ESC/POS QR print job.
#[derive(Debug, Clone, Copy)]
pub struct EscPosQrEncoder {
    module_size: u8,
}

impl EscPosQrEncoder {
    /// `module_size` is clamped to the printer's 1-16 dot range.
    pub fn new(module_size: u8) -> Self {
        EscPosQrEncoder {
            module_size: module_size.clamp(1, 16),
        }
    }

    pub fn module_size(&self) -> u8 {
        self.module_size
    }
}

impl Default for EscPosQrEncoder {
    fn default() -> Self {
        Self::new(5)
    }
}

impl ReceiptEncoder for EscPosQrEncoder {
    fn encode(&self, text: &str) -> EncodedReceipt {
        let data = text.as_bytes();
        let mut buf = Vec::with_capacity(data.len() + 48);

        // ESC @, ESC a 1
        buf.extend_from_slice(&[0x1B, 0x40]);
        buf.extend_from_slice(&[0x1B, 0x61, 0x01]);

        // Function 165: Select model (Model 2)
        buf.extend_from_slice(&[0x1D, 0x28, 0x6B, 0x04, 0x00, 0x31, 0x41, 0x31, 0x00]);

        // Function 167: Set module size
        buf.extend_from_slice(&[0x1D, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x43, self.module_size]);

        // Function 169: Set error correction (L)
        buf.extend_from_slice(&[0x1D, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x45, 0x31]);

        // Function 180: Store data
        let len = data.len() + 3;
        let p_l = (len & 0xFF) as u8;
        let p_h = ((len >> 8) & 0xFF) as u8;
        buf.extend_from_slice(&[0x1D, 0x28, 0x6B, p_l, p_h, 0x31, 0x50, 0x30]);
        buf.extend_from_slice(data);

        // Function 181: Print
        buf.extend_from_slice(&[0x1D, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x51, 0x30]);

        // ESC d 3, GS V 1
        buf.extend_from_slice(&[0x1B, 0x64, 0x03]);
        buf.extend_from_slice(&[0x1D, 0x56, 0x01]);

        EncodedReceipt {
            media_type: ESCPOS_MEDIA_TYPE.to_string(),
            data: buf,
        }
    }
}

/// Writes an encoded receipt to `<dir>/<order_ref>.escpos`, creating `dir`
/// if needed.
pub fn save_receipt(dir: &Path, order_ref: &str, receipt: &EncodedReceipt) -> std::io::Result<PathBuf> {
    fs::create_dir_all(dir)?;

    let extension = if receipt.media_type == ESCPOS_MEDIA_TYPE {
        "escpos"
    } else {
        "bin"
    };
    let path = dir.join(format!("{}.{}", order_ref, extension));
    fs::write(&path, &receipt.data)?;

    info!(path = %path.display(), bytes = receipt.data.len(), "Payment code saved");
    Ok(path)
}
