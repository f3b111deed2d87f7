//! The upload payload: a minimal but structurally valid 1x1 RGBA PNG,
//! small enough to keep in memory as a constant. The server only checks
//! the file signature, so nothing fancier is needed.

/// File name the logo is uploaded under.
pub const TEST_LOGO_FILENAME: &str = "test-logo.png";

/// MIME type of the logo part.
pub const TEST_LOGO_MIME: &str = "image/png";

/// 8-byte PNG signature, IHDR for a 1x1 8-bit RGBA image, a 10-byte
/// zlib-deflated IDAT and the IEND trailer. 67 bytes in total.
pub const TEST_LOGO_PNG: [u8; 67] = [
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, // signature
    0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52, // IHDR, length 13
    0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, // 1x1 pixels
    0x08, 0x06, 0x00, 0x00, 0x00, 0x1F, 0x15, 0xC4, // bit depth 8, RGBA, crc
    0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, // IDAT, length 10
    0x54, 0x78, 0x9C, 0x63, 0x00, 0x01, 0x00, 0x00, // deflate stream
    0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, // crc
    0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, // IEND
    0x42, 0x60, 0x82,
];
