//! 文本编码
//!
//! 写入按配置编码；读取根据 BOM 识别 UTF-16（大/小端）或 UTF-8。

use crate::config::TextEncoding;
use crate::error::{Error, Result};
use byteorder::{BigEndian, ByteOrder, LittleEndian, WriteBytesExt};

const BOM_UTF16_BE: [u8; 2] = [0xFE, 0xFF];
const BOM_UTF16_LE: [u8; 2] = [0xFF, 0xFE];
const BOM_UTF8: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// 编码文本
pub fn encode(text: &str, encoding: TextEncoding) -> Vec<u8> {
    match encoding {
        TextEncoding::Utf8 => text.as_bytes().to_vec(),
        TextEncoding::Utf16 => {
            let mut bytes = Vec::with_capacity(2 + text.len() * 2);
            bytes.extend_from_slice(&BOM_UTF16_BE);
            for unit in text.encode_utf16() {
                // 写入 Vec 不会失败
                let _ = bytes.write_u16::<BigEndian>(unit);
            }
            bytes
        }
    }
}

fn decode_utf16<B: ByteOrder>(bytes: &[u8]) -> Result<String> {
    if bytes.len() % 2 != 0 {
        return Err(Error::ParseError("UTF-16 数据长度不是偶数".to_string()));
    }
    let units: Vec<u16> = bytes.chunks_exact(2).map(B::read_u16).collect();
    String::from_utf16(&units).map_err(|e| Error::ParseError(format!("UTF-16 解码失败: {}", e)))
}

/// 解码文本
pub fn decode(bytes: &[u8]) -> Result<String> {
    if let Some(rest) = bytes.strip_prefix(&BOM_UTF16_BE) {
        decode_utf16::<BigEndian>(rest)
    } else if let Some(rest) = bytes.strip_prefix(&BOM_UTF16_LE) {
        decode_utf16::<LittleEndian>(rest)
    } else {
        let rest = bytes.strip_prefix(&BOM_UTF8).unwrap_or(bytes);
        String::from_utf8(rest.to_vec())
            .map_err(|e| Error::ParseError(format!("UTF-8 解码失败: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf16_layout() {
        let bytes = encode("graph 图", TextEncoding::Utf16);
        assert_eq!(&bytes[..4], &[0xFE, 0xFF, 0x00, b'g']);
        assert_eq!(decode(&bytes).unwrap(), "graph 图");
    }

    #[test]
    fn test_utf16_little_endian() {
        let mut bytes = BOM_UTF16_LE.to_vec();
        for unit in "ok".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        assert_eq!(decode(&bytes).unwrap(), "ok");
    }

    #[test]
    fn test_utf8_with_and_without_bom() {
        assert_eq!(decode("abc".as_bytes()).unwrap(), "abc");
        let mut bytes = BOM_UTF8.to_vec();
        bytes.extend_from_slice("abc".as_bytes());
        assert_eq!(decode(&bytes).unwrap(), "abc");
    }

    #[test]
    fn test_truncated_utf16() {
        let bytes = [0xFE, 0xFF, 0x00];
        assert!(decode(&bytes).is_err());
    }
}
