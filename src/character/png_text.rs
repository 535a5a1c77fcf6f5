use std::fmt;

use crc32fast::Hasher;

pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Chunk type carrying uncompressed Latin-1 keyword/text pairs.
pub const TEXT_CHUNK: [u8; 4] = *b"tEXt";

const END_CHUNK: [u8; 4] = *b"IEND";

/// Largest chunk length the PNG format allows (2^31 - 1).
const MAX_CHUNK_LENGTH: usize = 0x7FFF_FFFF;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PngTextError {
    InvalidSignature,
    TruncatedChunk,
    InvalidChunkLength,
    InvalidCrc { chunk_type: [u8; 4] },
    MissingEnd,
}

impl fmt::Display for PngTextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PngTextError::InvalidSignature => write!(f, "file is not a PNG"),
            PngTextError::TruncatedChunk => write!(f, "unexpected end of PNG data"),
            PngTextError::InvalidChunkLength => {
                write!(f, "chunk length exceeds PNG bounds")
            }
            PngTextError::InvalidCrc { chunk_type } => {
                write!(
                    f,
                    "chunk {} failed CRC validation",
                    display_chunk_type(chunk_type)
                )
            }
            PngTextError::MissingEnd => write!(f, "PNG ended without an IEND chunk"),
        }
    }
}

impl std::error::Error for PngTextError {}

/// One framed chunk borrowed from the source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PngChunk<'a> {
    pub chunk_type: [u8; 4],
    pub data: &'a [u8],
}

impl PngChunk<'_> {
    pub fn is_text(&self) -> bool {
        self.chunk_type == TEXT_CHUNK
    }

    pub fn type_name(&self) -> String {
        display_chunk_type(&self.chunk_type)
    }
}

/// Lazy walk over the chunks of a PNG buffer, in file order.
///
/// The iterator is `Clone`: a clone resumes from the same position, and
/// calling [`png_chunks`] again on the same buffer yields the same sequence.
#[derive(Debug, Clone)]
pub struct PngChunks<'a> {
    data: &'a [u8],
    offset: usize,
    finished: bool,
}

/// Validate the PNG signature and return an iterator over the chunks.
pub fn png_chunks(data: &[u8]) -> Result<PngChunks<'_>, PngTextError> {
    if data.len() < PNG_SIGNATURE.len() || data[..PNG_SIGNATURE.len()] != PNG_SIGNATURE {
        return Err(PngTextError::InvalidSignature);
    }

    Ok(PngChunks {
        data,
        offset: PNG_SIGNATURE.len(),
        finished: false,
    })
}

impl<'a> PngChunks<'a> {
    fn read_chunk(&mut self) -> Result<PngChunk<'a>, PngTextError> {
        let data = self.data;
        let offset = self.offset;
        if offset + 12 > data.len() {
            return Err(PngTextError::TruncatedChunk);
        }

        let length = read_u32(&data[offset..offset + 4]) as usize;
        if length > MAX_CHUNK_LENGTH {
            return Err(PngTextError::InvalidChunkLength);
        }
        let mut chunk_type = [0u8; 4];
        chunk_type.copy_from_slice(&data[offset + 4..offset + 8]);

        let data_start = offset + 8;
        let data_end = data_start
            .checked_add(length)
            .ok_or(PngTextError::InvalidChunkLength)?;
        let crc_end = data_end
            .checked_add(4)
            .ok_or(PngTextError::InvalidChunkLength)?;
        if crc_end > data.len() {
            return Err(PngTextError::TruncatedChunk);
        }

        let chunk_data = &data[data_start..data_end];
        let actual_crc = read_u32(&data[data_end..crc_end]);
        let mut hasher = Hasher::new();
        hasher.update(&chunk_type);
        hasher.update(chunk_data);
        if actual_crc != hasher.finalize() {
            return Err(PngTextError::InvalidCrc { chunk_type });
        }

        self.offset = crc_end;
        Ok(PngChunk {
            chunk_type,
            data: chunk_data,
        })
    }
}

impl<'a> Iterator for PngChunks<'a> {
    type Item = Result<PngChunk<'a>, PngTextError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        if self.offset >= self.data.len() {
            self.finished = true;
            return Some(Err(PngTextError::MissingEnd));
        }

        match self.read_chunk() {
            Ok(chunk) => {
                if chunk.chunk_type == END_CHUNK {
                    self.finished = true;
                }
                Some(Ok(chunk))
            }
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}

/// A decoded `tEXt` chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChunk {
    pub keyword: String,
    pub text: String,
}

impl TextChunk {
    /// Split a `tEXt` payload at its first NUL. Both halves are Latin-1.
    /// A payload without a separator is treated as a bare keyword.
    pub fn decode(payload: &[u8]) -> Self {
        let (keyword_bytes, value_bytes) = match memchr::memchr(0, payload) {
            Some(null_pos) => (&payload[..null_pos], &payload[null_pos + 1..]),
            None => (payload, &payload[payload.len()..]),
        };

        TextChunk {
            keyword: latin1(keyword_bytes),
            text: latin1(value_bytes),
        }
    }
}

/// Iterate the decoded `tEXt` chunks of a PNG; other chunk types are
/// walked (and CRC-checked) but skipped.
pub fn text_chunks(
    data: &[u8],
) -> Result<impl Iterator<Item = Result<TextChunk, PngTextError>> + '_, PngTextError> {
    let chunks = png_chunks(data)?;
    Ok(chunks.filter_map(|chunk| match chunk {
        Ok(chunk) if chunk.is_text() => Some(Ok(TextChunk::decode(chunk.data))),
        Ok(_) => None,
        Err(err) => Some(Err(err)),
    }))
}

fn read_u32(bytes: &[u8]) -> u32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(bytes);
    u32::from_be_bytes(buf)
}

fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

fn display_chunk_type(chunk_type: &[u8; 4]) -> String {
    chunk_type
        .iter()
        .map(|&b| {
            if (32..=126).contains(&b) {
                b as char
            } else {
                '.'
            }
        })
        .collect()
}
