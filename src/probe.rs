//! Content-based file type detection.
//!
//! Inputs are classified by their leading bytes, never by extension. A
//! configured set of signature names marks formats that must be normalized
//! before they can go through the concat demuxer.

use async_trait::async_trait;
use std::collections::HashSet;
use std::path::Path;
use tokio::io::AsyncReadExt;
use tracing::debug;

use crate::config::ProbeConfig;
use crate::error::{Result, ConvertError};

const ASF_HEADER_GUID: [u8; 16] = [
    0x30, 0x26, 0xB2, 0x75, 0x8E, 0x66, 0xCF, 0x11,
    0xA6, 0xD9, 0x00, 0xAA, 0x00, 0x62, 0xCE, 0x6C,
];
const EBML_MAGIC: [u8; 4] = [0x1A, 0x45, 0xDF, 0xA3];
const MPEG_PACK_START: [u8; 4] = [0x00, 0x00, 0x01, 0xBA];
const TS_PACKET_SIZE: usize = 188;
const TS_SYNC_BYTE: u8 = 0x47;

/// Bytes needed to tell every known signature apart
const SNIFF_LEN: usize = TS_PACKET_SIZE + 1;

/// Detected file type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileSignature {
    Asf,
    Matroska,
    IsoMedia,
    Avi,
    Flv,
    MpegProgramStream,
    MpegTransportStream,
    Unknown,
}

impl FileSignature {
    /// Human-readable name, as used in `probe.problematic_formats`
    pub fn name(&self) -> &'static str {
        match self {
            FileSignature::Asf => "Microsoft ASF",
            FileSignature::Matroska => "Matroska data",
            FileSignature::IsoMedia => "ISO Media",
            FileSignature::Avi => "RIFF (little-endian) data, AVI",
            FileSignature::Flv => "Macromedia Flash Video",
            FileSignature::MpegProgramStream => "MPEG sequence",
            FileSignature::MpegTransportStream => "MPEG transport stream data",
            FileSignature::Unknown => "data",
        }
    }

    /// Match the leading bytes of a file against the signature table
    pub fn from_bytes(head: &[u8]) -> Self {
        if head.starts_with(&ASF_HEADER_GUID) {
            return FileSignature::Asf;
        }
        if head.starts_with(&EBML_MAGIC) {
            return FileSignature::Matroska;
        }
        if head.len() >= 8 && &head[4..8] == b"ftyp" {
            return FileSignature::IsoMedia;
        }
        if head.len() >= 12 && &head[0..4] == b"RIFF" && &head[8..12] == b"AVI " {
            return FileSignature::Avi;
        }
        if head.starts_with(b"FLV") {
            return FileSignature::Flv;
        }
        if head.starts_with(&MPEG_PACK_START) {
            return FileSignature::MpegProgramStream;
        }
        if head.len() > TS_PACKET_SIZE
            && head[0] == TS_SYNC_BYTE
            && head[TS_PACKET_SIZE] == TS_SYNC_BYTE
        {
            return FileSignature::MpegTransportStream;
        }
        FileSignature::Unknown
    }
}

impl std::fmt::Display for FileSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Source of file signatures
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FormatProbe: Send + Sync {
    async fn signature(&self, path: &Path) -> Result<FileSignature>;
}

/// Reads the first bytes of the file and matches them against known magic numbers
pub struct SignatureProbe;

#[async_trait]
impl FormatProbe for SignatureProbe {
    async fn signature(&self, path: &Path) -> Result<FileSignature> {
        let file = tokio::fs::File::open(path).await.map_err(|e| ConvertError::Probe {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let mut head = Vec::with_capacity(SNIFF_LEN);
        file.take(SNIFF_LEN as u64)
            .read_to_end(&mut head)
            .await
            .map_err(|e| ConvertError::Probe {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let signature = FileSignature::from_bytes(&head);
        debug!("{} detected as {}", path.display(), signature);
        Ok(signature)
    }
}

/// Decides whether an input must be pre-converted before concatenation
pub struct FormatClassifier {
    probe: Box<dyn FormatProbe>,
    problematic: HashSet<String>,
}

impl FormatClassifier {
    pub fn new(probe: Box<dyn FormatProbe>, config: &ProbeConfig) -> Self {
        Self {
            probe,
            problematic: config.problematic_formats.iter().cloned().collect(),
        }
    }

    pub async fn is_problematic(&self, path: &Path) -> Result<bool> {
        let signature = self.probe.signature(path).await?;
        Ok(self.problematic.contains(signature.name()))
    }
}
